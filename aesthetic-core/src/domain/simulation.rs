//! Simulation domain types
//!
//! A simulation is one submitted rendering request. The service assigns its
//! identifier and drives its status; clients only ever observe it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque identifier of a simulation job
///
/// The service emits integer identifiers, but nothing on the client side
/// relies on that: the id is kept as text and only ever echoed back in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An identifier with no visible characters cannot address a job
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for JobId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::str::FromStr for JobId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl Serialize for JobId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) => serializer.serialize_i64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for JobId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => JobId::from(n),
            Raw::Str(s) => JobId(s),
        })
    }
}

/// Simulation record as reported by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub id: JobId,
    pub status: SimulationStatus,

    #[serde(default)]
    pub patient_id: Option<i64>,
    #[serde(default)]
    pub intervention_type: Option<String>,
    #[serde(default)]
    pub dose: Option<f64>,

    #[serde(default)]
    pub original_image_path: Option<String>,

    /// Rendered "after" image, present once the job completed
    #[serde(default)]
    pub generated_image_path: Option<String>,
    #[serde(default)]
    pub model_version: Option<String>,
    /// Generation time in seconds
    #[serde(default)]
    pub generation_time: Option<f64>,

    #[serde(default, deserialize_with = "super::timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "super::timestamp::deserialize_opt")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Simulation {
    /// Whether the service will not move this simulation any further
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Simulation processing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulationStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl SimulationStatus {
    /// `Completed` and `Failed` are final; no further transitions happen.
    pub fn is_terminal(self) -> bool {
        matches!(self, SimulationStatus::Completed | SimulationStatus::Failed)
    }
}

impl std::fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationStatus::Pending => write!(f, "pending"),
            SimulationStatus::Processing => write!(f, "processing"),
            SimulationStatus::Completed => write!(f, "completed"),
            SimulationStatus::Failed => write!(f, "failed"),
        }
    }
}
