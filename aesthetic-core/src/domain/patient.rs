//! Patient domain model
//!
//! Patients are anonymised: the service only stores coarse demographic
//! attributes drawn from closed vocabularies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An anonymised patient record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,

    /// Service-generated pseudonym shown to practitioners
    pub anonymous_id: String,

    pub age_range: AgeRange,
    pub gender: Gender,
    pub skin_type: SkinType,

    #[serde(default, deserialize_with = "super::timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Age bracket accepted by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "18-25")]
    From18To25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-45")]
    From36To45,
    #[serde(rename = "46-55")]
    From46To55,
    #[serde(rename = "56-65")]
    From56To65,
    #[serde(rename = "65+")]
    Over65,
}

impl AgeRange {
    pub const ALL: [AgeRange; 6] = [
        AgeRange::From18To25,
        AgeRange::From26To35,
        AgeRange::From36To45,
        AgeRange::From46To55,
        AgeRange::From56To65,
        AgeRange::Over65,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AgeRange::From18To25 => "18-25",
            AgeRange::From26To35 => "26-35",
            AgeRange::From36To45 => "36-45",
            AgeRange::From46To55 => "46-55",
            AgeRange::From56To65 => "56-65",
            AgeRange::Over65 => "65+",
        }
    }
}

/// Patient gender as recorded by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "Autre")]
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Female, Gender::Male, Gender::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
            Gender::Other => "Autre",
        }
    }
}

/// Skin type vocabulary used by the rendering model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkinType {
    #[serde(rename = "Claire")]
    Light,
    #[serde(rename = "Mate")]
    Olive,
    #[serde(rename = "Foncée")]
    Dark,
    #[serde(rename = "Mixte")]
    Mixed,
}

impl SkinType {
    pub const ALL: [SkinType; 4] = [SkinType::Light, SkinType::Olive, SkinType::Dark, SkinType::Mixed];

    pub fn as_str(self) -> &'static str {
        match self {
            SkinType::Light => "Claire",
            SkinType::Olive => "Mate",
            SkinType::Dark => "Foncée",
            SkinType::Mixed => "Mixte",
        }
    }
}

/// Error returned when a vocabulary value is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} '{value}', expected one of: {expected}")]
pub struct ParseVocabularyError {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

macro_rules! vocabulary {
    ($ty:ident, $field:literal) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = ParseVocabularyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| ParseVocabularyError {
                        field: $field,
                        value: s.to_string(),
                        expected: $ty::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

vocabulary!(AgeRange, "age range");
vocabulary!(Gender, "gender");
vocabulary!(SkinType, "skin type");
