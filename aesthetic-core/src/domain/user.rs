//! Practitioner account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered practitioner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub speciality: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "super::timestamp::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}
