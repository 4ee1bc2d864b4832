//! Patient DTOs

use serde::{Deserialize, Serialize};

use crate::domain::patient::{AgeRange, Gender, SkinType};

/// Request to register a new anonymised patient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePatient {
    pub age_range: AgeRange,
    pub gender: Gender,
    pub skin_type: SkinType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_patient_body() {
        let body = serde_json::to_value(CreatePatient {
            age_range: AgeRange::From26To35,
            gender: Gender::Female,
            skin_type: SkinType::Light,
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({ "age_range": "26-35", "gender": "F", "skin_type": "Claire" })
        );
    }
}
