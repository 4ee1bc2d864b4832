//! Intervention catalogue
//!
//! Each intervention type has an allowed dose window; the service rejects
//! simulation requests outside of it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalogue of intervention types keyed by their identifier (e.g. "lips")
pub type InterventionCatalog = BTreeMap<String, Intervention>;

/// A supported intervention type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    /// Human-readable name
    pub name: String,
    pub min_dose: f64,
    pub max_dose: f64,
    /// Dose unit ("ml", "unités", ...)
    pub unit: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Intervention {
    /// Bounds are inclusive
    pub fn dose_in_range(&self, dose: f64) -> bool {
        dose.is_finite() && dose >= self.min_dose && dose <= self.max_dose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lips() -> Intervention {
        Intervention {
            name: "Lip augmentation".to_string(),
            min_dose: 0.5,
            max_dose: 5.0,
            unit: "ml".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_dose_bounds_are_inclusive() {
        let lips = lips();
        assert!(lips.dose_in_range(0.5));
        assert!(lips.dose_in_range(5.0));
        assert!(!lips.dose_in_range(0.4));
        assert!(!lips.dose_in_range(5.1));
        assert!(!lips.dose_in_range(f64::NAN));
    }

    #[test]
    fn test_catalog_wire_format() {
        let catalog: InterventionCatalog = serde_json::from_value(serde_json::json!({
            "lips": { "name": "Lèvres", "min_dose": 0.5, "max_dose": 5.0, "unit": "ml" },
            "forehead": {
                "name": "Front",
                "min_dose": 10,
                "max_dose": 50,
                "unit": "unités",
                "description": "Rides frontales"
            }
        }))
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog["forehead"].max_dose, 50.0);
        assert_eq!(catalog.keys().next().map(String::as_str), Some("forehead"));
    }
}
