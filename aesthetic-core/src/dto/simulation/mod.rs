//! Simulation DTOs
//!
//! The creation request is sent as a multipart form; it is validated against
//! the intervention catalogue before anything goes over the wire.

use thiserror::Error;

use crate::domain::intervention::InterventionCatalog;

/// Largest image the service accepts
pub const MAX_IMAGE_BYTES: usize = 50 * 1024 * 1024;

/// Image formats accepted by the service, by file extension
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
];

/// Photo attached to a simulation request
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// MIME type derived from the file extension, if it is a supported format
    pub fn content_type(&self) -> Option<&'static str> {
        let ext = self.file_name.rsplit_once('.')?.1.to_ascii_lowercase();
        IMAGE_TYPES
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, mime)| *mime)
    }
}

/// Request to start a new simulation
#[derive(Debug, Clone)]
pub struct CreateSimulation {
    pub patient_id: i64,
    pub intervention_type: String,
    pub dose: f64,
    pub image: ImageUpload,
}

/// Reasons a simulation request is rejected before upload
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Unknown intervention type '{0}'")]
    UnknownIntervention(String),

    #[error("Dose {dose} out of range for {intervention}: must be between {min} and {max} {unit}")]
    DoseOutOfRange {
        intervention: String,
        dose: f64,
        min: f64,
        max: f64,
        unit: String,
    },

    #[error("Unsupported image type for '{0}' (expected jpg, jpeg, png or webp)")]
    UnsupportedImageType(String),

    #[error("Image is empty")]
    EmptyImage,

    #[error("Image too large: {size} bytes (max {max})")]
    ImageTooLarge { size: usize, max: usize },
}

impl CreateSimulation {
    /// Checks the request against the intervention catalogue and image limits
    pub fn validate(&self, catalog: &InterventionCatalog) -> Result<(), ValidationError> {
        let intervention = catalog
            .get(&self.intervention_type)
            .ok_or_else(|| ValidationError::UnknownIntervention(self.intervention_type.clone()))?;

        if !intervention.dose_in_range(self.dose) {
            return Err(ValidationError::DoseOutOfRange {
                intervention: intervention.name.clone(),
                dose: self.dose,
                min: intervention.min_dose,
                max: intervention.max_dose,
                unit: intervention.unit.clone(),
            });
        }

        if self.image.content_type().is_none() {
            return Err(ValidationError::UnsupportedImageType(
                self.image.file_name.clone(),
            ));
        }

        if self.image.bytes.is_empty() {
            return Err(ValidationError::EmptyImage);
        }

        if self.image.bytes.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::ImageTooLarge {
                size: self.image.bytes.len(),
                max: MAX_IMAGE_BYTES,
            });
        }

        Ok(())
    }
}
