// Typed errors with thiserror. Only the data-loading boundary and the JSON
// interface produce these; carousel navigation never fails.

use thiserror::Error;

use crate::types::SlideId;

/// Carousel error types.
#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Slide {id} has no alt text")]
    MissingAltText { id: SlideId },

    #[error("Duplicate slide id {id}")]
    DuplicateSlideId { id: SlideId },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CarouselError {
    fn from(err: serde_json::Error) -> Self {
        CarouselError::Serialization(err.to_string())
    }
}
