use thiserror::Error;

pub type Result<T> = std::result::Result<T, TourError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    /// A step references an element id that is not in the document.
    #[error("tour target element not found: #{target_id}")]
    MissingTarget { target_id: String },

    #[error("tour controller is not mounted")]
    NotMounted,
}

impl TourError {
    #[must_use]
    pub fn missing_target(target_id: impl Into<String>) -> Self {
        Self::MissingTarget {
            target_id: target_id.into(),
        }
    }
}
