use thiserror::Error;

pub type TempoResult<T> = Result<T, TempoError>;

#[derive(Debug, Error)]
pub enum TempoError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("animation with id `{id}` is already registered")]
    DuplicateAnimation { id: String },

    #[error("render callback for animation `{id}` failed: {message}")]
    Render { id: String, message: String },

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl TempoError {
    /// Builds a render failure for the given animation id.
    #[must_use]
    pub fn render(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            id: id.into(),
            message: message.into(),
        }
    }
}
