use thiserror::Error;

#[derive(Debug, Error)]
pub enum DistressError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Model artifact error in {path}: {reason}")]
    ModelArtifact { path: String, reason: String },

    #[error(
        "Failed to load model from {path}: parameter dictionary rejected ({parameters}); \
         full model object rejected ({full_model})"
    )]
    ModelLoad {
        path: String,
        parameters: String,
        full_model: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DistressError {
    fn from(e: serde_json::Error) -> Self {
        DistressError::SerializationError(e.to_string())
    }
}
