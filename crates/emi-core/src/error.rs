use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmiError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Limit exceeded: {field} = {value} (limit {limit})")]
    LimitExceeded {
        field: String,
        value: f64,
        limit: f64,
    },

    #[error("Non-finite result in {context}")]
    NonFiniteResult { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EmiError {
    fn from(e: serde_json::Error) -> Self {
        EmiError::SerializationError(e.to_string())
    }
}
