use thiserror::Error;

pub type Result<T> = std::result::Result<T, GarimpoError>;

#[derive(Debug, Error)]
pub enum GarimpoError {
    #[error("storage error during {operation}: {message}")]
    Storage { operation: String, message: String },
    #[error("unsupported snapshot format: {0}")]
    SnapshotFormat(String),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

impl GarimpoError {
    pub fn storage_error(operation: &str, message: impl Into<String>) -> Self {
        GarimpoError::Storage {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_failure() {
        let e = GarimpoError::storage_error("set", "disk full");
        assert_eq!(e.to_string(), "storage error during set: disk full");
        let e = GarimpoError::SnapshotFormat("garimpo.snapshot.v9".into());
        assert_eq!(
            e.to_string(),
            "unsupported snapshot format: garimpo.snapshot.v9"
        );
    }
}
