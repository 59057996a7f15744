//! Host Error Types

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("Data layer '{name}' is not an array on the global scope")]
    MissingQueue { name: String },

    #[error("Document has no <head> or <body> to attach scripts to")]
    NoMountPoint,

    #[error("Host operation failed: {message}")]
    OperationFailed { message: String },
}

pub type HostResult<T> = Result<T, HostError>;
