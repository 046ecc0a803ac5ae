use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevkerError {
    /// Malformed connection strings or connection lists in the environment
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A requested database has no matching connection
    #[error("{0}")]
    Selection(String),

    #[error("Command exited with non-zero code of {exit_code}")]
    RemoteCommand { exit_code: i32 },

    #[error("\"{0}\" is not a valid uuid version")]
    UnsupportedUuidVersion(String),
}

impl DevkerError {
    /// Exit code of the failed process, if this error came from one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            DevkerError::RemoteCommand { exit_code } => Some(*exit_code),
            _ => None,
        }
    }
}
