use accessto_core::model::AccessError;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AccesstoAppError {
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error("Error reading from '{path}': {message}")]
    ReadError { path: PathBuf, message: String },
    #[error("Error writing to '{path}': {message}")]
    WriteError { path: PathBuf, message: String },
    #[error(transparent)]
    Access(#[from] AccessError),
}
