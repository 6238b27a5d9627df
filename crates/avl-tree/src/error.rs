use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("KEY_NOT_FOUND")]
    KeyNotFound,
}
