//! Error types for the engine

use pagecraft_page::StatusError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("status error: {0}")]
    Status(#[from] StatusError),
}
