// Errors visible to callers of the aggregator.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("unknown service: {0}")]
    UnknownService(String),
}
