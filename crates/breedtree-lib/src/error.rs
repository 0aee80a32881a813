//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	/// A caller broke a precondition, such as building a tree for an empty name.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	#[error("not found: {0}")]
	NotFound(String),
}
