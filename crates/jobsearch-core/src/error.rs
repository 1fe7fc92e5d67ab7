//! Error types for `jobsearch-core`.

use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// A missing or malformed input, e.g. a blank name or a negative duration.
  #[error("invalid argument `{name}`: {reason}")]
  InvalidArgument { name: &'static str, reason: String },

  #[error("item with id {0} already exists")]
  AlreadyExists(String),

  #[error("item with id {0} does not exist")]
  NotFound(String),

  /// The repository cannot bind to its item type or backing collection.
  /// Raised at construction; the repository is unusable.
  #[error("repository configuration error: {0}")]
  Configuration(String),
}

impl Error {
  pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
    Self::InvalidArgument { name, reason: reason.into() }
  }

  pub fn already_exists(id: impl Display) -> Self { Self::AlreadyExists(id.to_string()) }

  pub fn not_found(id: impl Display) -> Self { Self::NotFound(id.to_string()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reject empty or whitespace-only text.
pub(crate) fn require_text(name: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::invalid(name, "must not be blank"));
  }
  Ok(())
}
