//! Error type for `jobsearch-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Invalid input, duplicate or missing ids, and binding failures.
  #[error("{0}")]
  Core(#[from] jobsearch_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("url parse error: {0}")]
  Url(#[from] url::ParseError),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored value that does not map back onto the domain type.
  #[error("decode error: {0}")]
  Decode(String),
}

impl Error {
  /// The core error, if this is one.
  pub fn as_core(&self) -> Option<&jobsearch_core::Error> {
    match self {
      Self::Core(e) => Some(e),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
