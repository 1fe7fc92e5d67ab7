//! SQLite backend for the job search tracker.
//!
//! A [`SqliteContext`] wraps one [`rusqlite`] connection and acts as the unit
//! of work: repositories write inside its transaction and
//! [`Repository::save`](jobsearch_core::Repository::save) commits it.

mod encode;
mod schema;

pub mod config;
pub mod context;
pub mod error;
pub mod record;
pub mod repository;

pub use config::StoreConfig;
pub use context::SqliteContext;
pub use error::{Error, Result};
pub use record::Record;
pub use repository::SqliteRepository;
