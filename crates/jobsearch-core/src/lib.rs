//! Core types and trait definitions for the job search tracker.
//!
//! This crate has no database dependencies. Storage backends
//! depend on it; it depends on nothing proprietary.

pub mod activity;
pub mod application;
pub mod contact;
pub mod entity;
pub mod error;
pub mod interview;
pub mod job_opening;
pub mod memory;
pub mod repository;

pub use activity::Activity;
pub use contact::{Contact, ContactRole};
pub use entity::{Entity, UNASSIGNED_ID};
pub use error::{Error, Result};
pub use job_opening::JobOpening;
pub use memory::MemoryRepository;
pub use repository::Repository;
