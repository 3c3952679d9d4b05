//! Storage abstraction and implementations for the syllabus tracker.
//!
//! This crate provides a string-keyed storage interface with a JSON file
//! backend and an in-memory backend.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;

/// Key the tracker state is stored under.
pub const DEFAULT_KEY: &str = "syllabusData";
