//! Syllabus progress tracking.
//!
//! The tracker engine, progress snapshots, and export/import.

#![warn(missing_docs)]

pub mod tracker;
pub mod snapshot;
pub mod transfer;

pub use tracker::{SharedTracker, TrackerConfig, TrackerEngine, TrackerError};
pub use snapshot::{CourseSummary, ProgressSnapshot};
pub use transfer::{export_file_name, ImportReport};
