//! Export naming and import reporting.

use chrono::NaiveDate;
use syllabus_core::Collection;

/// Name of an export file written on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("syllabus-{}.json", date.format("%Y-%m-%d"))
}

/// What an accepted import brought in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Codes of every imported course, in order
    pub course_codes: Vec<String>,
    /// Modules across all imported courses
    pub module_count: usize,
}

impl ImportReport {
    pub(crate) fn of(collection: &Collection) -> Self {
        Self {
            course_codes: collection.iter().map(|c| c.code.clone()).collect(),
            module_count: collection.module_count(),
        }
    }
}
