//! Point-in-time progress summaries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use syllabus_core::{Collection, Course};

/// A snapshot of progress at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    /// When snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Mean completion over all courses
    pub global_completion: f64,

    /// Per-course summaries in canonical order
    pub courses: Vec<CourseSummary>,
}

/// Derived progress figures for one course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseSummary {
    /// Course code
    pub code: String,
    /// Course title
    pub name: String,
    /// Completion percentage
    pub completion: f64,
    /// Modules marked done
    pub completed_modules: usize,
    /// Modules in the course
    pub total_modules: usize,
    /// Lectures left in open modules
    pub remaining_lectures: u64,
    /// 2023 paper covered
    pub pyq2023: bool,
    /// 2024 paper covered
    pub pyq2024: bool,
}

impl CourseSummary {
    /// Summarize a course.
    pub fn of(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            completion: course.completion(),
            completed_modules: course.completed_modules(),
            total_modules: course.modules.len(),
            remaining_lectures: course.remaining_lectures(),
            pyq2023: course.pyq2023,
            pyq2024: course.pyq2024,
        }
    }
}

impl ProgressSnapshot {
    /// Capture the current state of a collection.
    pub fn capture(collection: &Collection) -> Self {
        Self {
            timestamp: Utc::now(),
            global_completion: collection.global_completion(),
            courses: collection.iter().map(CourseSummary::of).collect(),
        }
    }

    /// Lectures left across every course.
    pub fn remaining_lectures(&self) -> u64 {
        self.courses.iter().map(|c| c.remaining_lectures).sum()
    }
}
