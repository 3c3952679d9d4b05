//! The tracked collection: seeding, load-or-seed, import validation and
//! in-place mutations.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use crate::catalog::Catalog;
use crate::course::{Course, Module, PyqYear};
use crate::error::{ImportError, ParseError};
use crate::id::ModuleId;

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Parsed from persisted state
    Persisted,
    /// Freshly seeded from the catalog
    Seeded,
}

/// Ordered sequence of courses, in canonical catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    courses: Vec<Course>,
}

impl Collection {
    /// Wrap courses as a collection.
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Fresh collection from a catalog: flags cleared, notes empty,
    /// ids derived from course code and module position.
    pub fn seed(catalog: &Catalog) -> Self {
        let courses = catalog
            .courses
            .iter()
            .map(|course| Course {
                code: course.code.clone(),
                name: course.name.clone(),
                pyq2023: false,
                pyq2024: false,
                modules: course
                    .modules
                    .iter()
                    .enumerate()
                    .map(|(i, module)| Module {
                        id: ModuleId::derive(&course.code, i),
                        name: module.name.clone(),
                        lectures: module.lectures,
                        topics: module.topics.clone(),
                        notes: String::new(),
                        completed: false,
                    })
                    .collect(),
            })
            .collect();

        Self { courses }
    }

    /// Parse persisted state, trusting it verbatim.
    pub fn parse(persisted: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(persisted)?)
    }

    /// Restore persisted state, or seed from the catalog when it is absent
    /// or unreadable. Never fails.
    pub fn load(persisted: Option<&str>, catalog: &Catalog) -> Self {
        Self::restore(persisted, catalog).0
    }

    /// Like [`Collection::load`], also reporting where the result came from.
    pub fn restore(persisted: Option<&str>, catalog: &Catalog) -> (Self, Origin) {
        match persisted {
            Some(blob) => match Self::parse(blob) {
                Ok(collection) => {
                    debug!("Restored {} courses from persisted state", collection.len());
                    (collection, Origin::Persisted)
                }
                Err(e) => {
                    warn!("{}; reseeding from catalog", e);
                    (Self::seed(catalog), Origin::Seeded)
                }
            },
            None => {
                debug!("No persisted state; seeding from catalog");
                (Self::seed(catalog), Origin::Seeded)
            }
        }
    }

    /// Parse and validate an import payload.
    ///
    /// Course codes and module ids must be unique collection-wide. Ids are
    /// kept as written.
    pub fn parse_import(bytes: &[u8]) -> Result<Self, ImportError> {
        let collection: Self = serde_json::from_slice(bytes)?;

        let mut codes = HashSet::new();
        let mut ids = HashSet::new();
        for course in &collection.courses {
            if !codes.insert(course.code.as_str()) {
                return Err(ImportError::DuplicateCourse(course.code.clone()));
            }
            for module in &course.modules {
                if !ids.insert(module.id.as_str()) {
                    return Err(ImportError::DuplicateModule(module.id.to_string()));
                }
            }
        }

        Ok(collection)
    }

    /// Compact JSON for the persistence store.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Pretty-printed JSON for export files.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Courses in canonical order.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Iterate courses in canonical order.
    pub fn iter(&self) -> std::slice::Iter<'_, Course> {
        self.courses.iter()
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether there are no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Number of modules across all courses.
    pub fn module_count(&self) -> usize {
        self.courses.iter().map(|c| c.modules.len()).sum()
    }

    /// Look up a course by code.
    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    fn course_mut(&mut self, code: &str) -> Option<&mut Course> {
        self.courses.iter_mut().find(|c| c.code == code)
    }

    /// Unweighted mean of course completions; 0 when empty.
    pub fn global_completion(&self) -> f64 {
        if self.courses.is_empty() {
            return 0.0;
        }
        let total: f64 = self.courses.iter().map(Course::completion).sum();
        total / self.courses.len() as f64
    }

    /// Flip a module's completed flag. Returns `false` if the course or
    /// module does not exist.
    pub fn toggle_module_completion(&mut self, code: &str, module_id: &str) -> bool {
        match self.course_mut(code).and_then(|c| c.module_mut(module_id)) {
            Some(module) => {
                module.completed = !module.completed;
                true
            }
            None => false,
        }
    }

    /// Replace a module's notes verbatim. Returns `false` if the course or
    /// module does not exist.
    pub fn set_module_notes(
        &mut self,
        code: &str,
        module_id: &str,
        notes: impl Into<String>,
    ) -> bool {
        match self.course_mut(code).and_then(|c| c.module_mut(module_id)) {
            Some(module) => {
                module.notes = notes.into();
                true
            }
            None => false,
        }
    }

    /// Flip a course's PYQ flag. Returns `false` if the course does not exist.
    pub fn toggle_pyq(&mut self, code: &str, year: PyqYear) -> bool {
        match self.course_mut(code) {
            Some(course) => {
                course.toggle_pyq(year);
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.iter()
    }
}
