//! Course and module models with their derived completion metrics.

use serde::{Deserialize, Serialize};
use crate::error::UnknownMode;
use crate::id::ModuleId;

/// Share of a course's completion carried by its modules.
pub const MODULE_WEIGHT: f64 = 70.0;

/// Share carried by each previous-year-question flag.
pub const PYQ_WEIGHT: f64 = 15.0;

/// A syllabus module inside a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Unique identifier
    pub id: ModuleId,

    /// Module title
    pub name: String,

    /// Scheduled lecture sessions
    pub lectures: u32,

    /// Syllabus topics covered
    pub topics: String,

    /// Free-text user notes
    #[serde(default)]
    pub notes: String,

    /// Whether the module has been studied
    #[serde(default)]
    pub completed: bool,
}

/// A course with its ordered modules and PYQ coverage flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code, unique in the collection
    pub code: String,

    /// Course title
    pub name: String,

    /// Previous year questions of 2023 covered
    pub pyq2023: bool,

    /// Previous year questions of 2024 covered
    pub pyq2024: bool,

    /// Modules in catalog order
    pub modules: Vec<Module>,
}

/// Year of a previous-year-question paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PyqYear {
    /// 2023 paper
    Y2023,
    /// 2024 paper
    Y2024,
}

impl PyqYear {
    /// Field name used in serialized data.
    pub fn as_str(&self) -> &'static str {
        match self {
            PyqYear::Y2023 => "pyq2023",
            PyqYear::Y2024 => "pyq2024",
        }
    }
}

impl std::str::FromStr for PyqYear {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "2023" | "pyq2023" => Ok(PyqYear::Y2023),
            "2024" | "pyq2024" => Ok(PyqYear::Y2024),
            _ => Err(UnknownMode::new("PYQ year", s)),
        }
    }
}

impl Course {
    /// Completion percentage in `[0, 100]`.
    ///
    /// Modules contribute 70 points pro rata, each PYQ flag 15 points.
    /// A course without modules scores 0 whatever its flags say.
    pub fn completion(&self) -> f64 {
        if self.modules.is_empty() {
            return 0.0;
        }

        let module_share =
            (self.completed_modules() as f64 / self.modules.len() as f64) * MODULE_WEIGHT;

        let mut pyq_share = 0.0;
        if self.pyq2023 {
            pyq_share += PYQ_WEIGHT;
        }
        if self.pyq2024 {
            pyq_share += PYQ_WEIGHT;
        }

        module_share + pyq_share
    }

    /// Number of completed modules.
    pub fn completed_modules(&self) -> usize {
        self.modules.iter().filter(|m| m.completed).count()
    }

    /// Lectures still to attend across incomplete modules.
    ///
    /// Summed as `u64` so no combination of `u32` counts can overflow.
    pub fn remaining_lectures(&self) -> u64 {
        self.modules
            .iter()
            .filter(|m| !m.completed)
            .map(|m| u64::from(m.lectures))
            .sum()
    }

    /// Lectures across all modules.
    pub fn total_lectures(&self) -> u64 {
        self.modules.iter().map(|m| u64::from(m.lectures)).sum()
    }

    /// Every module done and both PYQ papers covered.
    pub fn is_fully_complete(&self) -> bool {
        self.modules.iter().all(|m| m.completed) && self.pyq2023 && self.pyq2024
    }

    /// Read a PYQ flag.
    pub fn pyq(&self, year: PyqYear) -> bool {
        match year {
            PyqYear::Y2023 => self.pyq2023,
            PyqYear::Y2024 => self.pyq2024,
        }
    }

    /// Look up a module by id.
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == *id)
    }

    pub(crate) fn module_mut(&mut self, id: &str) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.id == *id)
    }

    pub(crate) fn toggle_pyq(&mut self, year: PyqYear) {
        match year {
            PyqYear::Y2023 => self.pyq2023 = !self.pyq2023,
            PyqYear::Y2024 => self.pyq2024 = !self.pyq2024,
        }
    }
}
