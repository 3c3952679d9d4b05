//! Filter and sort views over a collection.
//!
//! Views borrow courses and never touch canonical order or any flag.

use std::cmp::Reverse;
use crate::collection::Collection;
use crate::course::Course;
use crate::error::UnknownMode;

/// Which courses a view keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Every course
    #[default]
    All,
    /// Any module open or any PYQ paper uncovered
    Incomplete,
    /// 2023 paper not yet covered
    Pyq2023,
    /// 2024 paper not yet covered
    Pyq2024,
    /// All modules done and both papers covered
    Completed,
}

impl FilterMode {
    /// Whether the course passes this filter.
    pub fn matches(&self, course: &Course) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Incomplete => !course.is_fully_complete(),
            FilterMode::Pyq2023 => !course.pyq2023,
            FilterMode::Pyq2024 => !course.pyq2024,
            FilterMode::Completed => course.is_fully_complete(),
        }
    }

    /// Textual name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Incomplete => "incomplete",
            FilterMode::Pyq2023 => "pyq2023",
            FilterMode::Pyq2024 => "pyq2024",
            FilterMode::Completed => "completed",
        }
    }
}

impl std::str::FromStr for FilterMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "incomplete" => Ok(FilterMode::Incomplete),
            "pyq2023" => Ok(FilterMode::Pyq2023),
            "pyq2024" => Ok(FilterMode::Pyq2024),
            "completed" => Ok(FilterMode::Completed),
            _ => Err(UnknownMode::new("filter", s)),
        }
    }
}

/// How a filtered view is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Keep filtered order
    #[default]
    None,
    /// Lowest completion first
    Completion,
    /// Most remaining lectures first
    Lectures,
}

impl SortMode {
    /// Textual name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::None => "none",
            SortMode::Completion => "completion",
            SortMode::Lectures => "lectures",
        }
    }
}

impl std::str::FromStr for SortMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(SortMode::None),
            "completion" => Ok(SortMode::Completion),
            "lectures" => Ok(SortMode::Lectures),
            _ => Err(UnknownMode::new("sort", s)),
        }
    }
}

/// Keep the courses matching `mode`, in canonical order.
pub fn filter(collection: &Collection, mode: FilterMode) -> Vec<&Course> {
    collection.iter().filter(|c| mode.matches(c)).collect()
}

/// Reorder a view. Stable: ties keep their incoming order.
pub fn sort(mut view: Vec<&Course>, mode: SortMode) -> Vec<&Course> {
    match mode {
        SortMode::None => {}
        SortMode::Completion => view.sort_by(|a, b| a.completion().total_cmp(&b.completion())),
        SortMode::Lectures => view.sort_by_key(|c| Reverse(c.remaining_lectures())),
    }
    view
}

impl Collection {
    /// Filter then sort.
    pub fn view(&self, filter_mode: FilterMode, sort_mode: SortMode) -> Vec<&Course> {
        sort(filter(self, filter_mode), sort_mode)
    }
}
