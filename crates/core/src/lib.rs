//! Syllabus tracker core data models.
//!
//! Courses, modules, completion scoring and the filter/sort views used by
//! the tracker engine. Everything here is pure; persistence lives in
//! `syllabus-storage` and is driven by `syllabus-progress`.

#![warn(missing_docs)]

mod id;
mod error;
mod catalog;
mod course;
mod collection;
mod query;

pub use id::ModuleId;
pub use error::{ImportError, ParseError, UnknownMode};
pub use catalog::{Catalog, CatalogCourse, CatalogModule};
pub use course::{Course, Module, PyqYear, MODULE_WEIGHT, PYQ_WEIGHT};
pub use collection::{Collection, Origin};
pub use query::{filter, sort, FilterMode, SortMode};
