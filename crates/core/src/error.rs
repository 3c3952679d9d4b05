//! Error taxonomy for the tracker core.

/// Persisted state could not be read back into a collection.
///
/// Never surfaced to callers of [`crate::Collection::load`]; it only drives
/// the fallback to a fresh seed and is logged.
#[derive(Debug, thiserror::Error)]
#[error("persisted state unreadable: {0}")]
pub struct ParseError(#[from] pub serde_json::Error);

/// A user supplied file was rejected. The current collection is untouched.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// File could not be read
    #[error("failed to read import file: {0}")]
    Io(#[from] std::io::Error),

    /// Not well-formed, or missing required fields
    #[error("malformed import data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two courses share a code
    #[error("duplicate course code '{0}'")]
    DuplicateCourse(String),

    /// Two modules share an id
    #[error("duplicate module id '{0}'")]
    DuplicateModule(String),
}

/// A filter, sort or PYQ year name that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownMode {
    /// Which kind of mode was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl UnknownMode {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
