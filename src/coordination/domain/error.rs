//! Error types for coordination tree path validation.

use thiserror::Error;

/// Errors returned while constructing tree paths.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreePathError {
    /// The path does not start with `/`.
    #[error("tree path '{0}' must be absolute")]
    NotAbsolute(String),

    /// The path ends with `/` and is not the root.
    #[error("tree path '{0}' must not end with '/'")]
    TrailingSlash(String),

    /// The path contains an empty segment (`//`).
    #[error("tree path '{0}' contains an empty segment")]
    EmptySegment(String),

    /// The path contains a `.` or `..` segment.
    #[error("tree path '{0}' contains a relative segment")]
    RelativeSegment(String),

    /// The path contains a null, control, or reserved character.
    #[error("tree path '{0}' contains a forbidden character")]
    ForbiddenCharacter(String),

    /// A child segment is empty or contains `/`.
    #[error("invalid tree path segment '{0}'")]
    InvalidSegment(String),
}
