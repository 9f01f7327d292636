//! Validated coordination tree path.

use super::TreePathError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Absolute, `/`-separated path to a coordination tree node.
///
/// Paths never carry a trailing slash or empty segments, with the single
/// exception of the root path `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TreePath(String);

impl TreePath {
    /// Creates a validated tree path.
    ///
    /// # Errors
    ///
    /// Returns [`TreePathError::NotAbsolute`] when the value does not start
    /// with `/`, [`TreePathError::TrailingSlash`] when a non-root value ends
    /// with `/`, [`TreePathError::EmptySegment`] when it contains `//`,
    /// [`TreePathError::RelativeSegment`] when a segment is `.` or `..`, and
    /// [`TreePathError::ForbiddenCharacter`] when it holds a character the
    /// tree refuses in node names.
    pub fn new(value: impl Into<String>) -> Result<Self, TreePathError> {
        let raw = value.into();
        if !raw.starts_with('/') {
            return Err(TreePathError::NotAbsolute(raw));
        }
        if raw == "/" {
            return Ok(Self(raw));
        }
        if raw.ends_with('/') {
            return Err(TreePathError::TrailingSlash(raw));
        }
        if raw.split('/').skip(1).any(str::is_empty) {
            return Err(TreePathError::EmptySegment(raw));
        }
        if raw.split('/').any(is_relative_segment) {
            return Err(TreePathError::RelativeSegment(raw));
        }
        if raw.chars().any(is_forbidden_char) {
            return Err(TreePathError::ForbiddenCharacter(raw));
        }
        Ok(Self(raw))
    }

    /// Returns the root path `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_owned())
    }

    /// Builds a path from a literal that is known to be well formed.
    pub(crate) fn from_static(path: &'static str) -> Self {
        debug_assert!(Self::new(path).is_ok(), "malformed static tree path {path}");
        Self(path.to_owned())
    }

    /// Returns `true` for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends one child segment.
    ///
    /// # Errors
    ///
    /// Returns [`TreePathError::InvalidSegment`] when the segment is empty,
    /// is `.` or `..`, or contains `/` or a forbidden character.
    pub fn join(&self, segment: &str) -> Result<Self, TreePathError> {
        if segment.is_empty()
            || is_relative_segment(segment)
            || segment.chars().any(|ch| ch == '/' || is_forbidden_char(ch))
        {
            return Err(TreePathError::InvalidSegment(segment.to_owned()));
        }
        if self.is_root() {
            Ok(Self(format!("/{segment}")))
        } else {
            Ok(Self(format!("{}/{segment}", self.0)))
        }
    }

    /// Returns every ancestor of this path followed by the path itself,
    /// shallowest first. The root is not included.
    #[must_use]
    pub fn lineage(&self) -> Vec<Self> {
        let mut current = String::with_capacity(self.0.len());
        self.0
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                current.push('/');
                current.push_str(segment);
                Self(current.clone())
            })
            .collect()
    }
}

fn is_relative_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

// Null, control characters, and the ranges ZooKeeper reserves.
const fn is_forbidden_char(ch: char) -> bool {
    matches!(
        ch,
        '\u{0}'..='\u{1f}' | '\u{7f}'..='\u{9f}' | '\u{e000}'..='\u{f8ff}' | '\u{fff0}'..='\u{ffff}'
    )
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TreePath {
    type Error = TreePathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TreePath> for String {
    fn from(path: TreePath) -> Self {
        path.0
    }
}
