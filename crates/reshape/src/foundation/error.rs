//! Issue records produced by failed conversions.
//!
//! Failures travel as values: converters return an [`Issues`] collection and
//! the caller decides whether to surface it. Each [`Issue`] locates one
//! mismatch by the rendered path expression of the node it occurred at.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;

use crate::foundation::display::display_value;

/// Sentinel shown in messages when no actual value was present.
const MISSING_VALUE: &str = "MISSING_VALUE";

// ============================================================================
// ISSUE
// ============================================================================

/// A single conversion failure: where it happened and what was expected.
///
/// An absent `actual` distinguishes "no value present" from "a present value
/// of the wrong shape".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Rendered path expression locating the failing value, e.g. `$.a[0]`.
    pub path: String,
    /// What the converter at that location expected.
    pub expected: String,
    /// Display form of the value actually found, absent when missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl Issue {
    /// Issue for a position where no value was present.
    pub fn new(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            actual: None,
        }
    }

    /// Attaches the display form of the value that was found.
    #[must_use]
    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    /// Issue carrying the rendering of the offending value.
    pub fn mismatch(path: impl Into<String>, expected: impl Into<String>, actual: &Value) -> Self {
        Self::new(path, expected).with_actual(display_value(actual))
    }

    /// Nesting depth of the issue's path.
    ///
    /// Each `.` and `[` counts one level, so `$.a[0]` is deeper than `$.a`.
    /// Alternation uses this to decide which branch got further.
    pub fn depth(&self) -> usize {
        self.path.chars().filter(|c| *c == '.' || *c == '[').count()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "At Path {}, expected {} but was {}",
            self.path,
            self.expected,
            self.actual.as_deref().unwrap_or(MISSING_VALUE)
        )
    }
}

impl std::error::Error for Issue {}

// ============================================================================
// ISSUES
// ============================================================================

/// Non-empty, ordered collection of [`Issue`]s from one failed conversion.
///
/// Container combinators aggregate every child failure, so one failure can
/// carry many path-addressed issues. Most hold only one or two, which are
/// stored inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Issues {
    items: SmallVec<[Issue; 2]>,
}

impl Issues {
    /// Collection holding a single issue.
    pub fn of(issue: Issue) -> Self {
        let mut items = SmallVec::new();
        items.push(issue);
        Self { items }
    }

    /// Builds a collection from a vector, `None` when the vector is empty.
    pub fn from_vec(issues: Vec<Issue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self {
                items: SmallVec::from_vec(issues),
            })
        }
    }

    pub fn push(&mut self, issue: Issue) {
        self.items.push(issue);
    }

    /// Appends every issue of `other`, preserving order.
    pub fn merge(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; the collection cannot be constructed empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn first(&self) -> &Issue {
        &self.items[0]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Issue> {
        self.items.into_vec()
    }
}

impl fmt::Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, issue) in self.items.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl From<Issue> for Issues {
    fn from(issue: Issue) -> Self {
        Self::of(issue)
    }
}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = smallvec::IntoIter<[Issue; 2]>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// UNEXPECTED
// ============================================================================

/// Failure reported by a user-supplied conversion function.
///
/// The function states what it expected and, optionally, what it saw; the
/// engine fills in the path of the node being converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unexpected {
    pub expected: String,
    pub actual: Option<String>,
}

impl Unexpected {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: None,
        }
    }

    #[must_use]
    pub fn with_actual(mut self, actual: impl Into<String>) -> Self {
        self.actual = Some(actual.into());
        self
    }

    /// Shorthand carrying the display form of the value that was seen.
    pub fn mismatch(expected: impl Into<String>, actual: &Value) -> Self {
        Self::new(expected).with_actual(display_value(actual))
    }

    pub(crate) fn into_issue(self, path: String) -> Issue {
        Issue {
            path,
            expected: self.expected,
            actual: self.actual,
        }
    }
}

impl fmt::Display for Unexpected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {} but was {}",
            self.expected,
            self.actual.as_deref().unwrap_or(MISSING_VALUE)
        )
    }
}

impl std::error::Error for Unexpected {}
