//! Navigation steps of a path expression.
//!
//! A parsed expression is an ordered list of [`Step`]s. Each step knows how
//! to render itself onto the path accumulated so far, which is how nodes
//! produce the `$.a[0]` strings that issues report.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

// ============================================================================
// KEY
// ============================================================================

/// One entry of a bracket selector: an array index or an object key.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// Array index; negative values count from the end.
    Index(i64),
    /// Object key.
    Name(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => match serde_json::to_string(name) {
                Ok(quoted) => f.write_str(&quoted),
                Err(_) => write!(f, "{name:?}"),
            },
        }
    }
}

impl From<i64> for Key {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<i32> for Key {
    fn from(index: i32) -> Self {
        Self::Index(i64::from(index))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index as i64)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

// ============================================================================
// PREDICATE
// ============================================================================

/// Key of a value within its container, handed to predicate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKey<'a> {
    /// Position within an array.
    Index(usize),
    /// Key within an object.
    Name(&'a str),
}

type PredicateFn = dyn Fn(&Value, ValueKey<'_>, &Value) -> bool + Send + Sync;

/// Programmatic filter interpolated into a path expression.
///
/// The function receives each candidate value, its key, and the container it
/// came from, and keeps the values it returns `true` for.
#[derive(Clone)]
pub struct Predicate {
    label: Cow<'static, str>,
    test: Arc<PredicateFn>,
}

impl Predicate {
    pub fn new(test: impl Fn(&Value, ValueKey<'_>, &Value) -> bool + Send + Sync + 'static) -> Self {
        Self::named("() => boolean", test)
    }

    /// Predicate with a label, shown when the step renders in a path.
    pub fn named(
        label: impl Into<Cow<'static, str>>,
        test: impl Fn(&Value, ValueKey<'_>, &Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            test: Arc::new(test),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn matches(&self, value: &Value, key: ValueKey<'_>, container: &Value) -> bool {
        (self.test)(value, key, container)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && Arc::ptr_eq(&self.test, &other.test)
    }
}

// ============================================================================
// STEP
// ============================================================================

/// One navigation step of a parsed path expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// `$`: reset to the document root.
    Root,
    /// `@`: the node navigation starts from.
    Current,
    /// `^`: one level up, chainable as `^.^`.
    Parent,
    /// `.name`: field access on objects.
    Dot(String),
    /// `..name`: breadth-first search for `name` at any depth.
    DeepScan(String),
    /// `[0]`, `["a","b"]`: index and key selection.
    Bracket(Vec<Key>),
    /// `[*]`: every element of an array or value of an object.
    BracketWildcard,
    /// `.*`: every value of an object.
    DotWildcard,
    /// `[start:end:step]` with any part omissible.
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
    /// `[{predicate}]`: programmatic filter.
    Predicate(Predicate),
}

impl Step {
    /// Appends this step's rendering to the path accumulated so far.
    pub fn render(&self, prefix: &str) -> String {
        match self {
            Self::Root => String::from("$"),
            Self::Current => {
                if prefix.is_empty() {
                    String::from("@")
                } else {
                    prefix.to_owned()
                }
            }
            Self::Parent => {
                if prefix.is_empty() {
                    String::from("^")
                } else {
                    format!("{prefix}.^")
                }
            }
            Self::Dot(name) => format!("{prefix}.{name}"),
            Self::DeepScan(name) => format!("{prefix}..{name}"),
            Self::Bracket(keys) => {
                let parts: Vec<String> = keys.iter().map(ToString::to_string).collect();
                format!("{prefix}[{}]", parts.join(","))
            }
            Self::BracketWildcard => format!("{prefix}[*]"),
            Self::DotWildcard => format!("{prefix}.*"),
            Self::Slice { start, end, step } => {
                let mut rendered = format!("{prefix}[");
                if let Some(start) = start {
                    rendered.push_str(&start.to_string());
                }
                rendered.push(':');
                if let Some(end) = end {
                    rendered.push_str(&end.to_string());
                }
                if let Some(step) = step {
                    rendered.push(':');
                    rendered.push_str(&step.to_string());
                }
                rendered.push(']');
                rendered
            }
            Self::Predicate(predicate) => format!("{prefix}[${{{}}}]", predicate.label()),
        }
    }
}

impl From<usize> for Step {
    fn from(index: usize) -> Self {
        Self::Bracket(vec![Key::Index(index as i64)])
    }
}

impl From<&str> for Step {
    fn from(name: &str) -> Self {
        if name.contains('.') {
            Self::Bracket(vec![Key::Name(name.to_owned())])
        } else {
            Self::Dot(name.to_owned())
        }
    }
}

impl From<String> for Step {
    fn from(name: String) -> Self {
        if name.contains('.') {
            Self::Bracket(vec![Key::Name(name)])
        } else {
            Self::Dot(name)
        }
    }
}
