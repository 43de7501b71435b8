//! Navigation of parsed path expressions over JSON documents.
//!
//! A [`Tree`] applies its steps to a moving [`Cursor`]: the set of values the
//! expression has selected so far, the node recording the position, and an
//! exactness flag. While every step so far could only select one value the
//! cursor stays exact and collapses to a single node; the first wildcard,
//! slice, multi-key bracket, deep scan, or predicate makes it inexact, and
//! from then on results aggregate into an array node. Navigation never fails:
//! selecting nothing while exact yields a missing node.

use std::collections::VecDeque;

use serde_json::Value;
use tracing::trace;

use crate::foundation::error::Issues;
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;
use crate::path::step::{Key, Predicate, Step, ValueKey};

// ============================================================================
// CURSOR
// ============================================================================

/// Navigation state after applying a prefix of a path expression.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    /// Node positioned at the steps applied so far.
    node: Node<Value>,
    /// Values selected by those steps, before settling into a node.
    values: Vec<Value>,
    /// Whether the steps so far can only ever select a single value.
    exact: bool,
}

impl Cursor {
    fn seed(node: Node<Value>) -> Self {
        let values = node.value().cloned().map_or_else(Vec::new, |value| vec![value]);
        Self {
            node,
            values,
            exact: true,
        }
    }

    fn advance(self, step: &Step) -> Self {
        match step {
            Step::Root => Self::seed(self.node.to_root()),
            Step::Current => Self::seed(self.node),
            Step::Parent => match self.node.parent() {
                Some(parent) => Self::seed(parent),
                None => Self::seed(Node::missing_root()),
            },
            Step::Dot(name) => {
                let matches = self.select_field(name);
                self.settle(step, matches, true)
            }
            Step::Bracket(keys) => {
                let matches = self.select_keys(keys);
                let single = keys.len() < 2;
                self.settle(step, matches, single)
            }
            Step::DeepScan(name) => {
                let matches = self.select_deep(name);
                self.settle(step, matches, false)
            }
            Step::BracketWildcard => {
                let matches = self.select_values(true);
                self.settle(step, matches, false)
            }
            Step::DotWildcard => {
                let matches = self.select_values(false);
                self.settle(step, matches, false)
            }
            Step::Slice { start, end, step: stride } => {
                let matches = self.select_slice(*start, *end, *stride);
                self.settle(step, matches, false)
            }
            Step::Predicate(predicate) => {
                let matches = self.select_predicate(predicate);
                self.settle(step, matches, false)
            }
        }
    }

    /// Folds the selected values into the next cursor. An exact cursor
    /// collapses a unique match into a child node and anything else into a
    /// missing child; an inexact cursor aggregates matches into an array.
    fn settle(self, step: &Step, matches: Vec<Value>, step_exact: bool) -> Self {
        let exact = self.exact && step_exact;
        let node = if exact {
            if matches.len() == 1 {
                self.node.child(step.clone(), matches[0].clone())
            } else {
                self.node.missing_child(step.clone())
            }
        } else {
            self.node.child(step.clone(), Value::Array(matches.clone()))
        };
        Self {
            node,
            values: matches,
            exact,
        }
    }

    /// Field access. Arrays respond to numeric names so interpolated integer
    /// identifiers behave like indexes.
    fn select_field(&self, name: &str) -> Vec<Value> {
        let mut matches = Vec::new();
        for value in &self.values {
            match value {
                Value::Object(entries) => {
                    if let Some(found) = entries.get(name) {
                        matches.push(found.clone());
                    }
                }
                Value::Array(items) => {
                    if let Some(found) = name.parse::<usize>().ok().and_then(|i| items.get(i)) {
                        matches.push(found.clone());
                    }
                }
                _ => {}
            }
        }
        matches
    }

    fn select_keys(&self, keys: &[Key]) -> Vec<Value> {
        let mut matches = Vec::new();
        for value in &self.values {
            for key in keys {
                match key {
                    Key::Index(index) => match value {
                        Value::Array(items) => {
                            let len = items.len() as i64;
                            let resolved = if *index < 0 { len + index } else { *index };
                            if (0..len).contains(&resolved) {
                                matches.push(items[resolved as usize].clone());
                            }
                        }
                        Value::Object(entries) => {
                            if let Some(found) = entries.get(&index.to_string()) {
                                matches.push(found.clone());
                            }
                        }
                        _ => {}
                    },
                    Key::Name(name) => match value {
                        Value::Object(entries) => {
                            if let Some(found) = entries.get(name) {
                                matches.push(found.clone());
                            }
                        }
                        Value::Array(items) => {
                            if let Some(found) =
                                name.parse::<usize>().ok().and_then(|i| items.get(i))
                            {
                                matches.push(found.clone());
                            }
                        }
                        _ => {}
                    },
                }
            }
        }
        matches
    }

    /// Breadth-first descent. A container is scanned when dequeued, so
    /// matches surface in ascending depth, and object keys are visited in
    /// insertion order. Matching values that are themselves containers are
    /// still scanned for deeper matches.
    fn select_deep(&self, name: &str) -> Vec<Value> {
        let mut matches = Vec::new();
        let mut queue: VecDeque<&Value> = self.values.iter().collect();
        while let Some(candidate) = queue.pop_front() {
            match candidate {
                Value::Array(items) => queue.extend(items.iter()),
                Value::Object(entries) => {
                    for (key, child) in entries {
                        queue.push_back(child);
                        if key == name {
                            matches.push(child.clone());
                        }
                    }
                }
                _ => {}
            }
        }
        matches
    }

    fn select_values(&self, include_arrays: bool) -> Vec<Value> {
        let mut matches = Vec::new();
        for value in &self.values {
            match value {
                Value::Array(items) if include_arrays => matches.extend(items.iter().cloned()),
                Value::Object(entries) => matches.extend(entries.values().cloned()),
                _ => {}
            }
        }
        matches
    }

    /// Slice with Python semantics: negative bounds are relative to the
    /// length, defaults are start 0, end length, step 1, and out-of-range
    /// bounds clamp instead of selecting nothing. A zero step selects
    /// nothing.
    fn select_slice(&self, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Vec<Value> {
        let mut matches = Vec::new();
        let step = step.unwrap_or(1);
        if step == 0 {
            return matches;
        }
        for value in &self.values {
            let Value::Array(items) = value else { continue };
            let len = items.len() as i64;
            let mut from = start.unwrap_or(0);
            let mut to = end.unwrap_or(len);
            if from < 0 {
                from += len;
            }
            if to < 0 {
                to += len;
            }
            if step > 0 {
                from = from.clamp(0, len);
                to = to.clamp(0, len);
            } else {
                from = from.clamp(-1, len - 1);
                to = to.clamp(-1, len - 1);
            }
            let mut index = from;
            while (step > 0 && index < to) || (step < 0 && index > to) {
                matches.push(items[index as usize].clone());
                index += step;
            }
        }
        matches
    }

    fn select_predicate(&self, predicate: &Predicate) -> Vec<Value> {
        let mut matches = Vec::new();
        for value in &self.values {
            match value {
                Value::Array(items) => {
                    for (index, item) in items.iter().enumerate() {
                        if predicate.matches(item, ValueKey::Index(index), value) {
                            matches.push(item.clone());
                        }
                    }
                }
                Value::Object(entries) => {
                    for (key, item) in entries {
                        if predicate.matches(item, ValueKey::Name(key), value) {
                            matches.push(item.clone());
                        }
                    }
                }
                _ => {}
            }
        }
        matches
    }
}

// ============================================================================
// TREE
// ============================================================================

/// A parsed path expression, ready to navigate documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    steps: Vec<Step>,
}

impl Tree {
    pub(crate) fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The steps of the expression, in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Renders the expression, e.g. `$.users[0].name`.
    pub fn render(&self) -> String {
        self.steps
            .iter()
            .fold(String::new(), |path, step| step.render(&path))
    }

    /// Navigates from `node`, returning the node the expression ends at.
    ///
    /// Starting from the converted node rather than the root keeps `@` and
    /// `^` expressions relative to where the converter runs.
    pub fn navigate(&self, node: Node<Value>) -> Node<Value> {
        let mut cursor = Cursor::seed(node);
        for step in &self.steps {
            cursor = cursor.advance(step);
        }
        cursor.node
    }
}

// ============================================================================
// PATH CONVERTER
// ============================================================================

/// Converter that navigates a path expression over its input.
///
/// Navigation cannot fail: selecting nothing yields a missing node, leaving
/// the presence decision to downstream converters such as
/// [`required`](crate::combinators::ConvertExt::required) or defaults.
#[derive(Debug, Clone)]
pub struct PathConverter {
    tree: Tree,
    name: String,
}

impl PathConverter {
    pub(crate) fn new(tree: Tree) -> Self {
        let name = format!("path {}", tree.render());
        Self { tree, name }
    }

    /// The parsed expression behind this converter.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }
}

impl Convert for PathConverter {
    type Input = Value;
    type Output = Value;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn try_convert_node(&self, node: Node<Value>) -> Result<Node<Value>, Issues> {
        let result = self.tree.navigate(node);
        trace!(
            expression = %self.name,
            missing = result.is_missing(),
            "navigated path expression"
        );
        Ok(result)
    }
}
