//! Alternation with failure ranking.

use serde::Serialize;

use crate::foundation::display::display_value;
use crate::foundation::error::{Issue, Issues};
use crate::foundation::node::Node;
use crate::foundation::traits::Convert;

/// Tries the left converter and falls back to the right.
///
/// When both fail, the branch whose issues reached deeper into the input is
/// reported, a depth tie going to the branch with more issues at that depth:
/// the branch that got further is the one the input most likely meant. A
/// full tie collapses into a single issue at the input's own position naming
/// both branches, so `string | boolean` reads as one expectation rather than
/// two unrelated failures.
#[derive(Debug, Clone)]
pub struct Or<L, R> {
    left: L,
    right: R,
}

impl<L, R> Or<L, R> {
    pub(crate) fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

/// Maximum issue depth and how many issues sit at it.
fn rank(issues: &Issues) -> (usize, usize) {
    let depth = issues.iter().map(Issue::depth).max().unwrap_or(0);
    let count = issues.iter().filter(|issue| issue.depth() == depth).count();
    (depth, count)
}

impl<L, R> Convert for Or<L, R>
where
    L: Convert,
    L::Input: Serialize,
    R: Convert<Input = L::Input, Output = L::Output>,
{
    type Input = L::Input;
    type Output = L::Output;

    fn name(&self) -> String {
        format!("{} | {}", self.left.name(), self.right.name())
    }

    fn try_convert_node(&self, node: Node<Self::Input>) -> Result<Node<Self::Output>, Issues> {
        let left = match self.left.try_convert_node(node.clone()) {
            Ok(converted) => return Ok(converted),
            Err(issues) => issues,
        };
        let right = match self.right.try_convert_node(node.clone()) {
            Ok(converted) => return Ok(converted),
            Err(issues) => issues,
        };

        let (left_depth, left_count) = rank(&left);
        let (right_depth, right_count) = rank(&right);
        if left_depth != right_depth {
            return Err(if left_depth > right_depth { left } else { right });
        }
        if left_count != right_count {
            return Err(if left_count > right_count { left } else { right });
        }

        Err(Issues::of(Issue {
            path: node.path(),
            expected: self.name(),
            actual: node
                .value()
                .and_then(|value| serde_json::to_value(value).ok())
                .map(|value| display_value(&value)),
        }))
    }
}
