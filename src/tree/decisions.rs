use super::{Tree, TreeKind, TreeNode};
use crate::{assignment::assignments, Variable};
use anyhow::Result;

pub const DECISIONS_ROOT: &str = "Root: Decision";

/// A root with one leaf per truth assignment of `variables`.
///
/// Leaves are not evaluated against the formula; they only list the combinations.
pub fn decision_tree(variables: &[Variable], max_variables: usize) -> Result<Tree> {
    let children = assignments(variables, max_variables)?
        .enumerate()
        .map(|(i, assignment)| TreeNode::leaf(format!("Decision-{}: {}", i + 1, assignment)))
        .collect();
    Ok(Tree::new(
        TreeKind::Decisions,
        Some(TreeNode::with_children(DECISIONS_ROOT, children)),
    ))
}
