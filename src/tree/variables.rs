use super::{Tree, TreeKind, TreeNode};
use crate::Variable;

pub const VARIABLES_ROOT: &str = "Root: Variables";

/// A root with one child per variable, in the given order.
pub fn variable_tree(variables: &[Variable]) -> Tree {
    let children = variables
        .iter()
        .map(|v| TreeNode::leaf(format!("Variable: {v}")))
        .collect();
    Tree::new(
        TreeKind::Variables,
        Some(TreeNode::with_children(VARIABLES_ROOT, children)),
    )
}
