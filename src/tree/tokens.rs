use super::{Tree, TreeKind, TreeNode};

/// Chain the whitespace tokens of `expression`, one node per token.
///
/// Node `i` is labelled `Node-i (token)` and points at node `i + 1`.
pub fn token_tree(expression: &str) -> Tree {
    let labels: Vec<String> = expression
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| format!("Node-{} ({})", i + 1, token))
        .collect();

    // fold from the tail so each node owns its successor
    let root = labels
        .into_iter()
        .rev()
        .fold(None, |next: Option<TreeNode>, label| {
            Some(TreeNode::with_children(label, next.into_iter().collect()))
        });

    Tree::new(TreeKind::Tokens, root)
}
