use ptree::{Style, TreeItem};
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, io};

mod decisions;
mod tokens;
mod variables;

pub use decisions::decision_tree;
pub use tokens::token_tree;
pub use variables::variable_tree;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum TreeKind {
    /// One node per token, chained in order
    #[display(fmt = "tokens")]
    #[clap(alias("ast"))]
    Tokens,
    /// A root with one child per distinct variable
    #[display(fmt = "variables")]
    #[clap(alias("semantic"))]
    Variables,
    /// A root with one leaf per truth assignment
    #[display(fmt = "decisions")]
    #[clap(alias("decision"))]
    Decisions,
}

impl TreeKind {
    pub const ALL: [TreeKind; 3] = [Self::Tokens, Self::Variables, Self::Decisions];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Tokens => "Token tree",
            Self::Variables => "Variable tree",
            Self::Decisions => "Decision tree",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: vec![],
        }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Visit nodes in pre-order together with their parent index.
    pub fn walk(&self, f: &mut impl FnMut(usize, Option<usize>, &TreeNode)) {
        let mut next = 0;
        self.walk_inner(None, &mut next, f);
    }

    fn walk_inner(
        &self,
        parent: Option<usize>,
        next: &mut usize,
        f: &mut impl FnMut(usize, Option<usize>, &TreeNode),
    ) {
        let id = *next;
        *next += 1;
        f(id, parent, self);
        for child in &self.children {
            child.walk_inner(Some(id), next, f);
        }
    }
}

impl TreeItem for TreeNode {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, style: &Style) -> io::Result<()> {
        write!(f, "{}", style.paint(&self.label))
    }

    fn children(&self) -> Cow<[Self::Child]> {
        Cow::from(&self.children)
    }
}

/// A titled tree. Empty when the source has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub kind: TreeKind,
    pub title: String,
    pub root: Option<TreeNode>,
}

impl Tree {
    pub fn new(kind: TreeKind, root: Option<TreeNode>) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            root,
        }
    }

    /// Title the tree after the proposition it was built from.
    pub fn titled(mut self, label: &str) -> Self {
        self.title = format!("{} for: {}", self.kind.title(), label);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, TreeNode::node_count)
    }

    pub fn edge_count(&self) -> usize {
        self.node_count().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk() {
        let root = TreeNode::with_children(
            "a",
            vec![
                TreeNode::with_children("b", vec![TreeNode::leaf("c")]),
                TreeNode::leaf("d"),
            ],
        );
        let mut visited = vec![];
        root.walk(&mut |id, parent, node| visited.push((id, parent, node.label.clone())));
        assert_eq!(
            visited,
            vec![
                (0, None, "a".to_string()),
                (1, Some(0), "b".to_string()),
                (2, Some(1), "c".to_string()),
                (3, Some(0), "d".to_string()),
            ]
        );
        assert_eq!(root.node_count(), 4);
    }

    #[test]
    fn test_title() {
        let tree = Tree::new(TreeKind::Variables, None).titled("Rule 7");
        assert_eq!(tree.title, "Variable tree for: Rule 7");
        assert!(tree.is_empty());
        assert_eq!(tree.edge_count(), 0);
    }
}
