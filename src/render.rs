use crate::{Tree, TreeNode};
use anyhow::Result;
use ptree::PrintConfig;
use std::io::Write;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum, derive_more::Display)]
pub enum Format {
    /// Indented box-drawing text
    #[default]
    #[display(fmt = "text")]
    Text,
    /// Graphviz digraph
    #[display(fmt = "dot")]
    Dot,
    /// JSON document
    #[display(fmt = "json")]
    Json,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Dot => "dot",
            Self::Json => "json",
        }
    }
}

pub fn render(tree: &Tree, format: Format, config: &PrintConfig, out: &mut dyn Write) -> Result<()> {
    match format {
        Format::Text => write_text(tree, config, out)?,
        Format::Dot => write_dot(tree, out)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, tree)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

pub fn render_to_string(tree: &Tree, format: Format, config: &PrintConfig) -> Result<String> {
    let mut out = Vec::new();
    render(tree, format, config, &mut out)?;
    Ok(String::from_utf8(out)?)
}

fn write_text(tree: &Tree, config: &PrintConfig, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", tree.title)?;
    match &tree.root {
        Some(root) => ptree::write_tree_with(root, out, config),
        None => writeln!(out, "(empty)"),
    }
}

fn write_dot(tree: &Tree, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "digraph G {{")?;
    writeln!(out, "label=\"{}\";", escape(&tree.title))?;
    writeln!(out, "labelloc=t;")?;
    writeln!(out, "node [shape=box, style=filled, fillcolor=lightblue];")?;

    if let Some(root) = &tree.root {
        let mut result = Ok(());
        root.walk(&mut |id, parent, node: &TreeNode| {
            if result.is_err() {
                return;
            }
            result = writeln!(out, "n{}[label=\"{}\"];", id, escape(&node.label)).and_then(|_| {
                match parent {
                    Some(parent) => writeln!(out, "n{} -> n{};", parent, id),
                    None => Ok(()),
                }
            });
        });
        result?;
    }

    writeln!(out, "}}")
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{token_tree, variable_tree, Variable};

    #[test]
    fn test_text() {
        let tree = variable_tree(&[Variable('p'), Variable('q')]).titled("R");
        let text = render_to_string(&tree, Format::Text, &PrintConfig::default()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Variable tree for: R");
        assert!(lines[1].contains("Root: Variables"));
        assert!(lines[2].ends_with("Variable: p"));
        assert!(lines[3].ends_with("Variable: q"));
    }

    #[test]
    fn test_text_empty() {
        let tree = token_tree("").titled("Blank");
        let text = render_to_string(&tree, Format::Text, &PrintConfig::default()).unwrap();
        assert_eq!(text, "Token tree for: Blank\n(empty)\n");
    }

    #[test]
    fn test_dot() {
        let tree = token_tree("\"p\" q").titled("Quoted");
        let dot = render_to_string(&tree, Format::Dot, &PrintConfig::default()).unwrap();
        assert!(dot.starts_with("digraph G {\n"));
        assert!(dot.contains("label=\"Token tree for: Quoted\";"));
        assert!(dot.contains("n0[label=\"Node-1 (\\\"p\\\")\"];"));
        assert!(dot.contains("n1[label=\"Node-2 (q)\"];"));
        assert!(dot.contains("n0 -> n1;"));
        assert_eq!(dot.matches("->").count(), 1);
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_json() {
        let tree = token_tree("p").titled("One");
        let json = render_to_string(&tree, Format::Json, &PrintConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "tokens");
        assert_eq!(value["title"], "Token tree for: One");
        assert_eq!(value["root"]["label"], "Node-1 (p)");

        let back: Tree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
