use crate::{
    assignment::{self, DEFAULT_MAX_VARIABLES},
    decision_tree, extract_variables, token_tree, variable_tree, Proposition, PropositionSet,
    Tree, TreeKind,
};
use anyhow::Result;
use std::{io, path::Path};

#[derive(Debug, derive_more::Display)]
pub enum SessionError {
    #[display(fmt = "Select a rule to generate its {} first.", "_0.title().to_lowercase()")]
    NoSelection(TreeKind),
    #[display(fmt = "No rule matches `{}` ({} rules loaded).", _0, _1)]
    UnknownRule(String, usize),
}

impl std::error::Error for SessionError {}

/// The loaded rules and the current selection.
#[derive(Debug, Clone)]
pub struct Session {
    propositions: PropositionSet,
    selected: Option<usize>,
    max_variables: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            propositions: PropositionSet::default(),
            selected: None,
            max_variables: DEFAULT_MAX_VARIABLES,
        }
    }
}

impl Session {
    pub fn new(propositions: PropositionSet) -> Self {
        Self {
            propositions,
            ..Default::default()
        }
    }

    pub fn with_max_variables(mut self, max_variables: usize) -> Self {
        self.max_variables = max_variables;
        self
    }

    pub fn propositions(&self) -> &PropositionSet {
        &self.propositions
    }

    /// Replace the loaded rules with those of the file at `path`, or of every
    /// file matching it as a glob pattern if no such file exists.
    ///
    /// On failure the previous rules and selection are kept.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let set = if path.is_file() {
            PropositionSet::load(path)?
        } else {
            PropositionSet::load_glob(&path.to_string_lossy())?
        };
        self.propositions = set;
        self.selected = None;
        info!("loaded {} propositions", self.propositions.len());
        Ok(self.propositions.len())
    }

    pub fn select(&mut self, selector: &str) -> Result<&Proposition, SessionError> {
        let index = self.propositions.find(selector).ok_or_else(|| {
            SessionError::UnknownRule(selector.trim().to_string(), self.propositions.len())
        })?;
        self.selected = Some(index);
        Ok(&self.propositions[index])
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Proposition> {
        self.selected.map(|i| &self.propositions[i])
    }

    fn require_selected(&self, kind: TreeKind) -> Result<&Proposition, SessionError> {
        self.selected().ok_or(SessionError::NoSelection(kind))
    }

    /// Build the `kind` tree of the selected rule, titled after its label.
    pub fn tree(&self, kind: TreeKind) -> Result<Tree> {
        let prop = self.require_selected(kind)?;
        let tree = build_tree(prop, kind, self.max_variables)?;
        debug!("{}: {} nodes", tree.title, tree.node_count());
        Ok(tree)
    }

    /// Write the truth table of the selected rule as CSV.
    pub fn truth_table(&self, out: impl io::Write) -> Result<()> {
        let prop = self.require_selected(TreeKind::Decisions)?;
        let variables = extract_variables(&prop.expression);
        assignment::truth_table(&variables, self.max_variables, out)
    }
}

/// Build the `kind` tree of `prop`, titled after its label.
pub fn build_tree(prop: &Proposition, kind: TreeKind, max_variables: usize) -> Result<Tree> {
    let tree = match kind {
        TreeKind::Tokens => token_tree(&prop.expression),
        TreeKind::Variables => variable_tree(&extract_variables(&prop.expression)),
        TreeKind::Decisions => {
            decision_tree(&extract_variables(&prop.expression), max_variables)?
        }
    };
    Ok(tree.titled(&prop.label))
}
