use anyhow::{Context, Result};
use glob::glob;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    time::Instant,
};

/// A labelled logical formula, read from a `label:expression` line.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proposition {
    pub label: String,
    pub expression: String,
}

impl Proposition {
    pub fn new(label: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            expression: expression.into(),
        }
    }

    /// Parse one line of a proposition file.
    ///
    /// The line is split at the first `:`; lines without one are skipped.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (label, expression) = line.trim().split_once(':')?;
        Some(Self::new(label.trim(), expression.trim()))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.expression.split_whitespace()
    }
}

#[derive(
    Debug,
    Default,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::DerefMut,
    derive_more::From,
    derive_more::IntoIterator,
)]
pub struct PropositionSet(pub Vec<Proposition>);

impl PropositionSet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let set = Self::from_reader(BufReader::new(file))
            .with_context(|| format!("cannot read {}", path.display()))?;
        debug!("{} propositions in {}", set.len(), path.display());
        Ok(set)
    }

    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut propositions = Vec::new();
        for line in reader.lines() {
            if let Some(prop) = Proposition::parse_line(&line?) {
                propositions.push(prop);
            }
        }
        Ok(Self(propositions))
    }

    pub fn load_glob(pattern: &str) -> Result<Self> {
        let begin = Instant::now();
        info!("load propositions from {}...", pattern);

        let mut paths = glob(pattern)
            .with_context(|| format!("invalid pattern {pattern}"))?
            .collect::<Result<Vec<_>, _>>()?;
        if paths.is_empty() {
            anyhow::bail!("no file matches {pattern}");
        }
        paths.sort();

        let mut set = Self::new();
        for path in paths {
            set.extend(Self::load(&path)?);
        }

        info!("done in {:?}", Instant::now() - begin);
        Ok(set)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|p| p.label.as_str())
    }

    /// Resolve a 1-based position or an exact label.
    /// Returns the 0-based index.
    pub fn find(&self, selector: &str) -> Option<usize> {
        let selector = selector.trim();
        if let Ok(n) = selector.parse::<usize>() {
            if (1..=self.len()).contains(&n) {
                return Some(n - 1);
            }
        }
        self.iter().position(|p| p.label == selector)
    }
}

impl FromIterator<Proposition> for PropositionSet {
    fn from_iter<T: IntoIterator<Item = Proposition>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
