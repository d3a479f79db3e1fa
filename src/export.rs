use crate::{
    render::{render, Format},
    session::build_tree,
    PropositionSet, TreeKind,
};
use anyhow::{Context, Result};
use ptree::PrintConfig;
use rayon::prelude::*;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::Instant,
};

/// Render every tree of every proposition into `dir`.
///
/// Files are named `<position>-<kind>.<ext>` with 1-based positions.
/// A tree that cannot be built, such as a decision tree over too many variables,
/// is skipped with a warning. I/O failures abort the export.
/// Returns the paths written, in proposition then kind order.
pub fn export_all(
    propositions: &PropositionSet,
    dir: impl AsRef<Path>,
    format: Format,
    config: &PrintConfig,
    max_variables: usize,
) -> Result<Vec<PathBuf>> {
    let begin = Instant::now();
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;
    info!("export {} propositions to {}...", propositions.len(), dir.display());

    let written = propositions
        .par_iter()
        .enumerate()
        .flat_map_iter(|(i, prop)| TreeKind::ALL.into_iter().map(move |kind| (i, prop, kind)))
        .map(|(i, prop, kind)| -> Result<Option<PathBuf>> {
            let tree = match build_tree(prop, kind, max_variables) {
                Ok(tree) => tree,
                Err(e) => {
                    warn!("skip {} of `{}`: {:#}", kind, prop.label, e);
                    return Ok(None);
                }
            };
            let path = dir.join(format!("{}-{}.{}", i + 1, kind, format.extension()));
            let mut out = BufWriter::new(
                File::create(&path).with_context(|| format!("cannot create {}", path.display()))?,
            );
            render(&tree, format, config, &mut out)?;
            out.flush()?;
            Ok(Some(path))
        })
        .collect::<Result<Vec<_>>>()?;
    let paths: Vec<PathBuf> = written.into_iter().flatten().collect();

    info!("done in {:?}", Instant::now() - begin);
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::FIXTURE_RULES;

    #[test]
    fn test_export_all() {
        let dir = std::env::temp_dir().join(format!("prop-trees-export-{}", std::process::id()));
        let paths = export_all(
            &FIXTURE_RULES,
            &dir,
            Format::Dot,
            &PrintConfig::default(),
            crate::assignment::DEFAULT_MAX_VARIABLES,
        )
        .unwrap();

        assert_eq!(paths.len(), 12);
        assert_eq!(paths[0], dir.join("1-tokens.dot"));
        assert_eq!(paths[11], dir.join("4-decisions.dot"));
        let dot = fs::read_to_string(dir.join("3-decisions.dot")).unwrap();
        assert!(dot.contains("Decision-2: {r: false}"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_export_skips_oversized_decisions() {
        let dir = std::env::temp_dir().join(format!("prop-trees-skip-{}", std::process::id()));
        // only the rule without variables can enumerate its decisions
        let paths = export_all(&FIXTURE_RULES, &dir, Format::Text, &PrintConfig::default(), 0)
            .unwrap();

        assert_eq!(paths.len(), 9);
        assert!(!dir.join("1-decisions.txt").exists());
        assert!(dir.join("1-variables.txt").exists());
        assert_eq!(paths.last(), Some(&dir.join("4-decisions.txt")));

        fs::remove_dir_all(&dir).unwrap();
    }
}
