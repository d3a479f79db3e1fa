use crate::{
    render::{render, Format},
    Session, TreeKind,
};
use anyhow::{bail, Result};
use clap::ValueEnum;
use ptree::PrintConfig;
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  load <path>         load propositions from a file or glob pattern
  list                show the loaded rules
  select <n|label>    select a rule by position or label
  tokens              show the token tree of the selected rule
  variables           show the variable tree of the selected rule
  decisions           show the decision tree of the selected rule
  format <text|dot|json>
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(String),
    List,
    Select(String),
    Show(TreeKind),
    Format(Format),
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "load" if !rest.is_empty() => Self::Load(rest.to_string()),
            "list" | "ls" => Self::List,
            "select" | "sel" if !rest.is_empty() => Self::Select(rest.to_string()),
            "format" => match Format::from_str(rest, true) {
                Ok(format) => Self::Format(format),
                Err(_) => bail!("unknown format `{rest}`"),
            },
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "load" | "select" | "sel" => bail!("`{word}` needs an argument"),
            _ => match TreeKind::from_str(word, true) {
                Ok(kind) => Self::Show(kind),
                Err(_) => bail!("unknown command `{word}`, try `help`"),
            },
        };
        Ok(Some(command))
    }
}

/// Read commands from `input` until `quit` or end of input.
///
/// Command failures are reported on `out` and do not stop the loop.
pub fn run(
    session: &mut Session,
    input: impl BufRead,
    mut out: impl Write,
    config: &PrintConfig,
) -> Result<()> {
    let mut format = Format::Text;
    writeln!(out, "type `help` for a list of commands")?;

    for line in input.lines() {
        let line = line?;
        let result = Command::parse(&line).and_then(|command| match command {
            Some(Command::Quit) => Ok(false),
            Some(command) => {
                execute(session, command, &mut format, config, &mut out)?;
                Ok(true)
            }
            None => Ok(true),
        });
        match result {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                debug!("command `{}` failed: {:#}", line.trim(), e);
                writeln!(out, "error: {e:#}")?;
            }
        }
    }
    Ok(())
}

fn execute(
    session: &mut Session,
    command: Command,
    format: &mut Format,
    config: &PrintConfig,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Load(path) => {
            let n = session.load(&path)?;
            writeln!(out, "loaded {n} propositions")?;
        }
        Command::List => list(session, out)?,
        Command::Select(selector) => {
            let prop = session.select(&selector)?;
            writeln!(out, "selected: {}", prop.label)?;
        }
        Command::Show(kind) => {
            let tree = session.tree(kind)?;
            render(&tree, *format, config, out)?;
        }
        Command::Format(f) => {
            *format = f;
            writeln!(out, "format: {f}")?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}

/// Print `index. label` per loaded rule, with a trailing ` *` on the selected one.
pub fn list(session: &Session, out: &mut impl Write) -> Result<()> {
    for (i, label) in session.propositions().labels().enumerate() {
        let marker = if session.selected_index() == Some(i) { " *" } else { "" };
        writeln!(out, "{}. {}{}", i + 1, label, marker)?;
    }
    writeln!(out, "loaded {} propositions", session.propositions().len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::FIXTURE_RULES;

    fn run_script(script: &str) -> String {
        let mut session = Session::new(FIXTURE_RULES.clone());
        let mut out = Vec::new();
        run(
            &mut session,
            script.as_bytes(),
            &mut out,
            &PrintConfig::default(),
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(
            Command::parse("select De Morgan").unwrap(),
            Some(Command::Select("De Morgan".to_string()))
        );
        assert_eq!(
            Command::parse("ast").unwrap(),
            Some(Command::Show(TreeKind::Tokens))
        );
        assert_eq!(
            Command::parse("Decisions").unwrap(),
            Some(Command::Show(TreeKind::Decisions))
        );
        assert_eq!(
            Command::parse("format DOT").unwrap(),
            Some(Command::Format(Format::Dot))
        );
        assert!(Command::parse("select").is_err());
        assert!(Command::parse("format svg").is_err());
        assert!(Command::parse("frobnicate").is_err());
    }

    #[test]
    fn test_session_script() {
        let out = run_script("tokens\nselect 3\nlist\nvariables\nformat dot\ndecisions\nquit\ntokens\n");
        assert!(out.contains("error: Select a rule to generate its token tree first."));
        assert!(out.contains("selected: Tautology"));
        assert!(out.contains("\n3. Tautology *\n"));
        assert!(out.contains("\n1. Modus ponens\n"));
        assert!(out.contains("loaded 4 propositions"));
        assert!(out.contains("Variable tree for: Tautology"));
        assert!(out.contains("Variable: r"));
        assert!(out.contains("n0 -> n2;"));
        // nothing after quit
        assert!(!out.contains("Token tree"));
    }

    #[test]
    fn test_list_format() {
        let session = Session::new(FIXTURE_RULES.clone());
        let mut out = Vec::new();
        list(&session, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1. Modus ponens\n2. De Morgan\n3. Tautology\n4. Empty rule\nloaded 4 propositions\n"
        );
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let out = run_script("select 9\nbogus\nselect 1\n");
        assert!(out.contains("error: No rule matches `9` (4 rules loaded)."));
        assert!(out.contains("error: unknown command `bogus`"));
        assert!(out.contains("selected: Modus ponens"));
    }
}
