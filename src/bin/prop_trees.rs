#[macro_use]
extern crate tracing;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use proposition_trees::{
    export::export_all, interactive, render::render, utils, Format, Session, TreeKind,
    DEFAULT_MAX_VARIABLES,
};
use ptree::PrintConfig;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

#[derive(Debug, Parser)]
#[clap(about = "Render illustrative trees for propositional-logic statements")]
struct Args {
    #[clap(subcommand)]
    command: Command,

    /// Refuse to enumerate decisions for more variables than this
    #[clap(long, global = true, default_value_t = DEFAULT_MAX_VARIABLES)]
    max_variables: usize,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the rules in the input files
    List {
        /// Input file or glob pattern of `label:expression` lines
        #[clap(short, long, value_parser)]
        input: String,
    },
    /// Render one tree of one rule
    Tree {
        /// Input file or glob pattern of `label:expression` lines
        #[clap(short, long, value_parser)]
        input: String,

        /// Rule position (1-based) or label
        #[clap(short, long, value_parser)]
        select: String,

        /// Tree to render
        #[clap(short, long, value_enum)]
        kind: TreeKind,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Output file, stdout if absent
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },
    /// Write the truth table of one rule as CSV, empty for a rule without variables
    Table {
        /// Input file or glob pattern of `label:expression` lines
        #[clap(short, long, value_parser)]
        input: String,

        /// Rule position (1-based) or label
        #[clap(short, long, value_parser)]
        select: String,

        /// Output file, stdout if absent
        #[clap(short, long, value_parser)]
        output: Option<PathBuf>,
    },
    /// Render every tree of every rule into a directory
    Export {
        /// Input file or glob pattern of `label:expression` lines
        #[clap(short, long, value_parser)]
        input: String,

        /// Output directory
        #[clap(short = 'd', long, value_parser)]
        output_dir: PathBuf,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Number of threads
        #[clap(short = 't', long)]
        num_threads: Option<usize>,
    },
    /// Load, select and render from a command prompt
    Interactive {
        /// Rules to load at start
        #[clap(short, long, value_parser)]
        input: Option<String>,
    },
}

fn open_output(output: &Option<PathBuf>) -> Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    })
}

fn load_session(input: &str, max_variables: usize) -> Result<Session> {
    let mut session = Session::default().with_max_variables(max_variables);
    session.load(input)?;
    Ok(session)
}

fn main() -> Result<()> {
    utils::init_tracing_subscriber("warn")?;
    let args = Args::parse();
    debug!("args: {:#?}", args);
    let config = PrintConfig::from_env();

    match args.command {
        Command::List { input } => {
            let session = load_session(&input, args.max_variables)?;
            interactive::list(&session, &mut io::stdout().lock())?;
        }
        Command::Tree {
            input,
            select,
            kind,
            format,
            output,
        } => {
            let mut session = load_session(&input, args.max_variables)?;
            session.select(&select)?;
            let tree = session.tree(kind)?;
            let mut out = open_output(&output)?;
            render(&tree, format, &config, &mut out)?;
            out.flush()?;
        }
        Command::Table {
            input,
            select,
            output,
        } => {
            let mut session = load_session(&input, args.max_variables)?;
            session.select(&select)?;
            session.truth_table(open_output(&output)?)?;
        }
        Command::Export {
            input,
            output_dir,
            format,
            num_threads,
        } => {
            utils::setup_rayon(num_threads)?;
            let session = load_session(&input, args.max_variables)?;
            let paths = export_all(
                session.propositions(),
                &output_dir,
                format,
                &config,
                args.max_variables,
            )?;
            println!("wrote {} files to {}", paths.len(), output_dir.display());
        }
        Command::Interactive { input } => {
            let mut session = match input {
                Some(input) => load_session(&input, args.max_variables)?,
                None => Session::default().with_max_variables(args.max_variables),
            };
            interactive::run(&mut session, io::stdin().lock(), io::stdout(), &config)?;
        }
    }

    Ok(())
}
