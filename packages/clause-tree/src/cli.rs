//! Command-line interface for clause-tree.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::GrammarConfig;
use crate::corpus::{load_corpus, Corpus};
use crate::error::Result;
use crate::grammar::ReferenceGrammar;
use crate::splitting::{CharRatioCounter, Chunk, SplitEngine, TokenCounter, WordCounter};
use crate::tree::{NodeId, ReferenceTree};
use crate::yaml::{chunks_to_yaml, records_to_yaml, save_yaml};

/// Reconstruct the clause hierarchy of numbered regulatory text.
#[derive(Parser)]
#[command(name = "clause-tree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Grammar configuration file (YAML); defaults to the Banking Act grammar
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Corpus files shared by every corpus command.
#[derive(Args, Debug)]
pub struct CorpusArgs {
    /// Corpus text files, processed in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the parsed records with their full references as YAML.
    Records {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Write to this file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Draw the reference tree.
    Tree {
        #[command(flatten)]
        corpus: CorpusArgs,
    },

    /// List the headings of the corpus as an indented outline.
    Outline {
        #[command(flatten)]
        corpus: CorpusArgs,
    },

    /// Print a clause with the conditions and qualifiers of its ancestors.
    Context {
        /// Full reference of the clause (e.g. 23(1)(a)); empty for everything
        reference: String,

        #[command(flatten)]
        corpus: CorpusArgs,
    },

    /// Split the corpus into chunks that fit a token budget.
    Split {
        #[command(flatten)]
        corpus: CorpusArgs,

        /// Maximum tokens per chunk
        #[arg(short, long)]
        budget: usize,

        /// Full reference of the subtree to split (default: whole tree)
        #[arg(short, long)]
        node: Option<String>,

        /// How tokens are counted
        #[arg(long, value_enum, default_value_t = CounterKind::Chars)]
        counter: CounterKind,

        /// Write to this file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract a reference from free text.
    Extract {
        /// Text mentioning a reference (e.g. "23 subregulation (1)(a)")
        text: String,
    },
}

/// Token counting method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CounterKind {
    /// Whitespace-delimited words
    Words,
    /// Characters divided by four, rounded up
    Chars,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Execute an already parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => GrammarConfig::from_yaml_file(path)?,
        None => GrammarConfig::banking_act(),
    };

    match cli.command {
        Commands::Records { corpus, output } => records_command(&corpus.files, &config, output.as_deref()),
        Commands::Tree { corpus } => {
            let tree = load_with_progress(&corpus.files, &config)?.build_tree()?;
            print!("{}", tree.render_ascii());
            Ok(())
        }
        Commands::Outline { corpus } => {
            let tree = load_with_progress(&corpus.files, &config)?.build_tree()?;
            print!("{}", tree.heading_outline());
            Ok(())
        }
        Commands::Context { reference, corpus } => {
            let corpus = load_with_progress(&corpus.files, &config)?;
            println!("{}", corpus.renderer().render(&reference)?);
            Ok(())
        }
        Commands::Split {
            corpus,
            budget,
            node,
            counter,
            output,
        } => split_command(
            &corpus.files,
            &config,
            budget,
            node.as_deref(),
            counter,
            output.as_deref(),
        ),
        Commands::Extract { text } => {
            let grammar = ReferenceGrammar::new(&config)?;
            match grammar.extract_from_noisy_text(&text) {
                Some(reference) => println!("{reference}"),
                None => eprintln!("{}", style("No reference found").yellow()),
            }
            Ok(())
        }
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn load_with_progress(files: &[PathBuf], config: &GrammarConfig) -> Result<Corpus> {
    let pb = spinner("Reading corpus...");
    let corpus = load_corpus(files, config);
    pb.finish_and_clear();
    corpus
}

fn records_command(files: &[PathBuf], config: &GrammarConfig, output: Option<&Path>) -> Result<()> {
    let corpus = load_with_progress(files, config)?;
    let yaml = records_to_yaml(&corpus.records, &corpus.blocks)?;

    match output {
        Some(path) => {
            let path = save_yaml(&yaml, path)?;
            eprintln!(
                "{} {} records to {}",
                style("Saved").green().bold(),
                corpus.records.len(),
                path.display()
            );
        }
        None => print!("{yaml}"),
    }
    Ok(())
}

fn split_command(
    files: &[PathBuf],
    config: &GrammarConfig,
    budget: usize,
    node: Option<&str>,
    counter: CounterKind,
    output: Option<&Path>,
) -> Result<()> {
    let corpus = load_with_progress(files, config)?;
    let tree = corpus.build_tree()?;
    let start = match node {
        Some(reference) => tree.get(reference)?,
        None => tree.root(),
    };

    let pb = spinner("Splitting...");
    let chunks = match counter {
        CounterKind::Words => split_with(&corpus, &tree, start, budget, WordCounter),
        CounterKind::Chars => split_with(&corpus, &tree, start, budget, CharRatioCounter::default()),
    };
    pb.finish_and_clear();
    let chunks = chunks?;

    let yaml = chunks_to_yaml(&chunks, budget)?;
    match output {
        Some(path) => {
            let path = save_yaml(&yaml, path)?;
            eprintln!(
                "{} {} chunks (budget {}) to {}",
                style("Saved").green().bold(),
                style(chunks.len()).cyan(),
                budget,
                path.display()
            );
        }
        None => print!("{yaml}"),
    }
    Ok(())
}

fn split_with<C: TokenCounter>(
    corpus: &Corpus,
    tree: &ReferenceTree,
    start: NodeId,
    budget: usize,
    counter: C,
) -> Result<Vec<Chunk>> {
    SplitEngine::new(tree, corpus.renderer(), counter).split(start, budget)
}
