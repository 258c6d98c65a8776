//! Command-line interface for the structurer.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{validate_codex_id, Settings, DEFAULT_CONFIG_PATH};
use crate::error::Result;
use crate::holmes::{compile_triplets, parse_triplets};
use crate::output::{generate_chunks_jsonl, generate_script, generate_units_yaml, save_output};
use crate::pipeline::{build_codexes, holmes_chunks, list_codexes, markup_codex, structure_codex};
use crate::retrieval::{hierarchical_query, triplet_query};

/// LawGraph Structurer - turn Russian codices into graph upsert scripts.
#[derive(Parser)]
#[command(name = "lawgraph-structurer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Graph schema of a retrieval query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Schema {
    /// Hierarchical Codex/Article/Paragraph/Subparagraph graph
    Naive,
    /// Entity-relation triplet graph
    Holmes,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Structure the whole corpus into a Cypher rebuild script.
    Build {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the structural units of one codex as YAML.
    Inspect {
        /// Codex id (e.g., 149)
        codex: String,
    },

    /// Chunk one codex for triplet extraction, as JSON lines.
    Chunks {
        /// Codex id (e.g., 149)
        codex: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compile extracted triplets (JSON) into a Cypher script.
    Triplets {
        /// JSON file with an array of {subject, relation, object}
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the retrieval query of a schema.
    Query {
        #[arg(value_enum)]
        schema: Schema,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli.config)?;

    match cli.command {
        Commands::Build { output } => build_command(&settings, output.as_deref()),
        Commands::Inspect { codex } => inspect_command(&settings, &codex),
        Commands::Chunks { codex, output } => chunks_command(&settings, &codex, output.as_deref()),
        Commands::Triplets { input, output } => triplets_command(&input, output.as_deref()),
        Commands::Query { schema } => {
            query_command(&settings, schema);
            Ok(())
        }
    }
}

fn spinner(settings: &Settings) -> ProgressBar {
    if settings.system.silent_creation {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print to stdout or save to a file, reporting the path on stderr.
fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let saved = save_output(content, path)?;
            eprintln!(
                "{} {}",
                style("Saved to:").green().bold(),
                saved.display()
            );
        }
        None => print!("{content}"),
    }
    Ok(())
}

/// Execute the build command.
fn build_command(settings: &Settings, output: Option<&Path>) -> Result<()> {
    let codexes = list_codexes(settings)?;
    let pb = spinner(settings);

    for codex in &codexes {
        pb.set_message(format!("Marking up {codex}-ФЗ..."));
        if let Err(e) = markup_codex(settings, codex) {
            pb.finish_and_clear();
            return Err(e);
        }
    }

    pb.set_message("Structuring corpus...");
    let corpus = build_codexes(settings, &codexes);
    pb.finish_and_clear();
    let corpus = corpus?;

    // Classifier warnings from markup come back again with the structured documents
    for warning in &corpus.warnings {
        tracing::warn!("{warning}");
    }

    if !settings.system.silent_creation {
        eprintln!(
            "{} {} codices, {} units, {} commands",
            style("Built").bold(),
            style(corpus.documents.len()).cyan(),
            corpus.documents.iter().map(|d| d.units.len()).sum::<usize>(),
            corpus.commands.len()
        );
        if !corpus.warnings.is_empty() {
            eprintln!("  Warnings: {}", style(corpus.warnings.len()).yellow().bold());
        }
    }

    emit(&generate_script(&corpus.commands), output)
}

/// Execute the inspect command.
fn inspect_command(settings: &Settings, codex: &str) -> Result<()> {
    validate_codex_id(codex)?;
    let document = structure_codex(settings, codex)?;
    print!("{}", generate_units_yaml(&document)?);
    Ok(())
}

/// Execute the chunks command.
fn chunks_command(settings: &Settings, codex: &str, output: Option<&Path>) -> Result<()> {
    validate_codex_id(codex)?;
    let set = holmes_chunks(settings, codex)?;
    for warning in &set.warnings {
        tracing::warn!(codex = %codex, "{warning}");
    }
    emit(&generate_chunks_jsonl(&set.chunks)?, output)
}

/// Execute the triplets command.
fn triplets_command(input: &Path, output: Option<&Path>) -> Result<()> {
    let json = std::fs::read_to_string(input)?;
    let set = parse_triplets(&json)?;

    if !set.warnings.is_empty() {
        eprintln!(
            "  Skipped: {}",
            style(set.warnings.len()).yellow().bold()
        );
    }

    emit(&generate_script(&compile_triplets(&set.triplets)), output)
}

/// Execute the query command.
fn query_command(settings: &Settings, schema: Schema) {
    let top_k = settings.retrieval.top_k;
    let query = match schema {
        Schema::Naive => hierarchical_query(top_k),
        Schema::Holmes => triplet_query(top_k),
    };
    println!("{query}");
}
