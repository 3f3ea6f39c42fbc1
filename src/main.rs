//! conceptdiff CLI: known/new concept detection for text documents.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};

use conceptdiff::{ConceptConfig, Detector, Document, Strategy};

#[derive(Parser)]
#[command(name = "conceptdiff", version, about = "Known/new concept detection for text")]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the ranked keyphrases of a document.
    Extract {
        /// Extraction strategy: frequency, tfidf, or textrank.
        #[arg(long, default_value = "frequency")]
        strategy: Strategy,

        /// Document to extract from (UTF-8 text, one segment per line).
        file: PathBuf,

        /// Corpus documents to fit TF-IDF on (defaults to the document itself).
        #[arg(long, num_args = 1..)]
        corpus: Vec<PathBuf>,
    },

    /// Split a candidate document's concepts into known and new, as JSON.
    Match {
        /// Extraction strategy: frequency, tfidf, or textrank.
        #[arg(long, default_value = "frequency")]
        strategy: Strategy,

        /// Library documents.
        #[arg(long, num_args = 1.., required = true)]
        library: Vec<PathBuf>,

        /// Candidate document.
        #[arg(long)]
        candidate: PathBuf,

        /// Override the fuzzy-match similarity threshold.
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Print the effective configuration as TOML.
    Config,
}

fn read_document(path: &Path) -> Result<Document> {
    let text = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))?;
    Ok(Document::from_text(&text))
}

fn read_documents(paths: &[PathBuf]) -> Result<Vec<Document>> {
    paths.iter().map(|p| read_document(p)).collect()
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConceptConfig::load(path)?,
        None => ConceptConfig::default(),
    };

    match cli.command {
        Commands::Extract {
            strategy,
            file,
            corpus,
        } => {
            let detector = Detector::new(config)?;
            let document = read_document(&file)?;
            let corpus = read_documents(&corpus)?;
            let phrases = detector.extract(strategy, &document, &corpus)?;
            if phrases.is_empty() {
                println!("No keyphrases found.");
            }
            for (rank, phrase) in phrases.iter().enumerate() {
                println!("{:>3}. {phrase}", rank + 1);
            }
        }

        Commands::Match {
            strategy,
            library,
            candidate,
            threshold,
        } => {
            if let Some(threshold) = threshold {
                config.matching.sim_threshold = threshold;
            }
            let detector = Detector::new(config)?;
            let library = read_documents(&library)?;
            let candidate = read_document(&candidate)?;
            let result = detector.match_concepts(strategy, &library, &candidate)?;
            let json = serde_json::to_string_pretty(&result).into_diagnostic()?;
            println!("{json}");
        }

        Commands::Config => {
            config.validate()?;
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}
