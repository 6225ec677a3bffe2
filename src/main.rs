use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use verbatim::config::Config;
use verbatim::corpus::store::CorpusStore;
use verbatim::scoring::verdict::MIN_TOKENS;
use verbatim::text::tokenize::{normalize, Stopwords};

/// Verbatim: hybrid n-gram and cosine plagiarism detection.
///
/// Scores a submitted document against a reference corpus and reports
/// how much of it reappears elsewhere.
#[derive(Parser)]
#[command(name = "verbatim", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the dataset and upload directories
    Init,

    /// Check a document against the reference corpus
    Check {
        /// The document to check (.pdf, .docx, or .txt)
        file: PathBuf,

        /// Retain the document as a new reference after checking
        #[arg(long)]
        keep: bool,

        /// Augment the corpus with Crossref abstracts before scoring
        #[arg(long)]
        enrich: bool,

        /// Also write a markdown report to this path
        #[arg(long)]
        report: Option<String>,
    },

    /// Add a reference document to the dataset
    Add {
        /// The document to add (.pdf, .docx, or .txt)
        file: PathBuf,
    },

    /// List the reference corpus with per-document token counts
    List,

    /// Show corpus location, size, and configuration
    Status,

    /// Serve the JSON API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("verbatim=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let config = Config::load()?;
            let store = CorpusStore::new(&config.dataset_dir);
            store.init()?;
            std::fs::create_dir_all(&config.upload_dir)?;

            println!("Dataset directory: {}", config.dataset_dir.display());
            println!("Upload directory:  {}", config.upload_dir.display());
            println!("Stopword language: {}", config.language.as_str());
            println!("\nVerbatim is ready. Next steps:");
            println!("  verbatim add <reference.pdf>   # build the corpus");
            println!("  verbatim check <submission.pdf>");
        }

        Commands::Check {
            file,
            keep,
            enrich,
            report,
        } => {
            let config = Config::load()?;
            config.require_dataset()?;
            let stopwords = Stopwords::load(config.language);
            let store = CorpusStore::new(&config.dataset_dir);

            println!("Checking {}...", file.display());

            let raw = verbatim::extract::read_document(&file)?;
            let test_tokens = normalize(&raw, &stopwords);
            println!("  {} tokens after normalization", test_tokens.len());

            if test_tokens.len() < MIN_TOKENS {
                anyhow::bail!(
                    "Too little text to check ({} tokens, need {MIN_TOKENS}).\n\
                     The document may be a scanned image with no text layer.",
                    test_tokens.len()
                );
            }

            // Read the corpus with a progress bar; PDF extraction is the
            // slow part of a scan.
            let documents = store.documents()?;
            let pb = ProgressBar::new(documents.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Corpus [{bar:30}] {pos}/{len} ({eta})")
                    .unwrap(),
            );

            let mut references = Vec::new();
            for (name, path) in documents {
                match verbatim::extract::read_document(&path) {
                    Ok(text) => references.push((name, text)),
                    Err(e) => {
                        warn!(reference = %name, error = %e, "Extraction failed, treating as empty");
                        references.push((name, String::new()));
                    }
                }
                pb.inc(1);
            }
            pb.finish_and_clear();

            if enrich {
                match fetch_crossref_references(&config, &test_tokens).await {
                    Ok(mut fetched) => {
                        println!(
                            "  Crossref contributed {} abstract(s) to this scan",
                            fetched.len()
                        );
                        references.append(&mut fetched);
                    }
                    Err(e) => {
                        warn!(error = %e, "Crossref enrichment failed");
                        println!("  {} Crossref unavailable: {e}", "Warning:".yellow());
                    }
                }
            }

            let verdict = verbatim::scoring::verdict::evaluate(&test_tokens, references, &stopwords)?;
            verbatim::output::terminal::display_verdict(&verdict);

            if keep {
                let file_name = file.display().to_string();
                if store.add(&file)? {
                    println!("Retained {} as a new reference document.", file_name);
                } else {
                    println!("A reference with this file name already exists; not overwritten.");
                }
            }

            if let Some(report_path) = report {
                let test_name = file
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| file.display().to_string());
                let written = verbatim::output::markdown::generate_report(
                    &verdict,
                    &test_name,
                    &report_path,
                )?;
                println!("{}", format!("Markdown report saved to: {written}").bold());
            }
        }

        Commands::Add { file } => {
            let config = Config::load()?;
            let store = CorpusStore::new(&config.dataset_dir);
            store.init()?;

            if store.add(&file)? {
                println!("Added {} to the dataset.", file.display());
            } else {
                println!(
                    "A reference with this file name already exists; not overwritten."
                );
            }
        }

        Commands::List => {
            let config = Config::load()?;
            config.require_dataset()?;
            let stopwords = Stopwords::load(config.language);
            let store = CorpusStore::new(&config.dataset_dir);

            let documents = store.documents()?;
            if documents.is_empty() {
                println!("The dataset is empty. Add documents with `verbatim add <file>`.");
                return Ok(());
            }

            println!(
                "\n{}",
                format!("=== Reference Corpus ({} documents) ===", documents.len()).bold()
            );
            println!();

            for (name, path) in documents {
                match verbatim::extract::read_document(&path) {
                    Ok(text) => {
                        let tokens = normalize(&text, &stopwords).len();
                        if tokens < MIN_TOKENS {
                            println!(
                                "  {:<44} {:>7} tokens  {}",
                                name,
                                tokens,
                                "(below floor, excluded from scans)".dimmed()
                            );
                        } else {
                            println!("  {:<44} {:>7} tokens", name, tokens);
                        }
                    }
                    Err(e) => {
                        println!("  {:<44} {}", name, format!("unreadable: {e}").red());
                    }
                }
            }
            println!();
        }

        Commands::Status => {
            let config = Config::load()?;
            let store = CorpusStore::new(&config.dataset_dir);

            if !config.dataset_dir.is_dir() {
                println!("Dataset: not initialized");
                println!("\nRun `verbatim init` to set up the directories.");
                return Ok(());
            }

            let documents = store.documents()?;
            let total_bytes: u64 = documents
                .iter()
                .filter_map(|(_, path)| std::fs::metadata(path).ok())
                .map(|m| m.len())
                .sum();

            println!(
                "Dataset: {} ({} documents, {})",
                config.dataset_dir.display(),
                documents.len(),
                format_bytes(total_bytes)
            );
            println!("Stopword language: {}", config.language.as_str());
            println!("Crossref endpoint: {}", config.crossref_api_url);
            if documents.is_empty() {
                println!("\nThe corpus is empty; every check will report `empty corpus`.");
                println!("Add documents with `verbatim add <file>`.");
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let store = CorpusStore::new(&config.dataset_dir);
            store.init()?;
            std::fs::create_dir_all(&config.upload_dir)?;

            tracing::info!("Starting Verbatim API server");
            verbatim::web::run_server(config, port, &bind).await?;
        }
    }

    Ok(())
}

/// Query Crossref with the test document's dominant keywords and return
/// the abstracts that qualify as reference documents.
async fn fetch_crossref_references(
    config: &Config,
    test_tokens: &[String],
) -> Result<Vec<(String, String)>> {
    let query = verbatim::crossref::keyword_query(test_tokens);
    if query.is_empty() {
        return Ok(Vec::new());
    }

    println!("  Searching Crossref for: \"{query}\"");

    let client =
        verbatim::crossref::CrossrefClient::new(&config.crossref_api_url, &config.crossref_mailto)?;
    client.fetch_references(&query).await
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
