use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use concept_mapper::concepts::embeddings::SentenceEmbedder;
use concept_mapper::concepts::{Embedder, TracingObserver};
use concept_mapper::config::Config;
use concept_mapper::models::download;
use concept_mapper::output::{terminal, OutputFormat};
use concept_mapper::pipeline::{self, RunOptions};
use concept_mapper::questions::CsvQuestionSource;
use concept_mapper::subject::Subject;

/// Map exam questions to curriculum concept tags.
///
/// Each question is matched against the subject's concept dictionary by
/// exact keyword, fuzzy keyword, semantic similarity, and finally TF-IDF
/// term weighting. Questions nothing matches are flagged for manual review.
#[derive(Parser)]
#[command(name = "concept-mapper", version, about)]
struct Cli {
    /// Subject to process
    #[arg(long, value_enum)]
    subject: Subject,

    /// Question CSV to read instead of <data dir>/<subject>.csv
    #[arg(long)]
    questions: Option<PathBuf>,

    /// Number of questions to extract in parallel
    #[arg(long)]
    concurrency: Option<usize>,

    /// Emit one JSON object per question instead of text lines
    #[arg(long)]
    json: bool,

    /// Download the embedding model (~90 MB) before running if missing
    #[arg(long)]
    download_model: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries only results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("concept_mapper=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(concurrency) = cli.concurrency {
        if concurrency == 0 {
            anyhow::bail!("--concurrency must be at least 1");
        }
        config.concurrency = concurrency;
    }

    if cli.download_model && !download::embedding_files_present(&config.model_dir) {
        info!(dir = %config.model_dir.display(), "Downloading embedding model");
        download::download_embedding_model(&config.model_dir).await?;
    }

    let source = match &cli.questions {
        Some(path) => CsvQuestionSource::new(path),
        None => CsvQuestionSource::for_subject(&config.data_dir, cli.subject),
    };

    let model_config = config.clone();
    let prepared = pipeline::prepare(
        &config,
        cli.subject,
        &source,
        Arc::new(TracingObserver),
        move || load_embedder(&model_config),
    )
    .await?;

    let options = RunOptions {
        subject: cli.subject,
        concurrency: config.concurrency,
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        },
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary =
        pipeline::run(&options, prepared.questions, &prepared.extractor, &mut out).await?;

    if options.format == OutputFormat::Text {
        terminal::display_tier_summary(&summary);
    }

    Ok(())
}

/// Load the ONNX sentence embedder, failing with a download hint if the
/// model files are missing.
fn load_embedder(config: &Config) -> Result<Arc<dyn Embedder>> {
    config.require_embedding_model()?;
    let embed_dir = download::embedding_model_dir(&config.model_dir);
    let embedder =
        SentenceEmbedder::load(&embed_dir).context("Failed to load sentence embedding model")?;
    info!(dir = %embed_dir.display(), "Loaded sentence embedding model");
    Ok(Arc::new(embedder))
}
