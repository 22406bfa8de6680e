use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use index_core::persist::{load_bundle, load_meta, IndexPaths, MetaFile, Staging};
use index_core::source::{collect_corpus_files, read_corpus};
use index_core::{IndexBuilder, IndexError};
use tracing_subscriber::{EnvFilter, fmt};

use std::path::Path;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a term-level inverted index from a TREC-style corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from a corpus file (.gz or plain) or a directory of them
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Output index directory
        #[arg(long)]
        output: String,
        /// Also store each document's indexable text under raw/
        #[arg(long, default_value_t = false)]
        store_raw: bool,
        /// Log progress every N documents (0 disables)
        #[arg(long, default_value_t = 10_000)]
        progress_every: usize,
    },
    /// Print a summary of a built index as JSON
    Stats {
        /// Index directory
        #[arg(long)]
        index: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, store_raw, progress_every } => {
            build_index(&input, &output, store_raw, progress_every)
        }
        Commands::Stats { index } => print_stats(&index),
    }
}

fn build_index(input: &str, output: &str, store_raw: bool, progress_every: usize) -> Result<()> {
    let out_paths = IndexPaths::new(output);
    let files = collect_corpus_files(Path::new(input))
        .map_err(IndexError::from)
        .with_context(|| format!("reading corpus at {input}"))?;
    tracing::info!(files = files.len(), input, "collected corpus files");

    // Dropped without commit on any error below, leaving no output behind.
    let staging = Staging::create(&out_paths)
        .map_err(IndexError::from)
        .with_context(|| format!("preparing output directory {output}"))?;

    let mut builder = IndexBuilder::new();
    for doc in read_corpus(files) {
        let doc = doc.map_err(IndexError::from).context("build aborted")?;
        if store_raw {
            staging
                .save_raw_text(&doc.docno, &doc.indexable_text())
                .with_context(|| format!("storing raw text for {}", doc.docno))?;
        }
        let doc_id = builder.process(&doc);
        if progress_every > 0 && (doc_id as usize + 1) % progress_every == 0 {
            let stats = builder.stats();
            tracing::info!(documents = stats.documents, terms = stats.terms, "progress");
        }
    }

    let stats = builder.stats();
    tracing::info!(
        num_docs = stats.documents,
        num_terms = stats.terms,
        tokens = stats.tokens,
        duplicate_keys = stats.duplicate_keys,
        "ingested documents"
    );

    let bundle = builder.finish();
    let meta = MetaFile::for_bundle(
        &bundle,
        time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_else(|_| "".into()),
    );
    staging
        .commit(&bundle, &meta)
        .map_err(IndexError::from)
        .with_context(|| format!("writing index to {output}"))?;

    tracing::info!(output, "index build complete");
    Ok(())
}

fn print_stats(index: &str) -> Result<()> {
    let paths = IndexPaths::new(index);
    let meta = load_meta(&paths).with_context(|| format!("reading summary in {index}"))?;
    let bundle = load_bundle(&paths).with_context(|| format!("reading index in {index}"))?;

    let postings: usize = bundle.index().iter().map(|(_, p)| p.len()).sum();
    let summary = serde_json::json!({
        "num_docs": bundle.num_docs(),
        "num_terms": bundle.num_terms(),
        "num_postings": postings,
        "duplicate_keys": bundle.duplicate_keys(),
        "created_at": meta.created_at,
        "version": meta.version,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
