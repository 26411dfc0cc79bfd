//! Batch extraction CLI: runs every PDF/DOCX in a folder through the workflow.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;

use extractor::batch::run_batch;
use extractor::config::Config;
use extractor::telemetry::init_tracing;
use extractor::workflow::{Collaborators, DocumentKind, Workflow};

#[derive(Parser, Debug)]
#[command(name = "extract-batch")]
#[command(about = "Extract structured data from a folder of resumes or job descriptions")]
#[command(version)]
struct Cli {
    /// Folder containing the PDF/DOCX documents
    #[arg(short, long)]
    input: PathBuf,

    /// Folder for the per-document JSON results
    #[arg(short, long)]
    output: PathBuf,

    /// Kind of document in the input folder
    #[arg(short, long, value_enum, default_value_t = KindArg::Resume)]
    kind: KindArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Resume,
    Jd,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Resume => DocumentKind::Resume,
            KindArg::Jd => DocumentKind::Jd,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing(&config.rust_log);

    let workflow = Workflow::new(Collaborators::from_config(&config)?);
    let summary = run_batch(&workflow, cli.kind.into(), &cli.input, &cli.output).await?;

    info!("Results written to {}", cli.output.display());
    println!(
        "Total: {} | PASS: {} | FAIL: {} | ERROR: {}",
        summary.total, summary.passed, summary.failed, summary.errored
    );
    Ok(())
}
