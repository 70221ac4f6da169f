//! CLI binary for pdf-to-md.
//!
//! A thin shim over the library crate: two path flags in, one Markdown file
//! out, with a terminal progress bar while pages are processed.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf_to_md::{convert_to_file, ConversionConfig, ConversionProgressCallback};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Spinner while the PDF is opened, then a page bar once the total is known.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_message("Processing PDF file…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total_pages as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting pages");
    }

    fn on_page_start(&self, page_num: usize, _total: usize) {
        self.bar.set_message(format!("page {page_num}"));
    }

    fn on_page_complete(&self, _page_num: usize, _total: usize, _markdown_len: usize) {
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_num: usize, total: usize, error: &str) {
        self.bar.abandon();
        eprintln!("  {} Page {page_num}/{total}  {}", red("✗"), red(error));
    }

    fn on_conversion_complete(&self, _total_pages: usize, output_path: Option<&Path>) {
        self.bar.finish_and_clear();
        if let Some(path) = output_path {
            eprintln!(
                "{} Conversion complete! Markdown file saved at: {}",
                green("✔"),
                bold(&path.display().to_string())
            );
        }
    }
}

/// Convert a PDF file to Markdown, with page text and tables.
#[derive(Parser, Debug)]
#[command(
    name = "pdf-to-md",
    version,
    about = "Convert a PDF file to Markdown format",
    long_about = "Convert a PDF file to Markdown: every page becomes a `# Page N` section \
with its text, detected tables are written as pipe tables under `## Table`, and pages are \
separated by horizontal rules.",
    color = clap::ColorChoice::Auto
)]
struct Cli {
    /// Path to the input PDF file.
    #[arg(short = 'I', long)]
    input: PathBuf,

    /// Path to the output Markdown file or directory.
    #[arg(short = 'O', long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Library logs would tear through the progress bar; RUST_LOG opts back in.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(io::stderr)
        .init();

    eprintln!("{} {}", cyan("◆"), bold("Starting conversion…"));

    let progress = CliProgressCallback::new();
    let config = ConversionConfig::builder()
        .progress_callback(progress.clone())
        .build()
        .context("Invalid configuration")?;

    let result = convert_to_file(&cli.input, &cli.output, &config);
    if result.is_err() {
        progress.bar.finish_and_clear();
    }
    let stats = result.context("Conversion failed")?;

    tracing::info!(
        "{} pages, {} with text, {} tables, {} bytes in {}ms",
        stats.total_pages,
        stats.pages_with_text,
        stats.total_tables,
        stats.output_bytes,
        stats.total_duration_ms
    );

    Ok(())
}
