use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use reviewsense::app::AnalyzeFeedbackUseCase;
use reviewsense::common::constants::{
    CLEAN_FEEDBACK_COLUMN, CONFIDENCE_SCORE_COLUMN, FEEDBACK_COLUMN, SENTIMENT_COLUMN,
};
use reviewsense::config::Config;
use reviewsense::domain::{stringify, KeywordEntry, Table};
use reviewsense::infra::{CsvTableSource, FileOutputAdapter};
use reviewsense::observability::{init_logging, init_metrics};
use reviewsense::pipeline::{PipelineConfig, PipelineOrchestrator, PipelineRun};

#[derive(Parser)]
#[command(name = "reviewsense")]
#[command(about = "Normalize customer feedback, classify sentiment and rank keywords")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (default: reviewsense.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write a Prometheus text snapshot of the run's metrics to this file
    #[arg(long, global = true)]
    metrics_out: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IoArgs {
    /// Input CSV file
    #[arg(long)]
    input: PathBuf,

    /// Directory for output artifacts (overrides config)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Field delimiter of the input file
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Map per-record stages on a single thread
    #[arg(long)]
    sequential: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize, classify and aggregate keywords in one pass
    Run(IoArgs),
    /// Add clean_feedback to a table with a feedback column
    Normalize(IoArgs),
    /// Add sentiment and confidence_score to a table with clean_feedback
    Classify(IoArgs),
    /// Rank keywords of a table with clean_feedback
    Keywords(IoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.logging);
    match &config.source {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let metrics_handle = match &cli.metrics_out {
        Some(_) => Some(init_metrics().context("Failed to install metrics recorder")?),
        None => None,
    };

    if config.pipeline.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.pipeline.threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let (pipeline, args) = match cli.command {
        Commands::Run(args) => (PipelineConfig::full(), args),
        Commands::Normalize(args) => (PipelineConfig::normalize_only(), args),
        Commands::Classify(args) => (PipelineConfig::sentiment_only(), args),
        Commands::Keywords(args) => (PipelineConfig::keywords_only(), args),
    };
    let pipeline = pipeline.with_parallel(config.pipeline.parallel && !args.sequential);

    let output_dir = args.output_dir.clone().unwrap_or_else(|| config.output.dir.clone());
    if !args.delimiter.is_ascii() {
        anyhow::bail!("Delimiter must be a single ASCII character, got '{}'", args.delimiter);
    }
    let source = CsvTableSource::new(&args.input).with_delimiter(args.delimiter as u8);
    let output = FileOutputAdapter::new(&output_dir);
    let use_case = AnalyzeFeedbackUseCase::new(
        PipelineOrchestrator::from_settings(&config.sentiment),
        Box::new(output),
    );

    println!("🔄 Running '{}' on {}", pipeline.name, args.input.display());
    let run = use_case
        .execute(&source, &pipeline)
        .with_context(|| format!("Pipeline '{}' failed", pipeline.name))?;

    print_report(&run, &config);
    println!("\n✅ Output saved to: {}", output_dir.display());

    if let (Some(path), Some(handle)) = (&cli.metrics_out, &metrics_handle) {
        write_metrics(path, &handle.render())?;
    }

    info!("Run {} finished", run.report.run_id);
    Ok(())
}

fn print_report(run: &PipelineRun, config: &Config) {
    println!("{}", "-".repeat(30));
    println!("PREVIEW:");
    print_preview(&run.table, config.output.preview_rows);
    println!("{}", "-".repeat(30));

    if let Some(summary) = &run.report.sentiment {
        println!("\nSentiment summary ({} records):", summary.total());
        for (label, count) in summary.ranked() {
            println!("   {:<10} {}", label, count);
        }
    }

    if let Some(keywords) = &run.keywords {
        print_keywords(keywords, config.output.top_keywords);
    }

    for step in &run.report.step_results {
        let status = if step.result.skipped { "⏭️ " } else { "✅" };
        println!("{} {}: {} ({} ms)", status, step.step, step.result.message, step.duration_ms);
    }
}

fn print_preview(table: &Table, rows: usize) {
    let records = match table.feedback_records() {
        Ok(records) => records,
        Err(e) => {
            println!("(no preview: {})", e);
            return;
        }
    };

    let has_sentiment = table.has_column(SENTIMENT_COLUMN);
    let has_score = table.has_column(CONFIDENCE_SCORE_COLUMN);
    let mut header = vec![FEEDBACK_COLUMN];
    if table.has_column(CLEAN_FEEDBACK_COLUMN) {
        header.push(CLEAN_FEEDBACK_COLUMN);
    }
    if has_sentiment {
        header.push(SENTIMENT_COLUMN);
    }
    if has_score {
        header.push(CONFIDENCE_SCORE_COLUMN);
    }

    println!("{}", header.join(" | "));
    for record in records.iter().take(rows) {
        let mut cells = vec![truncate(&stringify(&record.feedback), 40)];
        if let Some(clean) = &record.clean_feedback {
            cells.push(truncate(clean, 40));
        }
        if has_sentiment {
            cells.push(record.sentiment.map(|s| s.to_string()).unwrap_or_default());
        }
        if has_score {
            cells.push(
                record
                    .confidence_score
                    .map(|score| format!("{:.3}", score))
                    .unwrap_or_default(),
            );
        }
        println!("{}", cells.join(" | "));
    }
}

fn print_keywords(keywords: &[KeywordEntry], top: usize) {
    println!("\nTop {} keywords ({} distinct):", top.min(keywords.len()), keywords.len());
    for entry in keywords.iter().take(top) {
        println!("   {:<20} {}", entry.keyword, entry.frequency);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn write_metrics(path: &Path, rendered: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    if rendered.is_empty() {
        warn!("Metrics recorder produced an empty snapshot");
    }
    fs::write(path, rendered)
        .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
    info!("Wrote metrics snapshot to {}", path.display());
    Ok(())
}
