use crate::infra::load_engine;
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use rig_ready::config::AppConfig;
use rig_ready::error::AppError;
use rig_ready::workflows::screening::{BatchSummary, ScoredDocument, ScreeningEngine};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum ReportFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Plain-text résumé files to score
    #[arg(required = true)]
    pub(crate) files: Vec<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    pub(crate) format: ReportFormat,
    /// Resolve "present" in date ranges against this date (YYYY-MM-DD) instead of today
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// JSON rubric to score with instead of RIGREADY_POLICY_PATH
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PolicyArgs {
    /// JSON rubric to validate and print instead of RIGREADY_POLICY_PATH
    #[arg(long)]
    pub(crate) policy: Option<PathBuf>,
}

pub(crate) async fn run_score_report(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        files,
        format,
        as_of,
        policy,
    } = args;

    let config = AppConfig::load()?;
    let engine = Arc::new(load_engine(&config.screening, policy)?);
    let today = as_of.unwrap_or_else(|| Local::now().date_naive());

    let summary = score_files(engine, files, today).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        ReportFormat::Table => render_table(&summary, &mut out)?,
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&summary).map_err(std::io::Error::from)?;
            writeln!(out, "{json}")?;
        }
        ReportFormat::Csv => summary.write_csv(&mut out)?,
    }

    Ok(())
}

pub(crate) fn run_policy_dump(args: PolicyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = load_engine(&config.screening, args.policy)?;

    let json = serde_json::to_string_pretty(engine.config()).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

/// Score every file on the blocking pool and rank the results.
pub(crate) async fn score_files(
    engine: Arc<ScreeningEngine>,
    files: Vec<PathBuf>,
    today: NaiveDate,
) -> Result<BatchSummary, AppError> {
    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let name = document_name(&path);
        let bytes = std::fs::read(&path)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        if text.trim().is_empty() {
            warn!(file = %path.display(), "résumé file has no text; scoring as empty");
        }

        let engine = engine.clone();
        handles.push(tokio::task::spawn_blocking(move || ScoredDocument {
            result: engine.score_as_of(&text, today),
            name,
        }));
    }

    let mut documents = Vec::with_capacity(handles.len());
    for handle in handles {
        let document = handle
            .await
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
        documents.push(document);
    }

    Ok(BatchSummary::from_documents(documents))
}

fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

const TABLE_COLUMNS: [&str; 9] = [
    "Exp", "Proc", "Matl", "Tools", "Safe", "Tank", "Cert", "Local", "Reloc",
];

pub(crate) fn render_table<W: Write>(summary: &BatchSummary, out: &mut W) -> std::io::Result<()> {
    if summary.is_empty() {
        writeln!(out, "No résumés scored.")?;
        return Ok(());
    }

    let name_width = summary
        .rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Candidate".len());

    write!(out, "{:<name_width$}  {:<9}  {:>5}", "Candidate", "Verdict", "Total")?;
    for column in TABLE_COLUMNS {
        write!(out, "  {column:>5}")?;
    }
    writeln!(out)?;

    for row in &summary.rows {
        write!(
            out,
            "{:<name_width$}  {:<9}  {:>5}",
            row.name, row.verdict, row.total_score
        )?;
        for points in &row.category_scores {
            write!(out, "  {points:>5}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "\nFlags")?;
    for row in &summary.rows {
        writeln!(out, "- {}: {}", row.name, row.flags.join("; "))?;
    }

    let counts = summary
        .verdict_counts()
        .into_iter()
        .map(|(verdict, count)| format!("{} {}", verdict.short_label(), count))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, "\nVerdicts: {counts}")?;

    Ok(())
}
