use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod charts;
mod dataset;
mod export;
mod models;
mod report;

use models::{Summary, SurveyDataset};

#[derive(Parser)]
#[command(name = "ai-survey-insight")]
#[command(about = "Dashboard and export tool for the student AI-usage survey", long_about = None)]
struct Cli {
    /// Survey dataset JSON file
    #[arg(long, global = true, default_value = "data.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print headline figures to the terminal
    Summarize,
    /// Write the markdown dashboard report
    Report {
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
    /// Write chart specifications for the rendering collaborator
    Charts {
        #[arg(long, default_value = "charts.json")]
        out: PathBuf,
    },
    /// Write the two-sheet spreadsheet export as CSV files
    Export {
        #[arg(long, default_value = "exports")]
        out_dir: PathBuf,
    },
    /// Write the built-in sample dataset
    Sample {
        #[arg(long, default_value = "data.json")]
        out: PathBuf,
    },
}

fn load_and_summarize(path: &Path) -> anyhow::Result<(SurveyDataset, Summary)> {
    let survey = dataset::load(path)?;
    let summary = aggregate::build_summary(&survey.respondents)?;
    debug!(respondents = summary.total_respondents, "summary built");
    Ok((survey, summary))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Commands::Summarize => {
            let (survey, summary) = load_and_summarize(&cli.data)?;
            println!(
                "{} — {} ({})",
                survey.metadata.title, survey.metadata.institution, survey.metadata.survey_date
            );
            println!("Respondents: {}", summary.total_respondents);
            for line in report::conclusions(&summary) {
                println!("- {line}");
            }
        }
        Commands::Report { out } => {
            let (survey, summary) = load_and_summarize(&cli.data)?;
            let dashboard = report::build_dashboard(&survey.metadata, &summary);
            std::fs::write(&out, dashboard)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Dashboard report written to {}.", out.display());
        }
        Commands::Charts { out } => {
            let (_, summary) = load_and_summarize(&cli.data)?;
            let specs = charts::build_chart_specs(&summary);
            let json = serde_json::to_string_pretty(&specs)?;
            std::fs::write(&out, json)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("{} chart specs written to {}.", specs.len(), out.display());
        }
        Commands::Export { out_dir } => {
            let (survey, summary) = load_and_summarize(&cli.data)?;
            let sheets = vec![
                export::build_raw_sheet(&survey.respondents),
                export::build_summary_sheet(&survey.metadata, &summary),
            ];
            let written = export::write_workbook(&out_dir, &survey.metadata, &sheets)?;
            for path in written {
                println!("Sheet written to {}.", path.display());
            }
        }
        Commands::Sample { out } => {
            let sample = dataset::sample();
            let json = serde_json::to_string_pretty(&sample)?;
            std::fs::write(&out, json)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!(
                "Sample dataset with {} respondents written to {}.",
                sample.respondents.len(),
                out.display()
            );
        }
    }

    Ok(())
}
