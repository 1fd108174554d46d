//! CLI for the workforce analytics pipeline.
//!
//! `workforce ingest` runs the batch pipeline over the two roster
//! spreadsheets; the remaining commands read the persisted dataset back
//! and print metric tables or answer a free-form question.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use workforce::metrics::{self, CorrectionTable, CostCenterOptions};
use workforce::{PipelineConfig, Result, dataset, intent, pipeline};

#[derive(Parser)]
#[command(name = "workforce")]
#[command(about = "HR roster pipeline and turnover/tenure metrics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the batch pipeline: ingest, clean, unify and persist
    Ingest {
        /// Salaried roster spreadsheet (.xlsx/.xls)
        #[arg(long)]
        salaried: PathBuf,
        /// Contractor roster spreadsheet (.xlsx/.xls)
        #[arg(long)]
        contractor: PathBuf,
        /// Directory with the four lookup files
        #[arg(long)]
        lookups: PathBuf,
        /// Output directory for the CSV files
        #[arg(long, default_value = "data")]
        output: PathBuf,
        /// Reference date for age and tenure (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Turnover views over the persisted dataset
    Turnover {
        /// Path to base_tratada.csv
        #[arg(long, default_value = "data/base_tratada.csv")]
        data: PathBuf,
        #[command(subcommand)]
        view: TurnoverView,
    },
    /// Tenure summary and band distribution
    Tenure {
        /// Path to base_tratada.csv
        #[arg(long, default_value = "data/base_tratada.csv")]
        data: PathBuf,
    },
    /// Answer a free-form question about the dataset
    Ask {
        /// Path to base_tratada.csv
        #[arg(long, default_value = "data/base_tratada.csv")]
        data: PathBuf,
        /// The question, in Portuguese
        question: String,
    },
}

#[derive(Subcommand)]
enum TurnoverView {
    /// Both formulas for one year, optionally up to a custom end date
    Annual {
        /// Calendar year
        year: i32,
        /// Custom period end (defaults to December 31st)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// One row per business area
    ByArea {
        /// Calendar year
        year: i32,
        /// Custom period end (defaults to December 31st)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// One row per cost center, Formula B only
    ByCc {
        /// Calendar year
        year: i32,
        /// Drop centers with fewer active workers at year end
        #[arg(long)]
        min_active: Option<u32>,
        /// Aggregate dropped centers into one synthetic row
        #[arg(long)]
        group_small: bool,
    },
    /// Month-by-month series for one or more years
    Monthly {
        /// Calendar years
        #[arg(required = true)]
        years: Vec<i32>,
        /// Scope label the corrections apply under
        #[arg(long, default_value = metrics::corrections::OVERALL_SCOPE)]
        scope: String,
        /// JSON file with manual count corrections
        #[arg(long)]
        corrections: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Ingest {
            salaried,
            contractor,
            lookups,
            output,
            as_of,
        } => {
            let report = pipeline::run(&PipelineConfig {
                salaried_path: salaried,
                contractor_path: contractor,
                lookup_dir: lookups,
                output_dir: output,
                as_of: as_of.unwrap_or_else(|| Local::now().date_naive()),
            })?;
            println!(
                "{} rows ({} CLT, {} PJ) -> {}",
                report.unified_rows,
                report.salaried_rows,
                report.contractor_rows,
                report.dataset_path.display()
            );
        }
        Commands::Turnover { data, view } => {
            let frame = dataset::load(&data)?;
            match view {
                TurnoverView::Annual { year, end } => {
                    let figures = metrics::turnover_for_period(&frame, year, end)?;
                    println!("{figures:#?}");
                }
                TurnoverView::ByArea { year, end } => {
                    println!("{}", metrics::turnover_by_area(&frame, year, end)?);
                }
                TurnoverView::ByCc {
                    year,
                    min_active,
                    group_small,
                } => {
                    let options = CostCenterOptions {
                        min_active,
                        group_small,
                    };
                    println!(
                        "{}",
                        metrics::turnover_by_cost_center(&frame, year, &options)?
                    );
                }
                TurnoverView::Monthly {
                    years,
                    scope,
                    corrections,
                } => {
                    let table = match corrections {
                        Some(path) => CorrectionTable::from_json_file(&path)?,
                        None => CorrectionTable::new(),
                    };
                    println!(
                        "{}",
                        metrics::monthly_turnover(&frame, &years, &scope, &table)?
                    );
                }
            }
        }
        Commands::Tenure { data } => {
            let frame = dataset::load(&data)?;
            let summary = metrics::tenure_summary(&frame)?;
            println!("{summary:#?}");
            println!("{}", metrics::tenure_bands(&frame)?);
        }
        Commands::Ask { data, question } => {
            let frame = dataset::load(&data)?;
            println!("{}", intent::answer(&question, &frame)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_monthly_parses_multiple_years() {
        let cli = Cli::parse_from([
            "workforce", "turnover", "monthly", "2024", "2025", "--scope", "Varejo",
        ]);
        match cli.command {
            Commands::Turnover {
                view: TurnoverView::Monthly { years, scope, .. },
                ..
            } => {
                assert_eq!(years, vec![2024, 2025]);
                assert_eq!(scope, "Varejo");
            }
            _ => panic!("unexpected command"),
        }
    }
}
