//! Batch pipeline: ingest → clean → map → enrich → unify → persist.
//!
//! The run is a pure function of its inputs: both rosters, the lookup
//! directory and the explicit `as_of` reference date. Running it twice over
//! the same inputs produces byte-identical output files.

use crate::schema::WorkerType;
use crate::{Lookups, Result, WorkforceError, clean, enrich, ingest, map, schema, unify};
use chrono::NaiveDate;
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the persisted unified dataset.
pub const DATASET_FILE: &str = "base_tratada.csv";
/// File name of the derived tenure table.
pub const TENURE_FILE: &str = "tempo_de_casa.csv";

/// Everything one pipeline run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Salaried roster spreadsheet.
    pub salaried_path: PathBuf,
    /// Contractor roster spreadsheet.
    pub contractor_path: PathBuf,
    /// Directory holding the four lookup files.
    pub lookup_dir: PathBuf,
    /// Directory the output CSVs are written to (created if absent).
    pub output_dir: PathBuf,
    /// Reference date for age and tenure.
    pub as_of: NaiveDate,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Salaried rows in the unified dataset.
    pub salaried_rows: usize,
    /// Contractor rows in the unified dataset.
    pub contractor_rows: usize,
    /// Rows in the unified dataset.
    pub unified_rows: usize,
    /// Path of the written dataset.
    pub dataset_path: PathBuf,
    /// Path of the written tenure table.
    pub tenure_path: PathBuf,
}

/// Run the full batch pipeline and persist both output files.
///
/// Fails fast: both input spreadsheets and all four lookup files must
/// exist before any work starts.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport> {
    for input in [&config.salaried_path, &config.contractor_path] {
        if !input.is_file() {
            return Err(WorkforceError::MissingInput(input.clone()));
        }
    }
    let lookups = Lookups::load(&config.lookup_dir)?;

    info!(path = %config.salaried_path.display(), "ingesting salaried roster");
    let salaried = ingest::read_roster(&config.salaried_path)?;
    info!(path = %config.contractor_path.display(), "ingesting contractor roster");
    let contractor = ingest::read_roster(&config.contractor_path)?;

    let (dataset, tenure) = process(salaried, contractor, &lookups, config.as_of)?;

    fs::create_dir_all(&config.output_dir)?;
    let dataset_path = config.output_dir.join(DATASET_FILE);
    let tenure_path = config.output_dir.join(TENURE_FILE);

    let mut dataset = dataset;
    let mut tenure = tenure;
    write_csv(&mut dataset, &dataset_path)?;
    write_csv(&mut tenure, &tenure_path)?;

    let report = PipelineReport {
        salaried_rows: prepared_rows(&dataset, WorkerType::Salaried),
        contractor_rows: prepared_rows(&dataset, WorkerType::Contractor),
        unified_rows: dataset.height(),
        dataset_path,
        tenure_path,
    };
    info!(
        rows = report.unified_rows,
        dataset = %report.dataset_path.display(),
        "pipeline finished"
    );
    Ok(report)
}

/// The in-memory transformation: both raw frames to the unified dataset
/// and its tenure projection.
pub fn process(
    salaried: DataFrame,
    contractor: DataFrame,
    lookups: &Lookups,
    as_of: NaiveDate,
) -> Result<(DataFrame, DataFrame)> {
    let salaried = prepare(salaried, WorkerType::Salaried, lookups, as_of)?;
    let contractor = prepare(contractor, WorkerType::Contractor, lookups, as_of)?;

    let dataset = unify::unify(salaried, contractor, lookups)?;
    let tenure = dataset
        .clone()
        .lazy()
        .select(
            schema::TENURE_COLUMNS
                .iter()
                .map(|c| col(*c))
                .collect::<Vec<_>>(),
        )
        .collect()?;
    Ok((dataset, tenure))
}

/// Clean, map and enrich one roster frame.
fn prepare(
    df: DataFrame,
    worker_type: WorkerType,
    lookups: &Lookups,
    as_of: NaiveDate,
) -> Result<DataFrame> {
    let cleaned = clean::clean(df, worker_type.role_exclusions())?;
    let mapped = map::map_categories(cleaned, lookups)?;
    enrich::enrich(mapped, as_of)
}

fn prepared_rows(dataset: &DataFrame, worker_type: WorkerType) -> usize {
    dataset
        .column(schema::WORKER_TYPE)
        .ok()
        .and_then(|c| c.str().ok().map(|s| {
            s.into_no_null_iter()
                .filter(|v| *v == worker_type.label())
                .count()
        }))
        .unwrap_or(0)
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = fs::File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_salaried() -> DataFrame {
        df![
            schema::NAME => ["ANA", "BRUNO", "JOVEM"],
            schema::COST_CENTER => ["4101", "4101", "4101"],
            schema::COST_CENTER_DESC => ["LOJA CENTRO", "LOJA CENTRO", "LOJA CENTRO"],
            schema::ROLE => ["VENDEDOR", "GERENTE", "JOVEM APRENDIZ"],
            schema::BIRTH_DATE => ["1990-05-10", "1985-01-20", "2006-02-02"],
            schema::HIRE_DATE => ["2020-01-02", "2018-03-15", "2024-01-01"],
            schema::SEPARATION_DATE => ["", "2024-06-30", ""],
            schema::STATUS_CODE => ["1", "7", "1"],
            schema::EXIT_CAUSE_CODE => ["0", "2", "0"],
        ]
        .unwrap()
    }

    fn raw_contractor() -> DataFrame {
        df![
            schema::NAME => ["CARLA"],
            schema::COST_CENTER => ["9001"],
            schema::COST_CENTER_DESC => ["FABRICA"],
            schema::ROLE => ["COSTUREIRA"],
            schema::BIRTH_DATE => ["1992-09-09"],
            schema::HIRE_DATE => ["2021-05-05"],
            schema::SEPARATION_DATE => [""],
            schema::STATUS_CODE => ["1"],
            schema::EXIT_CAUSE_CODE => ["0"],
        ]
        .unwrap()
    }

    fn lookups() -> Lookups {
        let mut lookups = Lookups::empty();
        lookups.exit_causes.insert(0, "ATIVO".to_string());
        lookups
            .exit_causes
            .insert(2, "Pedido de Demissão".to_string());
        lookups.statuses.insert(1, "Trabalhando".to_string());
        lookups.statuses.insert(7, "Demitido".to_string());
        lookups
            .cost_centers
            .insert("4101".to_string(), "LOJAS SUL".to_string());
        lookups
            .cost_centers
            .insert("9001".to_string(), "SUPPLY CHAIN".to_string());
        lookups
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 2).unwrap()
    }

    fn to_csv_bytes(df: &DataFrame) -> Vec<u8> {
        let mut buffer = Vec::new();
        CsvWriter::new(&mut buffer)
            .include_header(true)
            .finish(&mut df.clone())
            .unwrap();
        buffer
    }

    #[test]
    fn test_process_produces_the_unified_dataset() {
        let (dataset, tenure) =
            process(raw_salaried(), raw_contractor(), &lookups(), as_of()).unwrap();

        // JOVEM APRENDIZ excluded by role; ANA, BRUNO, CARLA survive
        assert_eq!(dataset.height(), 3);
        assert_eq!(
            dataset.get_column_names_str(),
            schema::UNIFIED_COLUMNS.to_vec()
        );
        assert_eq!(tenure.get_column_names_str(), schema::TENURE_COLUMNS.to_vec());
        assert_eq!(tenure.height(), dataset.height());

        let areas: Vec<&str> = dataset
            .column(schema::AREA)
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(areas, vec!["Varejo", "Varejo", "Indústria"]);
    }

    #[test]
    fn test_reruns_are_byte_identical() {
        let first = process(raw_salaried(), raw_contractor(), &lookups(), as_of()).unwrap();
        let second = process(raw_salaried(), raw_contractor(), &lookups(), as_of()).unwrap();

        assert_eq!(to_csv_bytes(&first.0), to_csv_bytes(&second.0));
        assert_eq!(to_csv_bytes(&first.1), to_csv_bytes(&second.1));
    }

    #[test]
    fn test_run_fails_fast_on_missing_roster() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = PipelineConfig {
            salaried_path: dir.path().join("missing.xlsx"),
            contractor_path: dir.path().join("missing_too.xlsx"),
            lookup_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("out"),
            as_of: as_of(),
        };
        let err = run(&config).unwrap_err();
        assert!(matches!(err, WorkforceError::MissingInput(_)));
        // nothing was written
        assert!(!config.output_dir.exists());
    }
}
