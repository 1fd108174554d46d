//! Read-back of the persisted dataset and simple roster queries.
//!
//! The pipeline writes CSV, and CSV has no date type, so loading re-parses
//! the three date columns with the same rules the cleaner used. Everything
//! downstream (metrics, the question answerer) works off the `LazyFrame`
//! returned here.

use crate::metrics::count_where;
use crate::{Result, WorkforceError, clean, schema};
use polars::prelude::*;
use std::path::Path;

/// The integer columns of the persisted dataset. CSV inference reads them
/// back as `Int64`; [`load`] re-types them to the `Int32` the enricher
/// produced.
const INT_COLUMNS: &[&str] = &[
    schema::AGE,
    schema::HIRE_MONTH,
    schema::HIRE_YEAR,
    schema::SEPARATION_MONTH,
    schema::SEPARATION_YEAR,
];

/// Load the unified dataset from `path`.
///
/// Missing files are a fatal [`WorkforceError::MissingInput`]; date columns
/// come back typed as `Date`, count columns as `Int32` with 0 for unknown.
pub fn load(path: &Path) -> Result<LazyFrame> {
    if !path.is_file() {
        return Err(WorkforceError::MissingInput(path.to_path_buf()));
    }

    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let mut retyped: Vec<Expr> = schema::DATE_COLUMNS
        .iter()
        .map(|name| clean::parse_date(name))
        .collect();
    retyped.extend(
        INT_COLUMNS
            .iter()
            .map(|name| col(*name).cast(DataType::Int32).fill_null(lit(0i32))),
    );

    Ok(frame.lazy().with_columns(retyped))
}

/// Distinct years with any hire or separation, ascending. The 0 sentinel
/// (unknown / not separated) is excluded.
pub fn available_years(data: &LazyFrame) -> Result<Vec<i32>> {
    let mut years = Vec::new();
    for column in [schema::HIRE_YEAR, schema::SEPARATION_YEAR] {
        let distinct = data
            .clone()
            .select([col(column).alias("year")])
            .filter(col("year").neq(lit(0)))
            .unique(None, UniqueKeepStrategy::Any)
            .collect()?;
        years.extend(distinct.column("year")?.i32()?.into_no_null_iter());
    }
    years.sort_unstable();
    years.dedup();
    Ok(years)
}

/// Distinct area labels present in the dataset, alphabetical.
pub fn available_areas(data: &LazyFrame) -> Result<Vec<String>> {
    let areas = data
        .clone()
        .select([col(schema::AREA)])
        .unique(None, UniqueKeepStrategy::Any)
        .sort([schema::AREA], SortMultipleOptions::default())
        .collect()?;

    Ok(areas
        .column(schema::AREA)?
        .str()?
        .into_no_null_iter()
        .map(str::to_string)
        .collect())
}

/// Restrict the dataset to the given area labels.
///
/// An empty selection means "nothing selected", so it yields an empty
/// frame rather than the full dataset.
pub fn filter_areas(data: &LazyFrame, areas: &[String]) -> LazyFrame {
    if areas.is_empty() {
        return data.clone().filter(lit(false));
    }
    let wanted = Series::new("areas".into(), areas);
    data.clone()
        .filter(col(schema::AREA).is_in(lit(wanted)).fill_null(lit(false)))
}

/// Current active headcount.
pub fn active_headcount(data: &LazyFrame) -> Result<u32> {
    count_where(
        data,
        col(schema::EMPLOYMENT_STATE).eq(lit(schema::EmploymentState::Active.label())),
    )
}
