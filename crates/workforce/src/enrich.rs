//! Derived-Field Enricher.
//!
//! Computes age, month/year breakdowns and tenure from the cleaned date
//! columns. The reference date is an explicit parameter rather than a
//! hidden `today()` so that a pipeline run is a pure function of its
//! inputs (the persisted dataset must be byte-identical across reruns).
//!
//! Integer month/year/age fields use 0 as the "unknown" sentinel, never
//! null.

use crate::{Result, schema};
use chrono::NaiveDate;
use polars::prelude::*;

/// Days in an average month; used for the one-decimal tenure-months figure.
const DAYS_PER_MONTH: f64 = 30.44;
/// Days in an average year including leap years; used for age.
const DAYS_PER_YEAR_LEAP: f64 = 365.25;
/// Days in a calendar year; used for the two-decimal tenure-years figure.
const DAYS_PER_YEAR: f64 = 365.0;

/// A calendar date as a polars `Date` literal.
pub(crate) fn date_lit(date: NaiveDate) -> Expr {
    lit(date.to_string()).cast(DataType::Date)
}

/// Add all derived fields to one cleaned, mapped roster frame.
pub fn enrich(df: DataFrame, as_of: NaiveDate) -> Result<DataFrame> {
    let enriched = df
        .lazy()
        .with_columns([
            age(as_of),
            month_of(schema::HIRE_DATE, schema::HIRE_MONTH),
            year_of(schema::HIRE_DATE, schema::HIRE_YEAR),
            month_of(schema::SEPARATION_DATE, schema::SEPARATION_MONTH),
            year_of(schema::SEPARATION_DATE, schema::SEPARATION_YEAR),
        ])
        .with_column(tenure_days(as_of))
        .with_columns([tenure_months(), tenure_years()])
        .collect()?;
    Ok(enriched)
}

/// `Idade = floor((as_of − Nascimento).days / 365.25)`; 0 when unknown.
fn age(as_of: NaiveDate) -> Expr {
    let days = (date_lit(as_of) - col(schema::BIRTH_DATE))
        .dt()
        .total_days()
        .cast(DataType::Float64);
    (days / lit(DAYS_PER_YEAR_LEAP))
        .floor()
        .cast(DataType::Int32)
        .fill_null(lit(0))
        .alias(schema::AGE)
}

fn month_of(date_column: &str, alias: &str) -> Expr {
    col(date_column)
        .dt()
        .month()
        .cast(DataType::Int32)
        .fill_null(lit(0))
        .alias(alias)
}

fn year_of(date_column: &str, alias: &str) -> Expr {
    col(date_column)
        .dt()
        .year()
        .cast(DataType::Int32)
        .fill_null(lit(0))
        .alias(alias)
}

/// Tenure reference end-date is the separation date when present, else
/// `as_of`. Clamped at 0 so a future-dated hire cannot go negative; 0 when
/// the hire date is unknown.
fn tenure_days(as_of: NaiveDate) -> Expr {
    let end = col(schema::SEPARATION_DATE).fill_null(date_lit(as_of));
    let days = (end - col(schema::HIRE_DATE))
        .dt()
        .total_days()
        .cast(DataType::Int64);
    when(days.clone().lt(lit(0)))
        .then(lit(0i64))
        .otherwise(days)
        .fill_null(lit(0i64))
        .alias(schema::TENURE_DAYS)
}

fn tenure_months() -> Expr {
    (col(schema::TENURE_DAYS).cast(DataType::Float64) / lit(DAYS_PER_MONTH))
        .round(1)
        .alias(schema::TENURE_MONTHS)
}

fn tenure_years() -> Expr {
    (col(schema::TENURE_DAYS).cast(DataType::Float64) / lit(DAYS_PER_YEAR))
        .round(2)
        .alias(schema::TENURE_YEARS)
}
