//! Turnover and tenure metrics.
//!
//! Every function here is a pure, stateless read over the persisted
//! dataset: it takes a `LazyFrame` plus scalar filters and returns a
//! scalar, a struct, or a small fixed-shape `DataFrame`. Repeated calls
//! with the same inputs are idempotent.

pub mod area;
pub mod corrections;
pub mod cost_center;
pub mod formulas;
pub mod monthly;
pub mod period;
pub mod tenure;

pub use area::turnover_by_area;
pub use corrections::{CorrectionTable, MonthlyOverride};
pub use cost_center::{CostCenterOptions, turnover_by_cost_center};
pub use formulas::{turnover_alternative, turnover_modern};
pub use monthly::monthly_turnover;
pub use period::{PeriodTurnover, turnover_for_period};
pub use tenure::{TenureSummary, tenure_bands, tenure_summary};

use crate::{Result, enrich::date_lit, schema};
use chrono::NaiveDate;
use polars::prelude::*;

/// A worker is active at `t` iff hired on or before `t` and either never
/// separated or separated strictly after `t`.
pub(crate) fn active_at(t: NaiveDate) -> Expr {
    col(schema::HIRE_DATE).lt_eq(date_lit(t)).and(
        col(schema::SEPARATION_DATE)
            .is_null()
            .or(col(schema::SEPARATION_DATE).gt(date_lit(t))),
    )
}

/// Hire date falls inside `[start, end]`.
pub(crate) fn hired_between(start: NaiveDate, end: NaiveDate) -> Expr {
    col(schema::HIRE_DATE)
        .gt_eq(date_lit(start))
        .and(col(schema::HIRE_DATE).lt_eq(date_lit(end)))
}

/// Separation date falls inside `[start, end]` and the exit cause counts
/// as churn (death and mislabeled "still active" causes are excluded).
pub(crate) fn exited_between(start: NaiveDate, end: NaiveDate) -> Expr {
    let churn = col(schema::EXIT_CAUSE_LABEL)
        .is_in(lit(Series::new(
            "non_churn".into(),
            schema::NON_CHURN_EXIT_CAUSES,
        )))
        .fill_null(lit(false))
        .not();
    churn
        .and(col(schema::SEPARATION_DATE).gt_eq(date_lit(start)))
        .and(col(schema::SEPARATION_DATE).lt_eq(date_lit(end)))
}

/// Count rows of `data` satisfying `predicate`.
pub(crate) fn count_where(data: &LazyFrame, predicate: Expr) -> Result<u32> {
    let counted = data
        .clone()
        .filter(predicate)
        .select([len().alias("n")])
        .collect()?;
    let n = counted
        .column("n")?
        .u32()?
        .get(0)
        .ok_or_else(|| crate::WorkforceError::Computation("empty count frame".to_string()))?;
    Ok(n)
}

/// Calendar bounds of a metric period: January 1st of `year` through
/// December 31st, or through `end` when a custom end date is given.
pub(crate) fn period_bounds(year: i32, end: Option<NaiveDate>) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or(crate::WorkforceError::InvalidPeriod { year, month: 1 })?;
    let end = match end {
        Some(date) => date,
        None => NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or(crate::WorkforceError::InvalidPeriod { year, month: 12 })?,
    };
    Ok((start, end))
}

/// Last day of a calendar month.
pub(crate) fn month_end(year: i32, month: u32) -> Result<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .ok_or(crate::WorkforceError::InvalidPeriod { year, month })
}
