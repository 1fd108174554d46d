//! Tenure (time-in-company) aggregates.

use super::{count_where, formulas};
use crate::{Result, schema};
use polars::prelude::*;

/// Tenure band edges in years, paired with their report labels.
const BANDS: [(&str, f64, Option<f64>); 4] = [
    ("0 a 1 ano", 0.0, Some(1.0)),
    ("1 a 3 anos", 1.0, Some(3.0)),
    ("3 a 5 anos", 3.0, Some(5.0)),
    ("5+ anos", 5.0, None),
];

/// Mean tenure figures, split by employment state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TenureSummary {
    /// Mean tenure in years across everyone, `None` on an empty dataset.
    pub mean_years: Option<f64>,
    /// Mean tenure in years across active workers.
    pub mean_years_active: Option<f64>,
    /// Mean tenure in years across separated workers.
    pub mean_years_separated: Option<f64>,
    /// Active headcount.
    pub active: u32,
}

fn mean_years_where(data: &LazyFrame, predicate: Option<Expr>) -> Result<Option<f64>> {
    let mut lf = data.clone();
    if let Some(predicate) = predicate {
        lf = lf.filter(predicate);
    }
    let collected = lf
        .select([col(schema::TENURE_YEARS).mean().alias("mean")])
        .collect()?;
    Ok(collected
        .column("mean")?
        .f64()?
        .get(0)
        .map(formulas::round2))
}

/// Mean tenure overall and per employment state, plus the active
/// headcount. Empty subsets yield `None`, never a NaN.
pub fn tenure_summary(data: &LazyFrame) -> Result<TenureSummary> {
    let active_pred =
        col(schema::EMPLOYMENT_STATE).eq(lit(schema::EmploymentState::Active.label()));
    let separated_pred =
        col(schema::EMPLOYMENT_STATE).eq(lit(schema::EmploymentState::Separated.label()));

    Ok(TenureSummary {
        mean_years: mean_years_where(data, None)?,
        mean_years_active: mean_years_where(data, Some(active_pred.clone()))?,
        mean_years_separated: mean_years_where(data, Some(separated_pred))?,
        active: count_where(data, active_pred)?,
    })
}

/// Headcount and share per tenure band, in band order.
///
/// Output columns: `Faixa`, `Colaboradores`, `Percentual (%)`. Shares are
/// percentages of the full dataset, two decimals; an empty dataset yields
/// four zero rows.
pub fn tenure_bands(data: &LazyFrame) -> Result<DataFrame> {
    let total = count_where(data, lit(true))?;

    let mut labels = Vec::with_capacity(BANDS.len());
    let mut counts = Vec::with_capacity(BANDS.len());
    let mut shares = Vec::with_capacity(BANDS.len());

    for (label, lower, upper) in BANDS {
        let mut predicate = col(schema::TENURE_YEARS).gt_eq(lit(lower));
        if let Some(upper) = upper {
            predicate = predicate.and(col(schema::TENURE_YEARS).lt(lit(upper)));
        }
        let count = count_where(data, predicate)?;

        labels.push(label);
        counts.push(count);
        shares.push(if total > 0 {
            formulas::round2(f64::from(count) / f64::from(total) * 100.0)
        } else {
            0.0
        });
    }

    Ok(df![
        "Faixa" => labels,
        "Colaboradores" => counts,
        "Percentual (%)" => shares,
    ]?)
}
