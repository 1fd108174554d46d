//! Month-by-month turnover series.

use super::{active_at, corrections::CorrectionTable, count_where, formulas, month_end};
use crate::{Result, schema, schema::Area};
use polars::prelude::*;

/// Monthly hires, exits, month-end active headcount and Formula B rate
/// for every month of every year in `years`, in chronological order.
///
/// `scope` does double duty: when it names a business area the dataset is
/// filtered to that area first, and it is the label [`CorrectionTable`]
/// entries are matched under. Any other label (the overall "Geral" scope
/// included) leaves the dataset unfiltered.
///
/// Hires and exits are counted from the derived month/year columns, so an
/// exit here is any separation in the month regardless of cause. Before
/// the rate is computed, any [`CorrectionTable`] entry for
/// `(scope, year, month)` replaces the affected counts; the rate is then
/// recomputed from the corrected counts.
///
/// Output columns: `Ano`, `Mês`, `Ano-Mês`, `Admissões`, `Demissões`,
/// `Ativos no Final do Mês`, `Turnover (%)`.
pub fn monthly_turnover(
    data: &LazyFrame,
    years: &[i32],
    scope: &str,
    corrections: &CorrectionTable,
) -> Result<DataFrame> {
    let data = match Area::from_label(scope) {
        Some(area) => data
            .clone()
            .filter(col(schema::AREA).eq(lit(area.label()))),
        None => data.clone(),
    };

    let mut sorted_years = years.to_vec();
    sorted_years.sort_unstable();
    sorted_years.dedup();

    let capacity = sorted_years.len() * 12;
    let mut out_years = Vec::with_capacity(capacity);
    let mut out_months = Vec::with_capacity(capacity);
    let mut out_labels = Vec::with_capacity(capacity);
    let mut out_hires = Vec::with_capacity(capacity);
    let mut out_exits = Vec::with_capacity(capacity);
    let mut out_active = Vec::with_capacity(capacity);
    let mut out_rates = Vec::with_capacity(capacity);

    for year in sorted_years {
        for month in 1..=12u32 {
            let mut hires = count_where(
                &data,
                col(schema::HIRE_YEAR)
                    .eq(lit(year))
                    .and(col(schema::HIRE_MONTH).eq(lit(month))),
            )?;
            let mut exits = count_where(
                &data,
                col(schema::SEPARATION_YEAR)
                    .eq(lit(year))
                    .and(col(schema::SEPARATION_MONTH).eq(lit(month))),
            )?;
            let mut active_end = count_where(&data, active_at(month_end(year, month)?))?;

            if let Some(correction) = corrections.get(scope, year, month) {
                hires = correction.hires.unwrap_or(hires);
                exits = correction.exits.unwrap_or(exits);
                active_end = correction.active_end.unwrap_or(active_end);
            }

            out_years.push(year);
            out_months.push(month);
            out_labels.push(format!("{year}-{month:02}"));
            out_hires.push(hires);
            out_exits.push(exits);
            out_active.push(active_end);
            out_rates.push(formulas::round2(formulas::turnover_alternative(
                hires, exits, active_end,
            )));
        }
    }

    Ok(df![
        "Ano" => out_years,
        "Mês" => out_months,
        "Ano-Mês" => out_labels,
        "Admissões" => out_hires,
        "Demissões" => out_exits,
        "Ativos no Final do Mês" => out_active,
        "Turnover (%)" => out_rates,
    ]?)
}
