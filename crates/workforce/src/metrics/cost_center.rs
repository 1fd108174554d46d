//! Turnover by cost center.
//!
//! Small centers make the percentage volatile (one exit in a three-person
//! center reads as a huge rate), so the view supports a minimum-headcount
//! threshold and, optionally, recombines the below-threshold centers into
//! one synthetic row whose rate is recomputed from the summed counts —
//! never averaged from the per-center rates.

use super::{active_at, count_where, formulas, month_end};
use crate::{Result, schema};
use polars::prelude::*;

/// Options for the by-cost-center view.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostCenterOptions {
    /// Drop centers whose end-of-year active count is below this.
    pub min_active: Option<u32>,
    /// Aggregate the dropped centers into one synthetic
    /// [`schema::SMALL_CENTERS_LABEL`] row.
    pub group_small: bool,
}

#[derive(Debug, Clone)]
struct CenterRow {
    center: String,
    hires: u32,
    exits: u32,
    active_end: u32,
    turnover_pct: f64,
}

impl CenterRow {
    fn new(center: String, hires: u32, exits: u32, active_end: u32) -> Self {
        Self {
            center,
            hires,
            exits,
            active_end,
            turnover_pct: formulas::round2(formulas::turnover_alternative(
                hires, exits, active_end,
            )),
        }
    }
}

/// One row per cost-center description, Formula B only, with the end-of-
/// year active count as denominator. Hires and exits are counted by the
/// hire-year / separation-year columns. Sorted descending by turnover;
/// ties keep their prior (alphabetical) order.
///
/// Output columns: `Centro de Custo`, `Admissões`, `Desligamentos`,
/// `Ativos Fim`, `Turnover (%)`.
pub fn turnover_by_cost_center(
    data: &LazyFrame,
    year: i32,
    options: &CostCenterOptions,
) -> Result<DataFrame> {
    let year_end = month_end(year, 12)?;

    let mut centers: Vec<String> = data
        .clone()
        .select([col(schema::COST_CENTER_DESC)])
        .drop_nulls(None)
        .unique(None, UniqueKeepStrategy::Any)
        .collect()?
        .column(schema::COST_CENTER_DESC)?
        .str()?
        .into_no_null_iter()
        .map(str::to_string)
        .collect();
    centers.sort();

    let mut rows = Vec::with_capacity(centers.len());
    for center in centers {
        let subset = data
            .clone()
            .filter(col(schema::COST_CENTER_DESC).eq(lit(center.as_str())));

        let hires = count_where(&subset, col(schema::HIRE_YEAR).eq(lit(year)))?;
        let exits = count_where(&subset, col(schema::SEPARATION_YEAR).eq(lit(year)))?;
        let active_end = count_where(&subset, active_at(year_end))?;

        rows.push(CenterRow::new(center, hires, exits, active_end));
    }

    let rows = match options.min_active {
        Some(threshold) => {
            let (large, small): (Vec<_>, Vec<_>) = rows
                .into_iter()
                .partition(|row| row.active_end >= threshold);
            let mut rows = large;
            if options.group_small && !small.is_empty() {
                let hires = small.iter().map(|r| r.hires).sum();
                let exits = small.iter().map(|r| r.exits).sum();
                let active_end = small.iter().map(|r| r.active_end).sum();
                rows.push(CenterRow::new(
                    schema::SMALL_CENTERS_LABEL.to_string(),
                    hires,
                    exits,
                    active_end,
                ));
            }
            rows
        }
        None => rows,
    };

    // stable sort: ties keep prior relative order
    let mut rows = rows;
    rows.sort_by(|a, b| {
        b.turnover_pct
            .partial_cmp(&a.turnover_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(df![
        "Centro de Custo" => rows.iter().map(|r| r.center.as_str()).collect::<Vec<_>>(),
        "Admissões" => rows.iter().map(|r| r.hires).collect::<Vec<_>>(),
        "Desligamentos" => rows.iter().map(|r| r.exits).collect::<Vec<_>>(),
        "Ativos Fim" => rows.iter().map(|r| r.active_end).collect::<Vec<_>>(),
        "Turnover (%)" => rows.iter().map(|r| r.turnover_pct).collect::<Vec<_>>(),
    ]?)
}
