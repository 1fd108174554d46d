//! Period (year or custom end date) turnover aggregate.

use super::{active_at, count_where, exited_between, formulas, hired_between, period_bounds};
use crate::Result;
use chrono::NaiveDate;
use polars::prelude::*;

/// Turnover figures for one period over one filtered record subset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodTurnover {
    /// Calendar year the period starts in.
    pub year: i32,
    /// Hires inside the period.
    pub hires: u32,
    /// Churn-counting exits inside the period.
    pub exits: u32,
    /// Active headcount at the period start boundary.
    pub active_start: u32,
    /// Active headcount at the period end boundary.
    pub active_end: u32,
    /// Mean of the two boundary headcounts, two decimals.
    pub active_mean: f64,
    /// Formula A, percent, two decimals.
    pub modern_pct: f64,
    /// Formula B, percent, two decimals.
    pub alternative_pct: f64,
}

/// Compute both turnover formulas for `year`, or for January 1st of `year`
/// through `end` when a custom end date is given.
pub fn turnover_for_period(
    data: &LazyFrame,
    year: i32,
    end: Option<NaiveDate>,
) -> Result<PeriodTurnover> {
    let (start, end) = period_bounds(year, end)?;

    let hires = count_where(data, hired_between(start, end))?;
    let exits = count_where(data, exited_between(start, end))?;
    let active_start = count_where(data, active_at(start))?;
    let active_end = count_where(data, active_at(end))?;

    Ok(PeriodTurnover {
        year,
        hires,
        exits,
        active_start,
        active_end,
        active_mean: formulas::round2(f64::from(active_start + active_end) / 2.0),
        modern_pct: formulas::round2(formulas::turnover_modern(
            hires,
            exits,
            active_start,
            active_end,
        )),
        alternative_pct: formulas::round2(formulas::turnover_alternative(hires, exits, active_end)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clean, schema};
    use approx::assert_relative_eq;

    fn dataset(rows: Vec<(&str, Option<&str>, Option<&str>, &str, &str)>) -> LazyFrame {
        let names: Vec<&str> = rows.iter().map(|r| r.0).collect();
        let hires: Vec<Option<&str>> = rows.iter().map(|r| r.1).collect();
        let seps: Vec<Option<&str>> = rows.iter().map(|r| r.2).collect();
        let causes: Vec<&str> = rows.iter().map(|r| r.3).collect();
        let areas: Vec<&str> = rows.iter().map(|r| r.4).collect();

        df![
            schema::NAME => names,
            schema::HIRE_DATE => hires,
            schema::SEPARATION_DATE => seps,
            schema::EXIT_CAUSE_LABEL => causes,
            schema::AREA => areas,
        ]
        .unwrap()
        .lazy()
        .with_columns([
            clean::parse_date(schema::HIRE_DATE),
            clean::parse_date(schema::SEPARATION_DATE),
        ])
    }

    #[test]
    fn test_single_hire_and_exit_in_year_is_guarded_to_zero() {
        // Hired 2023-01-10, separated 2023-06-15: not active at either
        // year boundary, so both denominators are 0.
        let data = dataset(vec![(
            "ANA",
            Some("2023-01-10"),
            Some("2023-06-15"),
            "Pedido de Demissão",
            "Varejo",
        )]);

        let result = turnover_for_period(&data, 2023, None).unwrap();
        assert_eq!(result.hires, 1);
        assert_eq!(result.exits, 1);
        assert_eq!(result.active_start, 0);
        assert_eq!(result.active_end, 0);
        assert_eq!(result.modern_pct, 0.0);
        assert_eq!(result.alternative_pct, 0.0);
    }

    #[test]
    fn test_death_is_excluded_from_exits_but_not_from_hires() {
        let data = dataset(vec![
            ("VIVA", Some("2022-03-01"), None, "ATIVO", "Matriz"),
            (
                "MORTE",
                Some("2022-01-01"),
                Some("2022-12-01"),
                "Morte",
                "Matriz",
            ),
        ]);

        let result = turnover_for_period(&data, 2022, None).unwrap();
        assert_eq!(result.hires, 2);
        assert_eq!(result.exits, 0);
    }

    #[test]
    fn test_boundary_active_counts() {
        let data = dataset(vec![
            // active all year
            ("A", Some("2021-05-01"), None, "ATIVO", "Matriz"),
            // separated exactly on Jan 1: not active at start (> strict)
            (
                "B",
                Some("2020-01-01"),
                Some("2023-01-01"),
                "Pedido de Demissão",
                "Matriz",
            ),
            // hired mid-year, still employed at Dec 31
            ("C", Some("2023-07-01"), None, "ATIVO", "Matriz"),
        ]);

        let result = turnover_for_period(&data, 2023, None).unwrap();
        assert_eq!(result.active_start, 1); // only A
        assert_eq!(result.active_end, 2); // A and C
        assert_eq!(result.hires, 1); // C
        assert_eq!(result.exits, 1); // B
        assert_relative_eq!(result.active_mean, 1.5, epsilon = 1e-12);
        // modern: ((1+1)/2) / 1.5 * 100 = 66.67
        assert_relative_eq!(result.modern_pct, 66.67, epsilon = 1e-9);
        // alternative: ((1+1)/2) / 2 * 100 = 50
        assert_relative_eq!(result.alternative_pct, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_custom_end_date_shortens_the_window() {
        let data = dataset(vec![
            ("EARLY", Some("2023-02-01"), None, "ATIVO", "Matriz"),
            ("LATE", Some("2023-11-01"), None, "ATIVO", "Matriz"),
        ]);

        let end = NaiveDate::from_ymd_opt(2023, 6, 30);
        let result = turnover_for_period(&data, 2023, end).unwrap();
        assert_eq!(result.hires, 1); // LATE is outside the window
        assert_eq!(result.active_end, 1);
    }
}
