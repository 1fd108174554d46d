//! Record Cleaner.
//!
//! Normalises one raw roster frame: tolerant removal of the two
//! known-irrelevant columns, case-insensitive role exclusion, and date
//! normalisation. All rules are total — an unparsable date becomes null,
//! never an error.

use crate::{Result, schema};
use polars::prelude::*;
use tracing::debug;

/// Clean one raw roster frame for the given worker type's exclusion list.
///
/// `role_patterns` is a list of case-insensitive regex fragments applied
/// one after another against the role title; rows with a null title are
/// kept (an absent title says nothing about the role).
pub fn clean(df: DataFrame, role_patterns: &[&str]) -> Result<DataFrame> {
    let before = df.height();
    let df = drop_irrelevant_columns(df);

    let mut lf = df.lazy();
    for pattern in role_patterns {
        lf = lf.filter(role_matches(pattern).fill_null(lit(false)).not());
    }

    let date_exprs: Vec<Expr> = schema::DATE_COLUMNS
        .iter()
        .map(|name| parse_date(name))
        .collect();
    let cleaned = lf.with_columns(date_exprs).collect()?;

    debug!(
        rows_in = before,
        rows_out = cleaned.height(),
        "roster cleaned"
    );
    Ok(cleaned)
}

/// Drop `Posição do Local` / `Cadastro` when present; tolerate absence.
fn drop_irrelevant_columns(df: DataFrame) -> DataFrame {
    let present: Vec<&str> = schema::DROPPED_COLUMNS
        .iter()
        .copied()
        .filter(|name| df.schema().contains(name))
        .collect();
    if present.is_empty() {
        df
    } else {
        df.drop_many(present)
    }
}

/// Case-insensitive substring/regex match against the role title.
fn role_matches(pattern: &str) -> Expr {
    col(schema::ROLE)
        .cast(DataType::String)
        .str()
        .contains(lit(format!("(?i){pattern}")), false)
}

/// Normalise and parse one date column.
///
/// Coerce to string, trim, map the sentinel set to null, then parse ISO
/// `%Y-%m-%d` (the ingest rendering) with a `%d/%m/%Y` fallback for
/// text-typed exports. Unparsable values become null.
pub(crate) fn parse_date(name: &str) -> Expr {
    let trimmed = col(name).cast(DataType::String).str().strip_chars(lit(NULL));
    let sentinels = Series::new("sentinels".into(), schema::DATE_SENTINELS);
    let normalized = when(trimmed.clone().is_in(lit(sentinels)).fill_null(lit(true)))
        .then(lit(NULL))
        .otherwise(trimmed);

    coalesce(&[
        to_date_with_format(normalized.clone(), "%Y-%m-%d"),
        to_date_with_format(normalized, "%d/%m/%Y"),
    ])
    .alias(name)
}

fn to_date_with_format(expr: Expr, format: &str) -> Expr {
    expr.str().to_date(StrptimeOptions {
        format: Some(format.into()),
        strict: false,
        exact: true,
        cache: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw_frame() -> DataFrame {
        df![
            schema::NAME => ["ANA", "BRUNO", "CARLA", "DAVI"],
            schema::ROLE => [Some("VENDEDOR"), Some("Jovem Aprendiz"), Some("ESTAGIARIA"), None],
            schema::BIRTH_DATE => ["1990-05-10", "00/00/0000", "nan", "15/03/1985"],
            schema::HIRE_DATE => ["2020-01-02", "2021-02-03", "--", "01/06/2019"],
            schema::SEPARATION_DATE => ["", "2023-12-01", " ", "not a date"],
            "Posição do Local" => ["x", "x", "x", "x"],
        ]
        .unwrap()
    }

    #[test]
    fn test_role_exclusion_is_case_insensitive_and_keeps_nulls() {
        let cleaned = clean(raw_frame(), schema::SALARIED_ROLE_EXCLUSIONS).unwrap();
        let names: Vec<&str> = cleaned
            .column(schema::NAME)
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        // Aprendiz and estagiária dropped, null title kept
        assert_eq!(names, vec!["ANA", "DAVI"]);
    }

    #[test]
    fn test_irrelevant_columns_dropped_tolerantly() {
        let cleaned = clean(raw_frame(), &[]).unwrap();
        assert!(!cleaned.schema().contains("Posição do Local"));
        // absent "Cadastro" does not error
        assert!(!cleaned.schema().contains("Cadastro"));
    }

    fn date_at(df: &DataFrame, name: &str, idx: usize) -> Option<NaiveDate> {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        match df.column(name).unwrap().get(idx).unwrap() {
            AnyValue::Date(days) => Some(epoch + chrono::Duration::days(i64::from(days))),
            AnyValue::Null => None,
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_date_sentinels_and_both_formats() {
        let cleaned = clean(raw_frame(), &[]).unwrap();

        let birth = |idx| date_at(&cleaned, schema::BIRTH_DATE, idx);
        assert_eq!(birth(0), NaiveDate::from_ymd_opt(1990, 5, 10));
        assert_eq!(birth(1), None); // 00/00/0000 sentinel
        assert_eq!(birth(2), None); // nan sentinel
        assert_eq!(birth(3), NaiveDate::from_ymd_opt(1985, 3, 15));
    }

    #[test]
    fn test_unparsable_dates_become_null_without_error() {
        let cleaned = clean(raw_frame(), &[]).unwrap();
        let seps = cleaned.column(schema::SEPARATION_DATE).unwrap();
        assert_eq!(seps.null_count(), 3); // "", " ", "not a date"
    }
}
