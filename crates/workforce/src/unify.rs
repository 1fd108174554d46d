//! Unifier.
//!
//! Concatenates the two cleaned/mapped/enriched rosters into the canonical
//! dataset: worker-type tagging, salaried-only exclusions (closed
//! locations, temporary staff), the unmapped-and-separated drop rule, and
//! the final substring classification of `Area` into the three business
//! areas.

use crate::{Lookups, Result, map, schema, schema::WorkerType};
use polars::prelude::*;
use tracing::debug;

/// Unify the salaried and contractor frames into the canonical dataset.
///
/// Both inputs must already be cleaned, mapped and enriched. Rows are
/// projected onto [`schema::UNIFIED_COLUMNS`] before concatenation so the
/// persisted output has a stable column order.
pub fn unify(salaried: DataFrame, contractor: DataFrame, lookups: &Lookups) -> Result<DataFrame> {
    let salaried = apply_salaried_exclusions(salaried, lookups)?;

    let unified = concat(
        [
            tag_worker_type(salaried, WorkerType::Salaried)?,
            tag_worker_type(contractor, WorkerType::Contractor)?,
        ],
        UnionArgs::default(),
    )?
    .filter(keep_classifiable())
    .with_column(map::classify_area())
    .collect()?;

    debug!(rows = unified.height(), "rosters unified");
    Ok(unified)
}

/// Closed-location and temporary-staff exclusions. Both rules apply to the
/// salaried roster only.
fn apply_salaried_exclusions(df: DataFrame, lookups: &Lookups) -> Result<DataFrame> {
    let keywords: Vec<String> = schema::CLOSED_LOCATION_KEYWORDS
        .iter()
        .map(|k| regex::escape(k))
        .collect();
    let closed = col(schema::COST_CENTER_DESC)
        .cast(DataType::String)
        .str()
        .to_uppercase()
        .str()
        .contains(lit(keywords.join("|")), false)
        .fill_null(lit(false));

    let temporary = col(schema::NAME)
        .is_in(lit(Series::new(
            "temporary".into(),
            lookups.temporary_names.clone(),
        )))
        .fill_null(lit(false));

    Ok(df
        .lazy()
        .filter(closed.not())
        .filter(temporary.not())
        .collect()?)
}

/// Tag the frame with its worker type and project the canonical columns.
fn tag_worker_type(df: DataFrame, worker_type: WorkerType) -> Result<LazyFrame> {
    let columns: Vec<Expr> = schema::UNIFIED_COLUMNS.iter().map(|c| col(*c)).collect();
    Ok(df
        .lazy()
        .with_column(lit(worker_type.label()).alias(schema::WORKER_TYPE))
        .select(columns))
}

/// Business rule: a record that is both unmapped (`Area == "0"`) and not
/// active is noise, not signal, and is dropped. Unmapped active records
/// survive and classify into Matriz.
fn keep_classifiable() -> Expr {
    let unmapped = col(schema::AREA).eq(lit(schema::UNMAPPED_AREA));
    let separated =
        col(schema::EMPLOYMENT_STATE).neq(lit(schema::EmploymentState::Active.label()));
    unmapped.and(separated).not()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enriched_frame(
        names: &[&str],
        descriptions: &[&str],
        areas: &[&str],
        states: &[&str],
    ) -> DataFrame {
        let n = names.len();
        let mut df = df![
            schema::NAME => names,
            schema::COST_CENTER => vec!["4101"; n],
            schema::COST_CENTER_DESC => descriptions,
            schema::ROLE => vec!["VENDEDOR"; n],
            schema::BIRTH_DATE => vec![Some("1990-01-01"); n],
            schema::HIRE_DATE => vec![Some("2020-01-01"); n],
            schema::SEPARATION_DATE => vec![None::<&str>; n],
            schema::STATUS_CODE => vec!["1"; n],
            schema::EXIT_CAUSE_CODE => vec!["0"; n],
            schema::AGE => vec![30i32; n],
            schema::HIRE_MONTH => vec![1i32; n],
            schema::HIRE_YEAR => vec![2020i32; n],
            schema::SEPARATION_MONTH => vec![0i32; n],
            schema::SEPARATION_YEAR => vec![0i32; n],
            schema::EXIT_CAUSE_LABEL => vec!["ATIVO"; n],
            schema::STATUS_LABEL => vec!["Trabalhando"; n],
            schema::TENURE_DAYS => vec![100i64; n],
            schema::TENURE_MONTHS => vec![3.3f64; n],
            schema::TENURE_YEARS => vec![0.27f64; n],
        ]
        .unwrap();
        df.with_column(Series::new(schema::AREA.into(), areas))
            .unwrap();
        df.with_column(Series::new(schema::EMPLOYMENT_STATE.into(), states))
            .unwrap();
        df
    }

    fn names_of(df: &DataFrame) -> Vec<&str> {
        df.column(schema::NAME)
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    #[test]
    fn test_worker_type_tagging_and_column_order() {
        let salaried = enriched_frame(&["ANA"], &["LOJA CENTRO"], &["LOJAS SUL"], &["Ativo"]);
        let contractor = enriched_frame(&["BETO"], &["FABRICA"], &["SUPPLY CHAIN"], &["Ativo"]);

        let unified = unify(salaried, contractor, &Lookups::empty()).unwrap();
        assert_eq!(unified.height(), 2);
        assert_eq!(
            unified.get_column_names_str(),
            schema::UNIFIED_COLUMNS.to_vec()
        );

        let types: Vec<&str> = unified
            .column(schema::WORKER_TYPE)
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(types, vec!["CLT", "PJ"]);
    }

    #[test]
    fn test_closed_locations_dropped_for_salaried_only() {
        let salaried = enriched_frame(
            &["ANA", "CLARA"],
            &["OUTLET TIJUCAS", "LOJA CENTRO"],
            &["LOJAS SUL", "LOJAS SUL"],
            &["Ativo", "Ativo"],
        );
        let contractor = enriched_frame(
            &["BETO"],
            &["Continente Park Shopping"],
            &["SUPPLY CHAIN"],
            &["Ativo"],
        );

        let unified = unify(salaried, contractor, &Lookups::empty()).unwrap();
        // salaried at closed location dropped; contractor at the same
        // location (case-insensitive match would hit) is kept
        assert_eq!(names_of(&unified), vec!["CLARA", "BETO"]);
    }

    #[test]
    fn test_temporary_names_dropped_for_salaried_only() {
        let lookups = Lookups {
            temporary_names: vec!["ANA TEMP".to_string()],
            ..Lookups::empty()
        };
        let salaried = enriched_frame(
            &["ANA TEMP", "CLARA"],
            &["LOJA", "LOJA"],
            &["LOJAS SUL", "LOJAS SUL"],
            &["Ativo", "Ativo"],
        );
        let contractor = enriched_frame(&["ANA TEMP"], &["FABRICA"], &["SUPPLY"], &["Ativo"]);

        let unified = unify(salaried, contractor, &lookups).unwrap();
        assert_eq!(names_of(&unified), vec!["CLARA", "ANA TEMP"]);
    }

    #[test]
    fn test_unmapped_and_separated_records_dropped() {
        let salaried = enriched_frame(
            &["ANA", "BIA", "CARLA"],
            &["LOJA", "LOJA", "LOJA"],
            &["0", "0", "LOJAS SUL"],
            &["Ativo", "Desligado/Afastado", "Desligado/Afastado"],
        );
        let contractor = enriched_frame(&[], &[], &[], &[]);

        let unified = unify(salaried, contractor, &Lookups::empty()).unwrap();
        // unmapped+active survives (classifies to Matriz); unmapped+separated dropped
        assert_eq!(names_of(&unified), vec!["ANA", "CARLA"]);

        let areas: Vec<&str> = unified
            .column(schema::AREA)
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(areas, vec!["Matriz", "Varejo"]);
    }

    #[test]
    fn test_every_record_ends_in_one_of_three_areas() {
        let salaried = enriched_frame(
            &["A", "B", "C", "D"],
            &["L", "L", "L", "L"],
            &["LOJAS NORTE", "SUPPLY CHAIN", "ADMINISTRATIVO", "0"],
            &["Ativo", "Ativo", "Ativo", "Ativo"],
        );
        let contractor = enriched_frame(&[], &[], &[], &[]);

        let unified = unify(salaried, contractor, &Lookups::empty()).unwrap();
        let labels: Vec<&str> = schema::Area::ALL.iter().map(|a| a.label()).collect();
        let areas = unified.column(schema::AREA).unwrap();
        for value in areas.str().unwrap().into_no_null_iter() {
            assert!(labels.contains(&value), "unexpected area {value}");
        }
        assert_eq!(areas.null_count(), 0);
    }
}
