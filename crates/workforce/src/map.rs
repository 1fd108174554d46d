//! Categorical Mapper.
//!
//! Resolves the raw coded fields against the externally loaded
//! [`Lookups`](crate::Lookups): exit cause and status codes map to human
//! labels (unknown codes to [`schema::UNKNOWN_LABEL`]), the employment
//! state collapses the status label against a fixed active set, and the
//! cost-center code maps to its area-group string (unmapped centers to the
//! [`schema::UNMAPPED_AREA`] sentinel).
//!
//! Area derivation is deliberately a double mapping kept as two composable
//! steps: [`area_group`] here resolves the lookup table, and the substring
//! re-classification into the three business areas ([`classify_area`]) runs
//! as a second pass after the unification drop rule has consumed the
//! sentinel.

use crate::{Lookups, Result, schema};
use polars::prelude::*;

/// Apply all categorical mappings to one cleaned roster frame.
pub fn map_categories(df: DataFrame, lookups: &Lookups) -> Result<DataFrame> {
    let mapped = df
        .lazy()
        .with_columns([
            exit_cause_label(lookups),
            status_label(lookups),
        ])
        .with_column(employment_state())
        .with_column(area_group(lookups))
        .collect()?;
    Ok(mapped)
}

/// `Causa` code → `Causa Escrita` label; unknown codes → "Desconhecida".
pub fn exit_cause_label(lookups: &Lookups) -> Expr {
    coded_label(
        schema::EXIT_CAUSE_CODE,
        &lookups.exit_causes,
        schema::EXIT_CAUSE_LABEL,
    )
}

/// `Situação` code → `Situacao Escrita` label; unknown codes → "Desconhecida".
pub fn status_label(lookups: &Lookups) -> Expr {
    coded_label(schema::STATUS_CODE, &lookups.statuses, schema::STATUS_LABEL)
}

fn coded_label(
    code_column: &str,
    table: &std::collections::HashMap<i64, String>,
    alias: &str,
) -> Expr {
    // Sorted for a deterministic expression plan
    let mut entries: Vec<(i64, &str)> = table.iter().map(|(k, v)| (*k, v.as_str())).collect();
    entries.sort_unstable_by_key(|(code, _)| *code);
    let codes: Vec<i64> = entries.iter().map(|(code, _)| *code).collect();
    let labels: Vec<&str> = entries.iter().map(|(_, label)| *label).collect();

    col(code_column)
        .cast(DataType::Int64)
        .replace_strict(
            lit(Series::new("old".into(), codes)),
            lit(Series::new("new".into(), labels)),
            Some(lit(schema::UNKNOWN_LABEL)),
            Some(DataType::String),
        )
        .alias(alias)
}

/// Status label → `Situacao_res`. The active label set is a policy
/// constant ([`schema::ACTIVE_STATUS_LABELS`]), not user-configurable.
pub fn employment_state() -> Expr {
    let active = Series::new("active".into(), schema::ACTIVE_STATUS_LABELS);
    when(
        col(schema::STATUS_LABEL)
            .is_in(lit(active))
            .fill_null(lit(false)),
    )
    .then(lit(schema::EmploymentState::Active.label()))
    .otherwise(lit(schema::EmploymentState::Separated.label()))
    .alias(schema::EMPLOYMENT_STATE)
}

/// `C.Custo` code → area-group string (first of the two area-mapping
/// steps); unmapped centers resolve to the `"0"` sentinel.
pub fn area_group(lookups: &Lookups) -> Expr {
    let mut entries: Vec<(&str, &str)> = lookups
        .cost_centers
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    entries.sort_unstable_by_key(|(code, _)| *code);
    let codes: Vec<&str> = entries.iter().map(|(code, _)| *code).collect();
    let groups: Vec<&str> = entries.iter().map(|(_, group)| *group).collect();

    col(schema::COST_CENTER)
        .cast(DataType::String)
        .replace_strict(
            lit(Series::new("old".into(), codes)),
            lit(Series::new("new".into(), groups)),
            Some(lit(schema::UNMAPPED_AREA)),
            Some(DataType::String),
        )
        .alias(schema::AREA)
}

/// Area-group string → business area (second of the two area-mapping
/// steps): contains "LOJAS" ⇒ Varejo, contains "SUPPLY" ⇒ Indústria,
/// anything else ⇒ Matriz.
pub fn classify_area() -> Expr {
    let group = col(schema::AREA)
        .cast(DataType::String)
        .str()
        .to_uppercase();
    when(group.clone().str().contains(lit("LOJAS"), false).fill_null(lit(false)))
        .then(lit(schema::Area::Retail.label()))
        .when(group.str().contains(lit("SUPPLY"), false).fill_null(lit(false)))
        .then(lit(schema::Area::Industry.label()))
        .otherwise(lit(schema::Area::Headquarters.label()))
        .alias(schema::AREA)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookups() -> Lookups {
        Lookups {
            exit_causes: HashMap::from([
                (0, "ATIVO".to_string()),
                (2, "Pedido de Demissão".to_string()),
                (9, "Morte".to_string()),
            ]),
            statuses: HashMap::from([
                (1, "Trabalhando".to_string()),
                (2, "Férias".to_string()),
                (7, "Demitido".to_string()),
            ]),
            cost_centers: HashMap::from([
                ("4101".to_string(), "LOJAS SUL".to_string()),
                ("2001".to_string(), "SUPPLY CHAIN".to_string()),
                ("1001".to_string(), "ADMINISTRATIVO".to_string()),
            ]),
            temporary_names: vec![],
        }
    }

    fn frame() -> DataFrame {
        df![
            schema::COST_CENTER => ["4101", "2001", "1001", "9999"],
            schema::STATUS_CODE => ["1", "2", "7", "99"],
            schema::EXIT_CAUSE_CODE => ["0", "2", "9", "77"],
        ]
        .unwrap()
    }

    fn column_values(df: &DataFrame, name: &str) -> Vec<String> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_coded_labels_with_unknown_fallback() {
        let mapped = map_categories(frame(), &lookups()).unwrap();

        assert_eq!(
            column_values(&mapped, schema::STATUS_LABEL),
            vec!["Trabalhando", "Férias", "Demitido", "Desconhecida"]
        );
        assert_eq!(
            column_values(&mapped, schema::EXIT_CAUSE_LABEL),
            vec!["ATIVO", "Pedido de Demissão", "Morte", "Desconhecida"]
        );
    }

    #[test]
    fn test_employment_state_policy() {
        let mapped = map_categories(frame(), &lookups()).unwrap();
        assert_eq!(
            column_values(&mapped, schema::EMPLOYMENT_STATE),
            vec![
                "Ativo",
                "Ativo",
                "Desligado/Afastado",
                "Desligado/Afastado"
            ]
        );
    }

    #[test]
    fn test_area_group_with_sentinel() {
        let mapped = map_categories(frame(), &lookups()).unwrap();
        assert_eq!(
            column_values(&mapped, schema::AREA),
            vec!["LOJAS SUL", "SUPPLY CHAIN", "ADMINISTRATIVO", "0"]
        );
    }

    #[test]
    fn test_classify_area_substring_pass() {
        let mapped = map_categories(frame(), &lookups()).unwrap();
        let classified = mapped.lazy().with_column(classify_area()).collect().unwrap();
        assert_eq!(
            column_values(&classified, schema::AREA),
            vec!["Varejo", "Indústria", "Matriz", "Matriz"]
        );
    }

    #[test]
    fn test_empty_lookups_resolve_everything_to_sentinels() {
        let mapped = map_categories(frame(), &Lookups::empty()).unwrap();
        assert!(
            column_values(&mapped, schema::STATUS_LABEL)
                .iter()
                .all(|label| label == schema::UNKNOWN_LABEL)
        );
        assert!(
            column_values(&mapped, schema::AREA)
                .iter()
                .all(|area| area == schema::UNMAPPED_AREA)
        );
    }
}
