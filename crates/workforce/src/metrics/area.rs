//! Turnover by business area.

use super::period::turnover_for_period;
use crate::{Result, schema};
use chrono::NaiveDate;
use polars::prelude::*;

/// One row per area present in `data`, with both formulas for the period.
///
/// Output columns: `Ano`, `Área`, `Admissões`, `Desligamentos`,
/// `Ativos início`, `Ativos fim`, `Ativos médios`, `Turnover Moderno (%)`,
/// `Turnover Alternativo (%)`. Areas are iterated in alphabetical order so
/// the table is deterministic.
pub fn turnover_by_area(data: &LazyFrame, year: i32, end: Option<NaiveDate>) -> Result<DataFrame> {
    let mut areas: Vec<String> = data
        .clone()
        .select([col(schema::AREA)])
        .unique(None, UniqueKeepStrategy::Any)
        .collect()?
        .column(schema::AREA)?
        .str()?
        .into_no_null_iter()
        .map(str::to_string)
        .collect();
    areas.sort();

    let mut years = Vec::with_capacity(areas.len());
    let mut hires = Vec::with_capacity(areas.len());
    let mut exits = Vec::with_capacity(areas.len());
    let mut active_start = Vec::with_capacity(areas.len());
    let mut active_end = Vec::with_capacity(areas.len());
    let mut active_mean = Vec::with_capacity(areas.len());
    let mut modern = Vec::with_capacity(areas.len());
    let mut alternative = Vec::with_capacity(areas.len());

    for area in &areas {
        let subset = data
            .clone()
            .filter(col(schema::AREA).eq(lit(area.as_str())));
        let figures = turnover_for_period(&subset, year, end)?;

        years.push(figures.year);
        hires.push(figures.hires);
        exits.push(figures.exits);
        active_start.push(figures.active_start);
        active_end.push(figures.active_end);
        active_mean.push(figures.active_mean);
        modern.push(figures.modern_pct);
        alternative.push(figures.alternative_pct);
    }

    Ok(df![
        "Ano" => years,
        "Área" => areas,
        "Admissões" => hires,
        "Desligamentos" => exits,
        "Ativos início" => active_start,
        "Ativos fim" => active_end,
        "Ativos médios" => active_mean,
        "Turnover Moderno (%)" => modern,
        "Turnover Alternativo (%)" => alternative,
    ]?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean;

    fn dataset() -> LazyFrame {
        df![
            schema::NAME => ["A", "B", "C", "D"],
            schema::HIRE_DATE => ["2022-01-01", "2023-03-01", "2022-06-01", "2023-02-01"],
            schema::SEPARATION_DATE => [None, Some("2023-08-01"), None, None::<&str>],
            schema::EXIT_CAUSE_LABEL => ["ATIVO", "Pedido de Demissão", "ATIVO", "ATIVO"],
            schema::AREA => ["Varejo", "Varejo", "Indústria", "Matriz"],
        ]
        .unwrap()
        .lazy()
        .with_columns([
            clean::parse_date(schema::HIRE_DATE),
            clean::parse_date(schema::SEPARATION_DATE),
        ])
    }

    #[test]
    fn test_one_row_per_area_in_alphabetical_order() {
        let table = turnover_by_area(&dataset(), 2023, None).unwrap();
        let areas: Vec<&str> = table
            .column("Área")
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(areas, vec!["Indústria", "Matriz", "Varejo"]);
    }

    #[test]
    fn test_per_area_figures() {
        let table = turnover_by_area(&dataset(), 2023, None).unwrap();
        let by_name = |name: &str| -> Vec<u32> {
            table
                .column(name)
                .unwrap()
                .u32()
                .unwrap()
                .into_no_null_iter()
                .collect()
        };

        // rows: Indústria, Matriz, Varejo
        assert_eq!(by_name("Admissões"), vec![0, 1, 1]);
        assert_eq!(by_name("Desligamentos"), vec![0, 0, 1]);
        assert_eq!(by_name("Ativos início"), vec![1, 0, 1]);
        assert_eq!(by_name("Ativos fim"), vec![1, 1, 1]);
    }
}
