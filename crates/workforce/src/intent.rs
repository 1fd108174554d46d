//! Rule-based question answering over the unified dataset.
//!
//! Questions arrive in informal Brazilian Portuguese, with slang,
//! abbreviations and missing accents, so classification starts from an
//! aggressive normalisation pass. The classifier itself is a pure
//! function from question text to an [`Intent`], fully decoupled from the
//! metric calls that [`answer`] makes afterwards.

use crate::metrics::{self, count_where, formulas};
use crate::{Result, dataset, schema, schema::Area};
use polars::prelude::*;
use regex::Regex;
use std::sync::LazyLock;

/// Slang and abbreviation expansions, applied token by token after
/// accent folding. Targets are unaccented on purpose so the keyword
/// checks below stay accent-free.
const SLANG: &[(&str, &str)] = &[
    ("qnts", "quantos"),
    ("qntos", "quantos"),
    ("qto", "quanto"),
    ("td", "tudo"),
    ("pq", "porque"),
    ("turn", "turnover"),
    ("var", "varejo"),
    ("ind", "industria"),
    ("adm", "admissao"),
    ("dem", "desligamento"),
    ("func", "colaboradores"),
    ("funcionario", "colaborador"),
    ("funcionarios", "colaboradores"),
    ("galera", "colaboradores"),
];

/// Multi-word expansions, applied on the whole text before tokenising.
const SLANG_PHRASES: &[(&str, &str)] = &[("empresa geral", "geral"), ("p q", "porque")];

static YEARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(20\d{2})").unwrap());
static MONTH_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})[/-](20\d{2})").unwrap());

/// Question scope: the whole company or one business area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// No area filter ("geral", "empresa").
    Overall,
    /// One business area.
    Area(Area),
}

/// Employment-state filter extracted from the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Active workers only.
    Active,
    /// Separated workers only.
    Separated,
}

/// What the question asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Turnover for one month (`mm/yyyy` in the question).
    MonthlyTurnover {
        /// Area filter, `None` when unspecified.
        scope: Option<Scope>,
        /// Calendar year.
        year: i32,
        /// Calendar month, 1-12.
        month: u32,
    },
    /// The historically worst year ("maior"/"pior" turnover).
    PeakTurnover,
    /// Turnover for one or more full years.
    AnnualTurnover {
        /// Area filter, `None` when unspecified.
        scope: Option<Scope>,
        /// Years mentioned, in question order.
        years: Vec<i32>,
    },
    /// Turnover was asked but no year was given.
    TurnoverMissingYear,
    /// Headcount by state and optional area.
    Headcount {
        /// Area filter, `None` when unspecified.
        scope: Option<Scope>,
        /// State filter; defaults to active.
        status: StatusFilter,
    },
    /// Mean tenure by state and optional area.
    MeanTenure {
        /// Area filter, `None` when unspecified.
        scope: Option<Scope>,
        /// State filter; defaults to active.
        status: StatusFilter,
    },
    /// Hire counts for the given years.
    Hires {
        /// Area filter, `None` when unspecified.
        scope: Option<Scope>,
        /// Years mentioned; empty asks the user for one.
        years: Vec<i32>,
    },
    /// Separation counts for the given years.
    Exits {
        /// Area filter, `None` when unspecified.
        scope: Option<Scope>,
        /// Years mentioned; empty asks the user for one.
        years: Vec<i32>,
    },
    /// Nothing recognised; reply with usage examples.
    Help,
}

/// Lowercase, fold Portuguese accents, expand slang, drop punctuation
/// that is not part of a `mm/yyyy` reference.
fn normalize(question: &str) -> String {
    let folded: String = question
        .to_lowercase()
        .chars()
        .map(fold_accent)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '/' || *c == '-')
        .collect();

    let mut text = folded;
    for (phrase, expansion) in SLANG_PHRASES {
        text = text.replace(phrase, expansion);
    }

    text.split_whitespace()
        .map(|token| {
            SLANG
                .iter()
                .find(|(short, _)| *short == token)
                .map_or(token, |(_, long)| *long)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

fn extract_scope(text: &str) -> Option<Scope> {
    if text.contains("varejo") {
        Some(Scope::Area(Area::Retail))
    } else if text.contains("industria") {
        Some(Scope::Area(Area::Industry))
    } else if text.contains("matriz") {
        Some(Scope::Area(Area::Headquarters))
    } else if text.contains("geral") || text.contains("empresa") {
        Some(Scope::Overall)
    } else {
        None
    }
}

fn extract_status(text: &str) -> Option<StatusFilter> {
    let separated = text.contains("deslig") || text.contains("demit");
    if separated {
        Some(StatusFilter::Separated)
    } else if text.contains("ativo") {
        Some(StatusFilter::Active)
    } else {
        None
    }
}

fn extract_years(text: &str) -> Vec<i32> {
    YEARS
        .captures_iter(text)
        .filter_map(|c| c[1].parse().ok())
        .collect()
}

fn extract_month_year(text: &str) -> Option<(u32, i32)> {
    let captures = MONTH_YEAR.captures(text)?;
    let month: u32 = captures[1].parse().ok()?;
    let year: i32 = captures[2].parse().ok()?;
    (1..=12).contains(&month).then_some((month, year))
}

/// Classify one question. Pure: no dataset access.
pub fn classify(question: &str) -> Intent {
    let text = normalize(question);

    let scope = extract_scope(&text);
    let status = extract_status(&text);
    let years = extract_years(&text);

    if text.contains("turnover") {
        if let Some((month, year)) = extract_month_year(&text) {
            return Intent::MonthlyTurnover { scope, year, month };
        }
        if text.contains("maior") || text.contains("pior") {
            return Intent::PeakTurnover;
        }
        if !years.is_empty() {
            return Intent::AnnualTurnover { scope, years };
        }
        return Intent::TurnoverMissingYear;
    }

    if text.contains("qtd")
        || text.contains("quantos")
        || text.contains("colaborador")
        || text.contains("headcount")
    {
        return Intent::Headcount {
            scope,
            status: status.unwrap_or(StatusFilter::Active),
        };
    }

    if text.contains("tempo de casa") || text.contains("tempo casa") {
        return Intent::MeanTenure {
            scope,
            status: status.unwrap_or(StatusFilter::Active),
        };
    }

    if text.contains("admiss") || text.contains("admissao") {
        return Intent::Hires { scope, years };
    }

    if text.contains("deslig") || text.contains("demiss") {
        return Intent::Exits { scope, years };
    }

    Intent::Help
}

/// Classify `question` and compute its answer over `data`.
pub fn answer(question: &str, data: &LazyFrame) -> Result<String> {
    match classify(question) {
        Intent::Headcount { scope, status } => {
            let subset = apply_status(scoped(data, scope), status);
            let count = count_where(&subset, lit(true))?;
            Ok(format!(
                "Temos {count} colaboradores {} {}.",
                status_word(status),
                scope_phrase(scope)
            ))
        }
        Intent::MeanTenure { scope, status } => {
            let subset = apply_status(scoped(data, scope), status);
            let mean = subset
                .select([col(schema::TENURE_YEARS).mean().alias("mean")])
                .collect()?
                .column("mean")?
                .f64()?
                .get(0)
                .unwrap_or(0.0);
            Ok(format!(
                "O tempo de casa médio {}, considerando colaboradores {}, é de {mean:.2} anos.",
                scope_phrase(scope),
                status_word(status)
            ))
        }
        Intent::Hires { scope, years } => {
            if years.is_empty() {
                return Ok("Informe pelo menos um ano para eu contar as admissões.".to_string());
            }
            let subset = scoped(data, scope);
            let mut lines = Vec::with_capacity(years.len());
            for year in years {
                let count = count_where(&subset, col(schema::HIRE_YEAR).eq(lit(year)))?;
                lines.push(format!("{year}: {count} admissões"));
            }
            Ok(format!(
                "Admissões {}:\n{}",
                scope_phrase(scope),
                lines.join("\n")
            ))
        }
        Intent::Exits { scope, years } => {
            if years.is_empty() {
                return Ok("Informe o ano para eu contar os desligamentos.".to_string());
            }
            let subset = scoped(data, scope);
            let mut lines = Vec::with_capacity(years.len());
            for year in years {
                let count = count_where(&subset, col(schema::SEPARATION_YEAR).eq(lit(year)))?;
                lines.push(format!("{year}: {count} desligamentos"));
            }
            Ok(format!(
                "Desligamentos {}:\n{}",
                scope_phrase(scope),
                lines.join("\n")
            ))
        }
        Intent::MonthlyTurnover { scope, year, month } => {
            let subset = scoped(data, scope);
            let hires = count_where(
                &subset,
                col(schema::HIRE_YEAR)
                    .eq(lit(year))
                    .and(col(schema::HIRE_MONTH).eq(lit(month))),
            )?;
            let exits = count_where(
                &subset,
                col(schema::SEPARATION_YEAR)
                    .eq(lit(year))
                    .and(col(schema::SEPARATION_MONTH).eq(lit(month))),
            )?;
            let active_end =
                count_where(&subset, metrics::active_at(metrics::month_end(year, month)?))?;
            let rate = formulas::turnover_alternative(hires, exits, active_end);
            Ok(format!(
                "O turnover de {month:02}/{year} {} foi de {rate:.2}%. \
                 Admissões: {hires}, desligamentos: {exits}, ativos no fim do mês: {active_end}.",
                scope_phrase(scope)
            ))
        }
        Intent::AnnualTurnover { scope, years } => {
            let subset = scoped(data, scope);
            let mut lines = Vec::with_capacity(years.len());
            for year in years {
                let figures = metrics::turnover_for_period(&subset, year, None)?;
                lines.push(format!(
                    "{year}: turnover alternativo {:.2}%, admissões {}, desligamentos {}",
                    figures.alternative_pct, figures.hires, figures.exits
                ));
            }
            Ok(format!(
                "Turnover anual {}:\n{}",
                scope_phrase(scope),
                lines.join("\n")
            ))
        }
        Intent::PeakTurnover => {
            let mut peak: Option<(i32, f64)> = None;
            for year in dataset::available_years(data)? {
                let figures = metrics::turnover_for_period(data, year, None)?;
                if peak.is_none_or(|(_, rate)| figures.alternative_pct > rate) {
                    peak = Some((year, figures.alternative_pct));
                }
            }
            match peak {
                Some((year, rate)) => Ok(format!(
                    "O maior turnover da história foi em {year}, com {rate:.2}%."
                )),
                None => Ok("Não há anos com movimentação na base.".to_string()),
            }
        }
        Intent::TurnoverMissingYear => Ok(
            "Para calcular turnover eu preciso saber o ano. \
             Exemplo: qual o turnover de 2024 no varejo?"
                .to_string(),
        ),
        Intent::Help => Ok("Tente perguntar algo como: \
             quantos colaboradores ativos temos na Indústria? \
             Qual o turnover de 11/2025 na Matriz? \
             Compare o turnover do Varejo entre 2023 e 2024."
            .to_string()),
    }
}

fn scoped(data: &LazyFrame, scope: Option<Scope>) -> LazyFrame {
    match scope {
        Some(Scope::Area(area)) => data
            .clone()
            .filter(col(schema::AREA).eq(lit(area.label()))),
        Some(Scope::Overall) | None => data.clone(),
    }
}

fn apply_status(data: LazyFrame, status: StatusFilter) -> LazyFrame {
    let active = col(schema::EMPLOYMENT_STATE)
        .eq(lit(schema::EmploymentState::Active.label()));
    match status {
        StatusFilter::Active => data.filter(active),
        StatusFilter::Separated => data.filter(active.not()),
    }
}

fn status_word(status: StatusFilter) -> &'static str {
    match status {
        StatusFilter::Active => "ativos",
        StatusFilter::Separated => "desligados",
    }
}

fn scope_phrase(scope: Option<Scope>) -> String {
    match scope {
        Some(Scope::Area(area)) => format!("na área {}", area.label()),
        Some(Scope::Overall) | None => "na empresa".to_string(),
    }
}
