//! Externally loaded lookup tables.
//!
//! Four text resources ship alongside the raw exports: three key/value maps
//! (exit cause code → label, status code → label, cost-center code →
//! area-group string) and a flat list of temporary-staff names. They are
//! loaded once at startup into an immutable [`Lookups`] value that every
//! pipeline stage receives by reference; there is no global cached state.
//!
//! Map resources are line-oriented `key: "value",` entries; list resources
//! are one quoted name per line. A missing resource is a fatal startup
//! error — production runs never substitute empty maps silently.

use crate::{Result, WorkforceError, schema};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Resource file name for the exit-cause map.
pub const EXIT_CAUSES_FILE: &str = "causas_map.txt";
/// Resource file name for the status map.
pub const STATUSES_FILE: &str = "situacao_map.txt";
/// Resource file name for the cost-center area-group map.
pub const COST_CENTERS_FILE: &str = "cc_map.txt";
/// Resource file name for the temporary-staff name list.
pub const TEMPORARY_NAMES_FILE: &str = "temporarios_map.txt";

/// Immutable lookup configuration for one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    /// Exit cause code → human label.
    pub exit_causes: HashMap<i64, String>,
    /// Status code → human label.
    pub statuses: HashMap<i64, String>,
    /// Cost-center code → area-group string (e.g. "LOJAS ...", "SUPPLY ...").
    pub cost_centers: HashMap<String, String>,
    /// Exact worker names excluded as temporary staff (salaried set only).
    pub temporary_names: Vec<String>,
}

impl Lookups {
    /// Load all four resources from `dir`. Any missing or malformed file
    /// aborts the run.
    pub fn load(dir: &Path) -> Result<Self> {
        let exit_causes = load_coded_map(&dir.join(EXIT_CAUSES_FILE))?;
        let statuses = load_coded_map(&dir.join(STATUSES_FILE))?;
        let cost_centers = load_string_map(&dir.join(COST_CENTERS_FILE))?;
        let temporary_names = load_list(&dir.join(TEMPORARY_NAMES_FILE))?;

        Ok(Self {
            exit_causes,
            statuses,
            cost_centers,
            temporary_names,
        })
    }

    /// Empty lookups for best-effort interactive preview paths. Every code
    /// resolves to [`schema::UNKNOWN_LABEL`] and every cost center to the
    /// [`schema::UNMAPPED_AREA`] sentinel. Never used in production runs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Label for an exit-cause code.
    pub fn exit_cause_label(&self, code: i64) -> &str {
        self.exit_causes
            .get(&code)
            .map_or(schema::UNKNOWN_LABEL, String::as_str)
    }

    /// Label for a status code.
    pub fn status_label(&self, code: i64) -> &str {
        self.statuses
            .get(&code)
            .map_or(schema::UNKNOWN_LABEL, String::as_str)
    }

    /// Area-group string for a cost-center code.
    pub fn area_group(&self, cost_center: &str) -> &str {
        self.cost_centers
            .get(cost_center)
            .map_or(schema::UNMAPPED_AREA, String::as_str)
    }
}

fn read_resource(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(WorkforceError::MissingResource(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

fn format_error(path: &Path, line: usize, reason: impl Into<String>) -> WorkforceError {
    WorkforceError::ResourceFormat {
        file: PathBuf::from(path),
        line,
        reason: reason.into(),
    }
}

/// Split one `key: "value",` entry. Returns `None` for blank lines.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let line = line.trim().trim_end_matches(',');
    if line.is_empty() {
        return None;
    }
    let (key, value) = line.split_once(':')?;
    Some((
        key.trim().trim_matches('"'),
        value.trim().trim_matches('"'),
    ))
}

fn load_coded_map(path: &Path) -> Result<HashMap<i64, String>> {
    let text = read_resource(path)?;
    let mut map = HashMap::new();
    for (idx, raw) in text.lines().enumerate() {
        let Some((key, value)) = split_entry(raw) else {
            if raw.trim().trim_end_matches(',').is_empty() {
                continue;
            }
            return Err(format_error(path, idx + 1, "expected `key: \"value\"`"));
        };
        let code: i64 = key
            .parse()
            .map_err(|_| format_error(path, idx + 1, format!("non-numeric key `{key}`")))?;
        map.insert(code, value.to_string());
    }
    Ok(map)
}

fn load_string_map(path: &Path) -> Result<HashMap<String, String>> {
    let text = read_resource(path)?;
    let mut map = HashMap::new();
    for (idx, raw) in text.lines().enumerate() {
        match split_entry(raw) {
            Some((key, value)) => {
                map.insert(key.to_string(), value.to_string());
            }
            None if raw.trim().trim_end_matches(',').is_empty() => {}
            None => {
                return Err(format_error(path, idx + 1, "expected `key: \"value\"`"));
            }
        }
    }
    Ok(map)
}

fn load_list(path: &Path) -> Result<Vec<String>> {
    let text = read_resource(path)?;
    Ok(text
        .lines()
        .map(|line| line.trim().trim_matches(|c| c == '"' || c == ',').trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
