//! Declarative data-correction table for the monthly series.
//!
//! Historical months occasionally need a manual patch for known
//! data-quality issues (a store migration double-counted a batch of
//! separations, for example). Rather than hardcoding the patch, the
//! corrections live in a table keyed by (scope label, year, month); each
//! entry may override the hire count, the exit count, or the month-end
//! active headcount, and the rate is recomputed from the corrected counts.
//! New corrections recur, so the table is loadable from a JSON file.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Scope label used for company-wide (no area filter) monthly series.
pub const OVERALL_SCOPE: &str = "Geral";

/// Count overrides for one (scope, year, month) cell. Absent fields keep
/// the computed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyOverride {
    /// Corrected hire count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hires: Option<u32>,
    /// Corrected exit count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exits: Option<u32>,
    /// Corrected month-end active headcount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_end: Option<u32>,
}

/// One correction entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionEntry {
    /// Scope label: an area label, or [`OVERALL_SCOPE`].
    pub scope: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Overrides applied to the computed counts.
    #[serde(flatten)]
    pub correction: MonthlyOverride,
}

/// Correction table applied after the monthly computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrectionTable {
    entries: Vec<CorrectionEntry>,
}

impl CorrectionTable {
    /// Empty table: no months are corrected.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Load corrections from a JSON array of entries.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Register a correction. A later entry for the same cell wins.
    pub fn insert(&mut self, scope: &str, year: i32, month: u32, correction: MonthlyOverride) {
        self.entries.push(CorrectionEntry {
            scope: scope.to_string(),
            year,
            month,
            correction,
        });
    }

    /// Correction for one cell, if any.
    pub fn get(&self, scope: &str, year: i32, month: u32) -> Option<MonthlyOverride> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.scope == scope && e.year == year && e.month == month)
            .map(|e| e.correction)
    }

    /// Number of registered corrections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no corrections.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
