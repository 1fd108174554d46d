//! Raw spreadsheet ingestion.
//!
//! The payroll system exports legacy-binary workbooks; calamine
//! auto-detects the container format. The first sheet is read with row 1 as
//! headers, and every cell is materialised as a string so that downstream
//! cleaning owns all type coercion. Fully empty rows are dropped while the
//! columns are built.

use crate::{Result, WorkforceError};
use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Read one roster export into an all-string [`DataFrame`].
///
/// Missing file, empty workbook, or a workbook without a header row is a
/// fatal error. Cell rendering:
/// - empty cells → null;
/// - numeric cells with zero fraction → integer text (`"4101"`, not
///   `"4101.0"` — the cost-center and code lookups key on integer text);
/// - date/datetime cells → ISO `YYYY-MM-DD`;
/// - everything else → trimmed display text.
pub fn read_roster(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(WorkforceError::MissingInput(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();
    let Some(sheet_name) = sheet_names.first().cloned() else {
        return Err(WorkforceError::EmptySpreadsheet(path.to_path_buf()));
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(calamine::Error::from)?;
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        return Err(WorkforceError::EmptySpreadsheet(path.to_path_buf()));
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| match cell {
            Data::String(s) => s.trim().to_string(),
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect();

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    let mut kept = 0usize;
    let mut skipped = 0usize;

    for row in rows {
        let cells: Vec<Option<String>> = (0..headers.len())
            .map(|i| row.get(i).and_then(render_cell))
            .collect();

        if cells.iter().all(Option::is_none) {
            skipped += 1;
            continue;
        }
        kept += 1;
        for (column, cell) in columns.iter_mut().zip(cells) {
            column.push(cell);
        }
    }

    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = kept,
        empty_rows = skipped,
        "roster read"
    );

    let columns = headers
        .into_iter()
        .zip(columns)
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, values)| Column::new(name.into(), values))
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

/// Render one cell to text, `None` when blank.
fn render_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|ndt| ndt.date().format("%Y-%m-%d").to_string()),
        other => {
            let text = other.to_string();
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
    }
}
