use std::{fs::File, io::Read, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::error::{BookstrokeError, BookstrokeResult},
    span::record::BookRecord,
};

/// Column names and the position used when the header lacks that name.
const COLUMNS: [(&str, usize); 6] = [
    ("title", 0),
    ("author", 1),
    ("avg_rating", 2),
    ("rating", 3),
    ("date_started", 4),
    ("date_read", 5),
];

pub fn load_books_csv(path: &Path) -> BookstrokeResult<Vec<BookRecord>> {
    let file = File::open(path).with_context(|| format!("open book table '{}'", path.display()))?;
    let records = read_books_csv(file)?;
    tracing::debug!(path = %path.display(), rows = records.len(), "loaded book table");
    Ok(records)
}

/// Read a headed CSV reading log.
///
/// Cells are taken by header name, falling back to a fixed column position; anything still
/// missing is an empty string. Only malformed CSV fails.
pub fn read_books_csv<R: Read>(reader: R) -> BookstrokeResult<Vec<BookRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| BookstrokeError::ingest(format!("read csv header: {e}")))?
        .clone();
    let named: Vec<Option<usize>> = COLUMNS
        .iter()
        .map(|(name, _)| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
        .collect();

    let mut out = Vec::new();
    for (row_idx, row) in rdr.records().enumerate() {
        let row =
            row.map_err(|e| BookstrokeError::ingest(format!("read csv row {}: {e}", row_idx + 1)))?;
        let cell = |col: usize| -> String {
            row.get(named[col].unwrap_or(COLUMNS[col].1))
                .unwrap_or_default()
                .to_string()
        };
        out.push(BookRecord {
            title: cell(0),
            author: cell(1),
            avg_rating: cell(2),
            rating: cell(3),
            start_date_raw: cell(4),
            end_date_raw: cell(5),
        });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/ingest/csv.rs"]
mod tests;
