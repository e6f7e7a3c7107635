//! Static dataset loaded once from CSV and shared read-only afterwards.

use std::io;
use std::path::Path;

use medfind_core::AmenityKind;

use super::{CandidateSource, SourceError};
use crate::types::{FetchRequest, RawCandidate, TableRow};

/// Columns that, when present, carry a per-row amenity kind.
const KIND_COLUMNS: &[&str] = &["amenity", "type", "category"];

#[derive(Debug, Clone)]
struct TableEntry {
    /// `None` when the row names a kind this service does not search for.
    kind: Option<AmenityKind>,
    row: TableRow,
}

/// An immutable in-memory table of candidate rows.
///
/// Rows keep every column as loaded, including rows whose coordinates do not
/// parse; those are dropped during normalization, not at load time.
#[derive(Debug, Clone)]
pub struct TableSource {
    entries: Vec<TableEntry>,
}

impl TableSource {
    /// Builds a table from already-parsed rows.
    ///
    /// Rows without a kind column are tagged with `default_kind`.
    #[must_use]
    pub fn new(rows: Vec<TableRow>, default_kind: AmenityKind) -> Self {
        let entries = rows
            .into_iter()
            .map(|row| TableEntry {
                kind: row_kind(&row, default_kind),
                row,
            })
            .collect();
        Self { entries }
    }

    /// Loads a CSV file with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Dataset`] if the file cannot be opened or its
    /// header row cannot be read. Individual unreadable records are skipped
    /// and logged.
    pub fn from_csv_path(path: &Path, default_kind: AmenityKind) -> Result<Self, SourceError> {
        let label = path.display().to_string();
        let reader = csv_builder()
            .from_path(path)
            .map_err(|source| SourceError::Dataset {
                path: label.clone(),
                source,
            })?;
        Self::from_csv(reader, &label, default_kind)
    }

    /// Loads CSV data from any reader. `label` names the data in errors and logs.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Dataset`] if the header row cannot be read.
    pub fn from_reader<R: io::Read>(
        reader: R,
        label: &str,
        default_kind: AmenityKind,
    ) -> Result<Self, SourceError> {
        Self::from_csv(csv_builder().from_reader(reader), label, default_kind)
    }

    fn from_csv<R: io::Read>(
        mut reader: csv::Reader<R>,
        label: &str,
        default_kind: AmenityKind,
    ) -> Result<Self, SourceError> {
        let headers = reader
            .headers()
            .map_err(|source| SourceError::Dataset {
                path: label.to_owned(),
                source,
            })?
            .clone();

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for (idx, record) in reader.records().enumerate() {
            match record {
                Ok(record) => rows.push(TableRow::from_pairs(headers.iter().zip(record.iter()))),
                Err(e) => {
                    tracing::warn!(
                        dataset = label,
                        record = idx + 1,
                        error = %e,
                        "skipping unreadable record"
                    );
                    skipped += 1;
                }
            }
        }

        tracing::info!(
            dataset = label,
            rows = rows.len(),
            skipped,
            columns = %headers.iter().collect::<Vec<_>>().join(","),
            "loaded candidate dataset"
        );

        Ok(Self::new(rows, default_kind))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CandidateSource for TableSource {
    fn name(&self) -> &'static str {
        "table"
    }

    async fn fetch(&self, request: &FetchRequest) -> Result<Vec<RawCandidate>, SourceError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.kind.is_some_and(|k| request.kinds.contains(&k)))
            .map(|entry| RawCandidate::TableRow(entry.row.clone()))
            .collect())
    }
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(true).flexible(true).trim(csv::Trim::All);
    builder
}

fn row_kind(row: &TableRow, default_kind: AmenityKind) -> Option<AmenityKind> {
    match row.first_of(KIND_COLUMNS) {
        Some(value) => value.parse().ok(),
        None => Some(default_kind),
    }
}
