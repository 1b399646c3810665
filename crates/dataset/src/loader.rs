//! Whole-table ingestion: routes each row to timeline or configuration
//! handling and produces finalized region records.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use epicurves_calendar::{RefDay, parse_date_spec};

use crate::error::DatasetError;
use crate::region::RegionRecord;

/// Loads a dataset from a CSV file on disk.
///
/// # Errors
///
/// Returns [`DatasetError::FileNotFound`] when the path does not exist,
/// or any error from [`load_from_reader`].
pub fn load_path(path: &Path, ref_day: RefDay) -> Result<Vec<RegionRecord>, DatasetError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DatasetError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => DatasetError::Csv {
            reason: e.to_string(),
        },
    })?;
    info!(path = %path.display(), "loading dataset");
    load_from_reader(file, ref_day)
}

/// Loads a dataset from any tabular CSV source.
///
/// Layout: row 1 is the header; each cell from column 2 onward denotes
/// one region (the header text is kept only as a diagnostic label).
/// In subsequent rows the first cell is the row label: a
/// `<month>--<day>` token marks a case-count row, a label starting with
/// "comment" (case-insensitive) marks an ignorable row, and anything
/// else names a configuration field. Blank cells are omitted values.
///
/// The load is all-or-nothing: the first field-level or structural
/// error aborts it, carrying the originating row/column.
///
/// # Errors
///
/// Returns [`DatasetError`] on structural problems, unparseable cells,
/// unknown or duplicated fields, invalid dates, or duplicate
/// observations detected at finalize time.
pub fn load_from_reader<R: Read>(
    reader: R,
    ref_day: RefDay,
) -> Result<Vec<RegionRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut regions: Vec<RegionRecord> = Vec::new();
    let mut saw_header = false;

    for (i, record) in csv_reader.records().enumerate() {
        let row = i + 1;
        let record = record?;

        if !saw_header {
            if record.len() < 2 {
                return Err(DatasetError::Structure {
                    row,
                    reason: "header row must name at least one region column".to_string(),
                });
            }
            regions = record
                .iter()
                .skip(1)
                .enumerate()
                .map(|(j, cell)| RegionRecord::new(cell.trim(), j + 2))
                .collect();
            debug!(n_regions = regions.len(), "header row parsed");
            saw_header = true;
            continue;
        }

        if record.len() > regions.len() + 1 {
            return Err(DatasetError::Structure {
                row,
                reason: format!(
                    "row has {} cells but the header declares {}",
                    record.len(),
                    regions.len() + 1
                ),
            });
        }

        let label = record.get(0).unwrap_or("").trim();
        if label.to_lowercase().starts_with("comment") {
            debug!(row, "skipping comment row");
            continue;
        }
        let date_row = parse_date_spec(label);

        for (j, region) in regions.iter_mut().enumerate() {
            let col = j + 2;
            let Some(cell) = record.get(j + 1) else {
                continue;
            };
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            region.assign(date_row, ref_day, row, col, label, cell)?;
        }
    }

    if !saw_header {
        return Err(DatasetError::Structure {
            row: 1,
            reason: "input table is empty".to_string(),
        });
    }

    for region in &mut regions {
        region.finalize()?;
    }
    info!(n_regions = regions.len(), "dataset loaded");
    Ok(regions)
}
