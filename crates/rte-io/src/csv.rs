//! CSV output backend.
//!
//! One file, one header row, one row per (origin, destination) pair.
//! Numeric cells of unroutable pairs are left empty.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::ResultWriter;
use crate::{IoResult, ResultRow, Units};

/// Writes route results to a CSV file.
pub struct CsvResultWriter {
    out:      Writer<File>,
    finished: bool,
}

impl CsvResultWriter {
    /// Create (or truncate) `path` and write the header row for `units`.
    pub fn new(path: &Path, units: Units) -> IoResult<Self> {
        let mut out = Writer::from_path(path)?;
        out.write_record(units.headers())?;
        Ok(Self { out, finished: false })
    }
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl ResultWriter for CsvResultWriter {
    fn write_rows(&mut self, rows: &[ResultRow]) -> IoResult<()> {
        for row in rows {
            self.out.write_record(&[
                row.origin_id.clone(),
                row.destination_id.clone(),
                row.routable.to_string(),
                cell(row.shortest_distance),
                cell(row.fastest_time),
                cell(row.shortest_path_time),
                cell(row.fastest_path_distance),
                row.failure.unwrap_or_default().to_owned(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> IoResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
