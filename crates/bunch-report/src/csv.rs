//! CSV output backend.
//!
//! Writes one file, `headway_samples.csv`, holding every individual
//! headway-deviation observation recorded during the run.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::HeadwaySampleRow;
use crate::writer::ReportWriter;
use crate::ReportResult;

/// Writes headway-deviation observations to a single CSV file.
pub struct CsvReportWriter {
    samples: Writer<File>,
    finished: bool,
}

impl CsvReportWriter {
    /// Create (or truncate) `path` and write the header row.
    pub fn new(path: &Path) -> ReportResult<Self> {
        let mut samples = Writer::from_path(path)?;
        samples.write_record(["stop_id", "bus_id", "relative_deviation_sq"])?;
        Ok(CsvReportWriter { samples, finished: false })
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_sample(&mut self, row: &HeadwaySampleRow) -> ReportResult<()> {
        self.samples.write_record(&[
            row.stop_id.0.to_string(),
            row.bus_id.0.to_string(),
            row.relative_deviation_sq.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.samples.flush()?;
        Ok(())
    }
}
