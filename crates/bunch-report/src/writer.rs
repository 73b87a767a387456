//! The `ReportWriter` trait implemented by output backends.

use crate::row::HeadwaySampleRow;
use crate::ReportResult;

/// Trait implemented by report output backends.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`ReportObserver::take_error`][crate::ReportObserver::take_error].
pub trait ReportWriter {
    /// Write one headway-deviation observation.
    fn write_sample(&mut self, row: &HeadwaySampleRow) -> ReportResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> ReportResult<()>;
}

/// A [`ReportWriter`] that discards every sample, for runs with no
/// per-sample output file configured.
pub struct NullReportWriter;

impl ReportWriter for NullReportWriter {
    fn write_sample(&mut self, _row: &HeadwaySampleRow) -> ReportResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> ReportResult<()> {
        Ok(())
    }
}
