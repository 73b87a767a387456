//! `bunch-report` — headway-deviation aggregation and CSV/console reporting.
//!
//! [`ReportObserver`] bridges [`bunch_sim::SimObserver`] to a
//! [`ReportWriter`] backend (currently just [`CsvReportWriter`]), recording
//! every individual headway-deviation observation and tallying bunching
//! episodes as the run proceeds. Once the run completes, [`Summary::new`]
//! combines the simulator's own accumulated sum with those episode counts
//! into the run's headway-deviation performance figure.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bunch_report::{CsvReportWriter, ReportObserver, Summary};
//!
//! let writer = CsvReportWriter::new(Path::new("./headway_samples.csv"))?;
//! let mut obs = ReportObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("report write error: {e}");
//! }
//! let summary = Summary::new(&sim, obs.bunching_episodes_started(), obs.bunching_episodes_recovered());
//! summary.log_summary();
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod report;
pub mod row;
pub mod writer;


pub use csv::CsvReportWriter;
pub use error::{ReportError, ReportResult};
pub use observer::ReportObserver;
pub use report::Summary;
pub use row::HeadwaySampleRow;
pub use writer::{NullReportWriter, ReportWriter};
