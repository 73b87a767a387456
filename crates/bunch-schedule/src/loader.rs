//! CSV ingestion for stops and signals.
//!
//! Header rows are skipped unconditionally — their text is never checked
//! against expected column names, only the column *order* is authoritative
//! (§6 of the interface contract). Mileage is not part of either file: it
//! is assigned later by [`crate::scheduler::build_route`] from the
//! configured inter-element distance distributions.

use std::io::Read;

use bunch_route::{RateTable, RatePair, Signal, Stop};
use bunch_core::{SignalId, StopId};
use bunch_signal::Plan;
use csv::ReaderBuilder;

use crate::error::{ScheduleError, ScheduleResult};

/// A stop row with its rates, mileage not yet assigned (`0.0` placeholder).
#[derive(Debug)]
pub struct StopRecord {
    pub id: StopId,
    pub name: String,
    pub board_rate: RateTable,
    pub alight_rate: RateTable,
}

/// A signal row with its parsed plan, mileage not yet assigned.
pub struct SignalRecord {
    pub id: SignalId,
    pub name: String,
    pub plan: Plan,
}

pub fn load_stops_reader<R: Read>(reader: R) -> ScheduleResult<Vec<StopRecord>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).flexible(false).from_reader(reader);
    let mut out = Vec::new();

    for (i, result) in csv_reader.records().enumerate() {
        let row_no = i + 2; // +1 for 1-based, +1 for the skipped header
        let record = result.map_err(|source| ScheduleError::Csv { row: row_no, source })?;
        out.push(parse_stop_row(row_no, &record)?);
    }
    Ok(out)
}

pub fn load_signals_reader<R: Read>(reader: R) -> ScheduleResult<Vec<SignalRecord>> {
    let mut csv_reader = ReaderBuilder::new().has_headers(true).flexible(false).from_reader(reader);
    let mut out = Vec::new();

    for (i, result) in csv_reader.records().enumerate() {
        let row_no = i + 2;
        let record = result.map_err(|source| ScheduleError::Csv { row: row_no, source })?;
        out.push(parse_signal_row(row_no, &record)?);
    }
    Ok(out)
}

fn field<'a>(record: &'a csv::StringRecord, row_no: usize, idx: usize, name: &str) -> ScheduleResult<&'a str> {
    record.get(idx).ok_or_else(|| ScheduleError::BadRow {
        row: row_no,
        message: format!("missing column {idx} ({name})"),
    })
}

fn parse_f64(record: &csv::StringRecord, row_no: usize, idx: usize, name: &str) -> ScheduleResult<f64> {
    let raw = field(record, row_no, idx, name)?;
    raw.trim().parse().map_err(|_| ScheduleError::BadRow {
        row: row_no,
        message: format!("column {idx} ({name}) is not a number: {raw:?}"),
    })
}

fn parse_u32(record: &csv::StringRecord, row_no: usize, idx: usize, name: &str) -> ScheduleResult<u32> {
    let raw = field(record, row_no, idx, name)?;
    raw.trim().parse().map_err(|_| ScheduleError::BadRow {
        row: row_no,
        message: format!("column {idx} ({name}) is not an integer: {raw:?}"),
    })
}

/// Passengers/hour on the wire, passengers/second internally.
const PER_HOUR_TO_PER_SECOND: f64 = 1.0 / 3600.0;

fn parse_rate_table(
    record: &csv::StringRecord,
    row_no: usize,
    start_idx: usize,
    label: &str,
) -> ScheduleResult<RateTable> {
    let mut pairs = [RatePair { mean: 0.0, stddev: 0.0 }; 3];
    for (i, pair) in pairs.iter_mut().enumerate() {
        let mean = parse_f64(record, row_no, start_idx + i * 2, &format!("{label}[{i}].mean"))?;
        let stddev = parse_f64(record, row_no, start_idx + i * 2 + 1, &format!("{label}[{i}].stddev"))?;
        *pair = RatePair { mean: mean * PER_HOUR_TO_PER_SECOND, stddev: stddev * PER_HOUR_TO_PER_SECOND };
    }
    Ok(RateTable { morning_peak: pairs[0], evening_peak: pairs[1], off_peak: pairs[2] })
}

fn parse_stop_row(row_no: usize, record: &csv::StringRecord) -> ScheduleResult<StopRecord> {
    let id = StopId(parse_u32(record, row_no, 0, "id")?);
    let name = field(record, row_no, 1, "stopName")?.to_string();
    let board_rate = parse_rate_table(record, row_no, 2, "arrivalRate")?;
    let alight_rate = parse_rate_table(record, row_no, 8, "dropRate")?;
    Ok(StopRecord { id, name, board_rate, alight_rate })
}

fn parse_signal_row(row_no: usize, record: &csv::StringRecord) -> ScheduleResult<SignalRecord> {
    let id = SignalId(parse_u32(record, row_no, 0, "id")?);
    let name = field(record, row_no, 1, "lightName")?.to_string();
    let plan_str = field(record, row_no, 2, "plan")?;
    let plan = Plan::parse(plan_str)?;
    Ok(SignalRecord { id, name, plan })
}

/// Build a placeholder [`Stop`] (mileage `0.0`) from a loaded record.
pub fn stop_from_record(r: StopRecord) -> Stop {
    Stop::new(r.id, r.name, 0.0, r.board_rate, r.alight_rate)
}

/// Build a placeholder [`Signal`] (mileage `0.0`) from a loaded record.
pub fn signal_from_record(r: SignalRecord) -> Signal {
    Signal::new(r.id, r.name, 0.0, r.plan)
}
