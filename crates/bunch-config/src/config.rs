//! Typed, validated run configuration.

use std::collections::HashMap;

use bunch_core::{parse_hhmm, PeakSchedule, PeakWindow, Seconds};

use crate::error::{ConfigError, ConfigResult};
use crate::raw;

/// Default RNG seed used when `sim.seed` is absent, so an unconfigured
/// seed is still reproducible rather than varying between runs.
pub const DEFAULT_SEED: u64 = 0xB0A7_5EED;

/// Length of a single-`HHMM` peak window, seconds (59 minutes).
const PEAK_WINDOW_DEFAULT_SPAN: i64 = 3540;

/// Fully parsed, validated configuration for one simulation run.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub route_name: String,
    pub peaks: PeakSchedule,

    pub stop_dist_avg: f64,
    pub stop_dist_sd: f64,
    pub signal_dist_avg: f64,
    pub signal_dist_sd: f64,

    pub schedule_start: Seconds,
    pub schedule_shift: u32,
    /// Mean/stddev headway, seconds (converted from configured minutes).
    pub schedule_avg: f64,
    pub schedule_sd: f64,

    /// Mean/stddev cruise speed, km/h (converted to m/s at the sampling
    /// site, not here, since the raw km/h value is also logged as-is).
    pub velocity_avg: f64,
    pub velocity_sd: f64,
    pub velocity_limit: f64,
    pub velocity_low: f64,

    pub time_tmax: f64,
    pub time_scheme_threshold: f64,

    pub seed: u64,
}

impl RunConfig {
    pub fn parse(text: &str) -> ConfigResult<RunConfig> {
        let raw = raw::parse(text)?;
        Self::from_map(&raw)
    }

    fn from_map(raw: &HashMap<String, String>) -> ConfigResult<RunConfig> {
        let route_name = get_str(raw, "general.route")?;
        let morning = parse_peak_window(raw, "general.morningPeak")?;
        let evening = parse_peak_window(raw, "general.eveningPeak")?;

        let stop_dist_avg = non_negative(raw, "stop.distAvg")?;
        let stop_dist_sd = non_negative(raw, "stop.distSd")?;
        let signal_dist_avg = non_negative(raw, "signal.distAvg")?;
        let signal_dist_sd = non_negative(raw, "signal.distSd")?;

        let schedule_start = get_hhmm(raw, "schedule.startTime")?;
        let schedule_shift = positive_u32(raw, "schedule.shift")?;
        let schedule_avg = non_negative(raw, "schedule.avg")? * 60.0;
        let schedule_sd = non_negative(raw, "schedule.sd")? * 60.0;

        let velocity_avg = non_negative(raw, "velocity.avg")?;
        let velocity_sd = non_negative(raw, "velocity.sd")?;
        let velocity_limit = positive(raw, "velocity.limit")? / 3.6;
        let velocity_low = non_negative(raw, "velocity.low")? / 3.6;

        let time_tmax = positive(raw, "time.Tmax")?;
        let time_scheme_threshold = positive(raw, "time.schemeThreshold")?;

        let seed = match raw.get("sim.seed") {
            Some(v) => v
                .parse()
                .map_err(|_| ConfigError::BadNumber { key: "sim.seed".into(), value: v.clone() })?,
            None => DEFAULT_SEED,
        };

        Ok(RunConfig {
            route_name,
            peaks: PeakSchedule { morning, evening },
            stop_dist_avg,
            stop_dist_sd,
            signal_dist_avg,
            signal_dist_sd,
            schedule_start,
            schedule_shift,
            schedule_avg,
            schedule_sd,
            velocity_avg,
            velocity_sd,
            velocity_limit,
            velocity_low,
            time_tmax,
            time_scheme_threshold,
            seed,
        })
    }
}

fn get_str(raw: &HashMap<String, String>, key: &str) -> ConfigResult<String> {
    raw.get(key)
        .cloned()
        .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
}

fn get_f64(raw: &HashMap<String, String>, key: &str) -> ConfigResult<f64> {
    let value = get_str(raw, key)?;
    value
        .parse()
        .map_err(|_| ConfigError::BadNumber { key: key.to_string(), value })
}

fn get_u32(raw: &HashMap<String, String>, key: &str) -> ConfigResult<u32> {
    let value = get_str(raw, key)?;
    value
        .parse()
        .map_err(|_| ConfigError::BadNumber { key: key.to_string(), value })
}

/// A distance, stddev or rate: must not be negative.
fn non_negative(raw: &HashMap<String, String>, key: &str) -> ConfigResult<f64> {
    let value = get_f64(raw, key)?;
    if value < 0.0 {
        return Err(ConfigError::OutOfRange { key: key.to_string(), value });
    }
    Ok(value)
}

/// A bound, cap or threshold: must be strictly positive.
fn positive(raw: &HashMap<String, String>, key: &str) -> ConfigResult<f64> {
    let value = get_f64(raw, key)?;
    if value <= 0.0 {
        return Err(ConfigError::OutOfRange { key: key.to_string(), value });
    }
    Ok(value)
}

/// A fleet size: must be strictly positive.
fn positive_u32(raw: &HashMap<String, String>, key: &str) -> ConfigResult<u32> {
    let value = get_u32(raw, key)?;
    if value == 0 {
        return Err(ConfigError::OutOfRange { key: key.to_string(), value: 0.0 });
    }
    Ok(value)
}

fn get_hhmm(raw: &HashMap<String, String>, key: &str) -> ConfigResult<Seconds> {
    let value = get_str(raw, key)?;
    parse_hhmm(&value).ok_or_else(|| ConfigError::BadTime { key: key.to_string(), value })
}

/// Accepts either `"HHMM-HHMM"` or a single `"HHMM"`, in which case the
/// window runs for [`PEAK_WINDOW_DEFAULT_SPAN`] seconds.
fn parse_peak_window(raw: &HashMap<String, String>, key: &str) -> ConfigResult<PeakWindow> {
    let value = get_str(raw, key)?;
    let bad_time = || ConfigError::BadTime { key: key.to_string(), value: value.clone() };

    match value.split_once('-') {
        Some((start_s, end_s)) => {
            let start = parse_hhmm(start_s).ok_or_else(bad_time)?;
            let end = parse_hhmm(end_s).ok_or_else(bad_time)?;
            Ok(PeakWindow { start, end })
        }
        None => {
            let start = parse_hhmm(&value).ok_or_else(bad_time)?;
            Ok(PeakWindow { start, end: start.offset(PEAK_WINDOW_DEFAULT_SPAN) })
        }
    }
}
