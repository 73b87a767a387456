//! Parsing and evaluation of a traffic-signal's daily phase plan.
//!
//! A plan is a string of back-to-back segments, each wrapped in `/`:
//!
//! ```text
//! /HHMM/cycle/offset/greenStart,greenEnd[,greenStart,greenEnd...]/
//! ```
//!
//! Segments are valid from their `HHMM` start until the start of the next
//! segment (or, for the last segment, until the first segment's start time
//! the following day). Because each segment's trailing `/` is also the next
//! segment's leading `/`, splitting the whole string on `/` and discarding
//! the empty leading/trailing tokens yields a flat list of fields whose
//! length is a multiple of four.

use crate::error::{SignalError, SignalResult};
use bunch_core::{parse_hhmm, Seconds};

/// One phase segment: a fixed-cycle signal program valid from `start` until
/// the next segment takes over.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start: Seconds,
    pub cycle: i64,
    /// Offset into the cycle, already folded modulo `cycle` and accumulated
    /// with every prior segment's offset per the plan string's convention.
    pub offset: i64,
    /// Ascending, non-overlapping `(green_start, green_end)` pairs, each
    /// within `[0, cycle)`.
    pub greens: Vec<(i64, i64)>,
}

/// A signal's full daily program: an ordered list of [`Segment`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    segments: Vec<Segment>,
}

impl Plan {
    /// Parse a plan string into its segments.
    ///
    /// Offsets accumulate across segments: segment *k*'s stored offset is
    /// `(segment[k-1].offset + raw_offset_k) mod cycle_k`, so a later
    /// segment's phase is defined relative to the plan as a whole rather
    /// than reset to zero at each boundary.
    pub fn parse(s: &str) -> SignalResult<Plan> {
        let fields: Vec<&str> = s.split('/').filter(|t| !t.is_empty()).collect();
        if fields.is_empty() || fields.len() % 4 != 0 {
            return Err(SignalError::BadFormat(s.to_string()));
        }

        let mut segments = Vec::with_capacity(fields.len() / 4);
        let mut running_offset: i64 = 0;

        for chunk in fields.chunks(4) {
            let [hhmm, cycle_s, offset_s, pairs_s] = chunk else {
                return Err(SignalError::BadFormat(s.to_string()));
            };

            let start = parse_hhmm(hhmm)
                .ok_or_else(|| SignalError::BadFormat(format!("bad HHMM field {hhmm:?}")))?;
            let cycle: i64 = cycle_s
                .parse()
                .map_err(|_| SignalError::BadFormat(format!("bad cycle field {cycle_s:?}")))?;
            if cycle <= 0 {
                return Err(SignalError::BadFormat(format!(
                    "cycle must be positive, got {cycle}"
                )));
            }
            let raw_offset: i64 = offset_s
                .parse()
                .map_err(|_| SignalError::BadFormat(format!("bad offset field {offset_s:?}")))?;

            running_offset = (running_offset + raw_offset).rem_euclid(cycle);

            let values: Vec<i64> = pairs_s
                .split(',')
                .map(|v| {
                    v.parse()
                        .map_err(|_| SignalError::BadFormat(format!("bad green value {v:?}")))
                })
                .collect::<SignalResult<_>>()?;
            if values.is_empty() || values.len() % 2 != 0 {
                return Err(SignalError::BadFormat(format!(
                    "green interval list must hold pairs: {pairs_s:?}"
                )));
            }
            let greens: Vec<(i64, i64)> = values
                .chunks(2)
                .map(|pair| (pair[0], pair[1]))
                .collect();
            for &(a, b) in &greens {
                if !(0..cycle).contains(&a) || b <= a || b >= cycle {
                    return Err(SignalError::BadFormat(format!(
                        "green interval ({a},{b}) invalid for cycle {cycle}"
                    )));
                }
            }

            segments.push(Segment {
                start,
                cycle,
                offset: running_offset,
                greens,
            });
        }

        Ok(Plan { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Return `0` if the light is green at `now`, or the number of seconds
    /// until the next green phase begins.
    pub fn signal_status(&self, now: Seconds) -> SignalResult<i64> {
        let segment = self.segment_at(now)?;
        let target = (now.0 - segment.offset).rem_euclid(segment.cycle);

        let mut best_wait: Option<i64> = None;
        for &(a, b) in &segment.greens {
            if target >= a && target <= b {
                return Ok(0);
            }
            let wait = if target < a {
                a - target
            } else {
                segment.cycle - target + a
            };
            best_wait = Some(best_wait.map_or(wait, |w: i64| w.min(wait)));
        }
        best_wait.ok_or(SignalError::NoMatchingSegment)
    }

    fn segment_at(&self, now: Seconds) -> SignalResult<&Segment> {
        let n = self.segments.len();
        for (i, seg) in self.segments.iter().enumerate() {
            let next_start = if i + 1 < n {
                self.segments[i + 1].start
            } else {
                Seconds(self.segments[0].start.0 + 86_400)
            };
            if now >= seg.start && now < next_start {
                return Ok(seg);
            }
        }
        Err(SignalError::NoMatchingSegment)
    }
}
