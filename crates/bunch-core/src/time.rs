//! Simulation time model.
//!
//! Time is represented as an absolute count of seconds since simulated
//! midnight, stored as `Seconds(i64)`.  Using an integer keeps event
//! comparisons and heap ordering exact — no floating point drift ever leaks
//! into the firing-time ordering that the event queue depends on.

use std::fmt;

/// An absolute point in simulated time, in seconds since midnight.
///
/// Values may exceed 86_400 — the day does not wrap for scheduling purposes,
/// only for the signal-plan evaluator's own modulo arithmetic.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Seconds(pub i64);

impl Seconds {
    pub const ZERO: Seconds = Seconds(0);

    #[inline]
    pub fn offset(self, n: i64) -> Seconds {
        Seconds(self.0 + n)
    }
}

impl std::ops::Add<i64> for Seconds {
    type Output = Seconds;
    #[inline]
    fn add(self, rhs: i64) -> Seconds {
        Seconds(self.0 + rhs)
    }
}

impl std::ops::Sub for Seconds {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: Seconds) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Seconds {
    /// Render as `HH:MM:SS`, matching the console trace format the original
    /// simulator printed before every event.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0.max(0);
        write!(f, "{:02}:{:02}:{:02}", t / 3600, (t % 3600) / 60, t % 60)
    }
}

/// Parse an `"HHMM"` clock string into seconds since midnight.
///
/// # Errors
/// Returns `None` if the string is not exactly 4 ASCII digits.
pub fn parse_hhmm(s: &str) -> Option<Seconds> {
    let s = s.trim();
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i64 = s[0..2].parse().ok()?;
    let minutes: i64 = s[2..4].parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(Seconds(hours * 3600 + minutes * 60))
}

// ── Time-of-day buckets ─────────────────────────────────────────────────────

/// One of the three demand regimes a stop's arrival/boarding rates are
/// indexed by.  Order matches the column order of the rates CSV: morning
/// peak, evening peak, off-peak.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TimeBucket {
    MorningPeak,
    EveningPeak,
    OffPeak,
}

impl TimeBucket {
    /// Index into a `[T; 3]` or parallel-column layout.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            TimeBucket::MorningPeak => 0,
            TimeBucket::EveningPeak => 1,
            TimeBucket::OffPeak => 2,
        }
    }
}

/// A single `[start, end)` window, in seconds since midnight.
#[derive(Copy, Clone, Debug)]
pub struct PeakWindow {
    pub start: Seconds,
    pub end: Seconds,
}

impl PeakWindow {
    #[inline]
    pub fn contains(self, t: Seconds) -> bool {
        t >= self.start && t < self.end
    }
}

/// Holds the morning- and evening-peak windows configured for a run; answers
/// which [`TimeBucket`] a given moment falls into.
#[derive(Copy, Clone, Debug)]
pub struct PeakSchedule {
    pub morning: PeakWindow,
    pub evening: PeakWindow,
}

impl PeakSchedule {
    pub fn bucket_at(&self, t: Seconds) -> TimeBucket {
        if self.morning.contains(t) {
            TimeBucket::MorningPeak
        } else if self.evening.contains(t) {
            TimeBucket::EveningPeak
        } else {
            TimeBucket::OffPeak
        }
    }
}
