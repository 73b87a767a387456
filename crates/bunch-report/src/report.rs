//! The final run summary: headway-deviation figure, bunching episode counts,
//! and a one-line console print.

use bunch_sim::Simulator;

/// Aggregate statistics for a completed run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub events_processed: u64,
    /// Sum of squared relative headway deviations, pooled across every
    /// follower bus's arrivals, divided by the number of follower buses
    /// (`fleet.size() - 1`) — the run's headway-deviation performance
    /// figure. `0.0` for a single-bus fleet, which has no followers.
    pub headway_deviation: f64,
    pub bunching_episodes_started: u64,
    pub bunching_episodes_recovered: u64,
}

impl Summary {
    /// Summarize a completed [`Simulator`] run, combining its own
    /// accumulated headway-deviation sum with the episode counts tallied by
    /// a [`crate::ReportObserver`] over the same run.
    pub fn new(sim: &Simulator, bunching_episodes_started: u64, bunching_episodes_recovered: u64) -> Self {
        let (sum, _count) = sim.headway_deviation();
        let followers = sim.fleet().len().saturating_sub(1);
        let headway_deviation = if followers == 0 { 0.0 } else { sum / followers as f64 };

        Summary {
            events_processed: sim.events_processed(),
            headway_deviation,
            bunching_episodes_started,
            bunching_episodes_recovered,
        }
    }

    /// Print the one-line end-of-run summary to the console at `info` level.
    pub fn log_summary(&self) {
        log::info!(
            "{} events, headway deviation {:.4}, {} bunching episodes ({} recovered)",
            self.events_processed,
            self.headway_deviation,
            self.bunching_episodes_started,
            self.bunching_episodes_recovered,
        );
    }
}
