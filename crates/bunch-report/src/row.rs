//! Plain data row written to the detailed headway-sample CSV.

use bunch_core::{BusId, StopId};

/// One headway-deviation observation: a bus's arrival at a stop where a
/// preceding bus already existed in the fleet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadwaySampleRow {
    pub stop_id: StopId,
    pub bus_id: BusId,
    pub relative_deviation_sq: f64,
}
