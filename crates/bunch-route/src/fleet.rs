//! The mileage-ordered fleet and its leading-bus lookup.

use crate::entities::Bus;
use crate::error::{RouteError, RouteResult};
use bunch_core::BusId;

/// Buses kept sorted ascending by mileage (ties broken by id) so the bus
/// immediately ahead of any given bus is a single array lookup away.
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    buses: Vec<Bus>,
}

impl Fleet {
    pub fn new(mut buses: Vec<Bus>) -> Self {
        Self::sort(&mut buses);
        Fleet { buses }
    }

    fn sort(buses: &mut [Bus]) {
        buses.sort_by(|a, b| {
            a.mileage
                .partial_cmp(&b.mileage)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
    }

    /// Re-sort after a bus's mileage has changed. Must be called before any
    /// further leading-bus lookup in the same handler.
    pub fn resort(&mut self) {
        Self::sort(&mut self.buses);
    }

    pub fn len(&self) -> usize {
        self.buses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bus> {
        self.buses.iter()
    }

    pub fn get(&self, id: BusId) -> RouteResult<&Bus> {
        self.buses
            .iter()
            .find(|b| b.id == id)
            .ok_or(RouteError::BusNotFound(id))
    }

    pub fn get_mut(&mut self, id: BusId) -> RouteResult<&mut Bus> {
        self.buses
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(RouteError::BusNotFound(id))
    }

    fn position(&self, id: BusId) -> RouteResult<usize> {
        self.buses
            .iter()
            .position(|b| b.id == id)
            .ok_or(RouteError::BusNotFound(id))
    }

    /// The bus immediately ahead of `id` in mileage order, or `None` if
    /// `id` is already the leader.
    ///
    /// Skips any bus that has not yet arrived at its own first stop — such
    /// a bus sits in the fleet at mileage `0.0` awaiting dispatch and must
    /// never be mistaken for another bus's leader.
    pub fn leading(&self, id: BusId) -> RouteResult<Option<&Bus>> {
        let idx = self.position(id)?;
        Ok(self.buses[idx + 1..].iter().find(|b| b.last_stop.is_some()))
    }
}
