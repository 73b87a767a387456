//! The mileage-ordered sequence of stops and signals that make up the route.

use crate::entities::{Signal, Stop};
use crate::error::{RouteError, RouteResult};
use bunch_core::{SignalId, StopId};

/// One position along the route: either a stop or a signalized intersection.
#[derive(Clone, Debug)]
pub enum RouteElement {
    Stop(Stop),
    Signal(Signal),
}

impl RouteElement {
    pub fn mileage(&self) -> f64 {
        match self {
            RouteElement::Stop(s) => s.mileage,
            RouteElement::Signal(s) => s.mileage,
        }
    }

    fn matches(&self, target: ElementRef) -> bool {
        match (self, target) {
            (RouteElement::Stop(s), ElementRef::Stop(id)) => s.id == id,
            (RouteElement::Signal(s), ElementRef::Signal(id)) => s.id == id,
            _ => false,
        }
    }
}

/// Identifies a route position by the id of the stop or signal there,
/// without borrowing the element itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementRef {
    Stop(StopId),
    Signal(SignalId),
}

/// The ordered route: stops and signals sorted by strictly increasing
/// mileage.
#[derive(Clone, Debug, Default)]
pub struct Route {
    elements: Vec<RouteElement>,
}

const MAX_RESAMPLE_ATTEMPTS: usize = 1000;

impl Route {
    pub fn new() -> Self {
        Route { elements: Vec::new() }
    }

    pub fn elements(&self) -> &[RouteElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Insert `stop` into the route, placing it `previous_mileage +
    /// sample_increment()` meters from the origin. If that mileage
    /// collides with an existing element, `sample_increment` is called
    /// again for a fresh increment until a unique mileage is found.
    pub fn insert_stop(
        &mut self,
        mut stop: Stop,
        previous_mileage: f64,
        mut sample_increment: impl FnMut() -> f64,
    ) -> RouteResult<f64> {
        let mileage = self.resolve_mileage(previous_mileage, &mut sample_increment)?;
        stop.mileage = mileage;
        self.insert_sorted(RouteElement::Stop(stop));
        Ok(mileage)
    }

    /// As [`insert_stop`](Self::insert_stop), for signals.
    pub fn insert_signal(
        &mut self,
        mut signal: Signal,
        previous_mileage: f64,
        mut sample_increment: impl FnMut() -> f64,
    ) -> RouteResult<f64> {
        let mileage = self.resolve_mileage(previous_mileage, &mut sample_increment)?;
        signal.mileage = mileage;
        self.insert_sorted(RouteElement::Signal(signal));
        Ok(mileage)
    }

    fn resolve_mileage(
        &self,
        previous_mileage: f64,
        sample_increment: &mut impl FnMut() -> f64,
    ) -> RouteResult<f64> {
        for _ in 0..MAX_RESAMPLE_ATTEMPTS {
            let candidate = previous_mileage + sample_increment();
            if !self
                .elements
                .iter()
                .any(|e| (e.mileage() - candidate).abs() < f64::EPSILON)
            {
                return Ok(candidate);
            }
        }
        Err(RouteError::MileageCollision)
    }

    fn insert_sorted(&mut self, element: RouteElement) {
        let pos = self
            .elements
            .partition_point(|e| e.mileage() < element.mileage());
        self.elements.insert(pos, element);
    }

    fn index_of(&self, target: ElementRef) -> Option<usize> {
        self.elements.iter().position(|e| e.matches(target))
    }

    pub fn find_stop(&self, id: StopId) -> RouteResult<&Stop> {
        self.elements
            .iter()
            .find_map(|e| match e {
                RouteElement::Stop(s) if s.id == id => Some(s),
                _ => None,
            })
            .ok_or(RouteError::StopNotFound(id))
    }

    pub fn find_stop_mut(&mut self, id: StopId) -> RouteResult<&mut Stop> {
        self.elements
            .iter_mut()
            .find_map(|e| match e {
                RouteElement::Stop(s) if s.id == id => Some(s),
                _ => None,
            })
            .ok_or(RouteError::StopNotFound(id))
    }

    pub fn find_signal(&self, id: SignalId) -> RouteResult<&Signal> {
        self.elements
            .iter()
            .find_map(|e| match e {
                RouteElement::Signal(s) if s.id == id => Some(s),
                _ => None,
            })
            .ok_or(RouteError::SignalNotFound(id))
    }

    /// The immediate successor element of `target`, or `None` if `target`
    /// is the last element on the route.
    pub fn next_element(&self, target: ElementRef) -> RouteResult<Option<&RouteElement>> {
        let idx = self.index_of(target).ok_or_else(|| match target {
            ElementRef::Stop(id) => RouteError::StopNotFound(id),
            ElementRef::Signal(id) => RouteError::SignalNotFound(id),
        })?;
        Ok(self.elements.get(idx + 1))
    }

    /// The next stop strictly after `stop_id` by mileage, skipping any
    /// intervening signals, or `None` if `stop_id` is the last stop.
    pub fn next_stop(&self, stop_id: StopId) -> RouteResult<Option<&Stop>> {
        let idx = self
            .index_of(ElementRef::Stop(stop_id))
            .ok_or(RouteError::StopNotFound(stop_id))?;
        Ok(self.elements[idx + 1..].iter().find_map(|e| match e {
            RouteElement::Stop(s) => Some(s),
            RouteElement::Signal(_) => None,
        }))
    }

    /// Whether `stop_id` names the last element of the route.
    pub fn is_last_element(&self, target: ElementRef) -> RouteResult<bool> {
        let idx = self.index_of(target).ok_or_else(|| match target {
            ElementRef::Stop(id) => RouteError::StopNotFound(id),
            ElementRef::Signal(id) => RouteError::SignalNotFound(id),
        })?;
        Ok(idx + 1 == self.elements.len())
    }
}
