//! Min-heap of pending events, ordered by firing time.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::event::Event;

/// `BinaryHeap` is a max-heap; wrapping every entry in `Reverse` turns it
/// into the min-heap the dispatch loop needs.
#[derive(Default)]
pub struct EventQueue(BinaryHeap<Reverse<Event>>);

impl EventQueue {
    pub fn new() -> Self {
        EventQueue(BinaryHeap::new())
    }

    pub fn push(&mut self, event: Event) {
        self.0.push(Reverse(event));
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.0.pop().map(|Reverse(e)| e)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
