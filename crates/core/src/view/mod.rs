//! View framework core.
//!
//! Views are boxed trait objects that receive events and mutate the document
//! through the shared [`Context`]. Two channels carry events around:
//!
//! - the [`Hub`], an `mpsc` sender owned by the host's event loop; anything
//!   sent through it (including from timer threads) comes back around as a
//!   regular event on the next loop iteration;
//! - the [`Bus`], a per-dispatch queue a child pushes onto so its parent can
//!   intercept what bubbled up.

use downcast_rs::{impl_downcast, Downcast};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;

use crate::context::Context;
use crate::geom::CycleDir;
use crate::gesture::GestureEvent;
use crate::input::DeviceEvent;

pub mod deck;

pub type Hub = Sender<Event>;
pub type Bus = VecDeque<Event>;

pub type Id = usize;

pub struct IdFeeder {
    counter: AtomicUsize,
}

impl IdFeeder {
    pub fn next(&self) -> Id {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }
}

pub static ID_FEEDER: IdFeeder = IdFeeder {
    counter: AtomicUsize::new(0),
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewId {
    PageDeck,
    Pagination,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    Device(DeviceEvent),
    Gesture(GestureEvent),
    /// Relative navigation request.
    Page(CycleDir),
    /// Absolute navigation request; out-of-range indices are clamped.
    GoTo(i32),
    /// The deck finished a synchronous move to the given page.
    PageChanged(usize),
    /// A transition timer elapsed for the given page.
    TransitionEnd(usize),
}

pub trait View: Downcast {
    fn handle_event(
        &mut self,
        evt: &Event,
        hub: &Hub,
        bus: &mut Bus,
        context: &mut Context,
    ) -> bool;

    fn children(&self) -> &Vec<Box<dyn View>>;

    fn children_mut(&mut self) -> &mut Vec<Box<dyn View>>;

    fn id(&self) -> Id;

    fn view_id(&self) -> Option<ViewId> {
        None
    }
}

impl_downcast!(View);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_feeder_is_monotonic() {
        let first = ID_FEEDER.next();
        let second = ID_FEEDER.next();
        assert!(second > first);
    }
}
