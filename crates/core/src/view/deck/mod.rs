//! The page deck: a container element's direct children presented as
//! full-viewport pages with animated navigation.
//!
//! The deck owns an ordered list of page records and a current-index cursor.
//! Navigation requests (absolute, relative, or decoded from raw input) clamp
//! or wrap the index, restyle the container so the target page occupies the
//! viewport, and notify listeners.
//!
//! # Visual model
//!
//! ```text
//!   viewport                  page stack (container)
//!   +--------------+          +--------------+  top: 0%
//!   |              |          | page 0       |
//!   |  page 1      |   <--    +--------------+  top: 100%
//!   |              |          | page 1       |      ^ container translated
//!   +--------------+          +--------------+      | by -100% per page
//!                             | page 2       |
//!                             +--------------+  top: 200%
//! ```
//!
//! # Event flow
//!
//! 1. The host feeds raw [`DeviceEvent`]s (wheel, finger, key, tap) to
//!    `handle_event`.
//! 2. Finger events run through the deck's gesture detector; marker taps are
//!    delegated to the [`Pagination`] child, which bubbles an
//!    [`Event::GoTo`] back via the bus (the deck intercepts it).
//! 3. A move emits `Lifecycle::Move` synchronously and sends
//!    [`Event::PageChanged`] through the hub; a one-shot timer thread sends
//!    [`Event::TransitionEnd`] after the configured duration, which the deck
//!    re-emits as `Lifecycle::End` when it comes back around.
//!
//! A superseding move does not cancel an in-flight transition timer: every
//! move produces exactly one `End` with the index it targeted, even when a
//! later move has already taken over.

use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::context::Context;
use crate::dom::NodeId;
use crate::geom::{CycleDir, Dir};
use crate::gesture::{GestureDetector, GestureEvent};
use crate::input::{ButtonStatus, DeviceEvent, KeyCode};
use crate::notifier::{Lifecycle, ListenerId, Notifier};
use crate::settings::Settings;
use crate::style::stylize;
use crate::view::{Bus, Event, Hub, Id, View, ViewId, ID_FEEDER};

pub mod pagination;

pub use pagination::Pagination;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("container has no element children to page through")]
    EmptyContainer,
}

/// One navigable page: its position, its element, and its pagination marker
/// when the marker bar is enabled.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub element: NodeId,
    pub marker: Option<NodeId>,
}

pub struct PageDeck {
    id: Id,
    children: Vec<Box<dyn View>>,
    container: NodeId,
    pages: Vec<Page>,
    current: usize,
    transitioned: Option<Instant>,
    settings: Settings,
    notifier: Notifier,
    detector: GestureDetector,
}

impl PageDeck {
    /// Mounts a deck on `container`.
    ///
    /// The container's direct element children become the pages (text and
    /// comment nodes are skipped); the starting page comes from the
    /// document's URL fragment, falling back to 0 when absent or invalid.
    /// Construction performs the initial move, so the starting page's
    /// lifecycle events fire immediately.
    ///
    /// # Errors
    ///
    /// Fails with [`DeckError::EmptyContainer`] when the container has no
    /// element children.
    pub fn new(
        container: NodeId,
        settings: Settings,
        hub: &Hub,
        context: &mut Context,
    ) -> Result<PageDeck, DeckError> {
        let doc = &mut context.document;

        let elements = doc.element_children(container);
        if elements.is_empty() {
            return Err(DeckError::EmptyContainer);
        }

        for (index, &element) in elements.iter().enumerate() {
            doc.add_class(element, "pagedeck-page");
            doc.set_style(element, "top", &format!("{}%", index * 100));
        }

        let start = doc
            .fragment()
            .and_then(|fragment| fragment.parse::<i32>().ok())
            .unwrap_or(0)
            .clamp(0, elements.len() as i32 - 1) as usize;

        let mut children: Vec<Box<dyn View>> = Vec::new();
        let mut markers: Vec<Option<NodeId>> = vec![None; elements.len()];

        if settings.pagination {
            let pagination = Pagination::new(&elements, start, doc);
            for (slot, &marker) in markers.iter_mut().zip(pagination.markers()) {
                *slot = Some(marker);
            }
            children.push(Box::new(pagination));
        }

        stylize(
            doc,
            container,
            "transition-timing-function",
            settings.timing_function.as_str(),
            &context.profile,
        );
        stylize(
            doc,
            container,
            "transition-duration",
            &format!("{}ms", settings.duration),
            &context.profile,
        );
        doc.add_class(container, "pagedeck-container");

        let pages = elements
            .iter()
            .enumerate()
            .map(|(index, &element)| Page {
                index,
                element,
                marker: markers[index],
            })
            .collect();

        let mut deck = PageDeck {
            id: ID_FEEDER.next(),
            children,
            container,
            pages,
            current: start,
            transitioned: None,
            settings,
            notifier: Notifier::new(),
            detector: GestureDetector::new(),
        };

        deck.move_to(start as i32, hub, context);

        Ok(deck)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Registers a lifecycle listener; see [`Notifier::on`].
    pub fn on<F>(&mut self, event: Lifecycle, listener: F) -> ListenerId
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.notifier.on(event, listener)
    }

    /// Removes a lifecycle listener; see [`Notifier::off`].
    pub fn off(&mut self, event: Lifecycle, listener: Option<ListenerId>) {
        self.notifier.off(event, listener)
    }

    /// Emits a lifecycle notification to registered listeners.
    ///
    /// The deck emits its own notifications as part of
    /// [`move_to`](Self::move_to); this is the escape hatch for embeddings
    /// that relay or synthesize them.
    pub fn emit(&mut self, event: Lifecycle, index: usize) {
        self.notifier.emit(event, index)
    }

    /// Moves to `index`, clamped into the valid page range.
    ///
    /// Always performs a full transition, even when the target equals the
    /// current page. Explicit calls are never debounced; only wheel input is
    /// gated.
    #[cfg_attr(feature = "otel", tracing::instrument(skip(self, hub, context), fields(index = index)))]
    pub fn move_to(&mut self, index: i32, hub: &Hub, context: &mut Context) {
        let index = index.clamp(0, self.pages.len() as i32 - 1) as usize;

        if let Some(pagination) = self
            .children
            .iter_mut()
            .find_map(|child| child.downcast_mut::<Pagination>())
        {
            pagination.set_active(index, &mut context.document);
        }

        stylize(
            &mut context.document,
            self.container,
            "transform",
            &format!("translate3d(0,-{}%,0)", index * 100),
            &context.profile,
        );

        tracing::debug!(from = self.current, to = index, "page transition");

        self.notifier.emit(Lifecycle::Move, index);
        hub.send(Event::PageChanged(index)).ok();

        let hub = hub.clone();
        let duration = Duration::from_millis(self.settings.duration);
        thread::spawn(move || {
            thread::sleep(duration);
            hub.send(Event::TransitionEnd(index)).ok();
        });

        self.current = index;
        self.transitioned = Some(Instant::now());
    }

    /// Moves to the previous page, wrapping to the last one when the loop
    /// mode permits an upward wrap.
    pub fn page_up(&mut self, hub: &Hub, context: &mut Context) {
        if self.current > 0 {
            self.move_to(self.current as i32 - 1, hub, context);
        } else if self.settings.loop_mode.wraps_up() {
            self.move_to(self.pages.len() as i32 - 1, hub, context);
        }
    }

    /// Moves to the next page, wrapping to the first one when the loop mode
    /// permits a downward wrap.
    pub fn page_down(&mut self, hub: &Hub, context: &mut Context) {
        if self.current + 1 < self.pages.len() {
            self.move_to(self.current as i32 + 1, hub, context);
        } else if self.settings.loop_mode.wraps_down() {
            self.move_to(0, hub, context);
        }
    }

    /// Wheel gate: enough time since the last transition, and a delta above
    /// the threshold.
    ///
    /// A deck that has never transitioned passes the time check outright.
    fn accepts_wheel(&self, delta: i32) -> bool {
        let settled = self.transitioned.map_or(true, |at| {
            at.elapsed()
                > Duration::from_millis(self.settings.debounce_interval + self.settings.duration)
        });

        settled && delta.abs() > self.settings.wheel_threshold
    }

    fn handle_gesture(
        &mut self,
        gesture: &GestureEvent,
        hub: &Hub,
        bus: &mut Bus,
        context: &mut Context,
    ) -> bool {
        match *gesture {
            GestureEvent::Swipe {
                dir: Dir::North, ..
            } => {
                self.page_down(hub, context);
                true
            }
            GestureEvent::Swipe {
                dir: Dir::South, ..
            } => {
                self.page_up(hub, context);
                true
            }
            GestureEvent::Tap(target) => {
                let mut child_bus = Bus::new();
                let mut handled = false;

                for child in self.children.iter_mut() {
                    if child.handle_event(
                        &Event::Gesture(GestureEvent::Tap(target)),
                        hub,
                        &mut child_bus,
                        context,
                    ) {
                        handled = true;
                        break;
                    }
                }

                while let Some(evt) = child_bus.pop_front() {
                    if let Event::GoTo(index) = evt {
                        self.move_to(index, hub, context);
                    } else {
                        bus.push_back(evt);
                    }
                }

                handled
            }
            _ => false,
        }
    }
}

impl View for PageDeck {
    #[cfg_attr(feature = "otel", tracing::instrument(skip(self, hub, bus, context), fields(event = ?evt), ret(level = tracing::Level::TRACE)))]
    fn handle_event(
        &mut self,
        evt: &Event,
        hub: &Hub,
        bus: &mut Bus,
        context: &mut Context,
    ) -> bool {
        match *evt {
            Event::Device(DeviceEvent::Wheel { delta }) => {
                if self.accepts_wheel(delta) {
                    if delta > 0 {
                        self.page_up(hub, context);
                    } else {
                        self.page_down(hub, context);
                    }
                } else {
                    tracing::trace!(delta, "wheel input gated");
                }

                // Consumed either way, so the host suppresses native scroll.
                true
            }
            Event::Device(DeviceEvent::Key {
                code,
                status: ButtonStatus::Pressed,
            }) => {
                if !self.settings.keyboard {
                    return false;
                }

                match code {
                    KeyCode::ArrowUp => {
                        self.page_up(hub, context);
                        true
                    }
                    KeyCode::ArrowDown => {
                        self.page_down(hub, context);
                        true
                    }
                    KeyCode::Raw(..) => false,
                }
            }
            Event::Device(ref device) => match self.detector.feed(device) {
                Some(gesture) => self.handle_gesture(&gesture, hub, bus, context),
                None => matches!(device, DeviceEvent::Finger { .. }),
            },
            Event::Gesture(ref gesture) => self.handle_gesture(gesture, hub, bus, context),
            Event::GoTo(index) => {
                self.move_to(index, hub, context);
                true
            }
            Event::Page(CycleDir::Next) => {
                self.page_down(hub, context);
                true
            }
            Event::Page(CycleDir::Previous) => {
                self.page_up(hub, context);
                true
            }
            Event::TransitionEnd(index) => {
                self.notifier.emit(Lifecycle::End, index);
                true
            }
            _ => false,
        }
    }

    fn children(&self) -> &Vec<Box<dyn View>> {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<Box<dyn View>> {
        &mut self.children
    }

    fn id(&self) -> Id {
        self.id
    }

    fn view_id(&self) -> Option<ViewId> {
        Some(ViewId::PageDeck)
    }
}
