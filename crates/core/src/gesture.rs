//! Gesture recognition over raw device events.

use crate::dom::NodeId;
use crate::geom::{Dir, Point};
use crate::input::{DeviceEvent, FingerStatus};

/// Drag distance, in host units, that turns a touch session into a swipe.
pub const DRAG_THRESHOLD: i32 = 50;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GestureEvent {
    Tap(NodeId),
    Swipe { dir: Dir, start: Point, end: Point },
}

/// Folds a stream of device events into gestures.
///
/// A touch session starts on finger-down and yields at most one swipe: once
/// the drag crosses [`DRAG_THRESHOLD`] on either axis the session is
/// consumed, so further motion is ignored until the next finger-down. A
/// mostly-horizontal drag consumes the session without producing a gesture.
/// Taps pass through untouched.
#[derive(Debug, Default)]
pub struct GestureDetector {
    origin: Option<Point>,
    armed: bool,
}

impl GestureDetector {
    pub fn new() -> GestureDetector {
        GestureDetector::default()
    }

    pub fn feed(&mut self, evt: &DeviceEvent) -> Option<GestureEvent> {
        match *evt {
            DeviceEvent::Tap { target } => Some(GestureEvent::Tap(target)),
            DeviceEvent::Finger {
                status: FingerStatus::Down,
                position,
                ..
            } => {
                self.origin = Some(position);
                self.armed = true;
                None
            }
            DeviceEvent::Finger {
                status: FingerStatus::Motion,
                position,
                ..
            } => {
                let start = self.origin?;
                if !self.armed {
                    return None;
                }

                // Drag vector from the current position back to the origin:
                // a positive `y` means the finger moved toward the top.
                let delta = start - position;

                let gesture = if delta.y >= DRAG_THRESHOLD {
                    Some(GestureEvent::Swipe {
                        dir: Dir::North,
                        start,
                        end: position,
                    })
                } else if delta.y <= -DRAG_THRESHOLD {
                    Some(GestureEvent::Swipe {
                        dir: Dir::South,
                        start,
                        end: position,
                    })
                } else {
                    None
                };

                if delta.x.abs() >= DRAG_THRESHOLD || delta.y.abs() >= DRAG_THRESHOLD {
                    self.armed = false;
                }

                gesture
            }
            DeviceEvent::Finger {
                status: FingerStatus::Up,
                ..
            } => {
                self.origin = None;
                self.armed = false;
                None
            }
            _ => None,
        }
    }
}
