//! Raw input events delivered by the host.

use crate::dom::NodeId;
use crate::geom::Point;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FingerStatus {
    Down,
    Motion,
    Up,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonStatus {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    Raw(u16),
}

/// An input event as the host delivers it, before gesture recognition.
///
/// `Wheel` deltas follow the mouse-wheel convention: positive values scroll
/// toward the top of the page. `Tap` carries the node the host resolved as
/// the target of a click.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    Wheel {
        delta: i32,
    },
    Finger {
        id: u64,
        status: FingerStatus,
        position: Point,
    },
    Key {
        code: KeyCode,
        status: ButtonStatus,
    },
    Tap {
        target: NodeId,
    },
}
