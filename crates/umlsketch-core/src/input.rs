//! Pointer and keyboard events delivered by the host.
//!
//! Positions are already resolved into the canvas root frame.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// The host released pointer capture (window lost focus, etc).
    CaptureLost,
}

/// Keyboard event type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Key name that deletes the active element.
pub const DELETE_KEY: &str = "Delete";

/// Detects double-clicks from a stream of button presses.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    max_interval: Duration,
    max_distance: f64,
    last_click: Option<(Instant, Point)>,
}

impl ClickTracker {
    /// Create a tracker with the given time and distance thresholds.
    pub fn new(max_interval_ms: u64, max_distance: f64) -> Self {
        Self {
            max_interval: Duration::from_millis(max_interval_ms),
            max_distance,
            last_click: None,
        }
    }

    /// Register a press at `position` and return whether it completes a
    /// double-click. A completed double-click resets the tracker so a third
    /// press starts over.
    pub fn register(&mut self, position: Point, at: Instant) -> bool {
        if let Some((last_time, last_pos)) = self.last_click {
            let elapsed = at.saturating_duration_since(last_time);
            if elapsed < self.max_interval && last_pos.distance(position) < self.max_distance {
                self.last_click = None;
                return true;
            }
        }
        self.last_click = Some((at, position));
        false
    }

    /// Forget the previous press.
    pub fn reset(&mut self) {
        self.last_click = None;
    }
}
