//! Repaint notifications for the host.

use crate::canvas::Frame;
use crate::shapes::ElementId;
use crate::widget::Decoration;
use kurbo::{Point, Size};

/// A single observable change to the diagram or its selection visuals.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagramChange {
    /// An element was registered in the canvas root frame.
    Added(ElementId),
    /// An element (and anything it owned) was destroyed.
    Removed(ElementId),
    /// An element's position changed.
    Moved { id: ElementId, position: Point },
    /// An element's size (and possibly position) changed.
    Resized {
        id: ElementId,
        position: Point,
        size: Size,
    },
    /// An element's label text changed.
    Relabeled { id: ElementId, label: String },
    /// An element moved to another frame with its position rewritten.
    Reparented {
        id: ElementId,
        frame: Frame,
        position: Point,
    },
    /// Selection glow or group highlight changed.
    DecorationChanged {
        id: ElementId,
        decoration: Decoration,
    },
    /// Overlays were attached to `Some(id)` or detached (`None`).
    OverlaysChanged(Option<ElementId>),
}

/// Receives every [`DiagramChange`] as it happens.
pub trait DiagramObserver {
    fn on_change(&mut self, change: &DiagramChange);
}

impl<F> DiagramObserver for F
where
    F: FnMut(&DiagramChange),
{
    fn on_change(&mut self, change: &DiagramChange) {
        self(change)
    }
}
