//! Overlay handles attached to the active element.

use crate::config::EditorConfig;
use crate::selection::Corner;
use crate::shapes::ElementId;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// A manipulation handle in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Handle {
    /// The kind of handle (determines behavior).
    pub kind: HandleKind,
    /// Hit and paint area in canvas coordinates.
    pub rect: Rect,
    /// Visual shape of the handle.
    pub shape: HandleShape,
}

/// The kind of handle - determines what manipulation it performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Deletes the adorned element.
    Delete,
    /// Resizes from one corner.
    Resize(Corner),
}

/// Visual shape of a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleShape {
    /// Square thumb (corners).
    #[default]
    Square,
    /// Round button with a cross (delete).
    CrossButton,
}

impl Handle {
    /// Create a square handle of side `side` centered on `center`.
    pub fn centered(kind: HandleKind, center: Point, side: f64) -> Self {
        Self {
            kind,
            rect: Rect::from_center_size(center, Size::new(side, side)),
            shape: HandleShape::default(),
        }
    }

    /// Set the handle shape.
    pub fn with_shape(mut self, shape: HandleShape) -> Self {
        self.shape = shape;
        self
    }

    /// Check if `point` falls on the handle, with `tolerance` slack.
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        self.rect.inflate(tolerance, tolerance).contains(point)
    }
}

/// The delete control and four corner thumbs bound to one element.
///
/// Only the target is stored. Handle geometry is laid out from the live
/// element bounds on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySet {
    target: ElementId,
}

impl OverlaySet {
    pub fn new(target: ElementId) -> Self {
        Self { target }
    }

    /// The adorned element.
    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Handles around `bounds` (the target's box in canvas coordinates).
    /// The delete control comes first and straddles the top-left corner.
    pub fn layout(&self, bounds: Rect, config: &EditorConfig) -> Vec<Handle> {
        let mut handles = Vec::with_capacity(5);
        handles.push(
            Handle::centered(HandleKind::Delete, bounds.origin(), config.delete_handle_size)
                .with_shape(HandleShape::CrossButton),
        );
        for corner in Corner::ALL {
            handles.push(Handle::centered(
                HandleKind::Resize(corner),
                corner.point_of(bounds.origin(), bounds.size()),
                config.resize_handle_size,
            ));
        }
        handles
    }

    /// Handle under `point`, if any. Delete wins where it overlaps a thumb.
    pub fn hit(&self, bounds: Rect, config: &EditorConfig, point: Point) -> Option<HandleKind> {
        self.layout(bounds, config)
            .into_iter()
            .find(|handle| handle.contains(point, config.handle_hit_tolerance))
            .map(|handle| handle.kind)
    }
}
