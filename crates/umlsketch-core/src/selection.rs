//! Drag-move and corner-resize arithmetic.
//!
//! All deltas are incremental: each pointer step is measured against the
//! previous step, never against the start of the gesture.

use crate::shapes::{Element, ElementId};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Whether dragging this corner moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// Whether dragging this corner moves the top edge.
    pub fn moves_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// Corner point of a box at `position` with `size`.
    pub fn point_of(self, position: Point, size: Size) -> Point {
        let x = if self.moves_left() {
            position.x
        } else {
            position.x + size.width
        };
        let y = if self.moves_top() {
            position.y
        } else {
            position.y + size.height
        };
        Point::new(x, y)
    }
}

/// Resize a box by dragging `corner` by `delta`.
///
/// | corner       | width     | height    | position         |
/// |--------------|-----------|-----------|------------------|
/// | top-left     | `w - dx`  | `h - dy`  | `x += dx, y += dy` |
/// | top-right    | `w + dx`  | `h - dy`  | `y += dy`        |
/// | bottom-left  | `w - dx`  | `h + dy`  | `x += dx`        |
/// | bottom-right | `w + dx`  | `h + dy`  | none             |
///
/// Width and height are clamped to `min_size`. The left/top position shift
/// is applied even when the size hit the floor, so the dragged corner stays
/// under the pointer and the opposite edge may drift.
pub fn resize_geometry(
    position: Point,
    size: Size,
    corner: Corner,
    delta: Vec2,
    min_size: Size,
) -> (Point, Size) {
    let width = if corner.moves_left() {
        size.width - delta.x
    } else {
        size.width + delta.x
    };
    let height = if corner.moves_top() {
        size.height - delta.y
    } else {
        size.height + delta.y
    };
    let mut position = position;
    if corner.moves_left() {
        position.x += delta.x;
    }
    if corner.moves_top() {
        position.y += delta.y;
    }
    (
        position,
        Size::new(width.max(min_size.width), height.max(min_size.height)),
    )
}

/// Apply one corner-resize step to an element.
pub fn apply_corner_resize(element: &mut Element, corner: Corner, delta: Vec2, min_size: Size) {
    let (position, size) = resize_geometry(element.position, element.size, corner, delta, min_size);
    element.position = position;
    element.size = size;
}

/// Move an element by `delta` within its parent frame.
pub fn apply_translation(element: &mut Element, delta: Vec2) {
    element.position += delta;
}

/// An in-progress drag of an element body.
#[derive(Debug, Clone)]
pub struct DragState {
    /// The element being dragged.
    pub element: ElementId,
    /// Pointer position when the drag began.
    pub start_pointer: Point,
    /// Element position when the drag began.
    pub start_position: Point,
    /// Pointer position of the previous step.
    pub last_pointer: Point,
}

impl DragState {
    pub fn new(element: ElementId, pointer: Point, start_position: Point) -> Self {
        Self {
            element,
            start_pointer: pointer,
            start_position,
            last_pointer: pointer,
        }
    }

    /// Delta since the previous step; `pointer` becomes the new baseline.
    pub fn step(&mut self, pointer: Point) -> Vec2 {
        let delta = pointer - self.last_pointer;
        self.last_pointer = pointer;
        delta
    }

    /// Pointer travel since the drag began.
    pub fn total_delta(&self) -> Vec2 {
        self.last_pointer - self.start_pointer
    }
}

/// An in-progress drag of one corner handle.
#[derive(Debug, Clone)]
pub struct ResizeState {
    /// The element being resized.
    pub element: ElementId,
    /// The corner being dragged.
    pub corner: Corner,
    /// Pointer position of the previous step.
    pub last_pointer: Point,
}

impl ResizeState {
    pub fn new(element: ElementId, corner: Corner, pointer: Point) -> Self {
        Self {
            element,
            corner,
            last_pointer: pointer,
        }
    }

    /// Delta since the previous step; `pointer` becomes the new baseline.
    pub fn step(&mut self, pointer: Point) -> Vec2 {
        let delta = pointer - self.last_pointer;
        self.last_pointer = pointer;
        delta
    }
}

/// What the pointer is currently manipulating.
#[derive(Debug, Clone)]
pub enum Manipulation {
    Drag(DragState),
    Resize(ResizeState),
}

impl Manipulation {
    /// The element under manipulation.
    pub fn element(&self) -> ElementId {
        match self {
            Manipulation::Drag(drag) => drag.element,
            Manipulation::Resize(resize) => resize.element,
        }
    }
}
