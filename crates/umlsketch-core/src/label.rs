//! Inline label editing hand-off.
//!
//! The host owns the actual text field. The core describes where the field
//! goes and what it starts with, tracks the pending text while keys arrive,
//! and writes the committed string back into the element.

use crate::input::Modifiers;
use crate::shapes::{Element, ElementId, ElementKind};
use kurbo::{Point, Rect};

/// Minimum width of the label field.
pub const MIN_LABEL_WIDTH: f64 = 50.0;

/// Distance an outside label sits from the element box.
pub const LABEL_OUTSIDE_OFFSET: f64 = 20.0;

/// Inner padding of a group caption.
const GROUP_CAPTION_PADDING: f64 = 5.0;

/// Where a label is laid out relative to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPlacement {
    /// Centered over the shape.
    Center,
    /// Hanging under the bottom edge (actors).
    Below,
    /// Floating over the top edge (arrows).
    Above,
    /// Caption along the inside of the top edge (groups).
    Top,
}

impl LabelPlacement {
    /// Font size the original label is shown at.
    pub fn font_size(self) -> f64 {
        match self {
            LabelPlacement::Below | LabelPlacement::Above => 10.0,
            LabelPlacement::Center | LabelPlacement::Top => 12.0,
        }
    }
}

/// Label box for `text` laid out against `bounds` (in canvas coordinates).
pub fn label_rect(kind: ElementKind, bounds: Rect, text: &str) -> Rect {
    let placement = kind.label_placement();
    let line_height = placement.font_size() * 1.25;
    let lines = text.lines().count().max(1) as f64;
    let height = lines * line_height;
    let width = bounds.width().max(MIN_LABEL_WIDTH);
    let center_x = bounds.center().x;
    let x0 = center_x - width / 2.0;

    match placement {
        LabelPlacement::Center => {
            let y0 = bounds.center().y - height / 2.0;
            Rect::new(x0, y0, x0 + width, y0 + height)
        }
        LabelPlacement::Below => {
            let y1 = bounds.y1 + LABEL_OUTSIDE_OFFSET;
            Rect::new(x0, y1 - height, x0 + width, y1)
        }
        LabelPlacement::Above => {
            let y0 = bounds.y0 - LABEL_OUTSIDE_OFFSET;
            Rect::new(x0, y0, x0 + width, y0 + height)
        }
        LabelPlacement::Top => {
            let height = height + GROUP_CAPTION_PADDING * 2.0;
            Rect::new(x0, bounds.y0, x0 + width, bounds.y0 + height)
        }
    }
}

/// What the host needs to show an editable field over a label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelEditRequest {
    /// Element whose label is edited.
    pub element: ElementId,
    /// Seed text.
    pub text: String,
    /// Field rectangle in canvas coordinates.
    pub rect: Rect,
    /// Font size matching the non-editable label.
    pub font_size: f64,
}

/// Keys routed to an open label field.
#[derive(Debug, Clone, PartialEq)]
pub enum TextKey {
    Character(String),
    Backspace,
    Enter,
    /// The field lost keyboard focus.
    FocusLost,
}

/// Result of feeding a key to the label field.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelEditResult {
    /// Text may have changed; keep editing.
    Handled,
    /// Editing is over; the pending text should be committed.
    Commit(String),
}

/// Pending edit of one element's label.
#[derive(Debug, Clone)]
pub struct LabelEditState {
    element: ElementId,
    text: String,
}

impl LabelEditState {
    /// Start editing with the element's current label as seed.
    pub fn new(element: &Element) -> Self {
        Self {
            element: element.id(),
            text: element.label.clone(),
        }
    }

    /// Element being edited.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Text typed so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the pending text (e.g. host-side paste or select-all-and-type).
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Apply a key. Enter without Shift and focus loss commit;
    /// Shift+Enter inserts a line break.
    pub fn handle_key(&mut self, key: TextKey, modifiers: Modifiers) -> LabelEditResult {
        match key {
            TextKey::Character(s) => {
                self.text.push_str(&s);
                LabelEditResult::Handled
            }
            TextKey::Backspace => {
                self.text.pop();
                LabelEditResult::Handled
            }
            TextKey::Enter if modifiers.shift => {
                self.text.push('\n');
                LabelEditResult::Handled
            }
            TextKey::Enter | TextKey::FocusLost => LabelEditResult::Commit(self.text.clone()),
        }
    }
}

/// Build the hand-off request for `element` whose box in canvas
/// coordinates is `canvas_bounds`.
pub fn edit_request(element: &Element, canvas_bounds: Rect) -> LabelEditRequest {
    LabelEditRequest {
        element: element.id(),
        text: element.label.clone(),
        rect: label_rect(element.kind, canvas_bounds, &element.label),
        font_size: element.kind.label_placement().font_size(),
    }
}

/// Check whether `point` (canvas coordinates) falls on the element's label.
pub fn hits_label(element: &Element, canvas_bounds: Rect, point: Point) -> bool {
    label_rect(element.kind, canvas_bounds, &element.label).contains(point)
}
