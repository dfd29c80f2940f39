//! Diagram element model.
//!
//! An [`Element`] is pure data: a kind, a position in its parent frame, a
//! size, a label, its own drawable geometry and (for groups) the children
//! it owns. Behavior lives in the canvas, widget and selection modules.

mod actor;
mod arrow;
mod diamond;
mod group;
mod oval;
mod rectangle;

pub use group::bounding_box;

use crate::label::LabelPlacement;
use kurbo::{Affine, BezPath, Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// The kind of a diagram element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Stick figure.
    Actor,
    /// Use-case ellipse.
    Oval,
    /// Class box.
    Rectangle,
    /// Decision diamond.
    Diamond,
    /// Association arrow.
    Arrow,
    /// Aggregation arrow (hollow diamond head).
    AggregationArrow,
    /// Composite of other elements.
    Group,
}

impl ElementKind {
    /// All kinds the shape factory can produce on its own.
    pub const PRIMITIVES: [ElementKind; 6] = [
        ElementKind::Actor,
        ElementKind::Oval,
        ElementKind::Rectangle,
        ElementKind::Diamond,
        ElementKind::Arrow,
        ElementKind::AggregationArrow,
    ];

    /// Size the geometry is drawn at before any resize.
    pub fn design_size(self) -> Size {
        match self {
            ElementKind::Actor => actor::DESIGN_SIZE,
            ElementKind::Oval => oval::DESIGN_SIZE,
            ElementKind::Rectangle => rectangle::DESIGN_SIZE,
            ElementKind::Diamond => diamond::DESIGN_SIZE,
            ElementKind::Arrow | ElementKind::AggregationArrow => arrow::DESIGN_SIZE,
            ElementKind::Group => Size::ZERO,
        }
    }

    /// Label a freshly created element carries.
    pub fn default_label(self) -> &'static str {
        match self {
            ElementKind::Actor => "Actor",
            ElementKind::Oval => "Use Case",
            ElementKind::Rectangle => "Class",
            ElementKind::Diamond => "Decision",
            ElementKind::Arrow => "Association",
            ElementKind::AggregationArrow => "Aggregation",
            ElementKind::Group => "Group",
        }
    }

    /// Where the label sits relative to the element box.
    pub fn label_placement(self) -> LabelPlacement {
        match self {
            ElementKind::Actor => LabelPlacement::Below,
            ElementKind::Arrow | ElementKind::AggregationArrow => LabelPlacement::Above,
            ElementKind::Group => LabelPlacement::Top,
            ElementKind::Oval | ElementKind::Rectangle | ElementKind::Diamond => {
                LabelPlacement::Center
            }
        }
    }

    /// Geometry in the design box, with the top-left at the origin.
    fn outline(self) -> BezPath {
        match self {
            ElementKind::Actor => actor::outline(),
            ElementKind::Oval => oval::outline(),
            ElementKind::Rectangle => rectangle::outline(),
            ElementKind::Diamond => diamond::outline(),
            ElementKind::Arrow => arrow::association_outline(),
            ElementKind::AggregationArrow => arrow::aggregation_outline(),
            ElementKind::Group => BezPath::new(),
        }
    }

    /// Tool tag used by the toolbar for this kind.
    pub fn tool_tag(self) -> &'static str {
        match self {
            ElementKind::Actor => "Human",
            ElementKind::Oval => "Oval",
            ElementKind::Rectangle => "Rectangle",
            ElementKind::Diamond => "Diamond",
            ElementKind::Arrow => "Arrow",
            ElementKind::AggregationArrow => "DiamondArrow",
            ElementKind::Group => "Group",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool_tag())
    }
}

/// Error returned when a tool tag names no element kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown element kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for ElementKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Human" | "Actor" => Ok(ElementKind::Actor),
            "Oval" => Ok(ElementKind::Oval),
            "Rectangle" => Ok(ElementKind::Rectangle),
            "Diamond" => Ok(ElementKind::Diamond),
            "Arrow" => Ok(ElementKind::Arrow),
            "DiamondArrow" | "AggregationArrow" => Ok(ElementKind::AggregationArrow),
            "Group" => Ok(ElementKind::Group),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// A placed shape or group.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) id: ElementId,
    /// Element kind.
    pub kind: ElementKind,
    /// Top-left offset in the parent frame (canvas root or enclosing group).
    pub position: Point,
    /// Width and height.
    pub size: Size,
    /// Label text.
    pub label: String,
    /// Geometry in the design box (never shared between elements).
    visual: BezPath,
    /// Children in the group's local frame. Empty for primitives.
    pub(crate) children: Vec<Element>,
}

impl Element {
    /// Create a primitive at `position` with its design size and default label.
    pub fn new(kind: ElementKind, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            size: kind.design_size(),
            label: kind.default_label().to_string(),
            visual: kind.outline(),
            children: Vec::new(),
        }
    }

    /// Create a group whose children are already expressed in its local frame.
    pub(crate) fn new_group(frame: Rect, children: Vec<Element>) -> Self {
        let label = group::group_label(children.len());
        Self {
            id: Uuid::new_v4(),
            kind: ElementKind::Group,
            position: frame.origin(),
            size: frame.size(),
            label,
            visual: BezPath::new(),
            children,
        }
    }

    /// Get the unique identifier.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Check if this element is a group.
    pub fn is_group(&self) -> bool {
        self.kind == ElementKind::Group
    }

    /// Children of a group, in their local frame.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Bounding box in the parent frame.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Check if a point (in the parent frame) hits this element's box.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    /// Drawable path in the parent frame, scaled to the current size.
    pub fn to_path(&self) -> BezPath {
        if self.is_group() {
            let mut path = BezPath::new();
            let offset = Affine::translate(self.position.to_vec2());
            for child in &self.children {
                path.extend(offset * child.to_path());
            }
            return path;
        }
        let design = self.kind.design_size();
        let sx = if design.width > 0.0 {
            self.size.width / design.width
        } else {
            1.0
        };
        let sy = if design.height > 0.0 {
            self.size.height / design.height
        } else {
            1.0
        };
        Affine::translate(self.position.to_vec2())
            * Affine::scale_non_uniform(sx, sy)
            * self.visual.clone()
    }

    /// Find an element by ID within this element's subtree (excluding itself).
    pub fn find(&self, id: ElementId) -> Option<&Element> {
        for child in &self.children {
            if child.id == id {
                return Some(child);
            }
            if let Some(found) = child.find(id) {
                return Some(found);
            }
        }
        None
    }

    /// Mutable variant of [`Element::find`].
    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        for child in &mut self.children {
            if child.id == id {
                return Some(child);
            }
            if let Some(found) = child.find_mut(id) {
                return Some(found);
            }
        }
        None
    }

    /// IDs of this element and everything it owns.
    pub fn subtree_ids(&self) -> Vec<ElementId> {
        let mut ids = vec![self.id];
        for child in &self.children {
            ids.extend(child.subtree_ids());
        }
        ids
    }
}
