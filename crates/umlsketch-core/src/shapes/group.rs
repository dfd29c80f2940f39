//! Group frames: combining elements into a local coordinate space and
//! releasing them back out.

use super::Element;
use kurbo::{Point, Rect};

/// Axis-aligned box enclosing every element's bounds, or `None` if empty.
///
/// Zero-area results (e.g. coincident elements of zero size) are valid.
pub fn bounding_box<'a>(elements: impl IntoIterator<Item = &'a Element>) -> Option<Rect> {
    elements
        .into_iter()
        .map(Element::bounds)
        .reduce(|acc, bounds| acc.union(bounds))
}

/// Default label reporting the member count.
pub(super) fn group_label(count: usize) -> String {
    format!("Group ({count} elements)")
}

impl Element {
    /// Build a group around `members`, whose positions are in the frame the
    /// group itself will live in.
    ///
    /// Each member's position is rewritten to `position - frame.origin()`.
    /// Returns `None` when `members` is empty.
    pub fn group(members: Vec<Element>) -> Option<Element> {
        let frame = bounding_box(&members)?;
        let origin = frame.origin().to_vec2();
        let children = members
            .into_iter()
            .map(|mut member| {
                member.position -= origin;
                member
            })
            .collect();
        Some(Element::new_group(frame, children))
    }

    /// Dissolve a group, returning its children with positions rewritten
    /// into the group's parent frame (`group origin + local position`).
    ///
    /// Primitives dissolve into nothing.
    pub fn ungroup(self) -> Vec<Element> {
        let origin = self.position.to_vec2();
        self.children
            .into_iter()
            .map(|mut child| {
                child.position += origin;
                child
            })
            .collect()
    }

    /// Origin of this group's local frame, expressed in its parent frame.
    pub fn frame_origin(&self) -> Point {
        self.position
    }

    /// Rewrite the member-count caption after the group held `previous`
    /// children. A caption the user has edited is left alone.
    pub(crate) fn refresh_group_label(&mut self, previous: usize) -> bool {
        if !self.is_group() || self.label != group_label(previous) {
            return false;
        }
        self.label = group_label(self.children.len());
        true
    }
}
