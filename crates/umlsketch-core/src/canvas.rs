//! Diagram document: the canvas root frame and the element tree under it.

use crate::error::{DiagramError, DiagramResult};
use crate::selection::{Corner, apply_corner_resize, apply_translation};
use crate::shapes::{Element, ElementId};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// The coordinate frame an element's position is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frame {
    /// The canvas itself.
    Root,
    /// The local frame of the given group.
    Group(ElementId),
}

/// What [`Diagram::remove`] took out of the tree.
#[derive(Debug, Clone)]
pub struct Removal {
    /// The removed element, with everything it owns.
    pub element: Element,
    /// Enclosing groups destroyed because they lost their last child,
    /// innermost first.
    pub emptied: Vec<ElementId>,
    /// Enclosing groups whose member-count caption was rewritten.
    pub relabeled: Vec<ElementId>,
}

impl Removal {
    /// IDs of every element that no longer exists.
    pub fn destroyed_ids(&self) -> Vec<ElementId> {
        let mut ids = self.element.subtree_ids();
        ids.extend(&self.emptied);
        ids
    }
}

/// All elements of one open diagram.
///
/// The root list is ordered back to front and doubles as the element
/// registry: every element is either in it or owned by exactly one group
/// reachable from it.
#[derive(Debug, Clone, Default)]
pub struct Diagram {
    elements: Vec<Element>,
}

impl Diagram {
    /// Create a new empty diagram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element on top of the root frame.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id();
        self.elements.push(element);
        id
    }

    /// Root-frame elements, back to front.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of root-frame elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the root frame is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Check if an element exists anywhere in the diagram.
    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Check if an element sits directly in the root frame.
    pub fn is_at_root(&self, id: ElementId) -> bool {
        self.root_index(id).is_some()
    }

    fn root_index(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Look up an element in any frame.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find_map(|e| {
            if e.id() == id {
                Some(e)
            } else {
                e.find(id)
            }
        })
    }

    /// Mutable variant of [`Diagram::element`].
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find_map(|e| {
            if e.id() == id {
                Some(e)
            } else {
                e.find_mut(id)
            }
        })
    }

    /// The frame an element currently lives in.
    pub fn frame_of(&self, id: ElementId) -> Option<Frame> {
        self.locate(id).map(|(_, frame)| frame)
    }

    /// An element's box in canvas coordinates, accumulating the origins of
    /// every enclosing group.
    pub fn canvas_bounds(&self, id: ElementId) -> Option<Rect> {
        self.locate(id).map(|(bounds, _)| bounds)
    }

    fn locate(&self, id: ElementId) -> Option<(Rect, Frame)> {
        fn walk(
            elements: &[Element],
            id: ElementId,
            origin: Vec2,
            frame: Frame,
        ) -> Option<(Rect, Frame)> {
            for element in elements {
                if element.id() == id {
                    return Some((element.bounds() + origin, frame));
                }
                if element.is_group() {
                    let inner = origin + element.frame_origin().to_vec2();
                    if let Some(found) =
                        walk(element.children(), id, inner, Frame::Group(element.id()))
                    {
                        return Some(found);
                    }
                }
            }
            None
        }
        walk(&self.elements, id, Vec2::ZERO, Frame::Root)
    }

    /// Top-most root-frame element whose box contains `point`.
    pub fn element_at(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.hit_test(point, tolerance))
            .map(Element::id)
    }

    /// Remove an element (and everything it owns) from whichever frame
    /// holds it.
    ///
    /// A group left without children is removed as well, so a group never
    /// outlives its last member. A surviving group gets its member-count
    /// caption refreshed.
    pub fn remove(&mut self, id: ElementId) -> DiagramResult<Removal> {
        fn take(
            elements: &mut Vec<Element>,
            id: ElementId,
            emptied: &mut Vec<ElementId>,
            relabeled: &mut Vec<ElementId>,
        ) -> Option<Element> {
            if let Some(index) = elements.iter().position(|e| e.id() == id) {
                return Some(elements.remove(index));
            }
            for index in 0..elements.len() {
                let parent = &mut elements[index];
                let before = parent.children.len();
                let Some(found) = take(&mut parent.children, id, emptied, relabeled) else {
                    continue;
                };
                if parent.children.is_empty() {
                    emptied.push(parent.id());
                    elements.remove(index);
                } else if parent.children.len() != before && parent.refresh_group_label(before) {
                    relabeled.push(parent.id());
                }
                return Some(found);
            }
            None
        }

        let mut emptied = Vec::new();
        let mut relabeled = Vec::new();
        let element = take(&mut self.elements, id, &mut emptied, &mut relabeled)
            .ok_or(DiagramError::ElementNotFound(id))?;
        Ok(Removal {
            element,
            emptied,
            relabeled,
        })
    }

    /// Move an element by `delta` in its own frame. Returns the new position.
    pub fn translate(&mut self, id: ElementId, delta: Vec2) -> DiagramResult<Point> {
        let element = self
            .element_mut(id)
            .ok_or(DiagramError::ElementNotFound(id))?;
        apply_translation(element, delta);
        Ok(element.position)
    }

    /// Apply one corner-resize step. Returns the new position and size.
    pub fn resize(
        &mut self,
        id: ElementId,
        corner: Corner,
        delta: Vec2,
        min_size: Size,
    ) -> DiagramResult<(Point, Size)> {
        let element = self
            .element_mut(id)
            .ok_or(DiagramError::ElementNotFound(id))?;
        apply_corner_resize(element, corner, delta, min_size);
        Ok((element.position, element.size))
    }

    /// Replace an element's label.
    pub fn set_label(&mut self, id: ElementId, text: impl Into<String>) -> DiagramResult<()> {
        let element = self
            .element_mut(id)
            .ok_or(DiagramError::ElementNotFound(id))?;
        element.label = text.into();
        Ok(())
    }

    /// Group root-frame elements.
    ///
    /// Members keep their root z-order inside the group, their positions
    /// are rewritten into the group's frame, and the group is appended on
    /// top of the root frame. Nothing changes if any id is invalid.
    pub fn group(&mut self, ids: &[ElementId]) -> DiagramResult<ElementId> {
        let mut wanted: Vec<ElementId> = Vec::with_capacity(ids.len());
        for &id in ids {
            if !wanted.contains(&id) {
                wanted.push(id);
            }
        }
        if wanted.len() < 2 {
            return Err(DiagramError::NotEnoughCandidates {
                count: wanted.len(),
            });
        }
        for &id in &wanted {
            if !self.is_at_root(id) {
                return Err(if self.contains(id) {
                    DiagramError::NotAtCanvasRoot(id)
                } else {
                    DiagramError::ElementNotFound(id)
                });
            }
        }

        let (members, rest): (Vec<Element>, Vec<Element>) = std::mem::take(&mut self.elements)
            .into_iter()
            .partition(|e| wanted.contains(&e.id()));
        self.elements = rest;

        let count = members.len();
        let group = Element::group(members).ok_or(DiagramError::NotEnoughCandidates { count })?;
        Ok(self.add(group))
    }

    /// Dissolve a root-frame group one level.
    ///
    /// Children return to the root frame at `group origin + local position`,
    /// in the slot the group occupied. The group itself is destroyed; an
    /// empty group is simply removed.
    pub fn ungroup(&mut self, id: ElementId) -> DiagramResult<Vec<ElementId>> {
        let index = match self.root_index(id) {
            Some(index) => index,
            None if self.contains(id) => return Err(DiagramError::NotAtCanvasRoot(id)),
            None => return Err(DiagramError::ElementNotFound(id)),
        };
        if !self.elements[index].is_group() {
            return Err(DiagramError::NotAGroup(id));
        }

        let children = self.elements.remove(index).ungroup();
        let ids = children.iter().map(Element::id).collect();
        self.elements.splice(index..index, children);
        Ok(ids)
    }
}
