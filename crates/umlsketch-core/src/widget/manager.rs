//! Widget manager for tracking the selection slots and their visuals.

use super::handles::OverlaySet;
use super::state::{Decoration, WidgetState};
use crate::observer::DiagramChange;
use crate::shapes::ElementId;
use std::collections::HashSet;

/// Owns the active element, its overlays, the group candidate set and the
/// label-editing focus.
///
/// Elements remain pure data; every visual cue is derived from the slots
/// here. Mutating methods return the changes they caused so the caller can
/// forward them to an observer.
#[derive(Debug, Clone, Default)]
pub struct WidgetManager {
    /// The single active element.
    active: Option<ElementId>,
    /// Overlays attached to the active element.
    overlays: Option<OverlaySet>,
    /// Elements marked for the next group command.
    candidates: HashSet<ElementId>,
    /// Element whose label is being edited.
    editing: Option<ElementId>,
}

impl WidgetManager {
    /// Create a new widget manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the state of an element.
    pub fn state(&self, id: ElementId) -> WidgetState {
        if self.editing == Some(id) {
            WidgetState::Editing
        } else if self.active == Some(id) {
            WidgetState::Selected
        } else {
            WidgetState::Normal
        }
    }

    /// Visual cues currently applied to an element.
    pub fn decoration(&self, id: ElementId) -> Decoration {
        Decoration {
            selection_glow: self.active == Some(id),
            group_highlight: self.candidates.contains(&id),
        }
    }

    /// The active element.
    pub fn active(&self) -> Option<ElementId> {
        self.active
    }

    /// Attached overlays, if any.
    pub fn overlays(&self) -> Option<&OverlaySet> {
        self.overlays.as_ref()
    }

    /// Current group candidates.
    pub fn candidates(&self) -> &HashSet<ElementId> {
        &self.candidates
    }

    /// Check if an element is a group candidate.
    pub fn is_candidate(&self, id: ElementId) -> bool {
        self.candidates.contains(&id)
    }

    /// Element whose label is being edited.
    pub fn editing(&self) -> Option<ElementId> {
        self.editing
    }

    /// Make `id` the active element, or clear the slot with `None`.
    ///
    /// The previous element loses its glow and overlays before the new one
    /// gains them. Re-selecting the active element changes nothing.
    pub fn select(&mut self, id: Option<ElementId>) -> Vec<DiagramChange> {
        if id == self.active {
            return Vec::new();
        }

        let mut changes = Vec::new();
        if let Some(previous) = self.active.take() {
            changes.extend(self.detach_overlays());
            if self.editing == Some(previous) {
                self.editing = None;
            }
            changes.push(self.decoration_change(previous));
        }

        if let Some(next) = id {
            self.active = Some(next);
            changes.push(self.decoration_change(next));
            self.overlays = Some(OverlaySet::new(next));
            changes.push(DiagramChange::OverlaysChanged(Some(next)));
        }
        changes
    }

    /// Drop the overlays. Detaching when nothing is attached is a no-op.
    pub fn detach_overlays(&mut self) -> Option<DiagramChange> {
        self.overlays
            .take()
            .map(|_| DiagramChange::OverlaysChanged(None))
    }

    /// Flip group candidacy. Returns whether `id` is now a candidate.
    pub fn toggle_candidate(&mut self, id: ElementId) -> (bool, DiagramChange) {
        let member = if self.candidates.remove(&id) {
            false
        } else {
            self.candidates.insert(id);
            true
        };
        (member, self.decoration_change(id))
    }

    /// Empty the candidate set, clearing every highlight.
    pub fn clear_candidates(&mut self) -> Vec<DiagramChange> {
        let cleared: Vec<_> = self.candidates.drain().collect();
        cleared
            .into_iter()
            .map(|id| self.decoration_change(id))
            .collect()
    }

    /// Enter label editing for `id`.
    pub fn enter_editing(&mut self, id: ElementId) {
        self.editing = Some(id);
    }

    /// Leave label editing.
    pub fn exit_editing(&mut self) -> Option<ElementId> {
        self.editing.take()
    }

    /// Forget every slot that refers to one of `ids` (destroyed elements).
    pub fn remove(&mut self, ids: &[ElementId]) -> Vec<DiagramChange> {
        let mut changes = Vec::new();
        if self.active.is_some_and(|active| ids.contains(&active)) {
            self.active = None;
            changes.extend(self.detach_overlays());
        }
        if self.editing.is_some_and(|editing| ids.contains(&editing)) {
            self.editing = None;
        }
        for id in ids {
            self.candidates.remove(id);
        }
        changes
    }

    fn decoration_change(&self, id: ElementId) -> DiagramChange {
        DiagramChange::DecorationChanged {
            id,
            decoration: self.decoration(id),
        }
    }
}
