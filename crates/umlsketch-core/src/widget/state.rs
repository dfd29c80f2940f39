//! Widget state definitions.

use crate::config::EditorConfig;
use peniko::Color;

/// The UI state of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// No interaction.
    #[default]
    Normal,
    /// Active element: overlays attached, can be moved/resized/deleted.
    Selected,
    /// Active element whose label is being edited.
    Editing,
}

impl WidgetState {
    /// Check if widget is selected (either just selected or editing).
    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected | Self::Editing)
    }

    /// Check if widget is in editing mode.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing)
    }
}

/// Visual cues applied to an element. The two cues are independent: an
/// element can be active and a group candidate at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decoration {
    /// Selection glow around the active element.
    pub selection_glow: bool,
    /// Outline marking a group candidate.
    pub group_highlight: bool,
}

impl Decoration {
    /// No cue at all.
    pub fn is_plain(&self) -> bool {
        !self.selection_glow && !self.group_highlight
    }

    /// Glow color and blur radius, if the selection cue is on.
    pub fn glow(&self, config: &EditorConfig) -> Option<(Color, f64)> {
        self.selection_glow
            .then(|| (config.selection(), config.selection_glow_radius))
    }

    /// Outline color and stroke width, if the candidate cue is on.
    pub fn outline(&self, config: &EditorConfig) -> Option<(Color, f64)> {
        self.group_highlight
            .then(|| (config.group_highlight(), config.group_highlight_width))
    }
}
