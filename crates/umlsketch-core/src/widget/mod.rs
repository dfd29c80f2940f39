//! Selection and overlay management.
//!
//! - Selection state and the visual cues derived from it
//! - Overlay handles (delete control, corner thumbs) for the active element
//! - Group candidate highlighting
//!
//! Elements remain pure data. Widgets wrap them with UI state.

mod handles;
mod manager;
mod state;

pub use handles::{Handle, HandleKind, HandleShape, OverlaySet};
pub use manager::WidgetManager;
pub use state::{Decoration, WidgetState};
