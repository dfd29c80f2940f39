//! UmlSketch Core Library
//!
//! Platform-agnostic selection, transform and grouping engine for the
//! UmlSketch diagram editor. The host owns the window, toolbar and painting.

pub mod canvas;
pub mod config;
pub mod error;
pub mod input;
pub mod label;
pub mod observer;
pub mod selection;
pub mod session;
pub mod shapes;
pub mod widget;

pub use canvas::{Diagram, Frame, Removal};
pub use config::EditorConfig;
pub use error::{ConfigError, DiagramError, DiagramResult};
pub use input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use label::{LabelEditRequest, LabelEditResult, TextKey};
pub use observer::{DiagramChange, DiagramObserver};
pub use selection::{Corner, DragState, ResizeState};
pub use session::EditorSession;
pub use shapes::{Element, ElementId, ElementKind};
pub use widget::{
    Decoration, Handle, HandleKind, HandleShape, OverlaySet, WidgetManager, WidgetState,
};
