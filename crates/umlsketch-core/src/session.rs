//! Editor session: the command surface the host drives.

use crate::canvas::{Diagram, Frame};
use crate::config::EditorConfig;
use crate::error::{DiagramError, DiagramResult};
use crate::input::{ClickTracker, DELETE_KEY, KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::label::{self, LabelEditRequest, LabelEditResult, LabelEditState, TextKey};
use crate::observer::{DiagramChange, DiagramObserver};
use crate::selection::{Corner, DragState, Manipulation, ResizeState};
use crate::shapes::{Element, ElementId, ElementKind};
use crate::widget::{Decoration, Handle, HandleKind, WidgetManager, WidgetState};
use kurbo::{Point, Rect, Vec2};
use std::collections::HashSet;
use std::time::Instant;

/// One open diagram together with its selection slots, the in-progress
/// manipulation and the repaint observer.
///
/// Commands never fail from the host's point of view. An invalid target
/// leaves everything untouched and the command reports `false`/`None`.
pub struct EditorSession {
    diagram: Diagram,
    config: EditorConfig,
    widgets: WidgetManager,
    manipulation: Option<Manipulation>,
    clicks: ClickTracker,
    label_edit: Option<LabelEditState>,
    observer: Option<Box<dyn DiagramObserver>>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    /// Create a session over an empty diagram.
    pub fn new(config: EditorConfig) -> Self {
        let clicks = ClickTracker::new(config.double_click_time_ms, config.double_click_distance);
        Self {
            diagram: Diagram::new(),
            config,
            widgets: WidgetManager::new(),
            manipulation: None,
            clicks,
            label_edit: None,
            observer: None,
        }
    }

    /// Register the observer that receives every change.
    pub fn set_observer(&mut self, observer: impl DiagramObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Drop the registered observer.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    fn emit(&mut self, change: DiagramChange) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_change(&change);
        }
    }

    fn emit_all(&mut self, changes: impl IntoIterator<Item = DiagramChange>) {
        for change in changes {
            self.emit(change);
        }
    }

    /// Log why a command did nothing and map the error away.
    fn noop<T>(command: &str, result: DiagramResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("{command} ignored: {e}");
                None
            }
        }
    }

    // --- Element creation -------------------------------------------------

    /// Place a new primitive at the spawn position, on top of the root
    /// frame, and make it active. Groups only come from [`Self::create_group`].
    pub fn create_element(&mut self, kind: ElementKind) -> Option<ElementId> {
        if kind == ElementKind::Group {
            log::debug!("create_element ignored: groups are built from candidates");
            return None;
        }
        let id = self
            .diagram
            .add(Element::new(kind, self.config.spawn_position));
        log::info!("Created {kind} {id}");
        self.emit(DiagramChange::Added(id));
        self.select(Some(id));
        Some(id)
    }

    /// [`Self::create_element`] from a toolbar tag such as `"Human"`.
    pub fn create_element_from_tag(&mut self, tag: &str) -> Option<ElementId> {
        match tag.parse::<ElementKind>() {
            Ok(kind) => self.create_element(kind),
            Err(e) => {
                log::debug!("create_element ignored: {e}");
                None
            }
        }
    }

    // --- Selection --------------------------------------------------------

    /// Make `id` the active element, or deselect with `None`.
    ///
    /// Returns `false` if `id` names no element. A pending label edit on a
    /// different element is committed first.
    pub fn select(&mut self, id: Option<ElementId>) -> bool {
        if let Some(missing) = id.filter(|&id| !self.diagram.contains(id)) {
            log::debug!("select ignored: {}", DiagramError::ElementNotFound(missing));
            return false;
        }
        if self
            .label_edit
            .as_ref()
            .is_some_and(|edit| Some(edit.element()) != id)
        {
            self.finish_label_edit();
        }
        let changes = self.widgets.select(id);
        if !changes.is_empty() {
            log::debug!("Active element: {id:?}");
        }
        self.emit_all(changes);
        true
    }

    // --- Drag and resize --------------------------------------------------

    /// Check that `id` sits in the root frame. Group members move only
    /// with their group.
    fn root_target(&self, id: ElementId) -> DiagramResult<()> {
        if self.diagram.is_at_root(id) {
            Ok(())
        } else if self.diagram.contains(id) {
            Err(DiagramError::NotAtCanvasRoot(id))
        } else {
            Err(DiagramError::ElementNotFound(id))
        }
    }

    /// Select a root-frame element and start moving it with the pointer at
    /// `pointer`.
    pub fn begin_drag(&mut self, id: ElementId, pointer: Point) -> bool {
        if Self::noop("begin_drag", self.root_target(id)).is_none() {
            return false;
        }
        let Some(start) = self.diagram.element(id).map(|e| e.position) else {
            return false;
        };
        self.select(Some(id));
        log::debug!("Drag started on {id} at {pointer:?}");
        self.manipulation = Some(Manipulation::Drag(DragState::new(id, pointer, start)));
        true
    }

    /// Start dragging `corner` of the active element.
    pub fn begin_resize(&mut self, corner: Corner, pointer: Point) -> bool {
        let Some(id) = self.widgets.active() else {
            log::debug!("begin_resize ignored: {}", DiagramError::NoActiveElement);
            return false;
        };
        if Self::noop("begin_resize", self.root_target(id)).is_none() {
            return false;
        }
        log::debug!("Resize started on {id} at {corner:?}");
        let resize = ResizeState::new(id, corner, pointer);
        self.manipulation = Some(Manipulation::Resize(resize));
        true
    }

    /// Feed a pointer position to the drag or resize in progress.
    pub fn on_pointer_move(&mut self, pointer: Point) {
        let Some(manipulation) = self.manipulation.as_mut() else {
            return;
        };
        match manipulation {
            Manipulation::Drag(drag) => {
                let id = drag.element;
                let delta = drag.step(pointer);
                self.move_element(id, delta);
            }
            Manipulation::Resize(resize) => {
                let (id, corner) = (resize.element, resize.corner);
                let delta = resize.step(pointer);
                self.resize_element(id, corner, delta);
            }
        }
    }

    /// Apply one resize step to the active element.
    pub fn resize_active(&mut self, corner: Corner, delta: Vec2) -> bool {
        match self.widgets.active() {
            Some(id) => {
                Self::noop("resize_active", self.root_target(id)).is_some()
                    && self.resize_element(id, corner, delta)
            }
            None => {
                log::debug!("resize_active ignored: {}", DiagramError::NoActiveElement);
                false
            }
        }
    }

    /// End the drag or resize in progress. The last applied step stays.
    pub fn end_drag(&mut self) {
        match self.manipulation.take() {
            Some(Manipulation::Drag(drag)) => log::debug!(
                "Drag of {} ended: moved from {:?} by {:?}",
                drag.element,
                drag.start_position,
                drag.total_delta()
            ),
            Some(Manipulation::Resize(resize)) => {
                log::debug!("Resize of {} at {:?} ended", resize.element, resize.corner)
            }
            None => {}
        }
    }

    /// Check if a drag or resize is in progress.
    pub fn is_manipulating(&self) -> bool {
        self.manipulation.is_some()
    }

    fn move_element(&mut self, id: ElementId, delta: Vec2) -> bool {
        if delta == Vec2::ZERO {
            return true;
        }
        let Some(position) = Self::noop("move", self.diagram.translate(id, delta)) else {
            return false;
        };
        log::trace!("Moved {id} by {delta:?}");
        self.emit(DiagramChange::Moved { id, position });
        true
    }

    fn resize_element(&mut self, id: ElementId, corner: Corner, delta: Vec2) -> bool {
        let min_size = self.config.min_size;
        let Some((position, size)) =
            Self::noop("resize", self.diagram.resize(id, corner, delta, min_size))
        else {
            return false;
        };
        log::trace!("Resized {id} at {corner:?} by {delta:?}");
        self.emit(DiagramChange::Resized { id, position, size });
        true
    }

    // --- Delete -----------------------------------------------------------

    /// Destroy the active element (a group goes with its children).
    pub fn delete_active(&mut self) -> bool {
        let Some(id) = self.widgets.active() else {
            log::debug!("delete_active ignored: {}", DiagramError::NoActiveElement);
            return false;
        };
        let Some(removal) = Self::noop("delete_active", self.diagram.remove(id)) else {
            return false;
        };
        let ids = removal.destroyed_ids();
        if self
            .manipulation
            .as_ref()
            .is_some_and(|m| ids.contains(&m.element()))
        {
            self.manipulation = None;
        }
        if self
            .label_edit
            .as_ref()
            .is_some_and(|edit| ids.contains(&edit.element()))
        {
            self.label_edit = None;
        }
        let changes = self.widgets.remove(&ids);
        self.emit_all(changes);
        log::info!("Deleted {} {id}", removal.element.kind);
        self.emit(DiagramChange::Removed(id));
        for group in removal.emptied {
            log::info!("Deleted emptied group {group}");
            self.emit(DiagramChange::Removed(group));
        }
        for group in removal.relabeled {
            if let Some(label) = self.diagram.element(group).map(|g| g.label.clone()) {
                self.emit(DiagramChange::Relabeled { id: group, label });
            }
        }
        true
    }

    // --- Grouping ---------------------------------------------------------

    /// Add a root-frame element to the group candidates, or take it out
    /// again. Elements inside a group are ignored.
    pub fn toggle_for_group(&mut self, id: ElementId) -> bool {
        if !self.diagram.is_at_root(id) {
            let reason = if self.diagram.contains(id) {
                DiagramError::NotAtCanvasRoot(id)
            } else {
                DiagramError::ElementNotFound(id)
            };
            log::debug!("toggle_for_group ignored: {reason}");
            return false;
        }
        let (member, change) = self.widgets.toggle_candidate(id);
        log::debug!(
            "{id} {} group candidates",
            if member { "joined" } else { "left" }
        );
        self.emit(change);
        true
    }

    /// Check if [`Self::create_group`] would do anything.
    pub fn can_group(&self) -> bool {
        self.widgets.candidates().len() >= 2
    }

    /// Group the candidates. The new group becomes active and every
    /// candidate highlight is cleared.
    pub fn create_group(&mut self) -> Option<ElementId> {
        let candidates: Vec<ElementId> = self.widgets.candidates().iter().copied().collect();
        let group = Self::noop("create_group", self.diagram.group(&candidates))?;
        self.end_drag();

        let moved: Vec<(ElementId, Point)> = self
            .diagram
            .element(group)
            .map(|g| g.children().iter().map(|c| (c.id(), c.position)).collect())
            .unwrap_or_default();
        let frame = Frame::Group(group);
        self.emit_all(
            moved
                .into_iter()
                .map(|(id, position)| DiagramChange::Reparented { id, frame, position }),
        );
        self.emit(DiagramChange::Added(group));
        let cleared = self.widgets.clear_candidates();
        self.emit_all(cleared);
        log::info!("Grouped {} elements into {group}", candidates.len());
        self.select(Some(group));
        Some(group)
    }

    /// Check if [`Self::ungroup_active`] would do anything.
    pub fn can_ungroup(&self) -> bool {
        self.widgets.active().is_some_and(|id| {
            self.diagram.is_at_root(id) && self.diagram.element(id).is_some_and(Element::is_group)
        })
    }

    /// Dissolve the active group one level. Children land back in the root
    /// frame at their absolute positions and nothing is active afterwards.
    pub fn ungroup_active(&mut self) -> Option<Vec<ElementId>> {
        let Some(group) = self.widgets.active() else {
            log::debug!("ungroup_active ignored: {}", DiagramError::NoActiveElement);
            return None;
        };
        let released = Self::noop("ungroup_active", self.diagram.ungroup(group))?;

        self.manipulation = None;
        self.select(None);
        let changes = self.widgets.remove(&[group]);
        self.emit_all(changes);
        let moved: Vec<DiagramChange> = released
            .iter()
            .filter_map(|&id| {
                self.diagram
                    .element(id)
                    .map(|e| DiagramChange::Reparented {
                        id,
                        frame: Frame::Root,
                        position: e.position,
                    })
            })
            .collect();
        self.emit_all(moved);
        log::info!("Ungrouped {group} into {} elements", released.len());
        self.emit(DiagramChange::Removed(group));
        Some(released)
    }

    // --- Labels -----------------------------------------------------------

    /// Replace an element's label. Any text, including empty, is accepted.
    pub fn set_label(&mut self, id: ElementId, text: impl Into<String>) -> bool {
        let text = text.into();
        if Self::noop("set_label", self.diagram.set_label(id, text.clone())).is_none() {
            return false;
        }
        self.emit(DiagramChange::Relabeled { id, label: text });
        true
    }

    /// Open the label of `id` for editing and select it. A pending edit on
    /// another element is committed first.
    pub fn begin_label_edit(&mut self, id: ElementId) -> Option<LabelEditRequest> {
        if self.label_edit.as_ref().is_some_and(|edit| edit.element() == id) {
            return self.label_edit_request();
        }
        self.finish_label_edit();
        if !self.select(Some(id)) {
            return None;
        }
        self.manipulation = None;
        let element = self.diagram.element(id)?;
        self.label_edit = Some(LabelEditState::new(element));
        self.widgets.enter_editing(id);
        log::debug!("Label edit started on {id}");
        self.label_edit_request()
    }

    /// Hand-off request for the edit in progress.
    pub fn label_edit_request(&self) -> Option<LabelEditRequest> {
        let edit = self.label_edit.as_ref()?;
        let element = self.diagram.element(edit.element())?;
        let bounds = self.diagram.canvas_bounds(edit.element())?;
        let mut request = label::edit_request(element, bounds);
        request.text = edit.text().to_string();
        Some(request)
    }

    /// The edit in progress.
    pub fn pending_label_edit(&self) -> Option<&LabelEditState> {
        self.label_edit.as_ref()
    }

    /// Route a key to the open label field. Returns `None` if no edit is
    /// open.
    pub fn handle_label_key(
        &mut self,
        key: TextKey,
        modifiers: Modifiers,
    ) -> Option<LabelEditResult> {
        let result = self.label_edit.as_mut()?.handle_key(key, modifiers);
        if let LabelEditResult::Commit(text) = &result {
            self.commit_label_edit(text.clone());
        }
        Some(result)
    }

    /// Close the open label field, writing `text` into the element.
    pub fn commit_label_edit(&mut self, text: impl Into<String>) -> bool {
        let Some(edit) = self.label_edit.take() else {
            log::debug!("commit_label_edit ignored: no edit in progress");
            return false;
        };
        self.widgets.exit_editing();
        log::debug!("Label edit committed on {}", edit.element());
        self.set_label(edit.element(), text)
    }

    fn finish_label_edit(&mut self) {
        if let Some(text) = self.label_edit.as_ref().map(|edit| edit.text().to_string()) {
            self.commit_label_edit(text);
        }
    }

    // --- Input routing ----------------------------------------------------

    /// Route a pointer event. Returns whether the event was consumed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        self.handle_pointer_at(event, Instant::now())
    }

    /// [`Self::handle_pointer`] with an explicit timestamp for double-click
    /// detection.
    pub fn handle_pointer_at(&mut self, event: PointerEvent, at: Instant) -> bool {
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
                modifiers,
            } => {
                let double = self.clicks.register(position, at);
                self.pointer_down(position, modifiers, double);
                true
            }
            PointerEvent::Down { .. } => false,
            PointerEvent::Move { position } => {
                self.on_pointer_move(position);
                self.is_manipulating()
            }
            PointerEvent::Up { .. } | PointerEvent::CaptureLost => {
                let was = self.is_manipulating();
                self.end_drag();
                was
            }
        }
    }

    fn pointer_down(&mut self, position: Point, modifiers: Modifiers, double: bool) {
        if let Some(kind) = self.handle_at(position) {
            match kind {
                HandleKind::Delete => {
                    self.delete_active();
                }
                HandleKind::Resize(corner) => {
                    self.begin_resize(corner, position);
                }
            }
            return;
        }

        if modifiers.ctrl {
            if let Some(id) = self.diagram.element_at(position, 0.0) {
                self.toggle_for_group(id);
            }
            return;
        }

        if let Some(id) = self.label_at(position).filter(|_| double) {
            self.clicks.reset();
            self.begin_label_edit(id);
            return;
        }

        match self.diagram.element_at(position, 0.0) {
            Some(id) => {
                self.begin_drag(id, position);
            }
            None => {
                self.select(None);
            }
        }
    }

    fn handle_at(&self, point: Point) -> Option<HandleKind> {
        let overlays = self.widgets.overlays()?;
        let bounds = self.diagram.canvas_bounds(overlays.target())?;
        overlays.hit(bounds, &self.config, point)
    }

    /// Root element whose label is visible under `point`. Labels below the
    /// top-most body covering the point are hidden by it.
    fn label_at(&self, point: Point) -> Option<ElementId> {
        for element in self.diagram.elements().iter().rev() {
            if label::hits_label(element, element.bounds(), point) {
                return Some(element.id());
            }
            if element.hit_test(point, 0.0) {
                return None;
            }
        }
        None
    }

    /// Route a key event. Only the delete key is handled here; keys for an
    /// open label field go through [`Self::handle_label_key`].
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        match event {
            KeyEvent::Pressed(key) if key == DELETE_KEY && self.label_edit.is_none() => {
                self.delete_active()
            }
            _ => false,
        }
    }

    // --- Queries ----------------------------------------------------------

    pub fn active(&self) -> Option<ElementId> {
        self.widgets.active()
    }

    pub fn group_candidates(&self) -> &HashSet<ElementId> {
        self.widgets.candidates()
    }

    /// Handles of the attached overlays, laid out from the live geometry.
    pub fn overlay_layout(&self) -> Vec<Handle> {
        self.widgets
            .overlays()
            .and_then(|overlays| {
                self.diagram
                    .canvas_bounds(overlays.target())
                    .map(|bounds| overlays.layout(bounds, &self.config))
            })
            .unwrap_or_default()
    }

    pub fn decoration(&self, id: ElementId) -> Decoration {
        self.widgets.decoration(id)
    }

    pub fn widget_state(&self, id: ElementId) -> WidgetState {
        self.widgets.state(id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.diagram.element(id)
    }

    pub fn frame_of(&self, id: ElementId) -> Option<Frame> {
        self.diagram.frame_of(id)
    }

    pub fn canvas_bounds(&self, id: ElementId) -> Option<Rect> {
        self.diagram.canvas_bounds(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn session() -> EditorSession {
        init_logger();
        EditorSession::default()
    }

    fn recorded(session: &mut EditorSession) -> Rc<RefCell<Vec<DiagramChange>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        session.set_observer(move |change: &DiagramChange| sink.borrow_mut().push(change.clone()));
        log
    }

    /// Create an element and place it at an explicit box.
    fn place(
        session: &mut EditorSession,
        kind: ElementKind,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> ElementId {
        let id = session.create_element(kind).unwrap();
        session.diagram.element_mut(id).unwrap().position = Point::new(x, y);
        session.diagram.element_mut(id).unwrap().size = Size::new(w, h);
        id
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
        }
    }

    fn ctrl_down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    #[test]
    fn test_create_element_spawns_active() {
        let mut session = session();
        let id = session.create_element(ElementKind::Actor).unwrap();
        let actor = session.element(id).unwrap();
        assert_eq!(actor.position, Point::new(100.0, 100.0));
        assert_eq!(actor.label, "Actor");
        assert_eq!(session.active(), Some(id));
        assert_eq!(session.overlay_layout().len(), 5);
    }

    #[test]
    fn test_create_from_tag() {
        let mut session = session();
        let id = session.create_element_from_tag("DiamondArrow").unwrap();
        assert_eq!(session.element(id).unwrap().kind, ElementKind::AggregationArrow);
        assert!(session.create_element_from_tag("Hexagon").is_none());
        assert!(session.create_element(ElementKind::Group).is_none());
        assert_eq!(session.diagram().len(), 1);
    }

    #[test]
    fn test_selection_exclusivity() {
        let mut session = session();
        let x = place(&mut session, ElementKind::Oval, 0.0, 0.0, 50.0, 50.0);
        let y = place(&mut session, ElementKind::Oval, 100.0, 0.0, 50.0, 50.0);

        session.select(Some(x));
        session.select(Some(y));
        let handles = session.overlay_layout();
        assert_eq!(handles.len(), 5);
        assert_eq!(handles[0].rect.center(), Point::new(100.0, 0.0));
        assert!(session.decoration(x).is_plain());
        assert!(session.decoration(y).selection_glow);

        session.select(None);
        assert!(session.overlay_layout().is_empty());
        assert!(session.decoration(y).is_plain());
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let mut session = session();
        let x = place(&mut session, ElementKind::Oval, 0.0, 0.0, 50.0, 50.0);
        assert!(!session.select(Some(uuid::Uuid::new_v4())));
        assert_eq!(session.active(), Some(x));
    }

    #[test]
    fn test_drag_is_incremental() {
        let mut session = session();
        let id = place(&mut session, ElementKind::Rectangle, 100.0, 100.0, 120.0, 80.0);
        let changes = recorded(&mut session);

        session.begin_drag(id, Point::new(110.0, 110.0));
        session.on_pointer_move(Point::new(120.0, 130.0));
        session.on_pointer_move(Point::new(125.0, 130.0));
        session.end_drag();
        session.on_pointer_move(Point::new(500.0, 500.0));

        assert_eq!(session.element(id).unwrap().position, Point::new(115.0, 120.0));
        let moves = changes
            .borrow()
            .iter()
            .filter(|c| matches!(c, DiagramChange::Moved { .. }))
            .count();
        assert_eq!(moves, 2);
    }

    #[test]
    fn test_overlays_follow_drag() {
        let mut session = session();
        let id = place(&mut session, ElementKind::Rectangle, 0.0, 0.0, 100.0, 100.0);
        session.begin_drag(id, Point::new(50.0, 50.0));
        session.on_pointer_move(Point::new(80.0, 90.0));
        let delete = &session.overlay_layout()[0];
        assert_eq!(delete.rect.center(), Point::new(30.0, 40.0));
    }

    #[test]
    fn test_resize_floor() {
        let mut session = session();
        let id = place(&mut session, ElementKind::Rectangle, 100.0, 100.0, 120.0, 80.0);
        for corner in Corner::ALL {
            for delta in [Vec2::new(400.0, 400.0), Vec2::new(-400.0, -400.0)] {
                session.resize_active(corner, delta);
                let size = session.element(id).unwrap().size;
                assert!(size.width >= 20.0 && size.height >= 20.0);
            }
        }
    }

    #[test]
    fn test_resize_through_handle() {
        let mut session = session();
        let id = place(&mut session, ElementKind::Rectangle, 100.0, 100.0, 120.0, 80.0);

        // Bottom-right thumb is centered on (220, 180)
        assert!(session.handle_pointer(down(221.0, 181.0)));
        session.handle_pointer(PointerEvent::Move {
            position: Point::new(241.0, 191.0),
        });
        session.handle_pointer(up(241.0, 191.0));

        let element = session.element(id).unwrap();
        assert_eq!(element.size, Size::new(140.0, 90.0));
        assert_eq!(element.position, Point::new(100.0, 100.0));
        assert!(!session.is_manipulating());
    }

    #[test]
    fn test_resize_top_left_with_config_floor() {
        init_logger();
        let config = EditorConfig {
            min_size: Size::ZERO,
            ..EditorConfig::default()
        };
        let mut session = EditorSession::new(config);
        let id = place(&mut session, ElementKind::Oval, 0.0, 0.0, 50.0, 50.0);

        session.begin_resize(Corner::TopLeft, Point::new(0.0, 0.0));
        session.on_pointer_move(Point::new(10.0, 20.0));
        session.end_drag();

        let element = session.element(id).unwrap();
        assert_eq!(element.size, Size::new(40.0, 30.0));
        assert_eq!(element.position, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_delete_active() {
        let mut session = session();
        let id = place(&mut session, ElementKind::Diamond, 0.0, 0.0, 50.0, 50.0);
        let changes = recorded(&mut session);

        assert!(session.delete_active());
        assert!(session.active().is_none());
        assert!(session.element(id).is_none());
        assert!(session.overlay_layout().is_empty());
        assert!(changes.borrow().contains(&DiagramChange::Removed(id)));
        assert!(!session.delete_active());
    }

    #[test]
    fn test_delete_handle_and_key() {
        let mut session = session();
        let a = place(&mut session, ElementKind::Rectangle, 100.0, 100.0, 50.0, 50.0);
        session.handle_pointer(down(100.0, 100.0));
        assert!(session.element(a).is_none());

        let b = place(&mut session, ElementKind::Rectangle, 100.0, 100.0, 50.0, 50.0);
        assert!(session.handle_key(KeyEvent::Pressed(DELETE_KEY.to_string())));
        assert!(session.element(b).is_none());
        assert!(session.diagram().is_empty());
    }

    #[test]
    fn test_delete_group_takes_children() {
        let mut session = session();
        let a = place(&mut session, ElementKind::Oval, 0.0, 0.0, 20.0, 20.0);
        let b = place(&mut session, ElementKind::Oval, 40.0, 0.0, 20.0, 20.0);
        session.toggle_for_group(a);
        session.toggle_for_group(b);
        let group = session.create_group().unwrap();

        session.delete_active();
        assert!(session.element(group).is_none());
        assert!(session.element(a).is_none());
        assert!(session.element(b).is_none());
    }

    #[test]
    fn test_deleting_last_group_member_removes_group() {
        let mut session = session();
        let a = place(&mut session, ElementKind::Oval, 0.0, 0.0, 20.0, 20.0);
        let b = place(&mut session, ElementKind::Oval, 40.0, 0.0, 20.0, 20.0);
        session.toggle_for_group(a);
        session.toggle_for_group(b);
        let group = session.create_group().unwrap();
        let changes = recorded(&mut session);

        session.select(Some(a));
        assert!(session.delete_active());
        assert_eq!(session.element(group).unwrap().label, "Group (1 elements)");
        assert!(changes.borrow().contains(&DiagramChange::Relabeled {
            id: group,
            label: "Group (1 elements)".into(),
        }));

        session.select(Some(b));
        assert!(session.delete_active());
        assert!(session.element(group).is_none());
        assert!(session.diagram().is_empty());
        assert!(session.active().is_none());
        assert!(changes.borrow().contains(&DiagramChange::Removed(b)));
        assert!(changes.borrow().contains(&DiagramChange::Removed(group)));
    }

    #[test]
    fn test_group_round_trip() {
        let mut session = session();
        let a = place(&mut session, ElementKind::Rectangle, 50.0, 50.0, 100.0, 60.0);
        let b = place(&mut session, ElementKind::Oval, 200.0, 80.0, 120.0, 80.0);

        session.toggle_for_group(a);
        assert!(!session.can_group());
        session.toggle_for_group(b);
        assert!(session.can_group());

        let group = session.create_group().unwrap();
        assert_eq!(session.active(), Some(group));
        assert!(session.group_candidates().is_empty());
        assert!(!session.decoration(a).group_highlight);
        let bounds = session.canvas_bounds(group).unwrap();
        assert_eq!(bounds, Rect::new(50.0, 50.0, 320.0, 160.0));
        assert_eq!(session.element(group).unwrap().label, "Group (2 elements)");
        assert_eq!(session.element(a).unwrap().position, Point::new(0.0, 0.0));
        assert_eq!(session.element(b).unwrap().position, Point::new(150.0, 30.0));

        assert!(session.can_ungroup());
        let released = session.ungroup_active().unwrap();
        assert_eq!(released.len(), 2);
        assert!(session.active().is_none());
        assert!(session.element(group).is_none());
        assert_eq!(session.frame_of(a), Some(Frame::Root));
        assert_eq!(session.element(a).unwrap().position, Point::new(50.0, 50.0));
        assert_eq!(session.element(b).unwrap().position, Point::new(200.0, 80.0));
        assert_eq!(session.element(b).unwrap().size, Size::new(120.0, 80.0));
    }

    #[test]
    fn test_grouping_needs_two() {
        let mut session = session();
        let a = place(&mut session, ElementKind::Rectangle, 0.0, 0.0, 10.0, 10.0);
        session.toggle_for_group(a);
        assert!(session.create_group().is_none());
        assert_eq!(session.diagram().len(), 1);
        assert!(session.group_candidates().contains(&a));
    }

    #[test]
    fn test_ungroup_needs_group() {
        let mut session = session();
        place(&mut session, ElementKind::Rectangle, 0.0, 0.0, 10.0, 10.0);
        assert!(!session.can_ungroup());
        assert!(session.ungroup_active().is_none());
        assert_eq!(session.diagram().len(), 1);
    }

    #[test]
    fn test_grouped_child_not_eligible() {
        let mut session = session();
        let a = place(&mut session, ElementKind::Rectangle, 0.0, 0.0, 10.0, 10.0);
        let b = place(&mut session, ElementKind::Rectangle, 20.0, 0.0, 10.0, 10.0);
        session.toggle_for_group(a);
        session.toggle_for_group(b);
        session.create_group().unwrap();

        assert!(!session.toggle_for_group(a));
        assert!(session.group_candidates().is_empty());
    }

    #[test]
    fn test_grouping_ends_drag_in_progress() {
        let mut session = session();
        let a = place(&mut session, ElementKind::Rectangle, 0.0, 0.0, 20.0, 20.0);
        let b = place(&mut session, ElementKind::Rectangle, 40.0, 0.0, 20.0, 20.0);
        assert!(session.begin_drag(a, Point::new(10.0, 10.0)));
        session.toggle_for_group(a);
        session.toggle_for_group(b);
        let group = session.create_group().unwrap();

        assert!(!session.is_manipulating());
        session.on_pointer_move(Point::new(110.0, 10.0));
        assert_eq!(session.element(a).unwrap().position, Point::ZERO);
        assert_eq!(session.canvas_bounds(a), Some(Rect::new(0.0, 0.0, 20.0, 20.0)));
        assert_eq!(session.canvas_bounds(group), Some(Rect::new(0.0, 0.0, 60.0, 20.0)));
    }

    #[test]
    fn test_group_member_moves_only_with_group() {
        let mut session = session();
        let a = place(&mut session, ElementKind::Rectangle, 0.0, 0.0, 20.0, 20.0);
        let b = place(&mut session, ElementKind::Rectangle, 40.0, 0.0, 20.0, 20.0);
        session.toggle_for_group(a);
        session.toggle_for_group(b);
        session.create_group().unwrap();

        assert!(!session.begin_drag(a, Point::new(10.0, 10.0)));
        assert!(!session.is_manipulating());

        assert!(session.select(Some(a)));
        assert!(!session.begin_resize(Corner::BottomRight, Point::new(20.0, 20.0)));
        assert!(!session.resize_active(Corner::BottomRight, Vec2::new(50.0, 50.0)));
        let child = session.element(a).unwrap();
        assert_eq!(child.position, Point::ZERO);
        assert_eq!(child.size, Size::new(20.0, 20.0));
    }

    #[test]
    fn test_three_primitives_scenario() {
        let mut session = session();
        let a = place(&mut session, ElementKind::Actor, 10.0, 10.0, 40.0, 60.0);
        let b = place(&mut session, ElementKind::Oval, 100.0, 10.0, 120.0, 80.0);
        let c = place(&mut session, ElementKind::Rectangle, 300.0, 300.0, 120.0, 80.0);

        session.handle_pointer(ctrl_down(20.0, 20.0));
        session.handle_pointer(ctrl_down(150.0, 50.0));
        assert_eq!(session.group_candidates().len(), 2);
        let group = session.create_group().unwrap();

        assert_eq!(session.element(group).unwrap().children().len(), 2);
        assert_eq!(session.frame_of(a), Some(Frame::Group(group)));
        assert_eq!(session.frame_of(b), Some(Frame::Group(group)));
        assert_eq!(session.frame_of(c), Some(Frame::Root));

        session.handle_pointer(down(350.0, 350.0));
        assert_eq!(session.active(), Some(c));
    }

    #[test]
    fn test_group_change_notifications() {
        let mut session = session();
        let a = place(&mut session, ElementKind::Rectangle, 0.0, 0.0, 10.0, 10.0);
        let b = place(&mut session, ElementKind::Rectangle, 20.0, 0.0, 10.0, 10.0);
        session.toggle_for_group(a);
        session.toggle_for_group(b);
        let changes = recorded(&mut session);

        let group = session.create_group().unwrap();
        let changes = changes.borrow();
        assert!(changes.contains(&DiagramChange::Added(group)));
        assert!(changes.contains(&DiagramChange::Reparented {
            id: b,
            frame: Frame::Group(group),
            position: Point::new(20.0, 0.0),
        }));
        assert!(changes.contains(&DiagramChange::OverlaysChanged(Some(group))));
    }

    #[test]
    fn test_background_click_deselects() {
        let mut session = session();
        place(&mut session, ElementKind::Rectangle, 0.0, 0.0, 10.0, 10.0);
        session.handle_pointer(down(500.0, 500.0));
        assert!(session.active().is_none());
        assert!(session.overlay_layout().is_empty());
    }

    #[test]
    fn test_capture_lost_ends_drag() {
        let mut session = session();
        let id = place(&mut session, ElementKind::Rectangle, 300.0, 300.0, 100.0, 100.0);
        session.handle_pointer(down(350.0, 350.0));
        session.handle_pointer(PointerEvent::Move {
            position: Point::new(360.0, 350.0),
        });
        session.handle_pointer(PointerEvent::CaptureLost);
        assert!(!session.is_manipulating());
        assert_eq!(session.element(id).unwrap().position, Point::new(310.0, 300.0));
    }

    #[test]
    fn test_label_edit_flow() {
        let mut session = session();
        let id = place(&mut session, ElementKind::Rectangle, 300.0, 300.0, 120.0, 80.0);
        let changes = recorded(&mut session);

        let request = session.begin_label_edit(id).unwrap();
        assert_eq!(request.text, "Class");
        assert_eq!(request.rect.center(), Point::new(360.0, 340.0));
        assert_eq!(session.widget_state(id), WidgetState::Editing);

        session.handle_label_key(TextKey::Character("es".into()), Modifiers::default());
        let result = session.handle_label_key(TextKey::Enter, Modifiers::default());
        assert_eq!(result, Some(LabelEditResult::Commit("Classes".into())));
        assert_eq!(session.element(id).unwrap().label, "Classes");
        assert_eq!(session.widget_state(id), WidgetState::Selected);
        assert!(session.pending_label_edit().is_none());
        assert!(changes.borrow().contains(&DiagramChange::Relabeled {
            id,
            label: "Classes".into(),
        }));
    }

    #[test]
    fn test_label_edit_double_click() {
        let mut session = session();
        let id = place(&mut session, ElementKind::Oval, 300.0, 300.0, 120.0, 80.0);
        let start = Instant::now();

        session.handle_pointer_at(down(360.0, 340.0), start);
        session.handle_pointer_at(up(360.0, 340.0), start);
        session.handle_pointer_at(down(360.0, 340.0), start + Duration::from_millis(100));

        assert_eq!(session.pending_label_edit().map(LabelEditState::element), Some(id));
        assert!(!session.is_manipulating());
    }

    #[test]
    fn test_double_click_skips_covered_label() {
        let mut session = session();
        let a = place(&mut session, ElementKind::Rectangle, 0.0, 0.0, 120.0, 80.0);
        let b = place(&mut session, ElementKind::Rectangle, 40.0, 20.0, 120.0, 80.0);
        let start = Instant::now();

        // A's centered label sits under B's body here
        session.handle_pointer_at(down(60.0, 40.0), start);
        session.handle_pointer_at(up(60.0, 40.0), start);
        assert_eq!(session.active(), Some(b));
        session.handle_pointer_at(down(60.0, 40.0), start + Duration::from_millis(100));
        session.handle_pointer_at(up(60.0, 40.0), start + Duration::from_millis(100));

        assert!(session.pending_label_edit().is_none());
        assert_eq!(session.active(), Some(b));
        assert_eq!(session.widget_state(a), WidgetState::Normal);

        // The uncovered part of A's label still opens it
        let later = start + Duration::from_secs(5);
        session.handle_pointer_at(down(20.0, 40.0), later);
        session.handle_pointer_at(up(20.0, 40.0), later);
        session.handle_pointer_at(down(20.0, 40.0), later + Duration::from_millis(100));
        assert_eq!(session.pending_label_edit().map(LabelEditState::element), Some(a));
    }

    #[test]
    fn test_new_edit_commits_previous() {
        let mut session = session();
        let a = place(&mut session, ElementKind::Oval, 0.0, 0.0, 120.0, 80.0);
        let b = place(&mut session, ElementKind::Oval, 200.0, 0.0, 120.0, 80.0);

        session.begin_label_edit(a);
        session.handle_label_key(TextKey::Backspace, Modifiers::default());
        session.begin_label_edit(b);

        assert_eq!(session.element(a).unwrap().label, "Use Cas");
        assert_eq!(session.pending_label_edit().map(LabelEditState::element), Some(b));
        assert_eq!(session.active(), Some(b));
    }

    #[test]
    fn test_empty_label_accepted() {
        let mut session = session();
        let id = place(&mut session, ElementKind::Diamond, 0.0, 0.0, 120.0, 80.0);
        session.begin_label_edit(id);
        assert!(session.commit_label_edit(""));
        assert_eq!(session.element(id).unwrap().label, "");
        assert!(!session.commit_label_edit("again"));
    }

    #[test]
    fn test_delete_key_ignored_while_editing() {
        let mut session = session();
        let id = place(&mut session, ElementKind::Diamond, 0.0, 0.0, 120.0, 80.0);
        session.begin_label_edit(id);
        assert!(!session.handle_key(KeyEvent::Pressed(DELETE_KEY.to_string())));
        assert!(session.element(id).is_some());
    }
}
