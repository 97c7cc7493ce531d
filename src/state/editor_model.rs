//! The editing session: document, selection and freehand capture behind one
//! mutation surface.
//!
//! Every mutation runs synchronously on the caller's thread and emits an
//! [`EditorEvent`] on the model's [`EventBus`] so a renderer can redraw.
//! Failures that can be caused by stray input (unknown ids, pointer events
//! without a gesture) are reported but never leave the model inconsistent.
//!
//! # Example
//!
//! ```rust
//! use rookus_canvas::element::factory;
//! use rookus_canvas::state::EditorModel;
//! use egui::Color32;
//!
//! let mut model = EditorModel::new();
//! let id = model.add_element(factory::rectangle(Color32::RED));
//! model.select(id).unwrap();
//! model.remove_element(id);
//! assert!(model.selection().selected_id().is_none());
//! ```

use egui::{Color32, Pos2};
use log::{debug, info, warn};

use crate::command::{Command, CommandResult};
use crate::document::Document;
use crate::element::{Element, ElementKind, StrokeBuilder};
use crate::error::EditorError;
use crate::event::{EditorEvent, EventBus, EventHandler};
use crate::gizmo::TransformOverlay;
use crate::id_generator::{generate_id, ElementId};
use crate::selection::{SelectionController, SelectionState};
use crate::tools::{DragController, FreehandCapture, Tool};

#[derive(Debug, Default)]
pub struct EditorModel {
    document: Document,
    selection: SelectionController,
    capture: FreehandCapture,
    event_bus: EventBus,
}

impl EditorModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A model whose strokes start out in `color`
    pub fn with_brush_color(color: Color32) -> Self {
        Self {
            capture: FreehandCapture::new(color),
            ..Self::default()
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    pub fn execute(&mut self, command: Command) -> CommandResult {
        debug!("Executing {:?}", command);
        command.execute(self)
    }

    // Element model

    /// Add an element at its kind's default position
    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        let position = kind.default_position();
        self.add_element_at(kind, position)
    }

    pub fn add_element_at(&mut self, kind: ElementKind, position: Pos2) -> ElementId {
        let id = generate_id();
        let element_type = kind.element_type();
        self.document.push(Element::new(id, position, kind));

        info!("Added {} {} at {:?}", element_type, id, position);
        self.event_bus.emit(EditorEvent::ElementAdded { id, element_type });
        id
    }

    /// Replace the position of an element. Paint order is unchanged.
    pub fn update_element_position(&mut self, id: ElementId, x: f32, y: f32) -> Result<(), EditorError> {
        let position = Pos2::new(x, y);
        let Some(element) = self.document.get_mut(id) else {
            warn!("Ignoring move of unknown element {}", id);
            return Err(EditorError::NotFound(id));
        };

        if element.position() == position {
            return Ok(());
        }
        element.set_position(position);

        debug!("Moved {} to {:?}", id, position);
        self.event_bus.emit(EditorEvent::ElementMoved { id, position });
        Ok(())
    }

    /// Remove an element, clearing the selection in the same step if it was
    /// selected. Unknown ids are a no-op.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.document.remove(id);
        let Some(element) = removed else {
            debug!("Ignoring removal of unknown element {}", id);
            return None;
        };

        if self.selection.state().is_selected(id) {
            let old = self.selection.clear();
            self.emit_selection_change(old);
        }

        info!("Removed {} {}", element.element_type(), id);
        self.event_bus.emit(EditorEvent::ElementRemoved { id });
        Some(element)
    }

    /// Elements in paint order
    pub fn list_elements(&self) -> &[Element] {
        self.document.elements()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.document.get(id)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Topmost element under `pos`
    pub fn element_at(&self, pos: Pos2) -> Option<&Element> {
        self.document.element_at(pos)
    }

    /// Replace the whole document, e.g. when restoring from an external store.
    ///
    /// The selection and any stroke in progress are dropped. Returns the
    /// elements that were replaced.
    pub fn load_elements(&mut self, elements: Vec<Element>) -> Result<Vec<Element>, EditorError> {
        let document = Document::from_elements(elements)?;
        let replaced = std::mem::replace(&mut self.document, document);

        let old = self.selection.clear();
        self.emit_selection_change(old);
        let discarded = self.capture.is_drawing();
        self.capture.deactivate();
        if discarded {
            self.event_bus.emit(EditorEvent::StrokeDiscarded);
        }

        info!("Loaded document with {} elements", self.document.len());
        self.event_bus.emit(EditorEvent::DocumentLoaded {
            elements: self.document.len(),
        });
        Ok(replaced.into_elements())
    }

    // Selection

    /// Toggle selection of `id`. Unknown ids leave the selection untouched.
    pub fn select(&mut self, id: ElementId) -> Result<SelectionState, EditorError> {
        if !self.document.contains(id) {
            debug!("Ignoring selection of unknown element {}", id);
            return Err(EditorError::NotFound(id));
        }

        let old = self.selection.select(id);
        self.emit_selection_change(old);
        Ok(self.selection.state())
    }

    pub fn clear_selection(&mut self) {
        let old = self.selection.clear();
        self.emit_selection_change(old);
    }

    pub fn selection(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selection.selected().and_then(|id| self.document.get(id))
    }

    pub fn overlay(&self) -> &TransformOverlay {
        self.selection.overlay()
    }

    fn emit_selection_change(&self, old: SelectionState) {
        let new = self.selection.state();
        if old != new {
            self.event_bus.emit(EditorEvent::SelectionChanged { old, new });
        }
    }

    // Drag

    /// Commit the end of a drag gesture
    pub fn on_drag_end(&mut self, id: ElementId, new_x: f32, new_y: f32) -> CommandResult {
        self.execute(DragController::on_drag_end(id, new_x, new_y))
    }

    // Freehand capture

    pub fn draw_mode_active(&self) -> bool {
        self.capture.is_active()
    }

    pub fn set_draw_mode(&mut self, active: bool) {
        if self.capture.is_active() == active {
            return;
        }

        let discarded = self.capture.set_active(active);
        info!("Draw mode {}", if active { "on" } else { "off" });
        self.event_bus.emit(EditorEvent::DrawModeChanged { active });
        if discarded {
            self.event_bus.emit(EditorEvent::StrokeDiscarded);
        }
    }

    pub fn toggle_draw_mode(&mut self) {
        self.set_draw_mode(!self.capture.is_active());
    }

    pub fn brush_color(&self) -> Color32 {
        self.capture.color()
    }

    pub fn set_brush_color(&mut self, color: Color32) {
        self.capture.set_color(color);
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_drawing()
    }

    /// The stroke currently being drawn, if any
    pub fn in_progress_stroke(&self) -> Option<&StrokeBuilder> {
        self.capture.in_progress()
    }

    /// Start a stroke in draw mode. Outside draw mode this does nothing.
    ///
    /// A second press while a stroke is open is rejected and the stroke keeps
    /// its points.
    pub fn pointer_down(&mut self, pos: Pos2) -> Result<(), EditorError> {
        if !self.capture.is_active() {
            return Ok(());
        }
        if self.capture.is_drawing() {
            return Err(EditorError::InvalidGesture("pointer down during an open stroke"));
        }

        self.run_capture(|capture, doc| capture.on_pointer_down(pos, doc));
        self.event_bus.emit(EditorEvent::StrokeStarted { at: pos });
        Ok(())
    }

    pub fn pointer_move(&mut self, pos: Pos2) -> Result<(), EditorError> {
        if !self.capture.is_active() {
            return Ok(());
        }
        if !self.capture.is_drawing() {
            return Err(EditorError::InvalidGesture("pointer move without a stroke"));
        }

        self.run_capture(|capture, doc| capture.on_pointer_move(pos, doc));
        let points = self.capture.in_progress().map_or(0, |stroke| stroke.points().len());
        self.event_bus.emit(EditorEvent::StrokeExtended { points });
        Ok(())
    }

    /// Finish the current gesture. Returns the id of the committed stroke.
    pub fn pointer_up(&mut self, pos: Pos2) -> Result<Option<ElementId>, EditorError> {
        if !self.capture.is_active() {
            return Ok(None);
        }
        if !self.capture.is_drawing() {
            return Err(EditorError::InvalidGesture("pointer up without a stroke"));
        }

        Ok(self.run_capture(|capture, doc| capture.on_pointer_up(pos, doc)))
    }

    fn run_capture<F>(&mut self, f: F) -> Option<ElementId>
    where
        F: FnOnce(&mut FreehandCapture, &Document) -> Option<Command>,
    {
        let command = f(&mut self.capture, &self.document)?;
        match self.execute(command) {
            Ok(id) => id,
            Err(err) => {
                warn!("Freehand command failed: {}", err);
                None
            }
        }
    }
}
