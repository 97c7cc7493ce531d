use egui::{Pos2, Vec2};
use log::debug;

use crate::command::Command;
use crate::document::Document;
use crate::id_generator::ElementId;
use crate::tools::{DragController, Tool};

/// Pointer travel (in points) below which a press-release counts as a click
pub const DRAG_THRESHOLD: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer went down on an element and has not been released yet
    Tracking {
        element_id: ElementId,
        origin: Pos2,
        press: Pos2,
        current: Pos2,
        dragging: bool,
    },
}

/// Hit-tests presses on the canvas and tells clicks from drags.
///
/// A click toggles the selection of the element under the pointer. A drag moves
/// the element visually while in flight (see [`SelectionTool::drag_preview`]) and
/// commits once through [`DragController`] when the pointer is released.
#[derive(Debug, Clone, Default)]
pub struct SelectionTool {
    state: DragState,
}

impl SelectionTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Element being dragged and its offset from the committed position
    pub fn drag_preview(&self) -> Option<(ElementId, Vec2)> {
        match self.state {
            DragState::Tracking {
                element_id,
                press,
                current,
                dragging: true,
                ..
            } => Some((element_id, current - press)),
            _ => None,
        }
    }
}

impl Tool for SelectionTool {
    fn name(&self) -> &'static str {
        "Selection"
    }

    fn deactivate(&mut self) {
        self.state = DragState::Idle;
    }

    fn on_pointer_down(&mut self, pos: Pos2, doc: &Document) -> Option<Command> {
        self.state = match doc.element_at(pos) {
            Some(element) => {
                debug!("Pressed {} {}", element.element_type(), element.id());
                DragState::Tracking {
                    element_id: element.id(),
                    origin: element.position(),
                    press: pos,
                    current: pos,
                    dragging: false,
                }
            }
            // Empty canvas keeps the current selection
            None => DragState::Idle,
        };
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, _doc: &Document) -> Option<Command> {
        if let DragState::Tracking {
            press,
            current,
            dragging,
            ..
        } = &mut self.state
        {
            *current = pos;
            if !*dragging && press.distance(pos) > DRAG_THRESHOLD {
                *dragging = true;
            }
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, doc: &Document) -> Option<Command> {
        let DragState::Tracking {
            element_id,
            origin,
            press,
            dragging,
            ..
        } = std::mem::take(&mut self.state)
        else {
            return None;
        };

        if !doc.contains(element_id) {
            debug!("Element {} vanished mid-gesture", element_id);
            return None;
        }

        if dragging {
            let target = origin + (pos - press);
            Some(DragController::on_drag_end(element_id, target.x, target.y))
        } else {
            Some(Command::Select { element_id })
        }
    }
}
