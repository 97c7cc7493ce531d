use egui::Pos2;

use crate::command::Command;
use crate::id_generator::ElementId;

/// Commits the final position of a finished drag gesture.
///
/// Intermediate pointer positions never reach the document; only the
/// coordinates reported at the end of the drag are committed. Committing the
/// same coordinates twice leaves the document unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct DragController;

impl DragController {
    pub fn on_drag_end(id: ElementId, new_x: f32, new_y: f32) -> Command {
        Command::MoveElement {
            element_id: id,
            position: Pos2::new(new_x, new_y),
        }
    }
}
