use egui::Pos2;

use crate::element::ElementKind;
use crate::error::EditorError;
use crate::id_generator::ElementId;
use crate::state::EditorModel;

/// Result of executing a command. Carries the id of a newly added element.
pub type CommandResult = Result<Option<ElementId>, EditorError>;

/// Mutations that UI chrome and tools issue against the editing session
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append a new element on top of the paint order.
    /// `None` places it at the kind's default position.
    AddElement {
        kind: ElementKind,
        position: Option<Pos2>,
    },
    MoveElement {
        element_id: ElementId,
        position: Pos2,
    },
    RemoveElement {
        element_id: ElementId,
    },
    /// Toggle selection of an element
    Select {
        element_id: ElementId,
    },
    ClearSelection,
    SetDrawMode(bool),
}

impl Command {
    pub fn execute(self, model: &mut EditorModel) -> CommandResult {
        match self {
            Command::AddElement { kind, position } => {
                let position = position.unwrap_or_else(|| kind.default_position());
                Ok(Some(model.add_element_at(kind, position)))
            }

            Command::MoveElement { element_id, position } => {
                model.update_element_position(element_id, position.x, position.y)?;
                Ok(None)
            }

            Command::RemoveElement { element_id } => {
                model.remove_element(element_id);
                Ok(None)
            }

            Command::Select { element_id } => {
                model.select(element_id)?;
                Ok(None)
            }

            Command::ClearSelection => {
                model.clear_selection();
                Ok(None)
            }

            Command::SetDrawMode(active) => {
                model.set_draw_mode(active);
                Ok(None)
            }
        }
    }
}
