use log::debug;

use crate::gizmo::TransformOverlay;
use crate::id_generator::ElementId;

/// At most one selected element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(ElementId),
}

impl SelectionState {
    pub fn selected_id(&self) -> Option<ElementId> {
        match self {
            SelectionState::Unselected => None,
            SelectionState::Selected(id) => Some(*id),
        }
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        *self == SelectionState::Selected(id)
    }
}

/// Single-selection state machine driving the transform overlay.
///
/// ```text
///              select(a)                select(b), b != a
/// Unselected ───────────► Selected(a) ───────────────────► Selected(b)
///      ▲                     │
///      └─────────────────────┘
///        select(a) / clear()
/// ```
///
/// The controller does not know about the document; `EditorModel` checks that
/// an id exists before selecting it and clears the selection when it is removed.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
    overlay: TransformOverlay,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn selected(&self) -> Option<ElementId> {
        self.state.selected_id()
    }

    pub fn overlay(&self) -> &TransformOverlay {
        &self.overlay
    }

    /// Select `id`, or deselect it if it is already the selection.
    ///
    /// Returns the previous state.
    pub fn select(&mut self, id: ElementId) -> SelectionState {
        let next = if self.state.is_selected(id) {
            SelectionState::Unselected
        } else {
            SelectionState::Selected(id)
        };
        self.transition(next)
    }

    /// Force the Unselected state. Returns the previous state.
    pub fn clear(&mut self) -> SelectionState {
        self.transition(SelectionState::Unselected)
    }

    fn transition(&mut self, next: SelectionState) -> SelectionState {
        let previous = self.state;
        match next {
            SelectionState::Selected(id) => self.overlay.bind(id),
            SelectionState::Unselected => self.overlay.detach(),
        }
        self.state = next;
        debug!("Selection {:?} -> {:?}", previous, next);
        previous
    }
}
