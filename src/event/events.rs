use egui::Pos2;

use crate::id_generator::ElementId;
use crate::selection::SelectionState;

/// Changes to the editing session that a renderer or UI may react to
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ElementAdded {
        id: ElementId,
        element_type: &'static str,
    },
    ElementMoved {
        id: ElementId,
        position: Pos2,
    },
    ElementRemoved {
        id: ElementId,
    },
    SelectionChanged {
        old: SelectionState,
        new: SelectionState,
    },
    DrawModeChanged {
        active: bool,
    },
    StrokeStarted {
        at: Pos2,
    },
    StrokeExtended {
        points: usize,
    },
    /// In-progress stroke thrown away because draw mode was switched off
    StrokeDiscarded,
    DocumentLoaded {
        elements: usize,
    },
}
