use egui::Pos2;

use crate::command::Command;
use crate::document::Document;

/// Tool trait defines how pointer gestures on the canvas become commands
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Called when the tool stops receiving input.
    /// Any gesture in flight is dropped without producing a command.
    fn deactivate(&mut self);

    /// Handle pointer press on the canvas.
    fn on_pointer_down(&mut self, pos: Pos2, doc: &Document) -> Option<Command>;

    /// Handle pointer movement while a gesture may be in progress.
    fn on_pointer_move(&mut self, pos: Pos2, doc: &Document) -> Option<Command>;

    /// Handle pointer release. Return a Command to **finalize** the gesture if applicable.
    fn on_pointer_up(&mut self, pos: Pos2, doc: &Document) -> Option<Command>;
}

mod drag;
pub use drag::DragController;

mod draw_stroke_tool;
pub use draw_stroke_tool::{DrawStrokeState, FreehandCapture};

mod selection_tool;
pub use selection_tool::{DragState, SelectionTool, DRAG_THRESHOLD};
