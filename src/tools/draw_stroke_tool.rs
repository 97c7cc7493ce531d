use egui::{Color32, Pos2};
use log::debug;

use crate::command::Command;
use crate::document::Document;
use crate::element::{ElementKind, StrokeBuilder};
use crate::tools::Tool;

/// Gesture state of the freehand tool
#[derive(Debug, Clone, Default)]
pub enum DrawStrokeState {
    #[default]
    Idle,
    Drawing(StrokeBuilder),
}

/// Turns pointer down/move/up into stroke elements while draw mode is on.
///
/// Draw mode is a separate switch from the gesture itself. Pointer-down only
/// starts a stroke while the switch is on; turning it off mid-gesture throws
/// the stroke away.
#[derive(Debug, Clone)]
pub struct FreehandCapture {
    active: bool,
    color: Color32,
    state: DrawStrokeState,
}

impl Default for FreehandCapture {
    fn default() -> Self {
        Self::new(Color32::BLACK)
    }
}

impl FreehandCapture {
    pub fn new(color: Color32) -> Self {
        Self {
            active: false,
            color,
            state: DrawStrokeState::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Switch draw mode. Returns true if an in-progress stroke was discarded.
    pub fn set_active(&mut self, active: bool) -> bool {
        self.active = active;
        if !active && self.is_drawing() {
            debug!("Draw mode switched off mid-stroke, discarding");
            self.state = DrawStrokeState::Idle;
            return true;
        }
        false
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawStrokeState::Drawing(_))
    }

    pub fn state(&self) -> &DrawStrokeState {
        &self.state
    }

    /// The stroke currently being drawn, for preview rendering
    pub fn in_progress(&self) -> Option<&StrokeBuilder> {
        match &self.state {
            DrawStrokeState::Drawing(builder) => Some(builder),
            DrawStrokeState::Idle => None,
        }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Colour for strokes started from now on
    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }
}

impl Tool for FreehandCapture {
    fn name(&self) -> &'static str {
        "Freehand"
    }

    fn deactivate(&mut self) {
        self.state = DrawStrokeState::Idle;
    }

    fn on_pointer_down(&mut self, pos: Pos2, _doc: &Document) -> Option<Command> {
        if !self.active {
            return None;
        }
        if self.is_drawing() {
            debug!("Ignoring pointer down during an active stroke");
            return None;
        }

        self.state = DrawStrokeState::Drawing(StrokeBuilder::new(pos, self.color));
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, _doc: &Document) -> Option<Command> {
        // Moves without a preceding pointer-down are ignored
        if let DrawStrokeState::Drawing(builder) = &mut self.state {
            builder.add_point(pos);
        }
        None
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _doc: &Document) -> Option<Command> {
        match std::mem::take(&mut self.state) {
            DrawStrokeState::Drawing(builder) => {
                let stroke = builder.finish();
                debug!("Finishing stroke with {} points", stroke.points().len());
                Some(Command::AddElement {
                    kind: ElementKind::Stroke(stroke),
                    position: None,
                })
            }
            DrawStrokeState::Idle => None,
        }
    }
}
