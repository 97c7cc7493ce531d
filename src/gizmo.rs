use egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};
use log::debug;

use crate::id_generator::ElementId;

const HANDLE_SIZE: f32 = 8.0;
const ROTATION_HANDLE_OFFSET: f32 = 30.0;
const HANDLE_COLOR: Color32 = Color32::from_rgb(30, 144, 255);
const HANDLE_STROKE_WIDTH: f32 = 2.0;
const OUTLINE_PADDING: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoHandle {
    ScaleTopLeft,
    ScaleTopRight,
    ScaleBottomLeft,
    ScaleBottomRight,
    Rotate,
}

/// Resize/rotate handle overlay attached to at most one element.
///
/// The overlay stores the element's id, not a render node. Its geometry is
/// recomputed every frame from whatever bounds the renderer resolves for that id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOverlay {
    bound: Option<ElementId>,
}

impl TransformOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to `id`, replacing any previous binding
    pub fn bind(&mut self, id: ElementId) {
        debug!("Transform overlay bound to {}", id);
        self.bound = Some(id);
    }

    pub fn detach(&mut self) {
        if let Some(id) = self.bound.take() {
            debug!("Transform overlay detached from {}", id);
        }
    }

    pub fn bound(&self) -> Option<ElementId> {
        self.bound
    }

    pub fn is_bound_to(&self, id: ElementId) -> bool {
        self.bound == Some(id)
    }

    /// Outline drawn around the bound element
    pub fn frame(bounds: Rect) -> Rect {
        bounds.expand(OUTLINE_PADDING)
    }

    /// Handle positions for an element occupying `bounds`
    pub fn handles(bounds: Rect) -> [(GizmoHandle, Pos2); 5] {
        let frame = Self::frame(bounds);
        [
            (GizmoHandle::ScaleTopLeft, frame.left_top()),
            (GizmoHandle::ScaleTopRight, frame.right_top()),
            (GizmoHandle::ScaleBottomLeft, frame.left_bottom()),
            (GizmoHandle::ScaleBottomRight, frame.right_bottom()),
            (
                GizmoHandle::Rotate,
                Pos2::new(frame.center().x, frame.min.y - ROTATION_HANDLE_OFFSET),
            ),
        ]
    }

    pub fn draw(&self, painter: &Painter, bounds: Rect) {
        if self.bound.is_none() {
            return;
        }

        let frame = Self::frame(bounds);
        painter.rect_stroke(frame, 0.0, Stroke::new(1.0, HANDLE_COLOR));

        let handles = Self::handles(bounds);
        let rotation_pos = handles[4].1;
        painter.line_segment(
            [Pos2::new(frame.center().x, frame.min.y), rotation_pos],
            Stroke::new(1.0, HANDLE_COLOR),
        );

        for (handle, pos) in handles {
            match handle {
                GizmoHandle::Rotate => {
                    painter.circle_stroke(pos, HANDLE_SIZE / 2.0, Stroke::new(HANDLE_STROKE_WIDTH, HANDLE_COLOR));
                }
                _ => {
                    let handle_rect = Rect::from_center_size(pos, Vec2::splat(HANDLE_SIZE));
                    painter.rect_filled(handle_rect, 0.0, HANDLE_COLOR);
                    painter.rect_stroke(handle_rect, 0.0, Stroke::new(1.0, Color32::WHITE));
                }
            }
        }
    }
}
