use egui::{Color32, Pos2};

use super::common::STROKE_WIDTH;

/// A finalized freehand polyline.
///
/// Points are relative to the owning element's position. Captured strokes start
/// at the origin, so their points are plain canvas coordinates until moved.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Color32,
}

impl Stroke {
    pub fn new(points: Vec<Pos2>, color: Color32) -> Self {
        Self { points, color }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        STROKE_WIDTH
    }
}

/// Accumulates points for a stroke that is still being drawn.
///
/// Points can only be appended; [`StrokeBuilder::finish`] hands out an
/// immutable copy for the document.
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    points: Vec<Pos2>,
    color: Color32,
}

impl StrokeBuilder {
    /// Start a stroke seeded with its first point
    pub fn new(start: Pos2, color: Color32) -> Self {
        Self {
            points: vec![start],
            color,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn finish(&self) -> Stroke {
        Stroke::new(self.points.clone(), self.color)
    }
}
