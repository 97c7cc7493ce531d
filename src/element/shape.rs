use egui::{Color32, Vec2};

use super::common::{CIRCLE_RADIUS, RECTANGLE_SIZE};

/// Filled rectangle. The element position is its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    color: Color32,
}

impl Rectangle {
    pub fn new(color: Color32) -> Self {
        Self { color }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn size(&self) -> Vec2 {
        RECTANGLE_SIZE
    }
}

/// Filled circle. The element position is its centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    color: Color32,
}

impl Circle {
    pub fn new(color: Color32) -> Self {
        Self { color }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn radius(&self) -> f32 {
        CIRCLE_RADIUS
    }
}
