use egui::{Pos2, Vec2};

// Placement used when an element is added without an explicit position
pub const DEFAULT_TEXT_POSITION: Pos2 = Pos2::new(50.0, 50.0);
pub const DEFAULT_IMAGE_POSITION: Pos2 = Pos2::new(50.0, 50.0);
pub const DEFAULT_SHAPE_POSITION: Pos2 = Pos2::new(100.0, 100.0);

pub const IMAGE_SIZE: Vec2 = Vec2::new(100.0, 100.0);
pub const RECTANGLE_SIZE: Vec2 = Vec2::new(100.0, 100.0);
pub const CIRCLE_RADIUS: f32 = 50.0;

pub const TEXT_FONT_SIZE: f32 = 18.0;
pub const STROKE_WIDTH: f32 = 3.0;

/// Extra slack around thin geometry so strokes can be picked with a mouse
pub const HIT_TOLERANCE: f32 = 4.0;
