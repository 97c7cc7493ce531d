use egui::{Color32, Pos2, Rect, Vec2};

mod common;
pub mod image;
pub mod shape;
pub mod stroke;
pub mod text;

pub use common::*;
pub use image::Image;
pub use shape::{Circle, Rectangle};
pub use stroke::{Stroke, StrokeBuilder};
pub use text::Text;

use crate::geometry;
use crate::id_generator::ElementId;

/// Kind-specific attributes of a placed element
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Text(Text),
    Image(Image),
    Rectangle(Rectangle),
    Circle(Circle),
    Stroke(Stroke),
}

impl ElementKind {
    pub fn element_type(&self) -> &'static str {
        match self {
            ElementKind::Text(_) => "text",
            ElementKind::Image(_) => "image",
            ElementKind::Rectangle(_) => "rectangle",
            ElementKind::Circle(_) => "circle",
            ElementKind::Stroke(_) => "stroke",
        }
    }

    /// Where the element lands when the caller does not pick a position
    pub fn default_position(&self) -> Pos2 {
        match self {
            ElementKind::Text(_) => DEFAULT_TEXT_POSITION,
            ElementKind::Image(_) => DEFAULT_IMAGE_POSITION,
            ElementKind::Rectangle(_) | ElementKind::Circle(_) => DEFAULT_SHAPE_POSITION,
            ElementKind::Stroke(_) => Pos2::ZERO,
        }
    }

    pub fn color(&self) -> Option<Color32> {
        match self {
            ElementKind::Text(text) => Some(text.color()),
            ElementKind::Image(_) => None,
            ElementKind::Rectangle(rect) => Some(rect.color()),
            ElementKind::Circle(circle) => Some(circle.color()),
            ElementKind::Stroke(stroke) => Some(stroke.color()),
        }
    }
}

/// One placed object in the document
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    id: ElementId,
    position: Pos2,
    kind: ElementKind,
}

impl Element {
    pub fn new(id: ElementId, position: Pos2, kind: ElementKind) -> Self {
        Self { id, position, kind }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn element_type(&self) -> &'static str {
        self.kind.element_type()
    }

    pub(crate) fn set_position(&mut self, position: Pos2) {
        self.position = position;
    }

    /// Axis-aligned bounds in canvas coordinates
    pub fn rect(&self) -> Rect {
        match &self.kind {
            ElementKind::Text(text) => Rect::from_min_size(self.position, text.approx_size()),
            ElementKind::Image(image) => Rect::from_min_size(self.position, image.size()),
            ElementKind::Rectangle(rect) => Rect::from_min_size(self.position, rect.size()),
            ElementKind::Circle(circle) => {
                Rect::from_center_size(self.position, Vec2::splat(circle.radius() * 2.0))
            }
            ElementKind::Stroke(stroke) => {
                geometry::calculate_bounds(stroke.points(), stroke.width() / 2.0)
                    .translate(self.position.to_vec2())
            }
        }
    }
}

/// Constructors for element kinds with the toolbox defaults
pub mod factory {
    use super::*;

    pub fn text(content: impl Into<String>, font_family: impl Into<String>, color: Color32) -> ElementKind {
        ElementKind::Text(Text::new(content, font_family, color))
    }

    pub fn image(source: crate::image_store::SourceRef) -> ElementKind {
        ElementKind::Image(Image::new(source))
    }

    pub fn rectangle(color: Color32) -> ElementKind {
        ElementKind::Rectangle(Rectangle::new(color))
    }

    pub fn circle(color: Color32) -> ElementKind {
        ElementKind::Circle(Circle::new(color))
    }

    pub fn stroke(points: Vec<Pos2>, color: Color32) -> ElementKind {
        ElementKind::Stroke(Stroke::new(points, color))
    }
}
