use egui::Pos2;

use super::distance_to_line_segment;
use crate::element::{Element, ElementKind, HIT_TOLERANCE};

/// Whether `pos` (canvas coordinates) lands on the element
pub fn hit_test(element: &Element, pos: Pos2) -> bool {
    match element.kind() {
        ElementKind::Text(_) | ElementKind::Image(_) | ElementKind::Rectangle(_) => {
            element.rect().contains(pos)
        }
        ElementKind::Circle(circle) => pos.distance(element.position()) <= circle.radius(),
        ElementKind::Stroke(stroke) => {
            let local = pos - element.position().to_vec2();
            let reach = stroke.width() / 2.0 + HIT_TOLERANCE;

            match stroke.points() {
                [] => false,
                [only] => local.distance(*only) <= reach,
                points => points
                    .windows(2)
                    .any(|seg| distance_to_line_segment(local, seg[0], seg[1]) <= reach),
            }
        }
    }
}

/// Topmost element under `pos`, walking paint order back to front
pub fn topmost_at(elements: &[Element], pos: Pos2) -> Option<&Element> {
    elements.iter().rev().find(|element| hit_test(element, pos))
}
