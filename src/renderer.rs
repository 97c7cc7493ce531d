use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke as PaintStroke, Vec2};
use log::trace;

use crate::config::CanvasConfig;
use crate::element::{Element, ElementKind, STROKE_WIDTH};
use crate::id_generator::ElementId;
use crate::image_store::ImageStore;
use crate::state::EditorModel;

/// Draws the document onto an egui painter.
///
/// The renderer only reads the model. Canvas size and background come from
/// [`CanvasConfig`]; element positions are canvas-local and translated to the
/// screen rect the canvas was allocated in.
#[derive(Debug, Clone)]
pub struct Renderer {
    canvas_size: Vec2,
    background: Color32,
}

impl Renderer {
    pub fn new(config: &CanvasConfig) -> Self {
        Self {
            canvas_size: config.canvas_size(),
            background: config
                .background_color()
                .unwrap_or(Color32::from_rgb(0x1a, 0x1a, 0x1a)),
        }
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    /// Screen rect of a canvas whose top-left corner is at `origin`
    pub fn canvas_rect(&self, origin: Pos2) -> Rect {
        Rect::from_min_size(origin, self.canvas_size)
    }

    /// Renders the current frame.
    ///
    /// `drag_preview` shifts one element visually without touching the model.
    /// Returns how many elements were drawn; images that have not resolved yet
    /// are skipped.
    pub fn render(
        &self,
        ctx: &egui::Context,
        painter: &Painter,
        canvas: Rect,
        model: &EditorModel,
        images: &mut ImageStore,
        drag_preview: Option<(ElementId, Vec2)>,
    ) -> usize {
        let painter = painter.with_clip_rect(canvas);
        painter.rect_filled(canvas, 0.0, self.background);

        let origin = canvas.min.to_vec2();
        let offset_of = |id: ElementId| match drag_preview {
            Some((dragged, delta)) if dragged == id => origin + delta,
            _ => origin,
        };

        let mut drawn = 0;
        for element in model.list_elements() {
            if self.draw_element(ctx, &painter, element, offset_of(element.id()), images) {
                drawn += 1;
            }
        }

        if let Some(stroke) = model.in_progress_stroke() {
            draw_polyline(&painter, stroke.points(), origin, stroke.color());
        }

        if let Some(selected) = model.selected_element() {
            let bounds = selected.rect().translate(offset_of(selected.id()));
            model.overlay().draw(&painter, bounds);
        }

        trace!("Rendered {} elements", drawn);
        drawn
    }

    fn draw_element(
        &self,
        ctx: &egui::Context,
        painter: &Painter,
        element: &Element,
        offset: Vec2,
        images: &mut ImageStore,
    ) -> bool {
        let position = element.position() + offset;

        match element.kind() {
            ElementKind::Text(text) => {
                painter.text(
                    position,
                    Align2::LEFT_TOP,
                    text.content(),
                    FontId::proportional(text.font_size()),
                    text.color(),
                );
            }
            ElementKind::Image(image) => {
                // Pending or failed images draw nothing
                let Some(texture) = images.texture_id(ctx, image.source()) else {
                    return false;
                };
                let rect = Rect::from_min_size(position, image.size());
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(texture, rect, uv, Color32::WHITE);
            }
            ElementKind::Rectangle(rect) => {
                painter.rect_filled(Rect::from_min_size(position, rect.size()), 0.0, rect.color());
            }
            ElementKind::Circle(circle) => {
                painter.circle_filled(position, circle.radius(), circle.color());
            }
            ElementKind::Stroke(stroke) => {
                draw_polyline(painter, stroke.points(), position.to_vec2(), stroke.color());
            }
        }
        true
    }
}

/// Draw a freehand line with round caps and joins
fn draw_polyline(painter: &Painter, points: &[Pos2], offset: Vec2, color: Color32) {
    let radius = STROKE_WIDTH / 2.0;
    let screen: Vec<Pos2> = points.iter().map(|p| *p + offset).collect();

    let (Some(&first), Some(&last)) = (screen.first(), screen.last()) else {
        return;
    };

    if screen.len() > 1 {
        painter.add(Shape::line(screen, PaintStroke::new(STROKE_WIDTH, color)));
    }
    painter.circle_filled(first, radius, color);
    if last != first {
        painter.circle_filled(last, radius, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;

    fn render_shapes(model: &EditorModel, images: &mut ImageStore) -> (usize, usize) {
        let renderer = Renderer::new(&CanvasConfig::default());
        let ctx = egui::Context::default();
        let mut drawn = 0;

        let output = ctx.run(egui::RawInput::default(), |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            let canvas = renderer.canvas_rect(Pos2::new(10.0, 10.0));
            drawn = renderer.render(ctx, &painter, canvas, model, images, None);
        });
        (drawn, output.shapes.len())
    }

    #[test]
    fn test_renderer_uses_configured_canvas() {
        let config = CanvasConfig {
            width: 640.0,
            height: 480.0,
            background: "#ffffff".to_owned(),
            ..CanvasConfig::default()
        };
        let renderer = Renderer::new(&config);

        assert_eq!(renderer.canvas_size(), Vec2::new(640.0, 480.0));
        assert_eq!(renderer.background(), Color32::WHITE);
        assert_eq!(
            renderer.canvas_rect(Pos2::new(5.0, 5.0)),
            Rect::from_min_size(Pos2::new(5.0, 5.0), Vec2::new(640.0, 480.0))
        );
    }

    #[test]
    fn test_renders_every_element() {
        let mut model = EditorModel::new();
        let mut images = ImageStore::new();
        model.add_element(factory::rectangle(Color32::RED));
        model.add_element(factory::circle(Color32::BLUE));
        model.add_element(factory::stroke(vec![Pos2::ZERO, Pos2::new(5.0, 5.0)], Color32::BLACK));

        let (drawn, _) = render_shapes(&model, &mut images);
        assert_eq!(drawn, 3);
    }

    #[test]
    fn test_pending_image_renders_nothing() {
        let mut images = ImageStore::new();
        let empty = EditorModel::new();
        let (_, baseline) = render_shapes(&empty, &mut images);

        let mut model = EditorModel::new();
        let pending = images.begin_pending();
        model.add_element(factory::image(pending.source()));

        let (drawn, shapes) = render_shapes(&model, &mut images);
        assert_eq!(drawn, 0);
        assert_eq!(shapes, baseline);
    }
}
