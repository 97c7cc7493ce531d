use egui::{Color32, Pos2, Rect, Vec2};
use rookus_canvas::element::{self, Element, ElementKind};
use rookus_canvas::id_generator::generate_id;
use rookus_canvas::image_store::ImageStore;

fn create_test_stroke() -> Element {
    let points = vec![Pos2::new(10.0, 10.0), Pos2::new(20.0, 20.0)];
    Element::new(generate_id(), Pos2::ZERO, element::factory::stroke(points, Color32::RED))
}

#[test]
fn test_element_creation() {
    let stroke = create_test_stroke();
    assert_eq!(stroke.element_type(), "stroke");
    assert_eq!(stroke.kind().color(), Some(Color32::RED));

    let text = element::factory::text("Hello", "Arial", Color32::BLACK);
    assert_eq!(text.element_type(), "text");
    assert_eq!(text.default_position(), Pos2::new(50.0, 50.0));
}

#[test]
fn test_element_rect() {
    let stroke = create_test_stroke();
    let rect = stroke.rect();

    // Rectangle should contain all points
    assert!(rect.contains(Pos2::new(10.0, 10.0)));
    assert!(rect.contains(Pos2::new(20.0, 20.0)));

    let rectangle = Element::new(
        generate_id(),
        Pos2::new(100.0, 100.0),
        element::factory::rectangle(Color32::BLUE),
    );
    assert_eq!(
        rectangle.rect(),
        Rect::from_min_size(Pos2::new(100.0, 100.0), Vec2::new(100.0, 100.0))
    );

    // Circles are positioned by their centre
    let circle = Element::new(generate_id(), Pos2::new(100.0, 100.0), element::factory::circle(Color32::BLUE));
    assert_eq!(circle.rect(), Rect::from_center_size(Pos2::new(100.0, 100.0), Vec2::splat(100.0)));
}

#[test]
fn test_stroke_points_follow_position() {
    let points = vec![Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0)];
    let moved = Element::new(generate_id(), Pos2::new(50.0, 50.0), element::factory::stroke(points, Color32::BLACK));

    assert!(moved.rect().contains(Pos2::new(55.0, 50.0)));
    assert!(!moved.rect().contains(Pos2::new(5.0, 0.0)));
}

#[test]
fn test_image_element_uses_fixed_size() {
    let mut store = ImageStore::new();
    let source = store.insert_decoded(egui::ColorImage::new([640, 480], Color32::WHITE));
    let kind = element::factory::image(source);

    match &kind {
        ElementKind::Image(image) => {
            assert_eq!(image.source(), source);
            assert_eq!(image.size(), Vec2::new(100.0, 100.0));
        }
        other => panic!("expected an image, got {:?}", other),
    }
}
