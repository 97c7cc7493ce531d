use egui::{Color32, ColorImage, Pos2};
use futures::future::{self, BoxFuture, FutureExt};
use rookus_canvas::command::Command;
use rookus_canvas::element::factory;
use rookus_canvas::error::{EditorError, ServiceError};
use rookus_canvas::image_store::{ImageStatus, ImageStore};
use rookus_canvas::selection::SelectionState;
use rookus_canvas::services::{self, GenerationRequest, GenerationResult, GenerationService};
use rookus_canvas::state::EditorModel;

// A backend that answers every request the same way
struct FixedService(Result<[usize; 2], ServiceError>);

impl GenerationService for FixedService {
    fn generate(&self, _request: GenerationRequest) -> BoxFuture<'static, GenerationResult> {
        let result = self
            .0
            .clone()
            .map(|size| ColorImage::new(size, Color32::WHITE));
        future::ready(result).boxed()
    }
}

#[test]
fn test_add_command_uses_default_or_given_position() {
    let mut model = EditorModel::new();

    let default = model
        .execute(Command::AddElement {
            kind: factory::rectangle(Color32::RED),
            position: None,
        })
        .unwrap()
        .expect("add returns the new id");
    let placed = model
        .execute(Command::AddElement {
            kind: factory::circle(Color32::RED),
            position: Some(Pos2::new(300.0, 250.0)),
        })
        .unwrap()
        .expect("add returns the new id");

    assert_eq!(model.element(default).unwrap().position(), Pos2::new(100.0, 100.0));
    assert_eq!(model.element(placed).unwrap().position(), Pos2::new(300.0, 250.0));
}

#[test]
fn test_move_command() {
    let mut model = EditorModel::new();
    let id = model.add_element(factory::rectangle(Color32::RED));

    let result = model.execute(Command::MoveElement {
        element_id: id,
        position: Pos2::new(10.0, 20.0),
    });
    assert_eq!(result, Ok(None));
    assert_eq!(model.element(id).unwrap().position(), Pos2::new(10.0, 20.0));
}

#[test]
fn test_commands_on_missing_elements() {
    let mut model = EditorModel::new();
    let id = model.add_element(factory::rectangle(Color32::RED));
    model.remove_element(id);

    assert_eq!(
        model.execute(Command::MoveElement {
            element_id: id,
            position: Pos2::ZERO,
        }),
        Err(EditorError::NotFound(id))
    );
    assert_eq!(
        model.execute(Command::Select { element_id: id }),
        Err(EditorError::NotFound(id))
    );
    // Removing twice is harmless
    assert_eq!(model.execute(Command::RemoveElement { element_id: id }), Ok(None));
}

#[test]
fn test_selection_commands() {
    let mut model = EditorModel::new();
    let id = model.add_element(factory::circle(Color32::RED));

    model.execute(Command::Select { element_id: id }).unwrap();
    assert_eq!(model.selection(), SelectionState::Selected(id));

    model.execute(Command::ClearSelection).unwrap();
    assert_eq!(model.selection(), SelectionState::Unselected);
}

#[test]
fn test_draw_mode_command() {
    let mut model = EditorModel::new();
    model.execute(Command::SetDrawMode(true)).unwrap();
    assert!(model.draw_mode_active());
}

#[test]
fn test_failed_generation_leaves_document_unchanged() {
    let mut model = EditorModel::new();
    let mut images = ImageStore::new();
    model.add_element(factory::rectangle(Color32::RED));
    let before = model.list_elements().to_vec();

    let service = FixedService(Err(ServiceError::Request("503".to_owned())));
    let result = futures::executor::block_on(service.generate(GenerationRequest::Prompt {
        prompt: "a blue dress".to_owned(),
    }));

    let err = services::place_generated(&mut model, &mut images, result).unwrap_err();
    assert_eq!(err, ServiceError::Request("503".to_owned()));
    assert_eq!(model.list_elements(), before.as_slice());
}

#[test]
fn test_generated_image_becomes_element() {
    let mut model = EditorModel::new();
    let mut images = ImageStore::new();

    let service = FixedService(Ok([8, 8]));
    let result = futures::executor::block_on(service.generate(GenerationRequest::RemoveBackground {
        image: Vec::new(),
    }));
    let id = services::place_generated(&mut model, &mut images, result).unwrap();

    let element = model.element(id).unwrap();
    assert_eq!(element.element_type(), "image");
    assert_eq!(element.position(), Pos2::new(50.0, 50.0));
}

#[test]
fn test_pending_image_element_waits_for_pixels() {
    let mut model = EditorModel::new();
    let mut images = ImageStore::new();

    let pending = images.begin_pending();
    let source = pending.source();
    let id = model.add_element(factory::image(source));
    assert_eq!(images.status(source), Some(ImageStatus::Pending));

    pending.complete(Ok(ColorImage::new([2, 2], Color32::WHITE)));
    assert_eq!(images.poll(), vec![source]);
    assert_eq!(images.status(source), Some(ImageStatus::Ready));
    assert!(model.element(id).is_some());
}
