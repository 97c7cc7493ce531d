use std::collections::HashSet;

use egui::{Color32, Pos2};
use rookus_canvas::element::{factory, Element};
use rookus_canvas::error::EditorError;
use rookus_canvas::event::{EditorEvent, EventLog};
use rookus_canvas::id_generator::generate_id;
use rookus_canvas::selection::SelectionState;
use rookus_canvas::state::EditorModel;

// Helper to create a model with a rectangle and a circle
fn create_test_model() -> (EditorModel, rookus_canvas::ElementId, rookus_canvas::ElementId) {
    let mut model = EditorModel::new();
    let rect = model.add_element(factory::rectangle(Color32::RED));
    let circle = model.add_element(factory::circle(Color32::BLUE));
    (model, rect, circle)
}

#[test]
fn test_ids_are_unique() {
    let mut model = EditorModel::new();
    for _ in 0..50 {
        model.add_element(factory::rectangle(Color32::RED));
        model.add_element(factory::text("Hi", "Arial", Color32::BLACK));
    }

    let ids: HashSet<_> = model.list_elements().iter().map(|e| e.id()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_elements_land_at_default_positions() {
    let mut model = EditorModel::new();
    let text = model.add_element(factory::text("Hello", "Arial", Color32::BLACK));
    let rect = model.add_element(factory::rectangle(Color32::RED));
    let circle = model.add_element(factory::circle(Color32::RED));

    assert_eq!(model.element(text).unwrap().position(), Pos2::new(50.0, 50.0));
    assert_eq!(model.element(rect).unwrap().position(), Pos2::new(100.0, 100.0));
    assert_eq!(model.element(circle).unwrap().position(), Pos2::new(100.0, 100.0));
}

#[test]
fn test_list_preserves_paint_order() {
    let (mut model, rect, circle) = create_test_model();
    let text = model.add_element(factory::text("Top", "Arial", Color32::BLACK));

    let order: Vec<_> = model.list_elements().iter().map(|e| e.id()).collect();
    assert_eq!(order, vec![rect, circle, text]);

    // Moving does not reorder
    model.update_element_position(rect, 400.0, 300.0).unwrap();
    let order: Vec<_> = model.list_elements().iter().map(|e| e.id()).collect();
    assert_eq!(order, vec![rect, circle, text]);

    // The topmost element wins hit tests where shapes overlap
    assert_eq!(model.element_at(Pos2::new(110.0, 110.0)).map(|e| e.id()), Some(circle));
}

#[test]
fn test_select_toggles() {
    let (mut model, rect, circle) = create_test_model();

    assert_eq!(model.select(rect), Ok(SelectionState::Selected(rect)));
    assert!(model.overlay().is_bound_to(rect));

    assert_eq!(model.select(circle), Ok(SelectionState::Selected(circle)));
    assert!(model.overlay().is_bound_to(circle));

    assert_eq!(model.select(circle), Ok(SelectionState::Unselected));
    assert_eq!(model.overlay().bound(), None);
}

#[test]
fn test_select_unknown_id_keeps_selection() {
    let (mut model, rect, _) = create_test_model();
    model.select(rect).unwrap();

    let stranger = generate_id();
    assert_eq!(model.select(stranger), Err(EditorError::NotFound(stranger)));
    assert_eq!(model.selection(), SelectionState::Selected(rect));
}

#[test]
fn test_removing_selected_clears_selection() {
    let (mut model, rect, circle) = create_test_model();
    model.select(rect).unwrap();

    let removed = model.remove_element(rect).expect("rectangle was present");
    assert_eq!(removed.id(), rect);
    assert_eq!(model.selection(), SelectionState::Unselected);
    assert_eq!(model.overlay().bound(), None);
    assert!(model.element(circle).is_some());
}

#[test]
fn test_removing_other_element_keeps_selection() {
    let (mut model, rect, circle) = create_test_model();
    model.select(rect).unwrap();

    model.remove_element(circle);
    assert_eq!(model.selection(), SelectionState::Selected(rect));
}

#[test]
fn test_remove_unknown_is_noop() {
    let (mut model, _, _) = create_test_model();
    assert!(model.remove_element(generate_id()).is_none());
    assert_eq!(model.list_elements().len(), 2);
}

#[test]
fn test_update_unknown_position_is_not_found() {
    let (mut model, _, _) = create_test_model();
    let stranger = generate_id();
    assert_eq!(
        model.update_element_position(stranger, 1.0, 1.0),
        Err(EditorError::NotFound(stranger))
    );
}

#[test]
fn test_drag_end_is_idempotent() {
    let (mut model, rect, _) = create_test_model();
    let log = EventLog::new();
    model.subscribe(Box::new(log.clone()));

    model.on_drag_end(rect, 200.0, 200.0).unwrap();
    let once = model.list_elements().to_vec();
    model.on_drag_end(rect, 200.0, 200.0).unwrap();

    assert_eq!(model.list_elements(), once.as_slice());
    assert_eq!(model.element(rect).unwrap().position(), Pos2::new(200.0, 200.0));

    let moves = log
        .events()
        .into_iter()
        .filter(|event| matches!(event, EditorEvent::ElementMoved { .. }))
        .count();
    assert_eq!(moves, 1);
}

#[test]
fn test_add_select_drag_delete() {
    let (mut model, rect, circle) = create_test_model();

    model.select(rect).unwrap();
    model.on_drag_end(rect, 200.0, 200.0).unwrap();
    assert_eq!(model.element(rect).unwrap().position(), Pos2::new(200.0, 200.0));

    model.remove_element(rect);

    let remaining: Vec<_> = model.list_elements().iter().map(|e| e.id()).collect();
    assert_eq!(remaining, vec![circle]);
    assert_eq!(model.selection(), SelectionState::Unselected);
}

#[test]
fn test_events_describe_changes() {
    let mut model = EditorModel::new();
    let log = EventLog::new();
    model.subscribe(Box::new(log.clone()));

    let id = model.add_element(factory::rectangle(Color32::RED));
    model.select(id).unwrap();
    model.remove_element(id);

    assert_eq!(
        log.take(),
        vec![
            EditorEvent::ElementAdded {
                id,
                element_type: "rectangle"
            },
            EditorEvent::SelectionChanged {
                old: SelectionState::Unselected,
                new: SelectionState::Selected(id),
            },
            EditorEvent::SelectionChanged {
                old: SelectionState::Selected(id),
                new: SelectionState::Unselected,
            },
            EditorEvent::ElementRemoved { id },
        ]
    );
}

#[test]
fn test_load_elements_replaces_document() {
    let (mut model, rect, circle) = create_test_model();
    model.select(rect).unwrap();

    let kept = Element::new(generate_id(), Pos2::new(5.0, 5.0), factory::circle(Color32::GREEN));
    let replaced = model.load_elements(vec![kept.clone()]).unwrap();
    let replaced: Vec<_> = replaced.iter().map(|e| e.id()).collect();
    assert_eq!(replaced, vec![rect, circle]);

    assert_eq!(model.list_elements(), &[kept.clone()]);
    assert_eq!(model.selection(), SelectionState::Unselected);

    let err = model.load_elements(vec![kept.clone(), kept.clone()]).unwrap_err();
    assert_eq!(err, EditorError::DuplicateId(kept.id()));
    assert_eq!(model.list_elements().len(), 1);
}
