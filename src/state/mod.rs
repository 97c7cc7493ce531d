mod editor_model;

pub use editor_model::EditorModel;
