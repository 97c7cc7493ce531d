#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gizmo;
pub mod id_generator;
pub mod image_store;
pub mod input;
mod panels;
pub mod renderer;
pub mod selection;
pub mod services;
pub mod state;
pub mod tools;

pub use app::{ChromeSettings, PaintApp};
pub use command::{Command, CommandResult};
pub use config::CanvasConfig;
pub use document::Document;
pub use element::{Element, ElementKind};
pub use error::{ConfigError, EditorError, ServiceError};
pub use event::{EditorEvent, EventBus, EventHandler, EventLog};
pub use id_generator::ElementId;
pub use image_store::{ImageStore, SourceRef};
pub use input::{InputEvent, InputHandler, InputLocation};
pub use renderer::Renderer;
pub use selection::SelectionState;
pub use state::EditorModel;
pub use tools::Tool;
