use std::path::Path;
use std::time::Duration;

use egui::{Color32, Key, PointerButton, Pos2, Rect};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::config::CanvasConfig;
use crate::element::{factory, Element, ElementKind};
use crate::error::EditorError;
use crate::event::RepaintHandler;
use crate::image_store::ImageStore;
use crate::input::{InputEvent, InputHandler};
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::services::{
    self, BackgroundWorker, GenerationJob, GenerationRequest, GenerationService, HttpGenerationService,
    MockupPrompt,
};
use crate::state::EditorModel;
use crate::tools::{SelectionTool, Tool};

/// Toolbox fields that survive a restart. The document itself is not persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct ChromeSettings {
    pub brush: Option<[u8; 4]>,
    pub text_draft: String,
    pub image_path: String,
    pub image_url: String,
    pub prompt: String,
    pub mockup: MockupPrompt,
}

pub struct PaintApp {
    pub(crate) config: CanvasConfig,
    pub(crate) model: EditorModel,
    pub(crate) images: ImageStore,
    pub(crate) renderer: Renderer,
    pub(crate) input: InputHandler,
    pub(crate) selection_tool: SelectionTool,
    pub(crate) chrome: ChromeSettings,
    worker: Option<BackgroundWorker>,
    generator: Option<Box<dyn GenerationService>>,
    http: reqwest::Client,
    pub(crate) jobs: Vec<GenerationJob>,
    pub(crate) status: Option<String>,
}

impl std::fmt::Debug for PaintApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintApp")
            .field("model", &self.model)
            .field("images", &self.images)
            .field("jobs", &self.jobs.len())
            .field("generator", &self.generator.is_some())
            .finish_non_exhaustive()
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = CanvasConfig::load_from_env();
        let chrome: ChromeSettings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let app = Self::with_config(config, chrome);
        app.model.subscribe(Box::new(RepaintHandler::new(cc.egui_ctx.clone())));
        app
    }

    /// Build the app without a window, e.g. for tests
    pub fn with_config(config: CanvasConfig, chrome: ChromeSettings) -> Self {
        let default_brush = config.default_color().unwrap_or(Color32::BLACK);
        let brush = chrome
            .brush
            .map(|[r, g, b, a]| Color32::from_rgba_unmultiplied(r, g, b, a))
            .unwrap_or(default_brush);

        let worker = match BackgroundWorker::spawn() {
            Ok(worker) => Some(worker),
            Err(err) => {
                error!("Remote images are disabled: {}", err);
                None
            }
        };
        let generator = config
            .generation_endpoint
            .as_deref()
            .map(|endpoint| Box::new(HttpGenerationService::new(endpoint)) as Box<dyn GenerationService>);

        let renderer = Renderer::new(&config);
        let input = InputHandler::new(renderer.canvas_rect(Pos2::ZERO));

        Self {
            model: EditorModel::with_brush_color(brush),
            images: ImageStore::new(),
            renderer,
            input,
            selection_tool: SelectionTool::new(),
            chrome,
            worker,
            generator,
            http: reqwest::Client::new(),
            jobs: Vec::new(),
            status: None,
            config,
        }
    }

    pub fn model(&self) -> &EditorModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut EditorModel {
        &mut self.model
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn set_generator(&mut self, generator: Box<dyn GenerationService>) {
        self.generator = Some(generator);
    }

    pub fn can_generate(&self) -> bool {
        self.generator.is_some() && self.worker.is_some()
    }

    pub fn execute_command(&mut self, command: Command) {
        if let Err(err) = self.model.execute(command) {
            warn!("Command failed: {}", err);
        }
    }

    pub fn set_draw_mode(&mut self, active: bool) {
        // Switching modes abandons a half-finished drag
        self.selection_tool.deactivate();
        self.execute_command(Command::SetDrawMode(active));
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.model.selection().selected_id() else {
            return;
        };
        let removed = self.model.remove_element(id);
        self.release_images(removed);
    }

    /// Swap in a document from an external store
    pub fn load_document(&mut self, elements: Vec<Element>) {
        self.selection_tool.deactivate();
        match self.model.load_elements(elements) {
            Ok(replaced) => self.release_images(replaced),
            Err(err) => self.report(format!("Failed to load document: {}", err)),
        }
    }

    /// Free the pixels of removed image elements no remaining element shows
    fn release_images(&mut self, removed: impl IntoIterator<Item = Element>) {
        for element in removed {
            let ElementKind::Image(image) = element.kind() else {
                continue;
            };
            let source = image.source();
            let still_shown = self.model.list_elements().iter().any(|other| {
                matches!(other.kind(), ElementKind::Image(kept) if kept.source() == source)
            });
            if !still_shown {
                self.images.release(source);
            }
        }
    }

    /// One-line description of the selected element for the toolbox
    pub fn selection_summary(&self) -> Option<String> {
        let element = self.model.selected_element()?;
        let mut summary = format!("{} {}", element.element_type(), element.id());
        if let ElementKind::Image(image) = element.kind() {
            match self.images.image(image.source()) {
                Ok(pixels) => summary.push_str(&format!(" ({}x{} px)", pixels.size[0], pixels.size[1])),
                Err(_) => summary.push_str(" (not loaded)"),
            }
        }
        Some(summary)
    }

    pub fn add_text(&mut self) {
        let content = self.chrome.text_draft.trim();
        if content.is_empty() {
            return;
        }
        let kind = factory::text(content, self.config.font_family.as_str(), self.model.brush_color());
        self.model.add_element(kind);
        self.chrome.text_draft.clear();
    }

    /// Read and decode an image file, then place it on the canvas
    pub fn upload_image(&mut self, path: &Path) {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.report(format!("Failed to read {}: {}", path.display(), err));
                return;
            }
        };
        self.add_image_bytes(&bytes, &path.display().to_string());
    }

    fn add_image_bytes(&mut self, bytes: &[u8], name: &str) {
        match self.images.insert_bytes(bytes) {
            Ok(source) => {
                info!("Uploaded image {} as {}", name, source);
                self.model.add_element(factory::image(source));
            }
            Err(err) => self.report(format!("{}: {}", name, err)),
        }
    }

    /// Place an image whose pixels are fetched in the background
    pub fn add_image_from_url(&mut self, url: String) {
        let Some(worker) = &self.worker else {
            self.report("No background worker to fetch images".to_owned());
            return;
        };
        let pending = self.images.begin_pending();
        self.model.add_element(factory::image(pending.source()));
        worker.fetch_into(self.http.clone(), url, pending);
    }

    pub fn generate(&mut self, request: GenerationRequest) {
        let (Some(worker), Some(generator)) = (&self.worker, &self.generator) else {
            self.report("Image generation is not configured".to_owned());
            return;
        };
        self.jobs.push(services::submit(worker, generator.as_ref(), request));
    }

    pub fn generate_mockup(&mut self) {
        if !self.chrome.mockup.is_complete() {
            self.report("Fill in every mockup field first".to_owned());
            return;
        }
        let prompt = self.chrome.mockup.to_prompt();
        info!("Generated mockup prompt: {}", prompt);
        self.generate(GenerationRequest::Prompt { prompt });
    }

    fn report(&mut self, message: String) {
        warn!("{}", message);
        self.status = Some(message);
    }

    /// Collect finished background work. Returns true if anything changed.
    pub fn poll_background(&mut self) -> bool {
        let resolved = self.images.poll();
        for source in &resolved {
            if let Some(err) = self.images.failure(*source) {
                let message = format!("Image {} failed: {}", source, err);
                self.report(message);
            }
        }
        let settled = !resolved.is_empty();

        let mut finished = Vec::new();
        self.jobs.retain_mut(|job| match job.try_finish() {
            Some(result) => {
                finished.push((job.label().to_owned(), result));
                false
            }
            None => true,
        });

        let changed = settled || !finished.is_empty();
        for (label, result) in finished {
            if let Err(err) = services::place_generated(&mut self.model, &mut self.images, result) {
                self.report(format!("Generation for \"{}\" failed: {}", label, err));
            }
        }
        changed
    }

    pub fn has_background_work(&self) -> bool {
        !self.jobs.is_empty() || self.images.has_pending()
    }

    /// Route canvas input to the freehand capture in draw mode and to the
    /// selection tool otherwise
    pub fn handle_input(&mut self, events: Vec<InputEvent>, keyboard_free: bool) {
        for event in events {
            match event {
                InputEvent::PointerDown {
                    location,
                    button: PointerButton::Primary,
                } if location.is_in_canvas => {
                    if self.model.draw_mode_active() {
                        let result = self.model.pointer_down(location.position);
                        log_gesture(result);
                    } else {
                        let command = self
                            .selection_tool
                            .on_pointer_down(location.position, self.model.document());
                        self.run_tool_command(command);
                    }
                }
                InputEvent::PointerMove { location, .. } => {
                    if self.model.draw_mode_active() {
                        // Hovering in draw mode is not a gesture
                        if self.model.is_drawing() {
                            log_gesture(self.model.pointer_move(location.position));
                        }
                    } else {
                        let command = self
                            .selection_tool
                            .on_pointer_move(location.position, self.model.document());
                        self.run_tool_command(command);
                    }
                }
                InputEvent::PointerUp {
                    location,
                    button: PointerButton::Primary,
                } => self.finish_gesture(location.position),
                // Leaving the window ends the gesture where the pointer was last seen
                InputEvent::PointerLeave { last_known_location } => {
                    let position = last_known_location.position;
                    if self.model.draw_mode_active() {
                        if self.model.is_drawing() {
                            self.finish_gesture(position);
                        }
                    } else if self.selection_tool.drag_preview().is_some() {
                        self.finish_gesture(position);
                    } else {
                        // A press that never became a drag is not a click
                        self.selection_tool.deactivate();
                    }
                }
                InputEvent::KeyDown { key, .. } if keyboard_free => match key {
                    Key::Delete | Key::Backspace => self.delete_selected(),
                    Key::Escape => self.execute_command(Command::ClearSelection),
                    Key::D => self.set_draw_mode(!self.model.draw_mode_active()),
                    _ => {}
                },
                _ => {}
            }
        }
    }

    fn finish_gesture(&mut self, pos: Pos2) {
        if self.model.draw_mode_active() {
            log_gesture(self.model.pointer_up(pos).map(|_| ()));
        } else {
            let command = self.selection_tool.on_pointer_up(pos, self.model.document());
            self.run_tool_command(command);
        }
    }

    fn run_tool_command(&mut self, command: Option<Command>) {
        if let Some(command) = command {
            self.execute_command(command);
        }
    }

    /// Place images dropped onto the window
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|input| input.raw.dropped_files.clone());
        for file in dropped {
            if let Some(bytes) = &file.bytes {
                self.add_image_bytes(bytes, &file.name);
            } else if let Some(path) = &file.path {
                self.upload_image(path);
            }
        }
    }

    pub fn canvas_rect(&self) -> Rect {
        self.input.canvas_rect()
    }
}

fn log_gesture(result: Result<(), EditorError>) {
    if let Err(err) = result {
        debug!("Ignoring pointer event: {}", err);
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.chrome.brush = Some(self.model.brush_color().to_srgba_unmultiplied());
        eframe::set_value(storage, eframe::APP_KEY, &self.chrome);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.poll_background() {
            ctx.request_repaint();
        }
        self.handle_dropped_files(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        if self.has_background_work() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
