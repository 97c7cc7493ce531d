//! Remote image generation and fetching.
//!
//! Nothing in here touches the editing session directly. Requests run on a
//! [`BackgroundWorker`] thread and their results come back through oneshot
//! channels the UI polls once per frame; only a successful result is turned
//! into an image element by [`place_generated`].

use std::fmt;
use std::future::Future;
use std::thread;

use egui::ColorImage;
use futures::channel::{mpsc, oneshot};
use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::element::factory;
use crate::error::ServiceError;
use crate::id_generator::ElementId;
use crate::image_store::{decode_image, ImageStore, PendingImage};
use crate::state::EditorModel;

/// Work a generation backend can be asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    /// Text to image
    Prompt { prompt: String },
    /// Render a garment image according to a prompt
    TryOn { prompt: String, garment: Vec<u8> },
    RemoveBackground { image: Vec<u8> },
}

impl GenerationRequest {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationRequest::Prompt { .. } => "prompt",
            GenerationRequest::TryOn { .. } => "try-on",
            GenerationRequest::RemoveBackground { .. } => "remove-background",
        }
    }
}

pub type GenerationResult = Result<ColorImage, ServiceError>;

/// An image generation backend.
///
/// The returned future must not borrow the service so it can be moved onto
/// the worker thread.
pub trait GenerationService: Send + Sync {
    fn generate(&self, request: GenerationRequest) -> BoxFuture<'static, GenerationResult>;
}

/// Garment mockup fields from the toolbox, combined into one prompt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockupPrompt {
    pub artist_action: String,
    pub dress_type: String,
    pub dress_color: String,
}

impl MockupPrompt {
    pub fn to_prompt(&self) -> String {
        format!(
            "{} of {} where artist is {}",
            self.dress_type.trim(),
            self.dress_color.trim(),
            self.artist_action.trim()
        )
    }

    pub fn is_complete(&self) -> bool {
        [&self.artist_action, &self.dress_type, &self.dress_color]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    image_url: String,
}

/// Talks to a JSON endpoint that answers `{"prompt": ..}` with `{"image_url": ..}`
#[derive(Debug, Clone)]
pub struct HttpGenerationService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGenerationService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GenerationService for HttpGenerationService {
    fn generate(&self, request: GenerationRequest) -> BoxFuture<'static, GenerationResult> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        async move {
            let label = request.label();
            let GenerationRequest::Prompt { prompt } = request else {
                warn!("{} requests are not supported by {}", label, endpoint);
                return Err(ServiceError::Unavailable);
            };

            info!("Requesting generation from {}", endpoint);
            let response = client
                .post(&endpoint)
                .json(&GenerateBody { prompt: &prompt })
                .send()
                .await?
                .error_for_status()?;

            let body: GenerateResponse = response.json().await?;
            debug!("Generation returned {}", body.image_url);
            fetch_image(&client, &body.image_url).await
        }
        .boxed()
    }
}

/// Download and decode an image
pub async fn fetch_image(client: &reqwest::Client, url: &str) -> GenerationResult {
    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    debug!("Fetched {} bytes from {}", bytes.len(), url);
    decode_image(&bytes)
}

/// A thread running a single-threaded tokio runtime for network work.
///
/// Dropping the worker stops the thread once queued jobs are handed off;
/// unfinished jobs are dropped, which their receivers see as cancellation.
pub struct BackgroundWorker {
    jobs: mpsc::UnboundedSender<BoxFuture<'static, ()>>,
}

impl fmt::Debug for BackgroundWorker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackgroundWorker")
            .field("closed", &self.jobs.is_closed())
            .finish()
    }
}

impl BackgroundWorker {
    pub fn spawn() -> Result<Self, ServiceError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| ServiceError::Request(err.to_string()))?;
        let (jobs, mut queue) = mpsc::unbounded::<BoxFuture<'static, ()>>();

        thread::Builder::new()
            .name("canvas-worker".to_owned())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(job) = queue.next().await {
                        tokio::spawn(job);
                    }
                });
                debug!("Background worker stopped");
            })
            .map_err(|err| ServiceError::Request(err.to_string()))?;

        Ok(Self { jobs })
    }

    /// Run `future` on the worker, returning a receiver for its output
    pub fn run<F>(&self, future: F) -> oneshot::Receiver<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        let job = async move {
            let _ = sender.send(future.await);
        }
        .boxed();

        if self.jobs.unbounded_send(job).is_err() {
            // The receiver reports Canceled since the sender went down with the job
            error!("Background worker is gone, dropping job");
        }
        receiver
    }

    /// Fetch `url` into a pending image slot
    pub fn fetch_into(&self, client: reqwest::Client, url: String, pending: PendingImage) {
        let job = async move {
            let result = fetch_image(&client, &url).await;
            pending.complete(result);
        };
        // Completion goes through the pending image itself
        drop(self.run(job));
    }
}

/// One in-flight generation the UI is waiting for
#[derive(Debug)]
pub struct GenerationJob {
    label: String,
    receiver: oneshot::Receiver<GenerationResult>,
}

impl GenerationJob {
    pub fn new(label: impl Into<String>, receiver: oneshot::Receiver<GenerationResult>) -> Self {
        Self {
            label: label.into(),
            receiver,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// `None` while the job is still running
    pub fn try_finish(&mut self) -> Option<GenerationResult> {
        match self.receiver.try_recv() {
            Ok(None) => None,
            Ok(Some(result)) => Some(result),
            Err(canceled) => Some(Err(canceled.into())),
        }
    }
}

/// Start a generation on the worker
pub fn submit(
    worker: &BackgroundWorker,
    service: &dyn GenerationService,
    request: GenerationRequest,
) -> GenerationJob {
    let label = match &request {
        GenerationRequest::Prompt { prompt } | GenerationRequest::TryOn { prompt, .. } => prompt.clone(),
        GenerationRequest::RemoveBackground { .. } => request.label().to_owned(),
    };
    info!("Submitting {} generation", request.label());
    GenerationJob::new(label, worker.run(service.generate(request)))
}

/// Turn a finished generation into an image element.
///
/// Failures are returned untouched and leave the document alone.
pub fn place_generated(
    model: &mut EditorModel,
    images: &mut ImageStore,
    result: GenerationResult,
) -> Result<ElementId, ServiceError> {
    let image = result?;
    let source = images.insert_decoded(image);
    Ok(model.add_element(factory::image(source)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn mockup_prompt_reads_naturally() {
        let mockup = MockupPrompt {
            artist_action: "painting sunflowers".to_owned(),
            dress_type: "Maxi dress".to_owned(),
            dress_color: "red".to_owned(),
        };
        assert_eq!(mockup.to_prompt(), "Maxi dress of red where artist is painting sunflowers");
        assert!(mockup.is_complete());
        assert!(!MockupPrompt::default().is_complete());
    }

    #[test]
    fn failed_generation_adds_nothing() {
        let mut model = EditorModel::new();
        let mut images = ImageStore::new();

        let err = place_generated(&mut model, &mut images, Err(ServiceError::Unavailable)).unwrap_err();
        assert_eq!(err, ServiceError::Unavailable);
        assert!(model.list_elements().is_empty());
    }

    #[test]
    fn successful_generation_adds_an_image() {
        let mut model = EditorModel::new();
        let mut images = ImageStore::new();

        let image = ColorImage::new([2, 2], Color32::WHITE);
        let id = place_generated(&mut model, &mut images, Ok(image)).unwrap();
        assert_eq!(model.element(id).map(|e| e.element_type()), Some("image"));
    }

    #[test]
    fn worker_returns_results() {
        let worker = BackgroundWorker::spawn().unwrap();
        let receiver = worker.run(async { 21 * 2 });
        assert_eq!(futures::executor::block_on(receiver), Ok(42));
    }

    #[test]
    fn job_reports_cancellation() {
        let (sender, receiver) = oneshot::channel::<GenerationResult>();
        let mut job = GenerationJob::new("lost", receiver);
        assert!(job.try_finish().is_none());

        drop(sender);
        assert!(matches!(job.try_finish(), Some(Err(ServiceError::Cancelled))));
    }
}
