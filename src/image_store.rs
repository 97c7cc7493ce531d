use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use futures::channel::oneshot;
use log::{debug, info, warn};

use crate::error::{EditorError, ServiceError};

/// Opaque handle by which an image element refers to its pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceRef(u64);

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    Pending,
    Ready,
    Failed,
}

enum Slot {
    Pending(oneshot::Receiver<Result<ColorImage, ServiceError>>),
    Ready {
        image: Arc<ColorImage>,
        texture: Option<TextureHandle>,
    },
    Failed(ServiceError),
}

impl Slot {
    fn status(&self) -> ImageStatus {
        match self {
            Slot::Pending(_) => ImageStatus::Pending,
            Slot::Ready { .. } => ImageStatus::Ready,
            Slot::Failed(_) => ImageStatus::Failed,
        }
    }
}

/// Completes a reference handed out by [`ImageStore::begin_pending`].
///
/// May be moved to another thread; the store picks the result up on its next
/// [`ImageStore::poll`]. Dropping it without completing marks the image failed.
#[derive(Debug)]
pub struct PendingImage {
    source: SourceRef,
    sender: oneshot::Sender<Result<ColorImage, ServiceError>>,
}

impl PendingImage {
    pub fn source(&self) -> SourceRef {
        self.source
    }

    pub fn complete(self, result: Result<ColorImage, ServiceError>) {
        // The store may already be gone; nothing is waiting in that case
        if self.sender.send(result).is_err() {
            debug!("Image store dropped before {} resolved", self.source);
        }
    }

    pub fn complete_with_bytes(self, bytes: &[u8]) {
        let decoded = decode_image(bytes);
        self.complete(decoded);
    }
}

/// Owns decoded pixel data for image elements, keyed by [`SourceRef`].
///
/// Textures are uploaded lazily the first time the renderer asks for one.
pub struct ImageStore {
    next_ref: u64,
    slots: HashMap<SourceRef, Slot>,
}

impl fmt::Debug for ImageStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageStore")
            .field("images", &self.slots.len())
            .finish_non_exhaustive()
    }
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStore {
    pub fn new() -> Self {
        Self {
            next_ref: 1,
            slots: HashMap::new(),
        }
    }

    fn allocate(&mut self) -> SourceRef {
        let source = SourceRef(self.next_ref);
        self.next_ref += 1;
        source
    }

    /// Register already decoded pixels
    pub fn insert_decoded(&mut self, image: ColorImage) -> SourceRef {
        let source = self.allocate();
        info!("Registered image {} ({}x{})", source, image.size[0], image.size[1]);
        self.slots.insert(
            source,
            Slot::Ready {
                image: Arc::new(image),
                texture: None,
            },
        );
        source
    }

    /// Decode an uploaded file and register it
    pub fn insert_bytes(&mut self, bytes: &[u8]) -> Result<SourceRef, ServiceError> {
        let image = decode_image(bytes)?;
        Ok(self.insert_decoded(image))
    }

    /// Hand out a reference now whose pixels arrive later
    pub fn begin_pending(&mut self) -> PendingImage {
        let source = self.allocate();
        let (sender, receiver) = oneshot::channel();
        self.slots.insert(source, Slot::Pending(receiver));
        debug!("Image {} is pending", source);
        PendingImage { source, sender }
    }

    /// Move finished pending images to ready or failed.
    ///
    /// Returns the references that changed state so the caller can repaint.
    pub fn poll(&mut self) -> Vec<SourceRef> {
        let mut settled = Vec::new();

        for (source, slot) in self.slots.iter_mut() {
            let Slot::Pending(receiver) = slot else {
                continue;
            };

            let next = match receiver.try_recv() {
                Ok(None) => continue,
                Ok(Some(Ok(image))) => {
                    info!("Image {} resolved ({}x{})", source, image.size[0], image.size[1]);
                    Slot::Ready {
                        image: Arc::new(image),
                        texture: None,
                    }
                }
                Ok(Some(Err(err))) => {
                    warn!("Image {} failed to resolve: {}", source, err);
                    Slot::Failed(err)
                }
                Err(canceled) => {
                    warn!("Image {} was abandoned", source);
                    Slot::Failed(canceled.into())
                }
            };

            *slot = next;
            settled.push(*source);
        }

        settled
    }

    pub fn status(&self, source: SourceRef) -> Option<ImageStatus> {
        self.slots.get(&source).map(Slot::status)
    }

    pub fn failure(&self, source: SourceRef) -> Option<&ServiceError> {
        match self.slots.get(&source) {
            Some(Slot::Failed(err)) => Some(err),
            _ => None,
        }
    }

    /// Drop the pixels and texture behind `source`.
    ///
    /// A pending fetch for a released reference completes into nothing.
    pub fn release(&mut self, source: SourceRef) -> bool {
        let released = self.slots.remove(&source).is_some();
        if released {
            debug!("Released image {}", source);
        }
        released
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn has_pending(&self) -> bool {
        self.slots.values().any(|slot| matches!(slot, Slot::Pending(_)))
    }

    /// Decoded pixels, or `UnresolvedResource` while pending, failed or unknown
    pub fn image(&self, source: SourceRef) -> Result<Arc<ColorImage>, EditorError> {
        match self.slots.get(&source) {
            Some(Slot::Ready { image, .. }) => Ok(Arc::clone(image)),
            _ => Err(EditorError::UnresolvedResource(source)),
        }
    }

    /// Texture for a ready image, uploading it on first use
    pub fn texture_id(&mut self, ctx: &Context, source: SourceRef) -> Option<TextureId> {
        let Some(Slot::Ready { image, texture }) = self.slots.get_mut(&source) else {
            return None;
        };

        let handle = texture.get_or_insert_with(|| {
            debug!("Uploading texture for {}", source);
            ctx.load_texture(source.to_string(), (**image).clone(), TextureOptions::LINEAR)
        });
        Some(handle.id())
    }
}

/// Decode an encoded image file (png, jpeg, ...) into RGBA pixels
pub fn decode_image(bytes: &[u8]) -> Result<ColorImage, ServiceError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.as_flat_samples();

    Ok(ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let buffer = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_uploaded_bytes() {
        let mut store = ImageStore::new();
        let source = store.insert_bytes(&png_bytes(3, 2)).unwrap();

        assert_eq!(store.status(source), Some(ImageStatus::Ready));
        assert_eq!(store.image(source).unwrap().size, [3, 2]);
    }

    #[test]
    fn rejects_garbage_bytes() {
        let mut store = ImageStore::new();
        let err = store.insert_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[test]
    fn pending_image_resolves_on_poll() {
        let mut store = ImageStore::new();
        let pending = store.begin_pending();
        let source = pending.source();

        assert_eq!(store.status(source), Some(ImageStatus::Pending));
        assert_eq!(store.image(source), Err(EditorError::UnresolvedResource(source)));
        assert!(store.poll().is_empty());

        pending.complete(Ok(ColorImage::new([4, 4], egui::Color32::WHITE)));
        assert_eq!(store.poll(), vec![source]);
        assert_eq!(store.status(source), Some(ImageStatus::Ready));
        assert!(!store.has_pending());
    }

    #[test]
    fn pending_image_can_resolve_from_another_thread() {
        let mut store = ImageStore::new();
        let pending = store.begin_pending();
        let source = pending.source();
        let bytes = png_bytes(1, 1);

        std::thread::spawn(move || pending.complete_with_bytes(&bytes))
            .join()
            .unwrap();

        store.poll();
        assert_eq!(store.status(source), Some(ImageStatus::Ready));
    }

    #[test]
    fn dropped_completer_marks_failure() {
        let mut store = ImageStore::new();
        let source = store.begin_pending().source();

        store.poll();
        assert_eq!(store.status(source), Some(ImageStatus::Failed));
        assert_eq!(store.failure(source), Some(&ServiceError::Cancelled));
    }

    #[test]
    fn released_images_are_forgotten() {
        let mut store = ImageStore::new();
        let source = store.insert_decoded(ColorImage::new([1024, 1024], egui::Color32::WHITE));

        assert!(store.release(source));
        assert_eq!(store.status(source), None);
        assert!(store.is_empty());
        assert!(!store.release(source));
    }

    #[test]
    fn releasing_pending_image_ignores_late_result() {
        let mut store = ImageStore::new();
        let pending = store.begin_pending();
        let source = pending.source();

        store.release(source);
        pending.complete(Ok(ColorImage::new([2, 2], egui::Color32::WHITE)));
        assert!(store.poll().is_empty());
        assert_eq!(store.status(source), None);
    }

    #[test]
    fn references_are_not_reused() {
        let mut store = ImageStore::new();
        let a = store.insert_decoded(ColorImage::new([1, 1], egui::Color32::WHITE));
        let b = store.begin_pending().source();
        assert_ne!(a, b);
    }
}
