use egui::Vec2;

use super::common::IMAGE_SIZE;
use crate::image_store::SourceRef;

/// Raster image element.
///
/// Holds only a reference into the [`ImageStore`](crate::image_store::ImageStore);
/// pixel data is owned by the render side and may still be resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image {
    source: SourceRef,
}

impl Image {
    pub fn new(source: SourceRef) -> Self {
        Self { source }
    }

    pub fn source(&self) -> SourceRef {
        self.source
    }

    pub fn size(&self) -> Vec2 {
        IMAGE_SIZE
    }
}
