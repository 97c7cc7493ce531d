use egui::{Color32, Vec2};

use super::common::TEXT_FONT_SIZE;

/// A run of text placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    content: String,
    font_family: String,
    color: Color32,
}

impl Text {
    pub fn new(content: impl Into<String>, font_family: impl Into<String>, color: Color32) -> Self {
        Self {
            content: content.into(),
            font_family: font_family.into(),
            color,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn font_size(&self) -> f32 {
        TEXT_FONT_SIZE
    }

    /// Layout-free size estimate used for hit testing and the overlay frame
    pub fn approx_size(&self) -> Vec2 {
        let lines = self.content.lines().count().max(1);
        let widest = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            .max(1);

        Vec2::new(
            widest as f32 * TEXT_FONT_SIZE * 0.6,
            lines as f32 * TEXT_FONT_SIZE * 1.2,
        )
    }
}
