use std::collections::HashSet;

use egui::Pos2;

use crate::element::Element;
use crate::error::EditorError;
use crate::geometry::hit_testing;
use crate::id_generator::ElementId;

/// Ordered collection of placed elements. Order is paint order: later entries
/// draw over earlier ones. Element ids are unique.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from existing elements, rejecting duplicate ids
    pub fn from_elements(elements: Vec<Element>) -> Result<Self, EditorError> {
        let mut seen = HashSet::with_capacity(elements.len());
        for element in &elements {
            if !seen.insert(element.id()) {
                return Err(EditorError::DuplicateId(element.id()));
            }
        }
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|element| element.id() == id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| element.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|element| element.id() == id)
    }

    /// Append on top of the paint order.
    ///
    /// Callers generate fresh ids, so uniqueness holds without a scan here.
    pub(crate) fn push(&mut self, element: Element) {
        debug_assert!(!self.contains(element.id()));
        self.elements.push(element);
    }

    pub(crate) fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    /// Topmost element under `pos`
    pub fn element_at(&self, pos: Pos2) -> Option<&Element> {
        hit_testing::topmost_at(&self.elements, pos)
    }
}
