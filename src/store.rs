//! The authoritative local view of the shared board.
//!
//! [`ElementStore`] keeps elements in insertion order (the render order) and
//! enforces the one-live-entry-per-id invariant: a second arrival with a
//! known id replaces the existing entry in place instead of duplicating it.
//!
//! Every operation tolerates a missing id. Point-appends in particular can
//! legitimately race ahead of their own `add_element` on the wire, so a miss
//! is a silent no-op, never a panic.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::element::{Element, ElementData};

/// Insertion-ordered store of live elements, keyed by element id.
#[derive(Debug, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace by id. A replacement keeps the element's original
    /// insertion position; a new id is appended at the end.
    pub fn upsert(&mut self, element: Element) {
        match self.position(&element.element_id) {
            Some(index) => self.elements[index] = element,
            None => self.elements.push(element),
        }
    }

    /// Remove by id, returning the element if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let index = self.position(id)?;
        Some(self.elements.remove(index))
    }

    /// Append one `(x, y)` pair to a line element's point sequence.
    ///
    /// No-op if the id is absent or names a non-line element.
    pub fn append_point(&mut self, id: &str, point: [f64; 2]) {
        let Some(index) = self.position(id) else {
            return;
        };
        if let ElementData::Line(line) = &mut self.elements[index].data {
            line.points.push(point[0]);
            line.points.push(point[1]);
        }
    }

    /// Look up an element by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.position(id).map(|index| &self.elements[index])
    }

    /// Whether an element with this id is live.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Replace the entire contents with a snapshot, keeping snapshot order.
    pub fn load_snapshot(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Iterate elements in insertion order (the render order).
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Number of live elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|e| e.element_id == id)
    }
}

impl<'a> IntoIterator for &'a ElementStore {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
