//! Text buffer and element registry.
//!
//! The [`Document`] owns the markdown being rewritten and every element parsed
//! from it. Elements live in an arena addressed by [`ElementId`]; a separate
//! order list keeps them sorted by start offset. Edits go through
//! [`Document::replace_range`], which keeps the offsets of every element
//! behind the edit in sync with the buffer.

use crate::element::{Element, ElementId};
use crate::error::EngineError;

/// Markdown buffer with live, non-overlapping element spans.
///
/// # Example
///
/// ```
/// use deck_engine::{Document, Element, ElementKind};
///
/// let mut doc = Document::new("# A\ntext\n# B");
/// let first = doc.add_element(Element::new(
///     ElementKind::Title { level: 1, text: "A".to_owned() },
///     0,
///     3,
///     "# A",
///     1,
/// ))?;
///
/// doc.replace_range(0, 0, "intro\n");
/// assert_eq!(doc.text(), "intro\n# A\ntext\n# B");
/// assert_eq!(doc.element(first).start(), 6);
/// # Ok::<(), deck_engine::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    elements: Vec<Element>,
    order: Vec<ElementId>,
}

impl Document {
    /// Create a document over `text` with an empty registry.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            elements: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Current buffer contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume the document and return the buffer.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Buffer length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Register an element.
    ///
    /// The element must lie inside the buffer and must not intersect any
    /// element registered before it, whatever its kind.
    pub fn add_element(&mut self, candidate: Element) -> Result<ElementId, EngineError> {
        let len = self.text.len();
        let (start, end) = (candidate.start(), candidate.end());
        if start >= len || end == 0 || end > len || end <= start {
            return Err(EngineError::MalformedElement {
                kind: candidate.kind().name(),
                start,
                end,
                len,
            });
        }

        if let Some(existing) = self.elements.iter().find(|e| candidate.overlaps(e)) {
            return Err(EngineError::OverlappingElements {
                existing: Box::new(existing.clone()),
                candidate: Box::new(candidate),
            });
        }

        let id = ElementId(self.elements.len());
        let position = self
            .order
            .iter()
            .position(|other| self.elements[other.0].start() > start)
            .unwrap_or(self.order.len());

        tracing::debug!(
            kind = candidate.kind().name(),
            start,
            end,
            line = candidate.line(),
            "Registered element"
        );

        self.elements.push(candidate);
        self.order.insert(position, id);
        Ok(id)
    }

    /// Replace `start..end` of the buffer with `new_text`.
    ///
    /// Every element starting after `start`, or exactly at `end`, moves by the
    /// length difference. An element whose own span is being replaced keeps
    /// its offsets; its owner is responsible for updating its end.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted, out of bounds, or not on character
    /// boundaries.
    pub fn replace_range(&mut self, start: usize, end: usize, new_text: &str) {
        self.text.replace_range(start..end, new_text);

        let removed = end - start;
        let inserted = new_text.len();
        if removed == inserted {
            return;
        }

        for element in &mut self.elements {
            if element.start() > start || element.start() == end {
                element.shift(removed, inserted);
            }
        }
    }

    /// Append text after every element; no offsets change.
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// First element, in document order, matching `predicate`.
    pub fn find(&self, mut predicate: impl FnMut(&Element) -> bool) -> Option<ElementId> {
        self.order
            .iter()
            .copied()
            .find(|id| predicate(&self.elements[id.0]))
    }

    /// Last element, in document order, matching `predicate`.
    pub fn find_last(&self, mut predicate: impl FnMut(&Element) -> bool) -> Option<ElementId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| predicate(&self.elements[id.0]))
    }

    /// Element with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by another document.
    #[must_use]
    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// Element ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.order.iter().copied()
    }

    /// Elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.order.iter().map(|id| &self.elements[id.0])
    }

    /// Number of registered elements.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::element::ElementKind;

    fn container(start: usize, end: usize) -> Element {
        Element::new(ElementKind::Container, start, end, "c", 1)
    }

    fn title(start: usize, end: usize) -> Element {
        Element::new(
            ElementKind::Title {
                level: 1,
                text: "T".to_owned(),
            },
            start,
            end,
            "# T",
            1,
        )
    }

    fn starts(doc: &Document) -> Vec<usize> {
        doc.elements().map(Element::start).collect()
    }

    #[test]
    fn test_new_document_is_empty_registry() {
        let doc = Document::new("hello");
        assert_eq!(doc.text(), "hello");
        assert_eq!(doc.len(), 5);
        assert_eq!(doc.element_count(), 0);
    }

    #[test]
    fn test_add_element_keeps_start_order() {
        let mut doc = Document::new("0123456789abcdef");
        doc.add_element(container(10, 12)).unwrap();
        doc.add_element(container(0, 2)).unwrap();
        doc.add_element(container(5, 7)).unwrap();
        doc.add_element(container(14, 16)).unwrap();
        assert_eq!(starts(&doc), vec![0, 5, 10, 14]);
    }

    #[test]
    fn test_ids_are_stable_across_insertions() {
        let mut doc = Document::new("0123456789");
        let late = doc.add_element(container(8, 9)).unwrap();
        let early = doc.add_element(container(1, 2)).unwrap();
        assert_eq!(doc.element(late).start(), 8);
        assert_eq!(doc.element(early).start(), 1);
        assert_eq!(doc.ids().collect::<Vec<_>>(), vec![early, late]);
    }

    #[test]
    fn test_add_element_rejects_start_past_buffer() {
        let mut doc = Document::new("abc");
        let err = doc.add_element(container(3, 4)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MalformedElement {
                start: 3,
                end: 4,
                len: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_add_element_rejects_end_past_buffer() {
        let mut doc = Document::new("abc");
        let err = doc.add_element(container(1, 4)).unwrap_err();
        assert!(matches!(err, EngineError::MalformedElement { .. }));
    }

    #[test]
    fn test_add_element_rejects_empty_and_inverted_ranges() {
        let mut doc = Document::new("abcdef");
        assert!(matches!(
            doc.add_element(container(2, 2)).unwrap_err(),
            EngineError::MalformedElement { .. }
        ));
        assert!(matches!(
            doc.add_element(container(4, 2)).unwrap_err(),
            EngineError::MalformedElement { .. }
        ));
    }

    #[test]
    fn test_add_element_rejects_anything_on_empty_buffer() {
        let mut doc = Document::new("");
        assert!(matches!(
            doc.add_element(container(0, 1)).unwrap_err(),
            EngineError::MalformedElement { len: 0, .. }
        ));
    }

    #[test]
    fn test_add_element_rejects_overlap_across_kinds() {
        let mut doc = Document::new("# T <!-- slide-container -->");
        doc.add_element(title(0, 28)).unwrap();
        let err = doc.add_element(container(4, 28)).unwrap_err();
        match err {
            EngineError::OverlappingElements {
                candidate,
                existing,
            } => {
                assert_eq!(candidate.kind(), &ElementKind::Container);
                assert!(existing.kind().is_title());
            }
            other => panic!("expected overlap, got {other:?}"),
        }
        assert_eq!(doc.element_count(), 1);
    }

    #[test]
    fn test_add_element_rejects_containing_range() {
        let mut doc = Document::new("0123456789");
        doc.add_element(container(4, 6)).unwrap();
        assert!(matches!(
            doc.add_element(container(2, 8)).unwrap_err(),
            EngineError::OverlappingElements { .. }
        ));
    }

    #[test]
    fn test_add_element_accepts_adjacent_ranges() {
        let mut doc = Document::new("0123456789");
        doc.add_element(container(0, 5)).unwrap();
        doc.add_element(container(5, 10)).unwrap();
        assert_eq!(doc.element_count(), 2);
    }

    #[test]
    fn test_replace_range_shifts_later_elements() {
        let mut doc = Document::new("aaXXbbYYcc");
        let first = doc.add_element(container(2, 4)).unwrap();
        let second = doc.add_element(container(6, 8)).unwrap();

        doc.replace_range(0, 2, "");

        assert_eq!(doc.text(), "XXbbYYcc");
        assert_eq!(doc.element(first).range(), 0..2);
        assert_eq!(doc.element(second).range(), 4..6);
    }

    #[test]
    fn test_replace_range_does_not_shift_replaced_element() {
        let mut doc = Document::new("XXYY");
        let first = doc.add_element(container(0, 2)).unwrap();
        let second = doc.add_element(container(2, 4)).unwrap();

        doc.replace_range(0, 2, "long");

        assert_eq!(doc.text(), "longYY");
        assert_eq!(doc.element(first).range(), 0..2);
        assert_eq!(doc.element(second).range(), 4..6);
    }

    #[test]
    fn test_insertion_pushes_element_at_same_offset() {
        let mut doc = Document::new("ab# T");
        let heading = doc.add_element(title(2, 5)).unwrap();

        doc.replace_range(2, 2, "]\n");

        assert_eq!(doc.text(), "ab]\n# T");
        assert_eq!(doc.element(heading).range(), 4..7);
    }

    #[test]
    fn test_replace_range_leaves_earlier_elements() {
        let mut doc = Document::new("XX....");
        let first = doc.add_element(container(0, 2)).unwrap();
        doc.replace_range(4, 5, "-----");
        assert_eq!(doc.element(first).range(), 0..2);
    }

    #[test]
    fn test_append_never_shifts() {
        let mut doc = Document::new("XX");
        let first = doc.add_element(container(0, 2)).unwrap();
        doc.append("\n]\n");
        assert_eq!(doc.text(), "XX\n]\n");
        assert_eq!(doc.element(first).range(), 0..2);
    }

    #[test]
    fn test_find_and_find_last() {
        let mut doc = Document::new("# T\nXX\n# T\nXX");
        let t1 = doc.add_element(title(0, 3)).unwrap();
        let c1 = doc.add_element(container(4, 6)).unwrap();
        let t2 = doc.add_element(title(7, 10)).unwrap();
        doc.add_element(container(11, 13)).unwrap();

        assert_eq!(doc.find(|e| e.kind().is_title()), Some(t1));
        assert_eq!(doc.find_last(|e| e.kind().is_title()), Some(t2));
        assert_eq!(
            doc.find(|e| e.kind().affects_grid() && e.start() > 0),
            Some(c1)
        );
        assert_eq!(doc.find(|e| e.start() > 100), None);
    }
}
