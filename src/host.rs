use std::collections::BTreeMap;

use crate::error::VariatoResult;
use crate::measure::Size;

/// Synchronous mutation sink for one named element of the host document.
///
/// Both writes are plain property assignments on the live element; neither
/// may block or fail. Writes for an element that has disappeared between
/// lookup and write are the host's concern.
pub trait HostElement {
    /// Assign a style property (e.g. `display`, `fill`).
    fn set_style(&mut self, prop: &str, value: &str);
    /// Assign a raw attribute (e.g. `transform`).
    fn set_attribute(&mut self, name: &str, value: &str);
}

/// One live vector-graphics document bound to an engine instance.
///
/// The document supplies element lookup (mutation sink) and the two
/// measurement queries. Lookup returning `None` is not an error: patches
/// for unknown ids are skipped silently.
pub trait HostDocument {
    type Element: HostElement;

    /// Resolve an element by id, or `None` when it does not exist.
    fn element_mut(&mut self, id: &str) -> Option<&mut Self::Element>;

    /// Current rendered width/height in CSS pixels, queryable at any time.
    fn rendered_size(&self) -> VariatoResult<Size>;

    /// Intrinsic (authoring-time) width/height; captured once by the engine.
    fn intrinsic_size(&self) -> VariatoResult<Size>;
}

/// One recorded write against a [`MemoryElement`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Write {
    Style(String, String),
    Attribute(String, String),
}

/// In-memory element for tests and debugging.
///
/// Keeps last-write-wins state plus the full write history in order.
#[derive(Clone, Debug, Default)]
pub struct MemoryElement {
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    writes: Vec<Write>,
}

impl MemoryElement {
    pub fn style(&self, prop: &str) -> Option<&str> {
        self.styles.get(prop).map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All writes in application order.
    pub fn writes(&self) -> &[Write] {
        &self.writes
    }
}

impl HostElement for MemoryElement {
    fn set_style(&mut self, prop: &str, value: &str) {
        self.styles.insert(prop.to_string(), value.to_string());
        self.writes
            .push(Write::Style(prop.to_string(), value.to_string()));
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
        self.writes
            .push(Write::Attribute(name.to_string(), value.to_string()));
    }
}

/// In-memory document for tests and debugging.
#[derive(Clone, Debug)]
pub struct MemoryDocument {
    elements: BTreeMap<String, MemoryElement>,
    intrinsic: Size,
    rendered: Size,
}

impl MemoryDocument {
    /// Create a document with the given intrinsic size; the rendered size
    /// starts equal to it.
    pub fn new(intrinsic: Size) -> Self {
        Self {
            elements: BTreeMap::new(),
            intrinsic,
            rendered: intrinsic,
        }
    }

    /// Add an empty element, returning the document for chaining.
    pub fn with_element(mut self, id: impl Into<String>) -> Self {
        self.elements.insert(id.into(), MemoryElement::default());
        self
    }

    /// Simulate a container resize.
    pub fn set_rendered_size(&mut self, size: Size) {
        self.rendered = size;
    }

    pub fn element(&self, id: &str) -> Option<&MemoryElement> {
        self.elements.get(id)
    }
}

impl HostDocument for MemoryDocument {
    type Element = MemoryElement;

    fn element_mut(&mut self, id: &str) -> Option<&mut MemoryElement> {
        self.elements.get_mut(id)
    }

    fn rendered_size(&self) -> VariatoResult<Size> {
        Ok(self.rendered)
    }

    fn intrinsic_size(&self) -> VariatoResult<Size> {
        Ok(self.intrinsic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_element_records_state_and_history() {
        let mut doc = MemoryDocument::new(Size::new(800.0, 600.0).unwrap()).with_element("a");

        let el = doc.element_mut("a").unwrap();
        el.set_style("fill", "red");
        el.set_style("fill", "blue");
        el.set_attribute("transform", "translate(1,2)");

        let el = doc.element("a").unwrap();
        assert_eq!(el.style("fill"), Some("blue"));
        assert_eq!(el.attribute("transform"), Some("translate(1,2)"));
        assert_eq!(el.writes().len(), 3);
    }

    #[test]
    fn missing_element_resolves_to_none() {
        let mut doc = MemoryDocument::new(Size::new(800.0, 600.0).unwrap());
        assert!(doc.element_mut("ghost").is_none());
    }

    #[test]
    fn rendered_size_tracks_resizes() {
        let mut doc = MemoryDocument::new(Size::new(800.0, 600.0).unwrap());
        assert_eq!(doc.rendered_size().unwrap().width, 800.0);

        doc.set_rendered_size(Size::new(400.0, 300.0).unwrap());
        assert_eq!(doc.rendered_size().unwrap().width, 400.0);
        assert_eq!(doc.intrinsic_size().unwrap().width, 800.0);
    }
}
