use std::collections::BTreeMap;

use crate::host::{HostDocument, HostElement};
use crate::model::ElementPatch;
use crate::transform::compose;

/// Apply every element patch of one variation, in stable element-id order.
///
/// Dispatching variations sequentially through this function gives
/// last-write-wins per attribute per element.
pub fn apply_set<D: HostDocument>(doc: &mut D, data: &BTreeMap<String, ElementPatch>) {
    for (id, patch) in data {
        apply_patch(doc, id, patch);
    }
}

/// Apply one element's patch.
///
/// A lookup miss skips the whole patch with no side effect. `display` and
/// `fill` are written immediately as style properties; `x`/`y` fold into a
/// single translate offset that is merged into the patch's `transform`
/// expression, and the composed transform is written as an attribute only
/// when non-empty.
pub fn apply_patch<D: HostDocument>(doc: &mut D, id: &str, patch: &ElementPatch) {
    let Some(element) = doc.element_mut(id) else {
        tracing::debug!(id, "element not in document, patch skipped");
        return;
    };

    if let Some(display) = &patch.display {
        element.set_style("display", display);
    }
    if let Some(fill) = &patch.fill {
        element.set_style("fill", fill);
    }

    let existing = patch.transform.as_deref().unwrap_or("");
    let composed = compose(existing, patch.translate());
    if !composed.is_empty() {
        element.set_attribute("transform", &composed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryDocument, Write};
    use crate::measure::Size;

    fn doc() -> MemoryDocument {
        MemoryDocument::new(Size::new(800.0, 600.0).unwrap()).with_element("a")
    }

    #[test]
    fn lookup_miss_is_silent() {
        let mut doc = doc();
        let patch = ElementPatch {
            fill: Some("red".to_string()),
            ..ElementPatch::default()
        };
        apply_patch(&mut doc, "ghost", &patch);
        assert!(doc.element("a").unwrap().writes().is_empty());
    }

    #[test]
    fn style_keys_write_style_properties() {
        let mut doc = doc();
        let patch = ElementPatch {
            display: Some("none".to_string()),
            fill: Some("red".to_string()),
            ..ElementPatch::default()
        };
        apply_patch(&mut doc, "a", &patch);

        let el = doc.element("a").unwrap();
        assert_eq!(el.style("display"), Some("none"));
        assert_eq!(el.style("fill"), Some("red"));
        assert_eq!(el.attribute("transform"), None);
    }

    #[test]
    fn lone_x_translates_with_zero_y() {
        let mut doc = doc();
        let patch = ElementPatch {
            x: Some(10.0),
            ..ElementPatch::default()
        };
        apply_patch(&mut doc, "a", &patch);
        assert_eq!(
            doc.element("a").unwrap().attribute("transform"),
            Some("translate(10,0)")
        );
    }

    #[test]
    fn translate_merges_into_existing_transform() {
        let mut doc = doc();
        let patch = ElementPatch {
            x: Some(10.0),
            y: Some(5.0),
            transform: Some("rotate(45)".to_string()),
            ..ElementPatch::default()
        };
        apply_patch(&mut doc, "a", &patch);
        assert_eq!(
            doc.element("a").unwrap().attribute("transform"),
            Some("rotate(45) translate(10,5)")
        );
    }

    #[test]
    fn transform_without_offset_is_written_verbatim() {
        let mut doc = doc();
        let patch = ElementPatch {
            transform: Some("scale(2)".to_string()),
            ..ElementPatch::default()
        };
        apply_patch(&mut doc, "a", &patch);
        assert_eq!(
            doc.element("a").unwrap().attribute("transform"),
            Some("scale(2)")
        );
    }

    #[test]
    fn empty_patch_writes_nothing() {
        let mut doc = doc();
        apply_patch(&mut doc, "a", &ElementPatch::default());
        assert!(doc.element("a").unwrap().writes().is_empty());
    }

    #[test]
    fn later_set_overrides_earlier_per_attribute() {
        let mut doc = doc();
        let mut first = BTreeMap::new();
        first.insert(
            "a".to_string(),
            ElementPatch {
                fill: Some("red".to_string()),
                ..ElementPatch::default()
            },
        );
        let mut second = BTreeMap::new();
        second.insert(
            "a".to_string(),
            ElementPatch {
                fill: Some("blue".to_string()),
                ..ElementPatch::default()
            },
        );

        apply_set(&mut doc, &first);
        apply_set(&mut doc, &second);

        let el = doc.element("a").unwrap();
        assert_eq!(el.style("fill"), Some("blue"));
        assert_eq!(
            el.writes(),
            &[
                Write::Style("fill".to_string(), "red".to_string()),
                Write::Style("fill".to_string(), "blue".to_string()),
            ]
        );
    }
}
