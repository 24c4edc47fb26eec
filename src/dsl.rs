use std::collections::BTreeMap;

use crate::{
    error::{VariatoError, VariatoResult},
    model::{BreakpointKey, ElementPatch, VariationSet, VariationSpec},
};

pub struct VariationSetBuilder {
    entries: Vec<VariationSpec>,
}

impl VariationSetBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn variation(mut self, spec: VariationSpec) -> Self {
        self.entries.push(spec);
        self
    }

    pub fn build(self) -> VariatoResult<VariationSet> {
        VariationSet::new(self.entries)
    }
}

impl Default for VariationSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct VariationBuilder {
    key: BreakpointKey,
    data: BTreeMap<String, ElementPatch>,
}

impl VariationBuilder {
    /// Start the always-applied baseline variation.
    pub fn baseline() -> Self {
        Self {
            key: BreakpointKey::Default,
            data: BTreeMap::new(),
        }
    }

    /// Start a variation matching widths above `px`.
    pub fn above(px: u32) -> Self {
        Self {
            key: BreakpointKey::Above(px),
            data: BTreeMap::new(),
        }
    }

    pub fn element(mut self, id: impl Into<String>, patch: ElementPatch) -> VariatoResult<Self> {
        let id = id.into();
        if self.data.contains_key(&id) {
            return Err(VariatoError::configuration(format!(
                "duplicate element id '{id}' in variation"
            )));
        }
        self.data.insert(id, patch);
        Ok(self)
    }

    pub fn build(self) -> VariationSpec {
        VariationSpec {
            key: self.key,
            data: self.data,
        }
    }
}

pub struct PatchBuilder {
    patch: ElementPatch,
}

impl PatchBuilder {
    pub fn new() -> Self {
        Self {
            patch: ElementPatch::default(),
        }
    }

    pub fn x(mut self, x: f64) -> Self {
        self.patch.x = Some(x);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.patch.y = Some(y);
        self
    }

    pub fn display(mut self, display: impl Into<String>) -> Self {
        self.patch.display = Some(display.into());
        self
    }

    pub fn fill(mut self, fill: impl Into<String>) -> Self {
        self.patch.fill = Some(fill.into());
        self
    }

    pub fn transform(mut self, transform: impl Into<String>) -> Self {
        self.patch.transform = Some(transform.into());
        self
    }

    pub fn build(self) -> ElementPatch {
        self.patch
    }
}

impl Default for PatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_validated_set() {
        let set = VariationSetBuilder::new()
            .variation(
                VariationBuilder::baseline()
                    .element("logo", PatchBuilder::new().fill("red").build())
                    .unwrap()
                    .build(),
            )
            .variation(
                VariationBuilder::above(400)
                    .element("logo", PatchBuilder::new().fill("blue").x(10.0).build())
                    .unwrap()
                    .build(),
            )
            .build()
            .unwrap();

        assert_eq!(set.entries.len(), 2);
        assert_eq!(set.last_threshold(), Some(400));
    }

    #[test]
    fn rejects_duplicate_element_id() {
        let b = VariationBuilder::baseline()
            .element("logo", PatchBuilder::new().fill("red").build())
            .unwrap();
        assert!(
            b.element("logo", PatchBuilder::new().fill("blue").build())
                .is_err()
        );
    }

    #[test]
    fn build_runs_set_validation() {
        let result = VariationSetBuilder::new()
            .variation(VariationBuilder::above(400).build())
            .build();
        assert!(result.is_err());
    }
}
