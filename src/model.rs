use std::collections::BTreeMap;
use std::str::FromStr;

use kurbo::Vec2;

use crate::error::{VariatoError, VariatoResult};

/// Width key of one variation entry.
///
/// Authored as `"default"` or `">"` followed by an integer pixel
/// threshold; the threshold is the entry's lower bound, with the upper
/// bound taken from the following non-default entry (the last entry is
/// unbounded above).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BreakpointKey {
    /// The always-applied baseline variation.
    Default,
    /// Matches widths above this threshold (in CSS pixels).
    Above(u32),
}

impl FromStr for BreakpointKey {
    type Err = VariatoError;

    fn from_str(s: &str) -> VariatoResult<Self> {
        let s = s.trim();
        if s == "default" {
            return Ok(Self::Default);
        }
        let Some(threshold) = s.strip_prefix('>') else {
            return Err(VariatoError::configuration(format!(
                "breakpoint key '{s}' must be 'default' or '>' followed by a pixel value"
            )));
        };
        let px = threshold.trim().parse::<u32>().map_err(|_| {
            VariatoError::configuration(format!(
                "breakpoint key '{s}' has a non-numeric threshold"
            ))
        })?;
        Ok(Self::Above(px))
    }
}

impl TryFrom<String> for BreakpointKey {
    type Error = VariatoError;

    fn try_from(s: String) -> VariatoResult<Self> {
        s.parse()
    }
}

impl From<BreakpointKey> for String {
    fn from(key: BreakpointKey) -> Self {
        match key {
            BreakpointKey::Default => "default".to_string(),
            BreakpointKey::Above(px) => format!(">{px}"),
        }
    }
}

/// Attribute overrides for one element within one variation.
///
/// The attribute set is a closed enumeration; unknown keys in authored
/// JSON are ignored. `x`/`y` are coerced into a single translate offset,
/// `display`/`fill` are written as style properties, `transform` is an
/// existing expression the translate is merged into.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

impl ElementPatch {
    /// The requested translate offset, when either axis is present.
    ///
    /// An absent axis defaults to 0.
    pub fn translate(&self) -> Option<Vec2> {
        if self.x.is_none() && self.y.is_none() {
            return None;
        }
        Some(Vec2::new(self.x.unwrap_or(0.0), self.y.unwrap_or(0.0)))
    }
}

/// One entry in the ordered variation list.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VariationSpec {
    pub key: BreakpointKey,
    /// Element-id keyed attribute patches, stable iteration order.
    pub data: BTreeMap<String, ElementPatch>,
}

/// The ordered variation configuration for one document.
///
/// Callers supply non-default entries pre-sorted by ascending threshold;
/// `validate` turns ordering mistakes and a missing or duplicated default
/// into load-time configuration errors instead of silent matching gaps.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VariationSet {
    pub entries: Vec<VariationSpec>,
}

impl VariationSet {
    pub fn new(entries: Vec<VariationSpec>) -> VariatoResult<Self> {
        let set = Self { entries };
        set.validate()?;
        Ok(set)
    }

    pub fn validate(&self) -> VariatoResult<()> {
        if self.entries.is_empty() {
            return Err(VariatoError::configuration(
                "variation set must have at least one entry",
            ));
        }

        let defaults = self
            .entries
            .iter()
            .filter(|e| e.key == BreakpointKey::Default)
            .count();
        if defaults == 0 {
            return Err(VariatoError::configuration(
                "variation set must contain a 'default' entry",
            ));
        }
        if defaults > 1 {
            return Err(VariatoError::configuration(
                "variation set must contain exactly one 'default' entry",
            ));
        }

        let mut prev: Option<u32> = None;
        for entry in &self.entries {
            let BreakpointKey::Above(px) = entry.key else {
                continue;
            };
            if let Some(prev) = prev
                && px <= prev
            {
                return Err(VariatoError::configuration(format!(
                    "breakpoint '>{px}' must be greater than preceding '>{prev}'"
                )));
            }
            prev = Some(px);
        }

        Ok(())
    }

    /// The single `default` entry.
    pub fn default_entry(&self) -> VariatoResult<&VariationSpec> {
        self.entries
            .iter()
            .find(|e| e.key == BreakpointKey::Default)
            .ok_or_else(|| {
                VariatoError::configuration("variation set has no 'default' entry")
            })
    }

    /// Non-default entries in list order, with their raw list index and
    /// threshold.
    pub fn breakpoints(&self) -> impl Iterator<Item = (usize, u32, &VariationSpec)> {
        self.entries.iter().enumerate().filter_map(|(i, e)| {
            if let BreakpointKey::Above(px) = e.key {
                Some((i, px, e))
            } else {
                None
            }
        })
    }

    /// The largest configured threshold, if any non-default entry exists.
    pub fn last_threshold(&self) -> Option<u32> {
        self.breakpoints().map(|(_, px, _)| px).last()
    }
}
