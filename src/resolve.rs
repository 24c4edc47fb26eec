use crate::error::VariatoResult;
use crate::model::VariationSet;

/// How widths sitting exactly on a threshold are matched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// `min < width < max`. Inherited from the source behavior: a width
    /// exactly on a threshold matches neither adjacent range and the cycle
    /// leaves prior state in place.
    Exclusive,
    /// `min <= width < max`, the conventional choice. Every boundary width
    /// belongs to exactly one range.
    #[default]
    HalfOpen,
}

/// Effective interval of one non-default variation, in CSS pixels.
///
/// Ephemeral: derived per resolution cycle from the entry's own threshold
/// (the lower bound) and the following non-default entry's threshold (the
/// upper bound; `None` for the last entry, which is unbounded above).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidthRange {
    pub min: u32,
    pub max: Option<u32>,
}

impl WidthRange {
    pub fn contains(self, width: f64, policy: BoundaryPolicy) -> bool {
        let min = f64::from(self.min);
        let above_min = match policy {
            BoundaryPolicy::Exclusive => width > min,
            BoundaryPolicy::HalfOpen => width >= min,
        };
        let below_max = match self.max {
            None => true,
            Some(max) => width < f64::from(max),
        };
        above_min && below_max
    }
}

/// Outcome of one resolution cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The width sits below every configured threshold (or only a default
    /// is configured): the default is applied alone, reverting to baseline
    /// and overriding any previously matched overrides.
    DefaultOnly,
    /// The entry at this raw list index matched: the default is applied
    /// first, then the matched entry's overrides.
    Matched(usize),
    /// No range covers the width (exclusive-policy boundary hole): nothing
    /// is applied this cycle and prior state persists.
    Unchanged,
}

/// Derived `(raw index, range)` intervals for every non-default entry, in
/// list order.
pub fn ranges(set: &VariationSet) -> Vec<(usize, WidthRange)> {
    let thresholds: Vec<(usize, u32)> = set.breakpoints().map(|(idx, px, _)| (idx, px)).collect();
    thresholds
        .iter()
        .enumerate()
        .map(|(i, &(idx, min))| {
            let max = thresholds.get(i + 1).map(|&(_, next)| next);
            (idx, WidthRange { min, max })
        })
        .collect()
}

/// Select the active variation for `width`.
///
/// Pure function of its inputs; it performs no writes. A set without a
/// default entry is a configuration error surfaced here, fatal to the
/// cycle and not retried.
pub fn resolve(
    set: &VariationSet,
    width: f64,
    policy: BoundaryPolicy,
) -> VariatoResult<Resolution> {
    set.default_entry()?;

    let mut first_threshold = None;
    let mut matched = None;
    for (idx, range) in ranges(set) {
        if first_threshold.is_none() {
            first_threshold = Some(range.min);
        }
        if range.contains(width, policy) {
            matched = Some(idx);
            break;
        }
    }

    if let Some(idx) = matched {
        return Ok(Resolution::Matched(idx));
    }

    let below_first = match first_threshold {
        None => true,
        Some(min) => width < f64::from(min),
    };
    if below_first {
        Ok(Resolution::DefaultOnly)
    } else {
        Ok(Resolution::Unchanged)
    }
}
