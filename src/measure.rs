use crate::error::{VariatoError, VariatoResult};

/// Width/height in CSS pixels as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl Size {
    /// Create a validated size with finite, non-negative dimensions.
    pub fn new(width: f64, height: f64) -> VariatoResult<Self> {
        if !width.is_finite() || !height.is_finite() {
            return Err(VariatoError::measurement("size must be finite"));
        }
        if width < 0.0 || height < 0.0 {
            return Err(VariatoError::measurement("size must be non-negative"));
        }
        Ok(Self { width, height })
    }
}

/// One resolution cycle's view of the document dimensions.
///
/// `initial` is the intrinsic (authoring-time) size, captured once when the
/// engine first measures and never updated; `current` is replaced on every
/// remeasure. Each cycle produces a fresh `Measurement` value rather than
/// mutating shared state.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Measurement {
    /// Intrinsic size captured at first measurement.
    pub initial: Size,
    /// Rendered size as of the latest remeasure.
    pub current: Size,
}

impl Measurement {
    /// First measurement: captures the intrinsic size and the rendered size.
    ///
    /// The intrinsic width must be positive so the scale factor is defined.
    pub fn first(intrinsic: Size, rendered: Size) -> VariatoResult<Self> {
        if intrinsic.width <= 0.0 {
            return Err(VariatoError::measurement(
                "intrinsic width must be > 0 to derive a scale factor",
            ));
        }
        Ok(Self {
            initial: intrinsic,
            current: rendered,
        })
    }

    /// Subsequent remeasure: keeps `initial`, replaces `current`.
    pub fn advanced(self, rendered: Size) -> Self {
        Self {
            initial: self.initial,
            current: rendered,
        }
    }

    /// Ratio of current rendered width to intrinsic width.
    ///
    /// Informational; matching operates on the raw current width.
    pub fn scale_x(&self) -> f64 {
        self.current.width / self.initial.width
    }
}
