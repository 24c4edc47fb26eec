use std::time::Instant;

use crate::apply;
use crate::error::VariatoResult;
use crate::host::HostDocument;
use crate::measure::Measurement;
use crate::model::VariationSet;
use crate::notify::{Gate, Throttle, ThrottleOpts};
use crate::resolve::{BoundaryPolicy, Resolution, resolve};

/// Options for one bound engine instance.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineOpts {
    /// Exact-boundary matching policy.
    pub boundary: BoundaryPolicy,
    /// Rate limiting of the remeasure/resolve cycle.
    pub throttle: ThrottleOpts,
}

/// Result of one remeasure/resolve cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    pub resolution: Resolution,
    pub measurement: Measurement,
}

/// Throttled-entry-point result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CycleGate {
    /// The cycle ran.
    Ran(Outcome),
    /// A trailing cycle is armed; call [`Engine::deadline`] at this instant.
    Deferred(Instant),
    /// Swallowed by the rate limiter.
    Suppressed,
}

/// Breakpoint engine bound to one host document.
///
/// Instances are fully independent; all cycle work is synchronous inside
/// the calling entry point. Construction validates the variation list, so
/// configuration mistakes fail before anything is written to the host.
pub struct Engine<D: HostDocument> {
    doc: D,
    set: VariationSet,
    opts: EngineOpts,
    throttle: Throttle,
    measurement: Option<Measurement>,
}

impl<D: HostDocument> Engine<D> {
    pub fn new(doc: D, set: VariationSet, opts: EngineOpts) -> VariatoResult<Self> {
        set.validate()?;
        Ok(Self {
            doc,
            set,
            opts,
            throttle: Throttle::new(opts.throttle),
            measurement: None,
        })
    }

    /// First entry point after binding: one immediate unthrottled
    /// measurement (capturing the intrinsic size) and one immediate
    /// resolution.
    pub fn init(&mut self) -> VariatoResult<Outcome> {
        self.resolve_now()
    }

    /// Replace the whole variation list.
    ///
    /// Validates eagerly but does not re-resolve; the next cycle picks up
    /// the new list. Callers wanting an immediate re-application trigger a
    /// cycle themselves.
    pub fn set_variations(&mut self, set: VariationSet) -> VariatoResult<()> {
        set.validate()?;
        self.set = set;
        Ok(())
    }

    /// Throttled size-change trigger.
    pub fn resize(&mut self, now: Instant) -> VariatoResult<CycleGate> {
        let gate = self.throttle.on_trigger(now);
        self.gated(gate)
    }

    /// Timer expiry for an armed trailing cycle.
    pub fn deadline(&mut self, now: Instant) -> VariatoResult<CycleGate> {
        let gate = self.throttle.on_deadline(now);
        self.gated(gate)
    }

    /// Drop any armed trailing cycle and reset throttle state.
    pub fn cancel_pending(&mut self) {
        self.throttle.cancel();
    }

    /// The armed trailing deadline the host should schedule a timer for.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.throttle.pending_deadline()
    }

    /// Unthrottled remeasure-then-resolve cycle.
    ///
    /// Applies the default variation strictly before any matched
    /// variation's overrides; a cycle that fails mid-way leaves previously
    /// applied attributes in place.
    #[tracing::instrument(skip(self))]
    pub fn resolve_now(&mut self) -> VariatoResult<Outcome> {
        let measurement = self.remeasure()?;
        let width = measurement.current.width;
        let resolution = resolve(&self.set, width, self.opts.boundary)?;

        match resolution {
            Resolution::DefaultOnly => {
                let default = self.set.default_entry()?;
                apply::apply_set(&mut self.doc, &default.data);
            }
            Resolution::Matched(idx) => {
                let default = self.set.default_entry()?;
                apply::apply_set(&mut self.doc, &default.data);
                apply::apply_set(&mut self.doc, &self.set.entries[idx].data);
            }
            Resolution::Unchanged => {}
        }

        tracing::debug!(?resolution, width, "cycle resolved");
        Ok(Outcome {
            resolution,
            measurement,
        })
    }

    /// Latest measurement, if a cycle has run.
    pub fn measurement(&self) -> Option<&Measurement> {
        self.measurement.as_ref()
    }

    /// The active variation list.
    pub fn variations(&self) -> &VariationSet {
        &self.set
    }

    pub fn doc(&self) -> &D {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn into_doc(self) -> D {
        self.doc
    }

    fn gated(&mut self, gate: Gate) -> VariatoResult<CycleGate> {
        match gate {
            Gate::Run => Ok(CycleGate::Ran(self.resolve_now()?)),
            Gate::Deferred(deadline) => Ok(CycleGate::Deferred(deadline)),
            Gate::Suppressed => Ok(CycleGate::Suppressed),
        }
    }

    fn remeasure(&mut self) -> VariatoResult<Measurement> {
        let rendered = self.doc.rendered_size()?;
        let measurement = match self.measurement {
            Some(prev) => prev.advanced(rendered),
            None => Measurement::first(self.doc.intrinsic_size()?, rendered)?,
        };
        self.measurement = Some(measurement);
        Ok(measurement)
    }
}
