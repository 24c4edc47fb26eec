use std::time::{Duration, Instant};

/// Rate-limit configuration for the remeasure/resolve cycle.
///
/// `leading` and `trailing` are independent: leading gives immediate
/// feedback at the start of a burst, trailing guarantees a final run after
/// the burst settles. With both disabled the throttle suppresses every
/// trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrottleOpts {
    /// Minimum gap between wrapped-cycle invocations.
    pub interval: Duration,
    /// Run on the first trigger of a burst.
    pub leading: bool,
    /// Run once more after the burst stops.
    pub trailing: bool,
}

impl Default for ThrottleOpts {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            leading: true,
            trailing: true,
        }
    }
}

/// Decision for one trigger or timer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// Invoke the wrapped cycle now.
    Run,
    /// A trailing invocation is armed; the host should call
    /// [`Throttle::on_deadline`] at this instant.
    Deferred(Instant),
    /// Swallowed; an earlier event already covers this one.
    Suppressed,
}

/// Gating state machine for the change notifier.
///
/// Pure scheduling policy: the platform timer stays outside. The host
/// feeds size-change triggers into [`on_trigger`](Self::on_trigger) and
/// timer expiries into [`on_deadline`](Self::on_deadline); `Gate::Run` is
/// the only signal to execute the wrapped cycle.
#[derive(Clone, Debug)]
pub struct Throttle {
    opts: ThrottleOpts,
    window_start: Option<Instant>,
    pending: Option<Instant>,
}

impl Throttle {
    pub fn new(opts: ThrottleOpts) -> Self {
        Self {
            opts,
            window_start: None,
            pending: None,
        }
    }

    /// Feed one size-change trigger at `now`.
    pub fn on_trigger(&mut self, now: Instant) -> Gate {
        let fresh = match self.window_start {
            None => true,
            Some(start) => now.duration_since(start) >= self.opts.interval,
        };

        if fresh {
            self.window_start = Some(now);
            self.pending = None;
            if self.opts.leading {
                return Gate::Run;
            }
            if self.opts.trailing {
                let deadline = now + self.opts.interval;
                self.pending = Some(deadline);
                return Gate::Deferred(deadline);
            }
            return Gate::Suppressed;
        }

        // Inside the current window.
        if self.opts.trailing {
            let start = self.window_start.unwrap_or(now);
            let deadline = start + self.opts.interval;
            let newly_armed = self.pending.is_none();
            self.pending = Some(deadline);
            if newly_armed {
                return Gate::Deferred(deadline);
            }
        }
        Gate::Suppressed
    }

    /// Feed a timer expiry at `now`.
    ///
    /// Returns `Run` when an armed trailing invocation is due, `Deferred`
    /// when the timer fired early and must be re-armed, `Suppressed` when
    /// nothing is pending (e.g. after a cancel).
    pub fn on_deadline(&mut self, now: Instant) -> Gate {
        match self.pending {
            Some(deadline) if now >= deadline => {
                self.pending = None;
                self.window_start = Some(now);
                Gate::Run
            }
            Some(deadline) => Gate::Deferred(deadline),
            None => Gate::Suppressed,
        }
    }

    /// Drop any armed trailing invocation and reset timing state; the next
    /// trigger starts a fresh burst.
    pub fn cancel(&mut self) {
        self.window_start = None;
        self.pending = None;
    }

    /// The armed trailing deadline, if any.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.pending
    }
}
