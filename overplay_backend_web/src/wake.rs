// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout` wake-ups.
//!
//! The engine keeps its timers as deadlines; the page only ever has one
//! `setTimeout` outstanding, for the earliest of them. [`Wake::schedule`]
//! cancels the pending timeout before registering a new one, so a stale
//! callback can never fire after its deadline moved.

use alloc::boxed::Box;

use overplay_core::time::HostTime;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods; the timer
// callback runs often and never needs the Window object itself.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(handler: &JsValue, millis: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

pub(crate) type WakeClosure = Closure<dyn FnMut()>;

/// The single outstanding `setTimeout` for the engine's next deadline.
pub(crate) struct Wake {
    closure: Option<WakeClosure>,
    /// Deadline and timeout id of the registered callback.
    pending: Option<(HostTime, i32)>,
}

impl core::fmt::Debug for Wake {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Wake")
            .field("pending", &self.pending.map(|(at, _)| at))
            .finish_non_exhaustive()
    }
}

impl Wake {
    pub(crate) const fn new() -> Self {
        Self {
            closure: None,
            pending: None,
        }
    }

    /// Sets the callback every timeout invokes.
    pub(crate) fn set_callback(&mut self, callback: impl FnMut() + 'static) {
        self.cancel();
        self.closure = Some(Closure::wrap(Box::new(callback) as Box<dyn FnMut()>));
    }

    /// Arranges one callback at `deadline`, replacing any pending one.
    ///
    /// Scheduling the deadline that is already pending keeps the registered
    /// timeout.
    pub(crate) fn schedule(&mut self, now: HostTime, deadline: Option<HostTime>) {
        if self.pending.map(|(at, _)| at) == deadline {
            return;
        }
        self.cancel();
        let (Some(at), Some(closure)) = (deadline, &self.closure) else {
            return;
        };
        let id = set_timeout(closure.as_ref(), delay_millis(now, at));
        self.pending = Some((at, id));
    }

    /// Records that the pending timeout has run.
    pub(crate) fn fired(&mut self) {
        self.pending = None;
    }

    /// Clears the pending timeout, if any.
    pub(crate) fn cancel(&mut self) {
        if let Some((_, id)) = self.pending.take() {
            clear_timeout(id);
        }
    }

    /// Cancels and drops the callback.
    pub(crate) fn shutdown(&mut self) {
        self.cancel();
        self.closure.take();
    }
}

/// Whole milliseconds from `now` until `at`, rounded up so the callback
/// never runs before the deadline.
pub(crate) fn delay_millis(now: HostTime, at: HostTime) -> i32 {
    let micros = (at - now).ticks();
    i32::try_from(micros.div_ceil(1000)).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_rounds_up_to_whole_millis() {
        assert_eq!(delay_millis(HostTime(0), HostTime(1_000_000)), 1000, "exact");
        assert_eq!(delay_millis(HostTime(0), HostTime(1_000_001)), 1001, "rounded up");
        assert_eq!(delay_millis(HostTime(0), HostTime(1)), 1, "sub-millisecond");
    }

    #[test]
    fn past_deadlines_fire_immediately() {
        assert_eq!(delay_millis(HostTime(5_000), HostTime(2_000)), 0, "overdue");
        assert_eq!(delay_millis(HostTime(5_000), HostTime(5_000)), 0, "due now");
    }

    #[test]
    fn huge_delays_saturate() {
        assert_eq!(delay_millis(HostTime(0), HostTime(u64::MAX)), i32::MAX, "clamped");
    }
}
