// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace sink.

use alloc::format;
use alloc::string::String;

use overplay_core::lifecycle::Transition;
use overplay_core::time::{HostTime, Timebase};
use overplay_core::trace::{
    CommandEvent, HudEvent, IdleEvent, LifecycleEvent, PanelEvent, TimerFiredEvent, TraceSink,
};
use wasm_bindgen::JsValue;

/// A [`TraceSink`] that writes one `console.debug` line per event.
///
/// Installed automatically when the `trace` feature is enabled.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleSink {
    timebase: Timebase,
}

impl ConsoleSink {
    /// Creates a sink that formats times with `timebase`.
    #[must_use]
    pub fn new(timebase: Timebase) -> Self {
        Self { timebase }
    }

    fn millis(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1_000_000.0
    }

    fn emit(&self, now: HostTime, line: &str) {
        let text = format!("[overplay {:.1}ms] {line}", self.millis(now));
        web_sys::console::debug_1(&JsValue::from_str(&text));
    }
}

fn describe(transition: Transition) -> String {
    match transition {
        Transition::Activated(id) => format!("activated {}", id.0),
        Transition::Deactivated(id) => format!("deactivated {}", id.0),
        Transition::Changed { from, to } => format!("changed {} -> {}", from.0, to.0),
        Transition::Unchanged => String::from("unchanged"),
    }
}

impl TraceSink for ConsoleSink {
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.emit(e.now, &format!("lifecycle {}", describe(e.transition)));
    }

    fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
        let late = self.millis(e.now) - self.millis(e.deadline);
        self.emit(e.now, &format!("timer {} late={late:.1}ms", e.kind.as_str()));
    }

    fn on_hud(&mut self, e: &HudEvent) {
        self.emit(e.now, &format!("hud {}", e.state.as_str()));
    }

    fn on_panel(&mut self, e: &PanelEvent) {
        self.emit(e.now, &format!("panel {}", e.visibility.as_str()));
    }

    fn on_idle(&mut self, e: &IdleEvent) {
        self.emit(e.now, &format!("idle {}", e.state.as_str()));
    }

    fn on_command(&mut self, e: &CommandEvent) {
        self.emit(
            e.now,
            &format!("command {} video={}", e.command.as_str(), e.media.0),
        );
    }
}
