// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the overlay engine.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! [`Overlay`](crate::overlay::Overlay) emits. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! The overlay emits:
//!
//! - a [`LifecycleEvent`] for every transition other than
//!   [`Unchanged`](crate::lifecycle::Transition::Unchanged);
//! - a [`TimerFiredEvent`] for every slot it fires;
//! - a [`CommandEvent`] for every executed command;
//! - a [`HudEvent`], [`PanelEvent`] or [`IdleEvent`] whenever the
//!   corresponding state changes.

use alloc::rc::Rc;
use core::cell::RefCell;

use crate::command::Command;
use crate::host::MediaId;
use crate::hud::HudState;
use crate::idle::IdleState;
use crate::lifecycle::Transition;
use crate::panel::PanelVisibility;
use crate::time::HostTime;
use crate::timer::TimerKind;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the tracked video changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifecycleEvent {
    /// Host time of the check.
    pub now: HostTime,
    /// What changed.
    pub transition: Transition,
}

/// Emitted when a timer slot fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerFiredEvent {
    /// Host time of the wake-up.
    pub now: HostTime,
    /// Which slot fired.
    pub kind: TimerKind,
    /// The deadline it was armed for. `now - deadline` is the wake-up lateness.
    pub deadline: HostTime,
}

/// Emitted when the HUD changes state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudEvent {
    /// Host time of the change.
    pub now: HostTime,
    /// New state.
    pub state: HudState,
}

/// Emitted when the volume panel is shown or hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelEvent {
    /// Host time of the change.
    pub now: HostTime,
    /// New visibility.
    pub visibility: PanelVisibility,
}

/// Emitted when the viewer goes idle or becomes active again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdleEvent {
    /// Host time of the change.
    pub now: HostTime,
    /// New state.
    pub state: IdleState,
}

/// Emitted when a command runs against a video.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandEvent {
    /// Host time of the keystroke.
    pub now: HostTime,
    /// The command.
    pub command: Command,
    /// The video it acted on.
    pub media: MediaId,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the overlay engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the tracked video changes.
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        _ = e;
    }

    /// Called when a timer slot fires.
    fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
        _ = e;
    }

    /// Called when the HUD changes state.
    fn on_hud(&mut self, e: &HudEvent) {
        _ = e;
    }

    /// Called when the volume panel changes visibility.
    fn on_panel(&mut self, e: &PanelEvent) {
        _ = e;
    }

    /// Called when the idle state changes.
    fn on_idle(&mut self, e: &IdleEvent) {
        _ = e;
    }

    /// Called when a command runs.
    fn on_command(&mut self, e: &CommandEvent) {
        _ = e;
    }
}

/// Shares one sink between the engine and whoever reads it back.
impl<T: TraceSink + ?Sized> TraceSink for Rc<RefCell<T>> {
    fn on_lifecycle(&mut self, e: &LifecycleEvent) {
        self.borrow_mut().on_lifecycle(e);
    }

    fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
        self.borrow_mut().on_timer_fired(e);
    }

    fn on_hud(&mut self, e: &HudEvent) {
        self.borrow_mut().on_hud(e);
    }

    fn on_panel(&mut self, e: &PanelEvent) {
        self.borrow_mut().on_panel(e);
    }

    fn on_idle(&mut self, e: &IdleEvent) {
        self.borrow_mut().on_idle(e);
    }

    fn on_command(&mut self, e: &CommandEvent) {
        self.borrow_mut().on_command(e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        Self::maybe(Some(sink))
    }

    /// Creates a tracer from an optional sink.
    #[inline]
    #[must_use]
    pub fn maybe(sink: Option<&'a mut dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::maybe(None)
    }

    /// Emits a [`LifecycleEvent`].
    #[inline]
    pub fn lifecycle(&mut self, e: &LifecycleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_lifecycle(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TimerFiredEvent`].
    #[inline]
    pub fn timer_fired(&mut self, e: &TimerFiredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_timer_fired(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`HudEvent`].
    #[inline]
    pub fn hud(&mut self, e: &HudEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_hud(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PanelEvent`].
    #[inline]
    pub fn panel(&mut self, e: &PanelEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_panel(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`IdleEvent`].
    #[inline]
    pub fn idle(&mut self, e: &IdleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_idle(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CommandEvent`].
    #[inline]
    pub fn command(&mut self, e: &CommandEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_command(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_timer() -> TimerFiredEvent {
        TimerFiredEvent {
            now: HostTime(1_004),
            kind: TimerKind::HudHide,
            deadline: HostTime(1_000),
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_timer_fired(&sample_timer());
        sink.on_hud(&HudEvent {
            now: HostTime(0),
            state: HudState::Visible,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.timer_fired(&sample_timer());
        tracer.idle(&IdleEvent {
            now: HostTime(0),
            state: IdleState::Idle,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            kinds: Vec<TimerKind>,
        }
        impl TraceSink for RecordingSink {
            fn on_timer_fired(&mut self, e: &TimerFiredEvent) {
                self.kinds.push(e.kind);
            }
        }

        let mut sink = RecordingSink { kinds: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.timer_fired(&sample_timer());
        drop(tracer);
        assert_eq!(sink.kinds, &[TimerKind::HudHide]);
    }

    #[cfg(feature = "trace")]
    #[test]
    fn shared_sink_sees_events() {
        #[derive(Default)]
        struct Counter(u32);
        impl TraceSink for Counter {
            fn on_command(&mut self, _: &CommandEvent) {
                self.0 += 1;
            }
        }

        let shared = Rc::new(RefCell::new(Counter::default()));
        let mut handle = Rc::clone(&shared);
        Tracer::new(&mut handle).command(&CommandEvent {
            now: HostTime(5),
            command: Command::ToggleMute,
            media: MediaId(1),
        });
        assert_eq!(shared.borrow().0, 1);
    }
}
