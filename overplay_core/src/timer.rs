// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-deadline timer slots.
//!
//! Every timed transition in the engine lives in a [`TimerSlot`]. A slot
//! holds at most one deadline, and [`arm`](TimerSlot::arm) replaces whatever
//! was pending. There is no way to have two outstanding hides of the same
//! kind, so a superseded timer can never fire.
//!
//! Slots do not fire by themselves. The [`Overlay`](crate::overlay::Overlay)
//! collects their deadlines, the host wakes it at the earliest one, and
//! [`take_due`](TimerSlot::take_due) consumes a due deadline exactly once.

use crate::time::{Duration, HostTime};

/// Identifies a timer slot for diagnostics and firing order.
///
/// When several slots are due at the same instant they fire in declaration
/// order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    /// Periodic active-video detection.
    VideoPoll,
    /// Periodic volume resync while a video is tracked.
    VolumeSync,
    /// HUD Visible → Hiding.
    HudHide,
    /// HUD Hiding → Hidden.
    HudFade,
    /// Volume panel auto-hide or hover-leave dwell.
    PanelHide,
    /// Active → Idle.
    Idle,
}

impl TimerKind {
    /// All kinds, in firing order.
    pub const ALL: [Self; 6] = [
        Self::VideoPoll,
        Self::VolumeSync,
        Self::HudHide,
        Self::HudFade,
        Self::PanelHide,
        Self::Idle,
    ];

    /// Short name used by trace sinks.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VideoPoll => "video-poll",
            Self::VolumeSync => "volume-sync",
            Self::HudHide => "hud-hide",
            Self::HudFade => "hud-fade",
            Self::PanelHide => "panel-hide",
            Self::Idle => "idle",
        }
    }
}

/// A slot holding at most one pending deadline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerSlot {
    deadline: Option<HostTime>,
}

impl TimerSlot {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Schedules the slot to fire `after` from `now`, cancelling any
    /// pending deadline.
    pub fn arm(&mut self, now: HostTime, after: Duration) {
        self.deadline = Some(now + after);
    }

    /// Cancels the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns the pending deadline.
    #[must_use]
    pub const fn deadline(&self) -> Option<HostTime> {
        self.deadline
    }

    /// Returns `true` if a deadline is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` if a deadline is pending and has been reached.
    #[must_use]
    pub fn is_due(&self, now: HostTime) -> bool {
        self.deadline.is_some_and(|d| d <= now)
    }

    /// Consumes the deadline if it has been reached.
    ///
    /// Returns `true` at most once per [`arm`](Self::arm).
    pub fn take_due(&mut self, now: HostTime) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}
