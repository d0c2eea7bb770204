// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracking of the active video across page mutations.
//!
//! Pages replace their players wholesale during client-side navigation, and
//! the old element goes away without emitting anything. The tracker therefore
//! polls: every poll tick (and every structural mutation the host reports)
//! runs [`locate`](crate::locate::locate) and feeds the result to
//! [`LifecycleTracker::check`], which compares it with the tracked id.
//!
//! Both trigger sources end in the same [`classify`] step. It is idempotent:
//! a mutation recheck immediately followed by a poll tick yields one
//! transition and then [`Transition::Unchanged`].
//!
//! A second periodic slot, armed only while something is tracked, resyncs
//! the volume panel with changes made through the page's own controls.

use crate::config::Timings;
use crate::host::MediaId;
use crate::time::{Duration, HostTime};
use crate::timer::TimerSlot;

/// Result of comparing the tracked video with a fresh lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Nothing was tracked; now this element is.
    Activated(MediaId),
    /// This element was tracked; nothing is now.
    Deactivated(MediaId),
    /// A different element replaced the tracked one.
    Changed {
        /// Previously tracked.
        from: MediaId,
        /// Newly tracked.
        to: MediaId,
    },
    /// Same element (or still nothing).
    Unchanged,
}

impl Transition {
    /// Short name used by trace sinks.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Activated(_) => "activated",
            Self::Deactivated(_) => "deactivated",
            Self::Changed { .. } => "changed",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Classifies a lookup against the previously tracked id.
#[must_use]
pub fn classify(previous: Option<MediaId>, current: Option<MediaId>) -> Transition {
    match (previous, current) {
        (None, Some(to)) => Transition::Activated(to),
        (Some(from), None) => Transition::Deactivated(from),
        (Some(from), Some(to)) if from != to => Transition::Changed { from, to },
        _ => Transition::Unchanged,
    }
}

/// Holds the tracked id and the two periodic slots.
#[derive(Clone, Debug)]
pub struct LifecycleTracker {
    tracked: Option<MediaId>,
    poll_interval: Duration,
    sync_interval: Duration,
    poll: TimerSlot,
    sync: TimerSlot,
}

impl LifecycleTracker {
    /// Creates a tracker with nothing tracked and no slot armed.
    #[must_use]
    pub const fn new(timings: &Timings) -> Self {
        Self {
            tracked: None,
            poll_interval: timings.video_poll,
            sync_interval: timings.volume_sync,
            poll: TimerSlot::new(),
            sync: TimerSlot::new(),
        }
    }

    /// The currently tracked video.
    #[must_use]
    pub const fn tracked(&self) -> Option<MediaId> {
        self.tracked
    }

    /// The detection poll slot.
    #[must_use]
    pub const fn poll_timer(&self) -> &TimerSlot {
        &self.poll
    }

    /// The volume resync slot.
    #[must_use]
    pub const fn sync_timer(&self) -> &TimerSlot {
        &self.sync
    }

    /// Starts polling.
    pub fn start(&mut self, now: HostTime) {
        self.poll.arm(now, self.poll_interval);
    }

    /// Updates the tracked id from a fresh lookup and returns the transition.
    pub fn check(&mut self, now: HostTime, current: Option<MediaId>) -> Transition {
        let transition = classify(self.tracked, current);
        match transition {
            Transition::Activated(id) => {
                self.tracked = Some(id);
                self.sync.arm(now, self.sync_interval);
            }
            Transition::Deactivated(_) => {
                self.tracked = None;
                self.sync.cancel();
            }
            Transition::Changed { to, .. } => {
                self.tracked = Some(to);
            }
            Transition::Unchanged => {}
        }
        transition
    }

    /// Consumes a due poll tick and schedules the next one.
    pub fn on_poll_due(&mut self, now: HostTime) -> bool {
        if !self.poll.take_due(now) {
            return false;
        }
        self.poll.arm(now, self.poll_interval);
        true
    }

    /// Consumes a due resync tick and, while tracking, schedules the next one.
    pub fn on_sync_due(&mut self, now: HostTime) -> bool {
        if !self.sync.take_due(now) {
            return false;
        }
        if self.tracked.is_some() {
            self.sync.arm(now, self.sync_interval);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverlayConfig;
    use crate::time::Timebase;

    fn tracker() -> LifecycleTracker {
        LifecycleTracker::new(&Timings::new(&OverlayConfig::standard(), Timebase::MILLIS))
    }

    #[test]
    fn classification_table() {
        let a = MediaId(1);
        let b = MediaId(2);
        assert_eq!(classify(None, None), Transition::Unchanged, "nothing");
        assert_eq!(classify(None, Some(a)), Transition::Activated(a), "activated");
        assert_eq!(classify(Some(a), None), Transition::Deactivated(a), "deactivated");
        assert_eq!(classify(Some(a), Some(a)), Transition::Unchanged, "same");
        assert_eq!(
            classify(Some(a), Some(b)),
            Transition::Changed { from: a, to: b },
            "replaced"
        );
    }

    #[test]
    fn redundant_checks_are_idempotent() {
        let mut t = tracker();
        let id = Some(MediaId(3));
        assert_eq!(t.check(HostTime(0), id), Transition::Activated(MediaId(3)), "first");
        assert_eq!(t.check(HostTime(0), id), Transition::Unchanged, "recheck");
        assert_eq!(t.check(HostTime(1), id), Transition::Unchanged, "poll");
        assert_eq!(t.tracked(), id, "tracked");
    }

    #[test]
    fn sync_runs_only_while_tracking() {
        let mut t = tracker();
        assert!(!t.sync_timer().is_armed(), "idle before activation");

        t.check(HostTime(0), Some(MediaId(1)));
        assert_eq!(t.sync_timer().deadline(), Some(HostTime(500)), "armed on activation");
        assert!(t.on_sync_due(HostTime(500)), "fires");
        assert_eq!(t.sync_timer().deadline(), Some(HostTime(1000)), "re-armed");

        t.check(HostTime(600), Some(MediaId(2)));
        assert_eq!(t.sync_timer().deadline(), Some(HostTime(1000)), "change keeps cadence");

        t.check(HostTime(700), None);
        assert!(!t.sync_timer().is_armed(), "stopped on deactivation");
        assert_eq!(t.tracked(), None, "cleared");
    }

    #[test]
    fn poll_is_periodic() {
        let mut t = tracker();
        t.start(HostTime(0));
        assert!(!t.on_poll_due(HostTime(499)), "early");
        assert!(t.on_poll_due(HostTime(500)), "tick");
        assert_eq!(t.poll_timer().deadline(), Some(HostTime(1000)), "next tick");
    }

    #[test]
    fn late_wakeup_does_not_catch_up() {
        let mut t = tracker();
        t.start(HostTime(0));
        assert!(t.on_poll_due(HostTime(2600)), "one tick");
        assert!(!t.on_poll_due(HostTime(2600)), "no burst");
        assert_eq!(t.poll_timer().deadline(), Some(HostTime(3100)), "from now");
    }
}
