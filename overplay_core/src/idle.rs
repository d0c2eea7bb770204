// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewer idle detection.
//!
//! While a video plays, the cursor and overlay controls recede after a short
//! period without activity. Activity is pointer movement over the video,
//! keyboard commands, hovering the volume panel, or the video starting to
//! play. Pausing never leads to idle: a `pause` cancels the countdown and
//! forces the active state.
//!
//! Pointer movement is throttled. A movement closer than the throttle
//! interval to the last *processed* movement is dropped before anything
//! else looks at it.

use kurbo::{Point, Rect};

use crate::config::Timings;
use crate::host::{Host, MediaElement};
use crate::time::{Duration, HostTime};
use crate::timer::TimerSlot;

/// Viewer activity state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum IdleState {
    /// Cursor and controls visible.
    #[default]
    Active,
    /// Cursor hidden, panel receded.
    Idle,
}

impl IdleState {
    /// Short name used by trace sinks.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Idle => "idle",
        }
    }
}

/// Tracks viewer activity over the active video.
#[derive(Clone, Debug)]
pub struct IdleTracker {
    state: IdleState,
    delay: Duration,
    throttle: Duration,
    timeout: TimerSlot,
    last_mouse: Option<HostTime>,
}

impl IdleTracker {
    /// Creates an active tracker with no countdown.
    #[must_use]
    pub const fn new(timings: &Timings) -> Self {
        Self {
            state: IdleState::Active,
            delay: timings.idle_delay,
            throttle: timings.idle_mouse_throttle,
            timeout: TimerSlot::new(),
            last_mouse: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> IdleState {
        self.state
    }

    /// The Active → Idle timer.
    #[must_use]
    pub const fn timeout(&self) -> &TimerSlot {
        &self.timeout
    }

    /// Records activity: forces the active state and restarts the countdown
    /// if `active` is playing.
    pub fn reset<H: Host>(&mut self, host: &mut H, now: HostTime, active: Option<&H::Media>) {
        self.set_active(host);
        self.timeout.cancel();
        if active.is_some_and(|m| !m.is_paused()) {
            self.timeout.arm(now, self.delay);
        }
    }

    /// Enters the idle state and hides the cursor over `active`.
    ///
    /// Returns `true` if the cursor was hidden over a video, in which case
    /// the caller should also hide the volume panel.
    pub fn set_idle<H: Host>(&mut self, host: &mut H, active: Option<&H::Media>) -> bool {
        if self.state == IdleState::Idle {
            return false;
        }
        self.state = IdleState::Idle;
        match active {
            Some(media) => {
                host.hide_cursor(media);
                true
            }
            None => false,
        }
    }

    /// Leaves the idle state, clearing the cursor marker everywhere.
    pub fn set_active<H: Host>(&mut self, host: &mut H) {
        if self.state == IdleState::Active {
            return;
        }
        self.state = IdleState::Active;
        host.restore_cursors();
    }

    /// Cancels the countdown and forces the active state.
    pub fn cleanup<H: Host>(&mut self, host: &mut H) {
        self.timeout.cancel();
        self.set_active(host);
    }

    /// Applies the movement throttle.
    ///
    /// Returns `false` for a movement inside the throttle window of the last
    /// accepted one; otherwise records `now` and returns `true`.
    pub fn accept_mouse(&mut self, now: HostTime) -> bool {
        if let Some(last) = self.last_mouse
            && now - last < self.throttle
        {
            return false;
        }
        self.last_mouse = Some(now);
        true
    }

    /// Handles pointer movement. Returns `true` if it counted as activity.
    pub fn on_mouse_move<H: Host>(
        &mut self,
        host: &mut H,
        now: HostTime,
        pointer: Point,
        active: Option<&H::Media>,
    ) -> bool {
        self.accept_mouse(now) && self.on_accepted_move(host, now, pointer, active)
    }

    /// Handles a movement that already passed [`accept_mouse`](Self::accept_mouse).
    ///
    /// Returns `true` if the pointer is over `active` and the countdown was
    /// restarted.
    pub fn on_accepted_move<H: Host>(
        &mut self,
        host: &mut H,
        now: HostTime,
        pointer: Point,
        active: Option<&H::Media>,
    ) -> bool {
        match active {
            Some(media) if contains(media.bounds(), pointer) => {
                self.reset(host, now, Some(media));
                true
            }
            _ => false,
        }
    }

    /// Handles a due idle timer.
    ///
    /// Returns `true` if the cursor was hidden over a video (see
    /// [`set_idle`](Self::set_idle)).
    pub fn on_idle_due<H: Host>(
        &mut self,
        host: &mut H,
        now: HostTime,
        active: Option<&H::Media>,
    ) -> bool {
        if !self.timeout.take_due(now) {
            return false;
        }
        self.set_idle(host, active)
    }
}

/// Edge-inclusive point-in-rectangle test.
fn contains(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverlayConfig;
    use crate::test_host::{Call, FakeHost, FakeVideo};
    use crate::time::Timebase;

    fn tracker() -> IdleTracker {
        IdleTracker::new(&Timings::new(&OverlayConfig::standard(), Timebase::MILLIS))
    }

    fn playing() -> FakeVideo {
        FakeVideo::new(1)
            .loaded()
            .playing()
            .with_bounds(Rect::new(0.0, 0.0, 640.0, 360.0))
    }

    #[test]
    fn playing_video_goes_idle_after_delay() {
        let mut host = FakeHost::new();
        let mut idle = tracker();
        let video = playing();
        idle.reset(&mut host, HostTime(0), Some(&video));
        assert!(!idle.on_idle_due(&mut host, HostTime(999), Some(&video)), "early");
        assert!(idle.on_idle_due(&mut host, HostTime(1000), Some(&video)), "idle");
        assert_eq!(idle.state(), IdleState::Idle, "state");
        assert!(host.saw(&Call::HideCursor(video.id())), "cursor hidden");
    }

    #[test]
    fn paused_video_never_counts_down() {
        let mut host = FakeHost::new();
        let mut idle = tracker();
        let video = playing();
        video.pause();
        idle.reset(&mut host, HostTime(0), Some(&video));
        assert!(!idle.timeout().is_armed(), "no countdown while paused");
    }

    #[test]
    fn reset_cancels_pending_countdown() {
        let mut host = FakeHost::new();
        let mut idle = tracker();
        let video = playing();
        idle.reset(&mut host, HostTime(0), Some(&video));
        idle.reset(&mut host, HostTime(500), Some(&video));
        assert!(
            !idle.on_idle_due(&mut host, HostTime(1000), Some(&video)),
            "cancelled countdown is authoritative"
        );
        assert_eq!(idle.state(), IdleState::Active, "still active");
        assert!(idle.on_idle_due(&mut host, HostTime(1500), Some(&video)), "new countdown");
    }

    #[test]
    fn set_idle_and_set_active_are_idempotent() {
        let mut host = FakeHost::new();
        let mut idle = tracker();
        let video = playing();
        assert!(idle.set_idle(&mut host, Some(&video)), "first");
        assert!(!idle.set_idle(&mut host, Some(&video)), "already idle");
        idle.set_active(&mut host);
        idle.set_active(&mut host);
        assert_eq!(host.count(&Call::HideCursor(video.id())), 1, "marked once");
        assert_eq!(host.count(&Call::RestoreCursors), 1, "cleared once");
    }

    #[test]
    fn idle_without_video_marks_nothing() {
        let mut host = FakeHost::new();
        let mut idle = tracker();
        assert!(!idle.set_idle::<FakeHost>(&mut host, None), "nothing to hide");
        assert_eq!(idle.state(), IdleState::Idle, "still idle");
    }

    #[test]
    fn cleanup_forces_active() {
        let mut host = FakeHost::new();
        let mut idle = tracker();
        let video = playing();
        idle.reset(&mut host, HostTime(0), Some(&video));
        assert!(idle.on_idle_due(&mut host, HostTime(1000), Some(&video)), "idle");
        idle.reset(&mut host, HostTime(1100), Some(&video));
        idle.cleanup(&mut host);
        assert_eq!(idle.state(), IdleState::Active, "active");
        assert!(!idle.timeout().is_armed(), "countdown cancelled");
    }

    #[test]
    fn mouse_throttle_and_hit_test() {
        let mut host = FakeHost::new();
        let mut idle = tracker();
        let video = playing();
        let over = Point::new(10.0, 10.0);

        assert!(idle.on_mouse_move(&mut host, HostTime(0), over, Some(&video)), "first");
        assert!(
            !idle.on_mouse_move(&mut host, HostTime(100), over, Some(&video)),
            "inside throttle window"
        );
        assert_eq!(idle.timeout().deadline(), Some(HostTime(1000)), "not reset");
        assert!(idle.on_mouse_move(&mut host, HostTime(150), over, Some(&video)), "after");
        assert_eq!(idle.timeout().deadline(), Some(HostTime(1150)), "reset");
    }

    #[test]
    fn movement_outside_video_still_consumes_throttle() {
        let mut host = FakeHost::new();
        let mut idle = tracker();
        let video = playing();
        let outside = Point::new(900.0, 10.0);
        assert!(!idle.on_mouse_move(&mut host, HostTime(0), outside, Some(&video)), "miss");
        assert!(
            !idle.on_mouse_move(&mut host, HostTime(50), Point::new(5.0, 5.0), Some(&video)),
            "throttled even though over the video"
        );
    }

    #[test]
    fn edges_count_as_inside() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(contains(r, Point::new(10.0, 10.0)), "corner");
        assert!(!contains(r, Point::new(10.1, 5.0)), "outside");
    }
}
