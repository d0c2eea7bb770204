// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinating context object.
//!
//! [`Overlay`] owns every component: the [`LifecycleTracker`], the [`Hud`],
//! the [`VolumePanel`] and the [`IdleTracker`]. Components never reach into
//! each other; the overlay routes each host event and each due timer to the
//! components it concerns, in a fixed order.
//!
//! The only thing components share is the active video, and nobody stores
//! it. Every entry point re-runs [`locate`] against [`Host::media`], so a
//! handle to an element the page has since removed can never be acted on.
//!
//! # Driving the overlay
//!
//! ```text
//! overlay.start(&mut host, now);
//! loop {
//!     // deliver host events: overlay.on_key(..), overlay.on_mouse_move(..), ...
//!     // then sleep until overlay.next_deadline() and call
//!     overlay.advance(&mut host, now);
//! }
//! ```
//!
//! Every entry point takes the host's current time. Nothing reads a clock
//! internally, which keeps the whole engine deterministic under test.

use alloc::format;
#[cfg(feature = "trace")]
use alloc::boxed::Box;

use kurbo::Point;

use crate::command::{Command, KeyInput};
use crate::config::{OverlayConfig, Timings};
use crate::host::{Host, MediaElement, MediaId};
use crate::hud::{Hud, HudContent, HudIcon, HudState};
use crate::idle::{IdleState, IdleTracker};
use crate::lifecycle::{LifecycleTracker, Transition};
use crate::locate::locate;
use crate::panel::{PanelVisibility, VolumePanel};
use crate::time::{HostTime, Timebase};
use crate::timer::{TimerKind, TimerSlot};
use crate::trace::{
    CommandEvent, HudEvent, IdleEvent, LifecycleEvent, PanelEvent, TimerFiredEvent, Tracer,
};
#[cfg(feature = "trace")]
use crate::trace::TraceSink;
use crate::volume::{self, VolumeDisplay, VolumeIcon};

/// Component states as last reported to the trace sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Observed {
    hud: HudState,
    panel: PanelVisibility,
    idle: IdleState,
}

/// The overlay engine.
pub struct Overlay {
    config: OverlayConfig,
    lifecycle: LifecycleTracker,
    hud: Hud,
    panel: VolumePanel,
    idle: IdleTracker,
    observed: Observed,
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Overlay")
            .field("tracked", &self.lifecycle.tracked())
            .field("hud", &self.hud.state())
            .field("panel", &self.panel.visibility())
            .field("idle", &self.idle.state())
            .finish_non_exhaustive()
    }
}

impl Overlay {
    /// Creates an overlay with nothing tracked and no timer armed.
    ///
    /// `timebase` describes the host's [`HostTime`] ticks.
    #[must_use]
    pub fn new(config: OverlayConfig, timebase: Timebase) -> Self {
        let timings = Timings::new(&config, timebase);
        Self {
            lifecycle: LifecycleTracker::new(&timings),
            hud: Hud::new(&config, &timings),
            panel: VolumePanel::new(&timings),
            idle: IdleTracker::new(&timings),
            config,
            observed: Observed {
                hud: HudState::Hidden,
                panel: PanelVisibility::Hidden,
                idle: IdleState::Active,
            },
            #[cfg(feature = "trace")]
            sink: None,
        }
    }

    /// Routes trace events to `sink`, replacing any previous sink.
    #[cfg(feature = "trace")]
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.sink = Some(sink);
    }

    /// The configuration this overlay was built with.
    #[must_use]
    pub const fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// The currently tracked video.
    #[must_use]
    pub const fn tracked(&self) -> Option<MediaId> {
        self.lifecycle.tracked()
    }

    /// Current HUD state.
    #[must_use]
    pub const fn hud_state(&self) -> HudState {
        self.hud.state()
    }

    /// Current panel visibility.
    #[must_use]
    pub const fn panel_visibility(&self) -> PanelVisibility {
        self.panel.visibility()
    }

    /// Current idle state.
    #[must_use]
    pub const fn idle_state(&self) -> IdleState {
        self.idle.state()
    }

    /// Returns the slot for `kind`.
    #[must_use]
    pub const fn timer(&self, kind: TimerKind) -> &TimerSlot {
        match kind {
            TimerKind::VideoPoll => self.lifecycle.poll_timer(),
            TimerKind::VolumeSync => self.lifecycle.sync_timer(),
            TimerKind::HudHide => self.hud.hide_timer(),
            TimerKind::HudFade => self.hud.fade_timer(),
            TimerKind::PanelHide => self.panel.hide_timer(),
            TimerKind::Idle => self.idle.timeout(),
        }
    }

    /// The earliest pending deadline across all slots.
    ///
    /// The host should call [`advance`](Self::advance) once this instant has
    /// passed. `None` means nothing is scheduled.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        TimerKind::ALL
            .iter()
            .filter_map(|&kind| self.timer(kind).deadline())
            .min()
    }

    /// Starts detection polling and runs the first check.
    pub fn start<H: Host>(&mut self, host: &mut H, now: HostTime) {
        self.lifecycle.start(now);
        self.check(host, now);
        self.observe(now);
    }

    /// Runs an immediate detection check.
    ///
    /// Hosts call this when the page's structure mutates, so a replaced
    /// player is picked up before the next poll tick.
    pub fn recheck<H: Host>(&mut self, host: &mut H, now: HostTime) -> Transition {
        let transition = self.check(host, now);
        self.observe(now);
        transition
    }

    /// Fires every slot whose deadline is at or before `now`.
    ///
    /// Slots fire in deadline order, ties broken by [`TimerKind`] order.
    /// Periodic slots re-arm from `now`, so a late wake-up produces one tick
    /// rather than a burst.
    pub fn advance<H: Host>(&mut self, host: &mut H, now: HostTime) {
        while let Some((deadline, kind)) = self.earliest_due(now) {
            self.tracer()
                .timer_fired(&TimerFiredEvent { now, kind, deadline });
            self.fire(host, now, kind);
            self.observe(now);
        }
    }

    /// Handles a keydown. Returns `true` if the key ran a command, in which
    /// case the host should suppress the browser's default action.
    pub fn on_key<H: Host>(&mut self, host: &mut H, now: HostTime, key: KeyInput<'_>) -> bool {
        match key.command() {
            Some(command) => self.execute(host, now, command),
            None => false,
        }
    }

    /// Runs `command` against the active video.
    ///
    /// Returns `false` (and does nothing) when no video is active. A command
    /// that ran counts as viewer activity.
    pub fn execute<H: Host>(&mut self, host: &mut H, now: HostTime, command: Command) -> bool {
        let Some(video) = locate(&host.media()).cloned() else {
            return false;
        };
        self.tracer().command(&CommandEvent {
            now,
            command,
            media: video.id(),
        });
        match command {
            Command::TogglePlay => self.toggle_play(host, now, &video),
            Command::SeekBackward => self.seek(host, now, &video, false),
            Command::SeekForward => self.seek(host, now, &video, true),
            Command::VolumeUp => self.adjust_volume(host, now, &video, self.config.volume_step),
            Command::VolumeDown => {
                self.adjust_volume(host, now, &video, -self.config.volume_step);
            }
            Command::ToggleMute => self.toggle_mute(host, now, &video),
            Command::ToggleFullscreen => Self::toggle_fullscreen(host, &video),
        }
        self.reset_idle(host, now);
        self.observe(now);
        true
    }

    /// Handles pointer movement at viewport position `pointer`.
    ///
    /// Movements inside the throttle window are dropped before the page is
    /// scanned for videos.
    pub fn on_mouse_move<H: Host>(&mut self, host: &mut H, now: HostTime, pointer: Point) {
        if !self.idle.accept_mouse(now) {
            return;
        }
        let media = host.media();
        let active = locate(&media);
        self.idle.on_accepted_move(host, now, pointer, active);
        self.observe(now);
    }

    /// Handles a `play` event from any media element.
    ///
    /// Only the active video's `play` counts as activity.
    pub fn on_media_play<H: Host>(&mut self, host: &mut H, now: HostTime, id: MediaId) {
        let media = host.media();
        let active = locate(&media);
        if active.is_some_and(|m| m.id() == id) {
            self.idle.reset(host, now, active);
            self.observe(now);
        }
    }

    /// Handles a `pause` event from any media element.
    ///
    /// Pausing the active (or tracked) video cancels the idle countdown and
    /// forces the active state, however recently the pointer moved.
    pub fn on_media_pause<H: Host>(&mut self, host: &mut H, now: HostTime, id: MediaId) {
        let located = locate(&host.media()).map(MediaElement::id);
        if located == Some(id) || self.lifecycle.tracked() == Some(id) {
            self.idle.cleanup(host);
            self.observe(now);
        }
    }

    /// Handles a change of the fullscreen root.
    ///
    /// The HUD is torn down (it is recreated inside the new root on the next
    /// show) and the panel is moved under the new root.
    pub fn on_fullscreen_change<H: Host>(&mut self, host: &mut H, now: HostTime) {
        self.hud.cleanup(host);
        let has_video = locate(&host.media()).is_some();
        self.panel.reattach(host, has_video);
        self.observe(now);
    }

    /// Handles a viewport resize by repositioning a visible HUD.
    pub fn on_resize<H: Host>(&mut self, host: &mut H) {
        if self.hud.state() != HudState::Visible {
            return;
        }
        if let Some(video) = locate(&host.media()) {
            let bounds = video.bounds();
            self.hud.reposition(host, bounds);
        }
    }

    /// The pointer entered the volume panel.
    pub fn on_panel_hover_enter<H: Host>(&mut self, host: &mut H, now: HostTime) {
        let has_video = locate(&host.media()).is_some();
        if self.panel.hover_enter(host, now, has_video) {
            self.reset_idle(host, now);
        }
        self.observe(now);
    }

    /// The pointer left the volume panel.
    pub fn on_panel_hover_leave(&mut self, now: HostTime) {
        self.panel.hover_leave(now);
    }

    /// The panel slider moved to `percent` (0 to 100).
    pub fn on_panel_slider<H: Host>(&mut self, host: &mut H, now: HostTime, percent: f64) {
        let Some(video) = locate(&host.media()).cloned() else {
            return;
        };
        let (level, muted) = volume::from_slider(percent);
        video.set_volume(level);
        video.set_muted(muted);
        self.panel.sync(host, Some(&video));
        self.panel.show(host, now, true);
        self.observe(now);
    }

    /// The panel's mute button was clicked.
    pub fn on_panel_mute_click<H: Host>(&mut self, host: &mut H, now: HostTime) {
        let Some(video) = locate(&host.media()).cloned() else {
            return;
        };
        video.set_muted(!video.is_muted());
        self.panel.sync(host, Some(&video));
        self.panel.show(host, now, true);
        self.observe(now);
    }

    // -- control actions ---------------------------------------------------

    fn toggle_play<H: Host>(&mut self, host: &mut H, now: HostTime, video: &H::Media) {
        let starting = video.is_paused();
        let icon = if starting {
            video.play();
            HudIcon::Play
        } else {
            video.pause();
            HudIcon::Pause
        };
        let content = HudContent::icon(icon).with_scale(self.config.play_pause_scale);
        self.show_hud(host, now, content);
    }

    fn seek<H: Host>(&mut self, host: &mut H, now: HostTime, video: &H::Media, forward: bool) {
        let seconds = self.config.seek_seconds;
        let delta = if forward {
            f64::from(seconds)
        } else {
            -f64::from(seconds)
        };
        let duration = video.duration();
        let max = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            f64::INFINITY
        };
        video.set_current_time((video.current_time() + delta).clamp(0.0, max));

        let content = if forward {
            HudContent::icon(HudIcon::SeekForward).with_label(format!("+{seconds}s"))
        } else {
            HudContent::icon(HudIcon::SeekBackward).with_label(format!("-{seconds}s"))
        };
        self.show_hud(host, now, content.with_badge(seconds));
    }

    fn adjust_volume<H: Host>(&mut self, host: &mut H, now: HostTime, video: &H::Media, delta: f64) {
        let (level, muted) = volume::adjust(video.volume(), video.is_muted(), delta);
        video.set_volume(level);
        video.set_muted(muted);

        self.panel.sync(host, Some(video));
        self.panel.show(host, now, true);

        let display = VolumeDisplay::new(level, muted);
        let content = HudContent::icon(HudIcon::Volume(display.icon))
            .with_label(format!("{}%", display.percent));
        self.show_hud(host, now, content);
    }

    fn toggle_mute<H: Host>(&mut self, host: &mut H, now: HostTime, video: &H::Media) {
        let muted = !video.is_muted();
        video.set_muted(muted);

        self.panel.sync(host, Some(video));

        let level = video.volume();
        let icon = HudIcon::Volume(VolumeIcon::select(level, muted));
        let content = if muted {
            HudContent::icon(icon).with_label("Muted")
        } else {
            HudContent::icon(icon).with_label(format!("{}%", volume::percentage(level, muted)))
        };
        self.show_hud(host, now, content);
    }

    fn toggle_fullscreen<H: Host>(host: &mut H, video: &H::Media) {
        // Unsupported fullscreen APIs are a silent no-op.
        if host.is_fullscreen() {
            let _ = host.exit_fullscreen();
        } else {
            let _ = host.request_fullscreen(video);
        }
    }

    // -- internals ---------------------------------------------------------

    /// Shows the HUD over the active video; without one, does nothing.
    fn show_hud<H: Host>(&mut self, host: &mut H, now: HostTime, content: HudContent) {
        if let Some(video) = locate(&host.media()) {
            let bounds = video.bounds();
            self.hud.show(host, now, bounds, content);
        }
    }

    fn reset_idle<H: Host>(&mut self, host: &mut H, now: HostTime) {
        let media = host.media();
        self.idle.reset(host, now, locate(&media));
    }

    fn check<H: Host>(&mut self, host: &mut H, now: HostTime) -> Transition {
        let media = host.media();
        let active = locate(&media);
        let transition = self.lifecycle.check(now, active.map(MediaElement::id));
        match transition {
            Transition::Activated(_) => {
                self.panel.materialize(host);
                self.panel.sync(host, active);
                self.idle.reset(host, now, active);
            }
            Transition::Deactivated(_) => {
                self.panel.hide(host);
                self.idle.cleanup(host);
            }
            Transition::Changed { .. } => {
                self.panel.sync(host, active);
                self.idle.reset(host, now, active);
            }
            Transition::Unchanged => return transition,
        }
        self.tracer()
            .lifecycle(&LifecycleEvent { now, transition });
        transition
    }

    fn earliest_due(&self, now: HostTime) -> Option<(HostTime, TimerKind)> {
        TimerKind::ALL
            .iter()
            .filter_map(|&kind| {
                self.timer(kind)
                    .deadline()
                    .filter(|&d| d <= now)
                    .map(|d| (d, kind))
            })
            .min()
    }

    fn fire<H: Host>(&mut self, host: &mut H, now: HostTime, kind: TimerKind) {
        match kind {
            TimerKind::VideoPoll => {
                if self.lifecycle.on_poll_due(now) {
                    self.check(host, now);
                }
            }
            TimerKind::VolumeSync => {
                if self.lifecycle.on_sync_due(now) {
                    let media = host.media();
                    self.panel.sync(host, locate(&media));
                }
            }
            TimerKind::HudHide => {
                self.hud.on_hide_due(host, now);
            }
            TimerKind::HudFade => {
                self.hud.on_fade_due(host, now);
            }
            TimerKind::PanelHide => {
                self.panel.on_hide_due(host, now);
            }
            TimerKind::Idle => {
                let media = host.media();
                if self.idle.on_idle_due(host, now, locate(&media)) {
                    self.panel.hide(host);
                }
            }
        }
    }

    fn tracer(&mut self) -> Tracer<'_> {
        #[cfg(feature = "trace")]
        {
            match &mut self.sink {
                Some(sink) => Tracer::new(sink.as_mut()),
                None => Tracer::none(),
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            Tracer::none()
        }
    }

    /// Reports state changes since the last call.
    fn observe(&mut self, now: HostTime) {
        let current = Observed {
            hud: self.hud.state(),
            panel: self.panel.visibility(),
            idle: self.idle.state(),
        };
        let previous = core::mem::replace(&mut self.observed, current);
        if current == previous {
            return;
        }
        let mut tracer = self.tracer();
        if current.hud != previous.hud {
            tracer.hud(&HudEvent {
                now,
                state: current.hud,
            });
        }
        if current.panel != previous.panel {
            tracer.panel(&PanelEvent {
                now,
                visibility: current.panel,
            });
        }
        if current.idle != previous.idle {
            tracer.idle(&IdleEvent {
                now,
                state: current.idle,
            });
        }
    }
}
