// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Volume panel visibility and synchronization.
//!
//! The panel is created once, when the first video activates, and then only
//! toggled between visible and hidden. One [`TimerSlot`] drives both ways it
//! can recede: the auto-hide after a [`show`](VolumePanel::show) and the
//! longer dwell after the pointer leaves it. Arming either cancels the
//! other, so a keyboard volume change during the dwell window restarts the
//! full display window rather than racing the dwell.

use crate::config::Timings;
use crate::host::{Host, MediaElement};
use crate::time::{Duration, HostTime};
use crate::timer::TimerSlot;
use crate::volume::VolumeDisplay;

/// Panel visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PanelVisibility {
    /// Not shown.
    #[default]
    Hidden,
    /// Shown.
    Visible,
}

impl PanelVisibility {
    /// Short name used by trace sinks.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Visible => "visible",
        }
    }
}

/// The volume panel controller.
#[derive(Clone, Debug)]
pub struct VolumePanel {
    visibility: PanelVisibility,
    created: bool,
    display: Duration,
    dwell: Duration,
    hide: TimerSlot,
}

impl VolumePanel {
    /// Creates a controller for a panel that does not exist yet.
    #[must_use]
    pub const fn new(timings: &Timings) -> Self {
        Self {
            visibility: PanelVisibility::Hidden,
            created: false,
            display: timings.panel_display,
            dwell: timings.panel_hover_dwell,
            hide: TimerSlot::new(),
        }
    }

    /// Current visibility.
    #[must_use]
    pub const fn visibility(&self) -> PanelVisibility {
        self.visibility
    }

    /// Returns `true` once the host panel has been created.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        self.created
    }

    /// The auto-hide / dwell timer.
    #[must_use]
    pub const fn hide_timer(&self) -> &TimerSlot {
        &self.hide
    }

    /// Creates the host panel on first use.
    pub fn materialize<H: Host>(&mut self, host: &mut H) {
        if !self.created {
            host.create_panel();
            self.created = true;
        }
    }

    /// Copies the volume state of `media` into the panel.
    ///
    /// Does nothing before the panel exists or without a video.
    pub fn sync<H: Host>(&mut self, host: &mut H, media: Option<&H::Media>) {
        if !self.created {
            return;
        }
        if let Some(media) = media {
            host.render_panel(&VolumeDisplay::new(media.volume(), media.is_muted()));
        }
    }

    /// Shows the panel and restarts the auto-hide window.
    ///
    /// Does nothing before the panel exists or when no video is active.
    pub fn show<H: Host>(&mut self, host: &mut H, now: HostTime, has_video: bool) {
        if !self.created || !has_video {
            return;
        }
        host.attach_panel();
        host.set_panel_visible(true);
        self.visibility = PanelVisibility::Visible;
        self.hide.arm(now, self.display);
    }

    /// Hides the panel. Idempotent.
    pub fn hide<H: Host>(&mut self, host: &mut H) {
        self.hide.cancel();
        if self.created {
            host.set_panel_visible(false);
        }
        self.visibility = PanelVisibility::Hidden;
    }

    /// Pointer entered the panel.
    ///
    /// Returns `true` if this counts as viewer activity (a video is active).
    pub fn hover_enter<H: Host>(&mut self, host: &mut H, now: HostTime, has_video: bool) -> bool {
        self.hide.cancel();
        if has_video {
            self.show(host, now, true);
        }
        has_video
    }

    /// Pointer left the panel: hide after the dwell window.
    pub fn hover_leave(&mut self, now: HostTime) {
        self.hide.arm(now, self.dwell);
    }

    /// Moves the panel under the new fullscreen root, if there is one to move.
    pub fn reattach<H: Host>(&mut self, host: &mut H, has_video: bool) {
        if self.created && has_video {
            host.attach_panel();
        }
    }

    /// Handles a due hide timer. Returns `true` if it fired.
    pub fn on_hide_due<H: Host>(&mut self, host: &mut H, now: HostTime) -> bool {
        if !self.hide.take_due(now) {
            return false;
        }
        self.hide(host);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverlayConfig;
    use crate::test_host::{Call, FakeHost, FakeVideo};
    use crate::time::Timebase;
    use crate::volume::VolumeIcon;

    fn panel() -> VolumePanel {
        VolumePanel::new(&Timings::new(&OverlayConfig::standard(), Timebase::MILLIS))
    }

    #[test]
    fn nothing_happens_before_creation() {
        let mut host = FakeHost::new();
        let mut panel = panel();
        let video = FakeVideo::new(1).loaded().playing();
        panel.sync(&mut host, Some(&video));
        panel.show(&mut host, HostTime(0), true);
        assert!(host.calls().is_empty(), "no host calls, got {:?}", host.calls());
        assert_eq!(panel.visibility(), PanelVisibility::Hidden, "still hidden");
    }

    #[test]
    fn materialize_is_idempotent() {
        let mut host = FakeHost::new();
        let mut panel = panel();
        panel.materialize(&mut host);
        panel.materialize(&mut host);
        assert_eq!(host.count(&Call::CreatePanel), 1, "created once");
    }

    #[test]
    fn sync_renders_effective_volume() {
        let mut host = FakeHost::new();
        let mut panel = panel();
        panel.materialize(&mut host);
        let video = FakeVideo::new(1).loaded().playing().with_volume(0.47);
        panel.sync(&mut host, Some(&video));
        assert_eq!(host.last_panel().map(|d| d.icon), Some(VolumeIcon::Low), "low");

        video.set_muted(true);
        panel.sync(&mut host, Some(&video));
        let shown = host.last_panel().expect("rendered");
        assert_eq!(shown.icon, VolumeIcon::Muted, "muted");
        assert_eq!(shown.percent, 0, "muted shows 0%");
    }

    #[test]
    fn show_then_auto_hide() {
        let mut host = FakeHost::new();
        let mut panel = panel();
        panel.materialize(&mut host);
        panel.show(&mut host, HostTime(0), true);
        assert_eq!(panel.visibility(), PanelVisibility::Visible, "shown");
        assert!(host.saw(&Call::AttachPanel), "parented before showing");

        assert!(!panel.on_hide_due(&mut host, HostTime(1999)), "not yet");
        assert!(panel.on_hide_due(&mut host, HostTime(2000)), "auto-hide");
        assert_eq!(panel.visibility(), PanelVisibility::Hidden, "hidden");
    }

    #[test]
    fn show_without_video_is_noop() {
        let mut host = FakeHost::new();
        let mut panel = panel();
        panel.materialize(&mut host);
        panel.show(&mut host, HostTime(0), false);
        assert_eq!(panel.visibility(), PanelVisibility::Hidden, "no video, no panel");
        assert!(!panel.hide_timer().is_armed(), "no timer");
    }

    #[test]
    fn hover_keeps_panel_and_leave_dwells() {
        let mut host = FakeHost::new();
        let mut panel = panel();
        panel.materialize(&mut host);
        panel.show(&mut host, HostTime(0), true);

        assert!(panel.hover_enter(&mut host, HostTime(1500), true), "activity");
        assert!(!panel.on_hide_due(&mut host, HostTime(2000)), "first hide cancelled");

        panel.hover_leave(HostTime(2500));
        assert!(!panel.on_hide_due(&mut host, HostTime(3999)), "inside dwell");
        assert!(panel.on_hide_due(&mut host, HostTime(4000)), "dwell elapsed");
        assert_eq!(panel.visibility(), PanelVisibility::Hidden, "hidden");
    }

    #[test]
    fn hover_without_video_only_cancels() {
        let mut host = FakeHost::new();
        let mut panel = panel();
        panel.materialize(&mut host);
        panel.hover_leave(HostTime(0));
        assert!(!panel.hover_enter(&mut host, HostTime(10), false), "no activity");
        assert!(!panel.hide_timer().is_armed(), "dwell cancelled");
        assert_eq!(panel.visibility(), PanelVisibility::Hidden, "not shown");
    }

    #[test]
    fn show_during_dwell_restarts_display_window() {
        let mut host = FakeHost::new();
        let mut panel = panel();
        panel.materialize(&mut host);
        panel.show(&mut host, HostTime(0), true);
        panel.hover_leave(HostTime(100));
        panel.show(&mut host, HostTime(1000), true);
        assert!(!panel.on_hide_due(&mut host, HostTime(1600)), "dwell superseded");
        assert!(panel.on_hide_due(&mut host, HostTime(3000)), "display window");
    }

    #[test]
    fn hide_is_idempotent_and_cancels() {
        let mut host = FakeHost::new();
        let mut panel = panel();
        panel.materialize(&mut host);
        panel.show(&mut host, HostTime(0), true);
        panel.hide(&mut host);
        panel.hide(&mut host);
        assert_eq!(panel.visibility(), PanelVisibility::Hidden, "hidden");
        assert!(!panel.hide_timer().is_armed(), "no pending hide");
    }
}
