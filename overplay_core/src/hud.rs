// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transient action indicator.
//!
//! The HUD flashes an icon (and optionally a short label) over the video
//! after a command: play, pause, seek, volume. Its lifecycle is a small
//! timed state machine:
//!
//! ```text
//!            show()                hide timer            fade timer
//!   Hidden ─────────► Visible ─────────────────► Hiding ───────────► Hidden
//!     ▲                 ▲  │                        │
//!     │                 └──┘ show() restarts         │ show() restarts
//!     │                                             ▼
//!     └──────────── cleanup() from any state ◄── Visible
//! ```
//!
//! Every [`show`](Hud::show) re-arms the hide timer from scratch and cancels
//! a running fade, so a second command inside the display window extends
//! the HUD instead of letting the first command's timer cut it short.

use alloc::string::String;

use kurbo::{Point, Rect};

use crate::config::{OverlayConfig, Timings};
use crate::host::Host;
use crate::time::{Duration, HostTime};
use crate::timer::TimerSlot;
use crate::volume::VolumeIcon;

/// HUD visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HudState {
    /// Not shown.
    #[default]
    Hidden,
    /// Fully shown; the hide timer is running.
    Visible,
    /// Fading out; the fade timer is running.
    Hiding,
}

impl HudState {
    /// Short name used by trace sinks.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Visible => "visible",
            Self::Hiding => "hiding",
        }
    }
}

/// The glyph shown in the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HudIcon {
    /// Playback started.
    Play,
    /// Playback paused.
    Pause,
    /// Jumped forward.
    SeekForward,
    /// Jumped backward.
    SeekBackward,
    /// Volume changed or mute toggled.
    Volume(VolumeIcon),
}

/// What the HUD displays.
#[derive(Clone, Debug, PartialEq)]
pub struct HudContent {
    /// Main glyph.
    pub icon: HudIcon,
    /// Number drawn inside the glyph (the seek distance in seconds).
    pub badge: Option<u32>,
    /// Text under the glyph.
    pub label: Option<String>,
    /// Extra scale factor on top of the width-derived scale.
    pub scale: f64,
}

impl HudContent {
    /// Content with just an icon, at scale 1.
    #[must_use]
    pub const fn icon(icon: HudIcon) -> Self {
        Self {
            icon,
            badge: None,
            label: None,
            scale: 1.0,
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the badge number.
    #[must_use]
    pub const fn with_badge(mut self, badge: u32) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Sets the extra scale factor.
    #[must_use]
    pub const fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// Where the HUD is centered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// The middle of the screen (fullscreen mode).
    ScreenCenter,
    /// A viewport point (the center of the video).
    At(Point),
}

/// HUD position and final scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPlacement {
    /// Center point.
    pub anchor: Anchor,
    /// Total scale factor.
    pub scale: f64,
}

/// Everything the host needs to draw the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct HudFrame {
    /// Icon, badge and label.
    pub content: HudContent,
    /// Position and scale.
    pub placement: HudPlacement,
}

/// Width-derived HUD scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudScaling {
    /// Video width at which the base scale is 1.
    pub reference_width: f64,
    /// Lowest base scale.
    pub min: f64,
    /// Highest base scale.
    pub max: f64,
}

impl HudScaling {
    /// Reads the scaling fields of `config`.
    #[must_use]
    pub const fn from_config(config: &OverlayConfig) -> Self {
        Self {
            reference_width: config.hud_reference_width,
            min: config.hud_scale_min,
            max: config.hud_scale_max,
        }
    }

    /// Computes the HUD placement over a video occupying `bounds`.
    #[must_use]
    pub fn place(&self, bounds: Rect, fullscreen: bool, extra_scale: f64) -> HudPlacement {
        let base = (bounds.width() / self.reference_width).clamp(self.min, self.max);
        let anchor = if fullscreen {
            Anchor::ScreenCenter
        } else {
            Anchor::At(bounds.center())
        };
        HudPlacement {
            anchor,
            scale: base * extra_scale,
        }
    }
}

/// The HUD state machine.
#[derive(Clone, Debug)]
pub struct Hud {
    state: HudState,
    scaling: HudScaling,
    display: Duration,
    fade_duration: Duration,
    hide: TimerSlot,
    fade: TimerSlot,
    /// Extra scale of the last `show`, reused when repositioning.
    last_scale: f64,
}

impl Hud {
    /// Creates a hidden HUD.
    #[must_use]
    pub fn new(config: &OverlayConfig, timings: &Timings) -> Self {
        Self {
            state: HudState::Hidden,
            scaling: HudScaling::from_config(config),
            display: timings.hud_display,
            fade_duration: timings.hud_fade,
            hide: TimerSlot::new(),
            fade: TimerSlot::new(),
            last_scale: 1.0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> HudState {
        self.state
    }

    /// The Visible → Hiding timer.
    #[must_use]
    pub const fn hide_timer(&self) -> &TimerSlot {
        &self.hide
    }

    /// The Hiding → Hidden timer.
    #[must_use]
    pub const fn fade_timer(&self) -> &TimerSlot {
        &self.fade
    }

    /// Shows `content` over a video occupying `bounds` and restarts the
    /// display window.
    pub fn show<H: Host>(&mut self, host: &mut H, now: HostTime, bounds: Rect, content: HudContent) {
        let placement = self.scaling.place(bounds, host.is_fullscreen(), content.scale);
        self.last_scale = content.scale;
        host.show_hud(&HudFrame { content, placement });

        self.state = HudState::Visible;
        self.fade.cancel();
        self.hide.arm(now, self.display);
    }

    /// Recomputes the placement of a visible HUD without touching its timer.
    ///
    /// Returns `false` (and does nothing) unless the HUD is [`Visible`].
    ///
    /// [`Visible`]: HudState::Visible
    pub fn reposition<H: Host>(&mut self, host: &mut H, bounds: Rect) -> bool {
        if self.state != HudState::Visible {
            return false;
        }
        let placement = self.scaling.place(bounds, host.is_fullscreen(), self.last_scale);
        host.place_hud(&placement);
        true
    }

    /// Removes the HUD from the page and cancels both timers.
    ///
    /// Called when the fullscreen root changes, since the HUD has to live
    /// inside whichever element is fullscreen.
    pub fn cleanup<H: Host>(&mut self, host: &mut H) {
        host.remove_hud();
        self.hide.cancel();
        self.fade.cancel();
        self.state = HudState::Hidden;
    }

    /// Handles a due hide timer. Returns `true` if it fired.
    pub fn on_hide_due<H: Host>(&mut self, host: &mut H, now: HostTime) -> bool {
        if !self.hide.take_due(now) {
            return false;
        }
        self.state = HudState::Hiding;
        host.fade_hud();
        self.fade.arm(now, self.fade_duration);
        true
    }

    /// Handles a due fade timer. Returns `true` if it fired.
    pub fn on_fade_due<H: Host>(&mut self, host: &mut H, now: HostTime) -> bool {
        if !self.fade.take_due(now) {
            return false;
        }
        self.state = HudState::Hidden;
        host.hide_hud();
        true
    }
}
