// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed overlay timings, steps and scale bounds.
//!
//! [`OverlayConfig`] is chosen once when the [`Overlay`] is built; nothing on
//! the page can change it afterwards. Durations are authored in milliseconds
//! and converted to host ticks by [`Timings::new`].
//!
//! [`Overlay`]: crate::overlay::Overlay

use crate::time::{Duration, Timebase};

/// Configuration for an [`Overlay`](crate::overlay::Overlay).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayConfig {
    /// How long the HUD stays fully visible after a `show`, in ms.
    pub hud_display_ms: u32,
    /// How long the HUD's hiding fade lasts before it counts as hidden, in ms.
    pub hud_fade_ms: u32,
    /// How long the volume panel stays up after a `show`, in ms.
    pub panel_display_ms: u32,
    /// Grace window after the pointer leaves the panel, in ms.
    pub panel_hover_dwell_ms: u32,
    /// Poll interval for active-video detection, in ms.
    pub video_poll_ms: u32,
    /// Interval for re-reading volume while a video is tracked, in ms.
    pub volume_sync_ms: u32,
    /// Inactivity needed before a playing video goes idle, in ms.
    pub idle_delay_ms: u32,
    /// Minimum spacing between processed pointer movements, in ms.
    pub idle_mouse_throttle_ms: u32,
    /// Volume change per volume-up/down command (0..1 scale).
    pub volume_step: f64,
    /// Seek distance per seek command, in seconds.
    pub seek_seconds: u32,
    /// Extra HUD scale applied to the play/pause indicator.
    pub play_pause_scale: f64,
    /// Video width (CSS px) at which the HUD renders at scale 1.
    pub hud_reference_width: f64,
    /// Lower bound of the width-derived HUD scale.
    pub hud_scale_min: f64,
    /// Upper bound of the width-derived HUD scale.
    pub hud_scale_max: f64,
}

impl OverlayConfig {
    /// The shipped configuration.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            hud_display_ms: 1000,
            hud_fade_ms: 300,
            panel_display_ms: 2000,
            panel_hover_dwell_ms: 1500,
            video_poll_ms: 500,
            volume_sync_ms: 500,
            idle_delay_ms: 1000,
            idle_mouse_throttle_ms: 150,
            volume_step: 0.1,
            seek_seconds: 10,
            play_pause_scale: 0.85,
            hud_reference_width: 640.0,
            hud_scale_min: 0.6,
            hud_scale_max: 1.5,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// [`OverlayConfig`] durations converted to host ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timings {
    /// See [`OverlayConfig::hud_display_ms`].
    pub hud_display: Duration,
    /// See [`OverlayConfig::hud_fade_ms`].
    pub hud_fade: Duration,
    /// See [`OverlayConfig::panel_display_ms`].
    pub panel_display: Duration,
    /// See [`OverlayConfig::panel_hover_dwell_ms`].
    pub panel_hover_dwell: Duration,
    /// See [`OverlayConfig::video_poll_ms`].
    pub video_poll: Duration,
    /// See [`OverlayConfig::volume_sync_ms`].
    pub volume_sync: Duration,
    /// See [`OverlayConfig::idle_delay_ms`].
    pub idle_delay: Duration,
    /// See [`OverlayConfig::idle_mouse_throttle_ms`].
    pub idle_mouse_throttle: Duration,
}

impl Timings {
    /// Converts the millisecond fields of `config` into `timebase` ticks.
    #[must_use]
    pub const fn new(config: &OverlayConfig, timebase: Timebase) -> Self {
        Self {
            hud_display: Duration::from_millis(config.hud_display_ms, timebase),
            hud_fade: Duration::from_millis(config.hud_fade_ms, timebase),
            panel_display: Duration::from_millis(config.panel_display_ms, timebase),
            panel_hover_dwell: Duration::from_millis(config.panel_hover_dwell_ms, timebase),
            video_poll: Duration::from_millis(config.video_poll_ms, timebase).at_least_one_tick(),
            volume_sync: Duration::from_millis(config.volume_sync_ms, timebase)
                .at_least_one_tick(),
            idle_delay: Duration::from_millis(config.idle_delay_ms, timebase),
            idle_mouse_throttle: Duration::from_millis(config.idle_mouse_throttle_ms, timebase),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_timings_in_millis() {
        let t = Timings::new(&OverlayConfig::standard(), Timebase::MILLIS);
        assert_eq!(t.hud_display, Duration(1000), "hud display");
        assert_eq!(t.panel_hover_dwell, Duration(1500), "hover dwell");
        assert_eq!(t.idle_mouse_throttle, Duration(150), "throttle");
    }

    #[test]
    fn zero_poll_interval_is_clamped() {
        let config = OverlayConfig {
            video_poll_ms: 0,
            ..OverlayConfig::standard()
        };
        let t = Timings::new(&config, Timebase::MILLIS);
        assert_eq!(t.video_poll, Duration(1), "periodic slots need a nonzero interval");
    }
}
