// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Volume arithmetic and display derivation.

/// Which volume glyph to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VolumeIcon {
    /// Muted, or volume at zero.
    Muted,
    /// Below half volume.
    Low,
    /// Half volume or above.
    High,
}

impl VolumeIcon {
    /// Selects the icon for a raw volume and mute flag.
    #[must_use]
    pub fn select(volume: f64, muted: bool) -> Self {
        if muted || volume == 0.0 {
            Self::Muted
        } else if volume < 0.5 {
            Self::Low
        } else {
            Self::High
        }
    }
}

/// The audible volume: zero when muted, else the raw volume.
#[must_use]
pub fn effective(volume: f64, muted: bool) -> f64 {
    if muted { 0.0 } else { volume }
}

/// Rounds the effective volume to a whole percentage.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to 0.0..=100.5 before the cast"
)]
pub fn percentage(volume: f64, muted: bool) -> u8 {
    let v = effective(volume, muted).clamp(0.0, 1.0);
    // Round half up; `v` is non-negative so truncation after +0.5 rounds.
    (v * 100.0 + 0.5) as u8
}

/// Applies a volume step.
///
/// Returns the new `(volume, muted)` pair. The volume saturates at exactly
/// `0.0` and `1.0`. A positive step always unmutes; a negative step never
/// does.
#[must_use]
pub fn adjust(volume: f64, muted: bool, delta: f64) -> (f64, bool) {
    let next = (volume + delta).clamp(0.0, 1.0);
    let muted = if delta > 0.0 { false } else { muted };
    (next, muted)
}

/// Maps a slider position (0–100) to a `(volume, muted)` pair.
///
/// Dragging to zero mutes; any other position unmutes.
#[must_use]
pub fn from_slider(percent: f64) -> (f64, bool) {
    let volume = (percent / 100.0).clamp(0.0, 1.0);
    (volume, volume == 0.0)
}

/// Everything the volume panel shows for one state of the video.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeDisplay {
    /// Whole percentage of the effective volume.
    pub percent: u8,
    /// Fill-bar proportion in `0.0..=1.0`.
    pub fill: f64,
    /// Mute / low / high glyph.
    pub icon: VolumeIcon,
}

impl VolumeDisplay {
    /// Derives the display for a raw volume and mute flag.
    #[must_use]
    pub fn new(volume: f64, muted: bool) -> Self {
        let percent = percentage(volume, muted);
        Self {
            percent,
            fill: f64::from(percent) / 100.0,
            icon: VolumeIcon::select(volume, muted),
        }
    }
}
