// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlay markup, stylesheet and icons.
//!
//! Everything the page sees is built from the constants here. The engine only
//! hands over [`HudFrame`](overplay_core::hud::HudFrame)s and
//! [`VolumeDisplay`](overplay_core::volume::VolumeDisplay)s; this module turns
//! them into strings for `innerHTML` and inline style properties.

use alloc::format;
use alloc::string::String;

use overplay_core::hud::{Anchor, HudIcon, HudPlacement};
use overplay_core::volume::VolumeIcon;

pub(crate) const HUD_CLASS: &str = "overplay-hud";
pub(crate) const HUD_SELECTOR: &str = ".overplay-hud";
pub(crate) const HUD_ICON_SELECTOR: &str = ".overplay-hud-icon";
pub(crate) const HUD_TEXT_SELECTOR: &str = ".overplay-hud-text";

pub(crate) const VISIBLE_CLASS: &str = "visible";
pub(crate) const HIDING_CLASS: &str = "hiding";

pub(crate) const PANEL_ID: &str = "overplay-volume-panel";
pub(crate) const PANEL_CLASS: &str = "overplay-volume-panel";
pub(crate) const SLIDER_SELECTOR: &str = "#overplay-volume-slider";
pub(crate) const MUTE_SELECTOR: &str = "#overplay-mute-btn";
pub(crate) const VOLUME_ICON_SELECTOR: &str = "#overplay-volume-icon-path";
pub(crate) const FILL_SELECTOR: &str = "#overplay-volume-fill";
pub(crate) const VALUE_SELECTOR: &str = "#overplay-volume-value";

pub(crate) const CURSOR_HIDDEN_CLASS: &str = "overplay-cursor-hidden";
pub(crate) const CURSOR_HIDDEN_SELECTOR: &str = ".overplay-cursor-hidden";

pub(crate) const STYLE_ID: &str = "overplay-style";

/// Candidate player wrappers, tried before falling back to the parent.
pub(crate) const CONTAINER_SELECTORS: [&str; 2] = [".player-container", ".video-container"];

pub(crate) const HUD_MARKUP: &str = concat!(
    r#"<div class="overplay-hud-content" aria-live="polite" aria-atomic="true">"#,
    r#"<div class="overplay-hud-icon" aria-hidden="true"></div>"#,
    r#"<div class="overplay-hud-text"></div>"#,
    "</div>",
);

pub(crate) const PANEL_MARKUP: &str = concat!(
    r#"<button class="overplay-volume-btn" id="overplay-mute-btn" type="button" aria-label="Toggle mute">"#,
    r#"<svg viewBox="0 0 24 24" fill="currentColor"><path id="overplay-volume-icon-path"/></svg>"#,
    "</button>",
    r#"<div class="overplay-slider-wrapper">"#,
    r#"<input type="range" id="overplay-volume-slider" min="0" max="100" value="100" aria-label="Volume"/>"#,
    r#"<div class="overplay-slider-track">"#,
    r#"<div class="overplay-slider-track-bg"></div>"#,
    r#"<div class="overplay-slider-track-fill" id="overplay-volume-fill"></div>"#,
    "</div>",
    "</div>",
    r#"<span id="overplay-volume-value" class="overplay-volume-value">100%</span>"#,
);

pub(crate) const STYLESHEET: &str = r#"
.overplay-hud {
  position: fixed;
  z-index: 2147483647;
  pointer-events: none;
  opacity: 0;
  transform-origin: center;
}
.overplay-hud.visible { opacity: 1; }
.overplay-hud.hiding { opacity: 0; transition: opacity 0.3s ease-out; }
.overplay-hud-content {
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 8px;
  padding: 18px 22px;
  border-radius: 16px;
  background: rgba(0, 0, 0, 0.6);
  color: #fff;
  font: 600 16px/1.2 system-ui, sans-serif;
}
.overplay-hud-icon svg { width: 56px; height: 56px; display: block; }
.overplay-volume-panel {
  position: fixed;
  top: 24px;
  right: 24px;
  z-index: 2147483647;
  display: flex;
  align-items: center;
  gap: 10px;
  padding: 8px 14px;
  border-radius: 999px;
  background: rgba(0, 0, 0, 0.7);
  color: #fff;
  font: 500 13px/1 system-ui, sans-serif;
  opacity: 0;
  pointer-events: none;
  transition: opacity 0.2s ease;
}
.overplay-volume-panel.visible { opacity: 1; pointer-events: auto; }
.overplay-volume-btn {
  display: flex;
  padding: 0;
  border: 0;
  background: none;
  color: inherit;
  cursor: pointer;
}
.overplay-volume-btn svg { width: 22px; height: 22px; }
.overplay-slider-wrapper { position: relative; width: 110px; height: 16px; }
.overplay-slider-wrapper input {
  position: absolute;
  inset: 0;
  width: 100%;
  margin: 0;
  opacity: 0;
  cursor: pointer;
}
.overplay-slider-track {
  position: absolute;
  top: 50%;
  left: 0;
  right: 0;
  height: 4px;
  transform: translateY(-50%);
  pointer-events: none;
}
.overplay-slider-track-bg,
.overplay-slider-track-fill {
  position: absolute;
  top: 0;
  bottom: 0;
  left: 0;
  border-radius: 2px;
}
.overplay-slider-track-bg { right: 0; background: rgba(255, 255, 255, 0.3); }
.overplay-slider-track-fill { background: #fff; }
.overplay-volume-value { min-width: 3.5em; text-align: right; }
.overplay-cursor-hidden,
.overplay-cursor-hidden * { cursor: none !important; }
"#;

const PLAY: &str = "M8 5v14l11-7z";
const PAUSE: &str = "M6 19h4V5H6v14zm8-14v14h4V5h-4z";
const SEEK_FORWARD: &str = "M4 13c0 4.4 3.6 8 8 8s8-3.6 8-8h-2c0 3.3-2.7 6-6 6s-6-2.7-6-6 \
     2.7-6 6-6v4l5-5-5-5v4c-4.4 0-8 3.6-8 8z";
const SEEK_BACKWARD: &str = "M12 5V1L7 6l5 5V7c3.3 0 6 2.7 6 6s-2.7 6-6 6-6-2.7-6-6H4c0 \
     4.4 3.6 8 8 8s8-3.6 8-8-3.6-8-8-8z";
const VOLUME_HIGH: &str = "M3 9v6h4l5 5V4L7 9H3zm13.5 3c0-1.77-1.02-3.29-2.5-4.03v8.05c1.48-.73 \
     2.5-2.25 2.5-4.02zM14 3.23v2.06c2.89.86 5 3.54 5 6.71s-2.11 5.85-5 6.71v2.06c4.01-.91 \
     7-4.49 7-8.77s-2.99-7.86-7-8.77z";
const VOLUME_LOW: &str = "M7 9v6h4l5 5V4l-5 5H7z";
const VOLUME_MUTED: &str = "M16.5 12c0-1.77-1.02-3.29-2.5-4.03v2.21l2.45 \
     2.45c.03-.2.05-.41.05-.63zm2.5 0c0 .94-.2 1.82-.54 2.64l1.51 1.51C20.63 14.91 21 13.5 21 \
     12c0-4.28-2.99-7.86-7-8.77v2.06c2.89.86 5 3.54 5 6.71zM4.27 3L3 4.27 7.73 9H3v6h4l5 \
     5v-6.73l4.25 4.25c-.67.52-1.42.93-2.25 1.18v2.06c1.38-.31 2.63-.95 3.69-1.81L19.73 21 21 \
     19.73l-9-9L4.27 3zM12 4L9.91 6.09 12 8.18V4z";

/// SVG path data for a volume glyph.
pub(crate) const fn volume_path(icon: VolumeIcon) -> &'static str {
    match icon {
        VolumeIcon::Muted => VOLUME_MUTED,
        VolumeIcon::Low => VOLUME_LOW,
        VolumeIcon::High => VOLUME_HIGH,
    }
}

/// SVG path data for a HUD glyph.
pub(crate) const fn icon_path(icon: HudIcon) -> &'static str {
    match icon {
        HudIcon::Play => PLAY,
        HudIcon::Pause => PAUSE,
        HudIcon::SeekForward => SEEK_FORWARD,
        HudIcon::SeekBackward => SEEK_BACKWARD,
        HudIcon::Volume(v) => volume_path(v),
    }
}

/// Inline SVG for the HUD icon, with the badge number drawn inside the glyph.
pub(crate) fn icon_svg(icon: HudIcon, badge: Option<u32>) -> String {
    let text = match badge {
        Some(n) => format!(
            r#"<text x="12" y="14.5" text-anchor="middle" font-size="6" font-weight="bold">{n}</text>"#
        ),
        None => String::new(),
    };
    format!(
        r#"<svg viewBox="0 0 24 24" fill="currentColor"><path d="{}"/>{text}</svg>"#,
        icon_path(icon)
    )
}

/// Inline style values for a placed HUD.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct HudStyle {
    pub(crate) left: String,
    pub(crate) top: String,
    pub(crate) transform: String,
}

impl HudStyle {
    pub(crate) fn new(placement: &HudPlacement) -> Self {
        let (left, top) = match placement.anchor {
            Anchor::ScreenCenter => (String::from("50%"), String::from("50%")),
            Anchor::At(p) => (format!("{}px", p.x), format!("{}px", p.y)),
        };
        Self {
            left,
            top,
            transform: format!("translate(-50%, -50%) scale({})", placement.scale),
        }
    }
}
