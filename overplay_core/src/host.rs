// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract for platform integrations.
//!
//! The engine never owns a video or a DOM node. A backend crate supplies:
//!
//! - **Media handles**: [`MediaElement`] values that read and write a
//!   video's playback properties. Handles are cheap to clone and mutate
//!   through `&self`, like the JS objects they wrap.
//!
//! - **Page access**: [`Host::media`] lists every video in document order,
//!   and the fullscreen methods query or change the fullscreen root.
//!
//! - **Presentation**: The HUD, panel and cursor methods turn engine
//!   decisions into markup and style changes. The engine only tells the host
//!   *what* state to show; markup, classes and icons are the host's business.
//!
//! - **Wake-ups**: After every call into the engine the host asks
//!   [`Overlay::next_deadline`](crate::overlay::Overlay::next_deadline) and
//!   arranges to call [`Overlay::advance`](crate::overlay::Overlay::advance)
//!   no earlier than that instant.
//!
//! # Crate boundaries
//!
//! `overplay_core` owns every state machine and timer. Backend crates depend
//! on it and provide platform glue only.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::hud::{HudFrame, HudPlacement};
use crate::volume::VolumeDisplay;

/// Stable identity of a media element.
///
/// This is the engine's only reference to a video; holding one never keeps
/// the element alive.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaId(pub u32);

impl fmt::Debug for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MediaId({})", self.0)
    }
}

/// `HTMLMediaElement.HAVE_NOTHING`: no metadata has been loaded.
pub const HAVE_NOTHING: u16 = 0;

/// A handle to one media element on the page.
pub trait MediaElement: Clone {
    /// Returns the element's stable identity.
    fn id(&self) -> MediaId;

    /// Returns `true` if playback is paused.
    fn is_paused(&self) -> bool;

    /// Returns the element's `readyState` (0 = nothing loaded).
    fn ready_state(&self) -> u16;

    /// Returns the playback position in seconds.
    fn current_time(&self) -> f64;

    /// Sets the playback position in seconds.
    fn set_current_time(&self, seconds: f64);

    /// Returns the media duration in seconds; `NaN` or infinite when unknown.
    fn duration(&self) -> f64;

    /// Returns the raw volume in `0.0..=1.0`, independent of mute.
    fn volume(&self) -> f64;

    /// Sets the raw volume.
    fn set_volume(&self, volume: f64);

    /// Returns `true` if audio is muted.
    fn is_muted(&self) -> bool;

    /// Sets the mute flag.
    fn set_muted(&self, muted: bool);

    /// Starts playback.
    fn play(&self);

    /// Pauses playback.
    fn pause(&self);

    /// Returns the element's on-screen bounding box in viewport coordinates.
    fn bounds(&self) -> Rect;
}

/// Everything the engine needs from the page it runs on.
pub trait Host {
    /// The media handle type.
    type Media: MediaElement;

    /// Returns every media element currently in the document, in document
    /// order.
    fn media(&self) -> Vec<Self::Media>;

    /// Returns `true` if some element is currently fullscreen.
    fn is_fullscreen(&self) -> bool;

    /// Requests fullscreen for the player that contains `media`.
    ///
    /// Returns `false` if the host has no fullscreen support.
    fn request_fullscreen(&mut self, media: &Self::Media) -> bool;

    /// Leaves fullscreen.
    ///
    /// Returns `false` if the host has no fullscreen support.
    fn exit_fullscreen(&mut self) -> bool;

    /// Creates the HUD if needed (inside the current fullscreen root, or the
    /// document body), fills it with `frame` and restarts its visible state.
    fn show_hud(&mut self, frame: &HudFrame);

    /// Moves a visible HUD without touching its content.
    fn place_hud(&mut self, placement: &HudPlacement);

    /// Starts the HUD's hiding fade.
    fn fade_hud(&mut self);

    /// Marks the HUD as fully hidden.
    fn hide_hud(&mut self);

    /// Removes every HUD element from the page.
    fn remove_hud(&mut self);

    /// Creates the volume panel if it does not exist yet.
    fn create_panel(&mut self);

    /// Moves the panel under the current fullscreen root, or the document
    /// body when nothing is fullscreen.
    fn attach_panel(&mut self);

    /// Shows or hides the panel.
    fn set_panel_visible(&mut self, visible: bool);

    /// Writes percentage text, fill proportion, slider position and icon.
    ///
    /// Hosts ignore this if the panel's parts are missing.
    fn render_panel(&mut self, display: &VolumeDisplay);

    /// Applies the cursor-hidden marker to `media` and its player container.
    fn hide_cursor(&mut self, media: &Self::Media);

    /// Removes the cursor-hidden marker from every element carrying it.
    fn restore_cursors(&mut self);
}
