// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `<video>` handles.
//!
//! Each handle carries the [`MediaId`] the host's registry assigned to its
//! element.

use kurbo::Rect;
use overplay_core::host::{MediaElement, MediaId};
use web_sys::{Element, HtmlVideoElement};

use crate::markup::CONTAINER_SELECTORS;

/// A `<video>` element and its engine id.
#[derive(Clone)]
pub struct WebVideo {
    id: MediaId,
    element: HtmlVideoElement,
}

impl core::fmt::Debug for WebVideo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebVideo")
            .field("id", &self.id)
            .field("element", &"HtmlVideoElement")
            .finish()
    }
}

impl WebVideo {
    pub(crate) fn new(id: MediaId, element: HtmlVideoElement) -> Self {
        Self { id, element }
    }

    /// The wrapped element.
    #[must_use]
    pub fn element(&self) -> &HtmlVideoElement {
        &self.element
    }

    /// The site's player wrapper, or the video's parent.
    pub(crate) fn container(&self) -> Option<Element> {
        CONTAINER_SELECTORS
            .iter()
            .find_map(|selector| self.element.closest(selector).ok().flatten())
            .or_else(|| self.element.parent_element())
    }

    /// The element to take fullscreen: the container, or the video itself.
    pub(crate) fn fullscreen_target(&self) -> Element {
        self.container().unwrap_or_else(|| {
            let element: &Element = &self.element;
            element.clone()
        })
    }
}

impl MediaElement for WebVideo {
    fn id(&self) -> MediaId {
        self.id
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn ready_state(&self) -> u16 {
        self.element.ready_state()
    }

    fn current_time(&self) -> f64 {
        self.element.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.element.duration()
    }

    fn volume(&self) -> f64 {
        self.element.volume()
    }

    fn set_volume(&self, volume: f64) {
        self.element.set_volume(volume);
    }

    fn is_muted(&self) -> bool {
        self.element.muted()
    }

    fn set_muted(&self, muted: bool) {
        self.element.set_muted(muted);
    }

    fn play(&self) {
        // Autoplay refusals reject the returned promise; the `pause` state
        // simply stays put.
        let _ = self.element.play();
    }

    fn pause(&self) {
        let _ = self.element.pause();
    }

    fn bounds(&self) -> Rect {
        let r = self.element.get_bounding_client_rect();
        Rect::new(r.left(), r.top(), r.right(), r.bottom())
    }
}
