// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host used by the unit tests.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

use kurbo::Rect;

use crate::host::{Host, MediaElement, MediaId};
use crate::hud::{HudFrame, HudPlacement};
use crate::volume::VolumeDisplay;

#[derive(Debug)]
struct VideoState {
    paused: Cell<bool>,
    ready_state: Cell<u16>,
    current_time: Cell<f64>,
    duration: Cell<f64>,
    volume: Cell<f64>,
    muted: Cell<bool>,
    bounds: Cell<Rect>,
}

/// A shared, mutable stand-in for a `<video>` element.
#[derive(Clone, Debug)]
pub(crate) struct FakeVideo {
    id: MediaId,
    state: Rc<VideoState>,
}

impl FakeVideo {
    /// Paused, unloaded, at 0s, volume 1.
    pub(crate) fn new(id: u32) -> Self {
        Self {
            id: MediaId(id),
            state: Rc::new(VideoState {
                paused: Cell::new(true),
                ready_state: Cell::new(0),
                current_time: Cell::new(0.0),
                duration: Cell::new(f64::NAN),
                volume: Cell::new(1.0),
                muted: Cell::new(false),
                bounds: Cell::new(Rect::new(0.0, 0.0, 640.0, 360.0)),
            }),
        }
    }

    pub(crate) fn loaded(self) -> Self {
        self.state.ready_state.set(4);
        self
    }

    pub(crate) fn playing(self) -> Self {
        self.state.paused.set(false);
        self
    }

    pub(crate) fn at(self, seconds: f64) -> Self {
        self.state.current_time.set(seconds);
        self
    }

    pub(crate) fn with_volume(self, volume: f64) -> Self {
        self.state.volume.set(volume);
        self
    }

    pub(crate) fn with_duration(self, seconds: f64) -> Self {
        self.state.duration.set(seconds);
        self
    }

    pub(crate) fn with_bounds(self, bounds: Rect) -> Self {
        self.set_bounds(bounds);
        self
    }

    /// Simulates a layout change.
    pub(crate) fn set_bounds(&self, bounds: Rect) {
        self.state.bounds.set(bounds);
    }
}

impl MediaElement for FakeVideo {
    fn id(&self) -> MediaId {
        self.id
    }

    fn is_paused(&self) -> bool {
        self.state.paused.get()
    }

    fn ready_state(&self) -> u16 {
        self.state.ready_state.get()
    }

    fn current_time(&self) -> f64 {
        self.state.current_time.get()
    }

    fn set_current_time(&self, seconds: f64) {
        self.state.current_time.set(seconds);
    }

    fn duration(&self) -> f64 {
        self.state.duration.get()
    }

    fn volume(&self) -> f64 {
        self.state.volume.get()
    }

    fn set_volume(&self, volume: f64) {
        self.state.volume.set(volume);
    }

    fn is_muted(&self) -> bool {
        self.state.muted.get()
    }

    fn set_muted(&self, muted: bool) {
        self.state.muted.set(muted);
    }

    fn play(&self) {
        self.state.paused.set(false);
    }

    fn pause(&self) {
        self.state.paused.set(true);
    }

    fn bounds(&self) -> Rect {
        self.state.bounds.get()
    }
}

/// A presentation call the engine made.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Call {
    ShowHud(HudFrame),
    PlaceHud(HudPlacement),
    FadeHud,
    HideHud,
    RemoveHud,
    CreatePanel,
    AttachPanel,
    SetPanelVisible(bool),
    RenderPanel(VolumeDisplay),
    HideCursor(MediaId),
    RestoreCursors,
    RequestFullscreen(MediaId),
    ExitFullscreen,
}

/// Records every call and serves a fixed video list.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    pub(crate) videos: Vec<FakeVideo>,
    pub(crate) fullscreen: bool,
    calls: Vec<Call>,
    scans: Cell<usize>,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_videos(videos: Vec<FakeVideo>) -> Self {
        Self {
            videos,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// How many times the engine asked for the video list.
    pub(crate) fn scans(&self) -> usize {
        self.scans.get()
    }

    pub(crate) fn clear(&mut self) {
        self.calls.clear();
    }

    pub(crate) fn saw(&self, call: &Call) -> bool {
        self.calls.contains(call)
    }

    pub(crate) fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub(crate) fn last_hud(&self) -> Option<&HudFrame> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::ShowHud(frame) => Some(frame),
            _ => None,
        })
    }

    pub(crate) fn last_panel(&self) -> Option<VolumeDisplay> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::RenderPanel(display) => Some(*display),
            _ => None,
        })
    }
}

impl Host for FakeHost {
    type Media = FakeVideo;

    fn media(&self) -> Vec<FakeVideo> {
        self.scans.set(self.scans.get() + 1);
        self.videos.clone()
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self, media: &FakeVideo) -> bool {
        self.calls.push(Call::RequestFullscreen(media.id()));
        true
    }

    fn exit_fullscreen(&mut self) -> bool {
        self.calls.push(Call::ExitFullscreen);
        true
    }

    fn show_hud(&mut self, frame: &HudFrame) {
        self.calls.push(Call::ShowHud(frame.clone()));
    }

    fn place_hud(&mut self, placement: &HudPlacement) {
        self.calls.push(Call::PlaceHud(*placement));
    }

    fn fade_hud(&mut self) {
        self.calls.push(Call::FadeHud);
    }

    fn hide_hud(&mut self) {
        self.calls.push(Call::HideHud);
    }

    fn remove_hud(&mut self) {
        self.calls.push(Call::RemoveHud);
    }

    fn create_panel(&mut self) {
        self.calls.push(Call::CreatePanel);
    }

    fn attach_panel(&mut self) {
        self.calls.push(Call::AttachPanel);
    }

    fn set_panel_visible(&mut self, visible: bool) {
        self.calls.push(Call::SetPanelVisible(visible));
    }

    fn render_panel(&mut self, display: &VolumeDisplay) {
        self.calls.push(Call::RenderPanel(*display));
    }

    fn hide_cursor(&mut self, media: &FakeVideo) {
        self.calls.push(Call::HideCursor(media.id()));
    }

    fn restore_cursors(&mut self) {
        self.calls.push(Call::RestoreCursors);
    }
}
