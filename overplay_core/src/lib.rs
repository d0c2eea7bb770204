// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordination engine for transient playback overlays.
//!
//! `overplay_core` decides *when* overlay chrome appears on top of a page's
//! video: which `<video>` is the active one, when the action HUD fades, when
//! the volume panel recedes, and when the cursor should hide because the
//! viewer went idle. It is `no_std` compatible (with `alloc`) and never
//! touches the DOM itself; a [`Host`](host::Host) implementation does that.
//!
//! # Architecture
//!
//! Everything is driven by two inputs: host events and the passage of time.
//!
//! ```text
//!   Host events (keydown, mousemove, play/pause, fullscreen, resize, mutation)
//!       │
//!       ▼
//!   Overlay ──► locate() ──► LifecycleTracker::check() ──► Transition
//!       │                                                      │
//!       ├──► Hud ◄──────────────┬──────────────────────────────┤
//!       ├──► VolumePanel ◄──────┤                              │
//!       └──► IdleTracker ◄──────┘◄─────────────────────────────┘
//!       │
//!       ▼
//!   next_deadline() ──► host wake-up ──► Overlay::advance(now)
//! ```
//!
//! **[`locate`]**: Stateless active-video selection by playback priority.
//!
//! **[`lifecycle`]**: Polled tracking of the active video with an
//! idempotent activated / deactivated / changed classification.
//!
//! **[`hud`]**: Show, auto-hide, fade state machine for the action
//! indicator, plus anchor and scale placement.
//!
//! **[`panel`]**: Volume panel visibility, dwell timer and hover handling.
//!
//! **[`idle`]**: Active/idle detection from throttled pointer movement and
//! playback state.
//!
//! **[`volume`]**: Volume arithmetic and display derivation.
//!
//! **[`command`]**: Keyboard command surface.
//!
//! **[`overlay`]**: The [`Overlay`](overlay::Overlay) context object that
//! owns every component and routes host events between them.
//!
//! **[`timer`]**: Single-deadline timer slots. Arming a slot always
//! replaces its previous deadline.
//!
//! **[`host`]**: The contract a platform backend implements.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies and
//!   [`Overlay::set_trace_sink`](overlay::Overlay::set_trace_sink).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod command;
pub mod config;
pub mod host;
pub mod hud;
pub mod idle;
pub mod lifecycle;
pub mod locate;
pub mod overlay;
pub mod panel;
pub mod time;
pub mod timer;
pub mod trace;
pub mod volume;

#[cfg(test)]
mod test_host;
