// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for overplay.
//!
//! This crate connects [`overplay_core`] to a live page:
//!
//! - a DOM [`Host`](overplay_core::host::Host) that finds `<video>` elements,
//!   draws the HUD and volume panel, and hides the cursor
//! - fullscreen shims that accept the standard, `webkit` and `moz` APIs
//! - event wiring for keys, pointer movement, media play/pause, fullscreen
//!   changes, resizes and subtree mutations
//! - a single `setTimeout` that wakes the engine at its next deadline
//!
//! Call [`install_when_ready`] from a `wasm_bindgen(start)` function, or
//! [`install`] once the document has a `<body>`.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Logs engine trace events to
//!   `console.debug` through [`ConsoleSink`].

#![no_std]

extern crate alloc;

#[cfg(feature = "trace")]
mod console;
mod fullscreen;
mod host;
mod markup;
mod media;
mod registry;
mod session;
mod wake;

#[cfg(feature = "trace")]
pub use console::ConsoleSink;
pub use media::WebVideo;
pub use session::Overplay;

use alloc::boxed::Box;

use overplay_core::config::OverlayConfig;
use overplay_core::time::{HostTime, Timebase};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks. Use [`timebase`] to
/// convert to nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    let ms = wake::performance_now();
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "performance.now() returns small positive f64; µs fits in u64"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::new(1000, 1)
}

fn document() -> Result<web_sys::Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Installs the overlay on the current page with the standard timings.
///
/// # Errors
///
/// Fails if there is no document or `<body>`, or if the browser rejects a
/// listener or observer registration.
pub fn install() -> Result<Overplay, JsValue> {
    install_with(OverlayConfig::standard())
}

/// Installs the overlay with an explicit configuration.
///
/// # Errors
///
/// As for [`install`].
pub fn install_with(config: OverlayConfig) -> Result<Overplay, JsValue> {
    Overplay::install(&document()?, config)
}

/// Installs now if the document is parsed, otherwise on `DOMContentLoaded`.
///
/// The installed overlay lives for the rest of the page.
///
/// # Errors
///
/// Fails if there is no document, or if an immediate [`install`] fails.
pub fn install_when_ready() -> Result<(), JsValue> {
    let document = document()?;
    if document.ready_state() != "loading" {
        core::mem::forget(install()?);
        return Ok(());
    }
    let on_ready = Closure::wrap(Box::new(move || {
        if let Ok(overplay) = install() {
            core::mem::forget(overplay);
        }
    }) as Box<dyn FnMut()>);
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
    on_ready.forget();
    Ok(())
}
