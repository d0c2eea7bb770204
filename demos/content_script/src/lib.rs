// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content-script entry point.
//!
//! Installs the overlay on whatever page loads this module: keyboard
//! shortcuts, the action HUD, the volume panel and idle cursor hiding for the
//! page's most relevant `<video>`.
//!
//! Build with: `wasm-pack build --target web demos/content_script`
//! Then serve `demos/content_script/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

use wasm_bindgen::prelude::*;

/// Entry point, run when the module is instantiated.
///
/// # Errors
///
/// Propagates installation failures to the JS loader.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    overplay_backend_web::install_when_ready()
}
