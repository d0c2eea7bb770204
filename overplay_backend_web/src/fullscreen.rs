// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fullscreen shims.
//!
//! Browsers disagree on member names: the standard API, the `webkit` prefix
//! and Gecko's `mozFullScreen` spelling are all treated as equivalent. Methods
//! are feature-detected by reading the member and checking that it is a
//! function, so an unsupported browser reports `false` instead of throwing.

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

/// Events that announce a fullscreen change, in any vendor spelling.
pub(crate) const CHANGE_EVENTS: [&str; 3] = [
    "fullscreenchange",
    "webkitfullscreenchange",
    "mozfullscreenchange",
];

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(extends = Document)]
    type FullscreenDocument;

    #[wasm_bindgen(method, getter, js_name = "fullscreenElement")]
    fn fullscreen_element(this: &FullscreenDocument) -> Option<Element>;

    #[wasm_bindgen(method, getter, js_name = "webkitFullscreenElement")]
    fn webkit_fullscreen_element(this: &FullscreenDocument) -> Option<Element>;

    #[wasm_bindgen(method, getter, js_name = "mozFullScreenElement")]
    fn moz_full_screen_element(this: &FullscreenDocument) -> Option<Element>;

    #[wasm_bindgen(method, getter, js_name = "exitFullscreen")]
    fn exit_fullscreen_member(this: &FullscreenDocument) -> JsValue;

    #[wasm_bindgen(method, getter, js_name = "webkitExitFullscreen")]
    fn webkit_exit_fullscreen_member(this: &FullscreenDocument) -> JsValue;

    #[wasm_bindgen(method, getter, js_name = "mozCancelFullScreen")]
    fn moz_cancel_full_screen_member(this: &FullscreenDocument) -> JsValue;

    #[wasm_bindgen(extends = Element)]
    type FullscreenElement;

    #[wasm_bindgen(method, getter, js_name = "requestFullscreen")]
    fn request_fullscreen_member(this: &FullscreenElement) -> JsValue;

    #[wasm_bindgen(method, getter, js_name = "webkitRequestFullscreen")]
    fn webkit_request_fullscreen_member(this: &FullscreenElement) -> JsValue;

    #[wasm_bindgen(method, getter, js_name = "mozRequestFullScreen")]
    fn moz_request_full_screen_member(this: &FullscreenElement) -> JsValue;

    type Method;

    #[wasm_bindgen(method, catch, js_name = "call")]
    fn call(this: &Method, receiver: &JsValue) -> Result<JsValue, JsValue>;
}

/// The current fullscreen element, if any.
pub(crate) fn element(document: &Document) -> Option<Element> {
    let doc: &FullscreenDocument = document.unchecked_ref();
    doc.fullscreen_element()
        .or_else(|| doc.webkit_fullscreen_element())
        .or_else(|| doc.moz_full_screen_element())
}

/// Asks the browser to make `target` fullscreen.
///
/// Returns `false` when no variant of the API exists. The request itself
/// settles asynchronously; a refusal surfaces as a rejected promise.
pub(crate) fn request(target: &Element) -> bool {
    let el: &FullscreenElement = target.unchecked_ref();
    let candidates = [
        el.request_fullscreen_member(),
        el.webkit_request_fullscreen_member(),
        el.moz_request_full_screen_member(),
    ];
    invoke_first(&candidates, target)
}

/// Leaves fullscreen. Returns `false` when no variant of the API exists.
pub(crate) fn exit(document: &Document) -> bool {
    let doc: &FullscreenDocument = document.unchecked_ref();
    let candidates = [
        doc.exit_fullscreen_member(),
        doc.webkit_exit_fullscreen_member(),
        doc.moz_cancel_full_screen_member(),
    ];
    invoke_first(&candidates, document)
}

fn invoke_first(candidates: &[JsValue], receiver: &JsValue) -> bool {
    candidates
        .iter()
        .find(|member| member.is_function())
        .is_some_and(|member| member.unchecked_ref::<Method>().call(receiver).is_ok())
}
