// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event wiring between the page and the engine.
//!
//! Every DOM listener funnels into [`dispatch`], which borrows the shared
//! [`Session`], runs one engine entry point with a fresh timestamp, and then
//! reschedules the single [`Wake`] timeout for the engine's next deadline.
//! Listeners hold only a `Weak` reference, so dropping the [`Overplay`]
//! handle tears everything down.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Point;
use overplay_core::command::{Command, KeyInput};
use overplay_core::config::OverlayConfig;
use overplay_core::host::MediaId;
use overplay_core::overlay::Overlay;
use overplay_core::time::HostTime;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast as _;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, HtmlVideoElement,
    KeyboardEvent, MouseEvent, MutationObserver, MutationObserverInit,
};

use crate::fullscreen;
use crate::host::{PanelParts, WebHost};
use crate::wake::Wake;

type EventClosure = Closure<dyn FnMut(Event)>;

/// A registered DOM listener, removed again on [`detach`](Self::detach).
struct Listener {
    target: EventTarget,
    kind: &'static str,
    capture: bool,
    closure: EventClosure,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        capture: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback_and_bool(
            kind,
            closure.as_ref().unchecked_ref(),
            capture,
        )?;
        Ok(Self {
            target: target.clone(),
            kind,
            capture,
            closure,
        })
    }

    fn detach(&self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.kind,
            self.closure.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

/// Engine, host and wake-up state shared by every listener.
struct Session {
    overlay: Overlay,
    host: WebHost,
    wake: Wake,
    listeners: Vec<Listener>,
}

type Shared = Rc<RefCell<Session>>;

/// Runs `f` against the session, then reschedules the wake-up.
///
/// Returns `None` if the session is gone or already borrowed.
fn dispatch<R>(weak: &Weak<RefCell<Session>>, f: impl FnOnce(&mut Session, HostTime) -> R) -> Option<R> {
    let shared = weak.upgrade()?;
    let (result, unbound) = {
        let mut session = shared.try_borrow_mut().ok()?;
        let s = &mut *session;
        let now = crate::now();
        let result = f(s, now);
        s.wake.schedule(crate::now(), s.overlay.next_deadline());
        (result, s.host.take_unbound_panel())
    };
    if let Some(panel) = unbound
        && let Ok(listeners) = bind_panel(weak, &panel)
    {
        shared.borrow_mut().listeners.extend(listeners);
    }
    Some(result)
}

fn is_text_field(target: Option<EventTarget>) -> bool {
    let Some(el) = target.and_then(|t| t.dyn_into::<Element>().ok()) else {
        return false;
    };
    matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA")
        || el
            .dyn_ref::<HtmlElement>()
            .is_some_and(HtmlElement::is_content_editable)
}

fn video_target(event: &Event) -> Option<HtmlVideoElement> {
    event.target()?.dyn_into().ok()
}

fn bind_panel(weak: &Weak<RefCell<Session>>, panel: &PanelParts) -> Result<Vec<Listener>, JsValue> {
    let root: &EventTarget = &panel.root;
    let slider: &EventTarget = &panel.slider;
    let mute: &EventTarget = &panel.mute;

    let w = weak.clone();
    let on_input = Listener::attach(slider, "input", false, move |event: Event| {
        let Some(input) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let percent = input.value_as_number();
        dispatch(&w, |s, now| s.overlay.on_panel_slider(&mut s.host, now, percent));
    })?;

    // Arrow keys on the slider move the slider, not the video.
    let keep_keys = Listener::attach(slider, "keydown", false, |event: Event| {
        event.stop_propagation();
    })?;

    let w = weak.clone();
    let on_mute = Listener::attach(mute, "click", false, move |_| {
        dispatch(&w, |s, now| s.overlay.on_panel_mute_click(&mut s.host, now));
    })?;

    let w = weak.clone();
    let on_enter = Listener::attach(root, "mouseenter", false, move |_| {
        dispatch(&w, |s, now| s.overlay.on_panel_hover_enter(&mut s.host, now));
    })?;

    let w = weak.clone();
    let on_leave = Listener::attach(root, "mouseleave", false, move |_| {
        dispatch(&w, |s, now| s.overlay.on_panel_hover_leave(now));
    })?;

    Ok(alloc::vec![on_input, keep_keys, on_mute, on_enter, on_leave])
}

fn bind_page(weak: &Weak<RefCell<Session>>, document: &Document) -> Result<Vec<Listener>, JsValue> {
    let doc: &EventTarget = document;
    let window: EventTarget = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .into();
    let mut listeners = Vec::new();

    let w = weak.clone();
    listeners.push(Listener::attach(doc, "keydown", false, move |event: Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let code = event.code();
        let key = KeyInput {
            code: &code,
            in_text_field: is_text_field(event.target()),
        };
        if dispatch(&w, |s, now| s.overlay.on_key(&mut s.host, now, key)) == Some(true) {
            event.prevent_default();
        }
    })?);

    let w = weak.clone();
    listeners.push(Listener::attach(doc, "mousemove", false, move |event: Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
        dispatch(&w, |s, now| s.overlay.on_mouse_move(&mut s.host, now, pointer));
    })?);

    // Media events do not bubble; listen in the capture phase.
    let w = weak.clone();
    listeners.push(Listener::attach(doc, "play", true, move |event: Event| {
        let Some(video) = video_target(&event) else {
            return;
        };
        dispatch(&w, |s, now| {
            let id = s.host.identify(&video);
            s.overlay.on_media_play(&mut s.host, now, id);
        });
    })?);

    let w = weak.clone();
    listeners.push(Listener::attach(doc, "pause", true, move |event: Event| {
        let Some(video) = video_target(&event) else {
            return;
        };
        dispatch(&w, |s, now| {
            let id = s.host.identify(&video);
            s.overlay.on_media_pause(&mut s.host, now, id);
        });
    })?);

    for kind in fullscreen::CHANGE_EVENTS {
        let w = weak.clone();
        listeners.push(Listener::attach(doc, kind, false, move |_| {
            dispatch(&w, |s, now| s.overlay.on_fullscreen_change(&mut s.host, now));
        })?);
    }

    let w = weak.clone();
    listeners.push(Listener::attach(&window, "resize", false, move |_| {
        dispatch(&w, |s, _| s.overlay.on_resize(&mut s.host));
    })?);

    Ok(listeners)
}

/// A running overlay on the current page.
///
/// Created by [`install`](crate::install). Dropping the handle removes every
/// listener, disconnects the mutation observer and cancels the pending
/// wake-up; keep it alive (or [`core::mem::forget`] it) for the lifetime of
/// the page.
pub struct Overplay {
    session: Shared,
    observer: MutationObserver,
    _on_mutation: Closure<dyn FnMut()>,
}

impl core::fmt::Debug for Overplay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let session = self.session.try_borrow();
        let mut d = f.debug_struct("Overplay");
        if let Ok(s) = &session {
            d.field("tracked", &s.overlay.tracked())
                .field("hud", &s.overlay.hud_state())
                .field("panel", &s.overlay.panel_visibility())
                .field("idle", &s.overlay.idle_state())
                .field("listeners", &s.listeners.len());
        }
        d.finish_non_exhaustive()
    }
}

impl Overplay {
    pub(crate) fn install(document: &Document, config: OverlayConfig) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        let host = WebHost::new(document.clone());
        host.install_stylesheet()?;

        #[cfg_attr(not(feature = "trace"), expect(unused_mut, reason = "sink is feature-gated"))]
        let mut overlay = Overlay::new(config, crate::timebase());
        #[cfg(feature = "trace")]
        overlay.set_trace_sink(Box::new(crate::console::ConsoleSink::new(crate::timebase())));

        let session: Shared = Rc::new(RefCell::new(Session {
            overlay,
            host,
            wake: Wake::new(),
            listeners: Vec::new(),
        }));
        let weak = Rc::downgrade(&session);

        let w = weak.clone();
        session.borrow_mut().wake.set_callback(move || {
            dispatch(&w, |s, now| {
                s.wake.fired();
                s.overlay.advance(&mut s.host, now);
            });
        });

        let listeners = bind_page(&weak, document)?;
        session.borrow_mut().listeners = listeners;

        // Client-side navigation swaps players without any media event.
        let w = weak.clone();
        let on_mutation = Closure::wrap(Box::new(move || {
            dispatch(&w, |s, now| {
                s.overlay.recheck(&mut s.host, now);
            });
        }) as Box<dyn FnMut()>);
        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        observer.observe_with_options(&body, &init)?;

        dispatch(&weak, |s, now| s.overlay.start(&mut s.host, now));

        Ok(Self {
            session,
            observer,
            _on_mutation: on_mutation,
        })
    }

    /// The video currently tracked, if any.
    #[must_use]
    pub fn tracked(&self) -> Option<MediaId> {
        self.session.try_borrow().ok()?.overlay.tracked()
    }

    /// Runs a command against the active video, as if its key was pressed.
    ///
    /// Returns `false` when no video is active.
    pub fn execute(&self, command: Command) -> bool {
        dispatch(&Rc::downgrade(&self.session), |s, now| {
            s.overlay.execute(&mut s.host, now, command)
        })
        .unwrap_or(false)
    }
}

impl Drop for Overplay {
    fn drop(&mut self) {
        self.observer.disconnect();
        if let Ok(mut s) = self.session.try_borrow_mut() {
            for listener in s.listeners.drain(..) {
                listener.detach();
            }
            s.wake.shutdown();
        }
    }
}
