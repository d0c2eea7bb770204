// Copyright 2026 the Overplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM implementation of the engine's [`Host`] contract.

use alloc::format;
use alloc::string::ToString as _;
use alloc::vec::Vec;
use core::cell::RefCell;

use overplay_core::host::{Host, MediaId};
use overplay_core::hud::{HudFrame, HudPlacement};
use overplay_core::volume::VolumeDisplay;
use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlVideoElement};

use crate::fullscreen;
use crate::markup::{self, HudStyle};
use crate::media::WebVideo;
use crate::registry::Registry;

/// Handles into the volume panel's markup.
#[derive(Clone, Debug)]
pub(crate) struct PanelParts {
    pub(crate) root: HtmlElement,
    pub(crate) slider: HtmlInputElement,
    pub(crate) mute: Element,
    icon: Element,
    fill: HtmlElement,
    value: Element,
}

impl PanelParts {
    /// Finds the panel's children; `None` if the markup is incomplete.
    fn find(root: HtmlElement) -> Option<Self> {
        let find = |selector: &str| root.query_selector(selector).ok().flatten();
        let slider: HtmlInputElement = find(markup::SLIDER_SELECTOR)?.dyn_into().ok()?;
        let mute = find(markup::MUTE_SELECTOR)?;
        let icon = find(markup::VOLUME_ICON_SELECTOR)?;
        let fill: HtmlElement = find(markup::FILL_SELECTOR)?.dyn_into().ok()?;
        let value = find(markup::VALUE_SELECTOR)?;
        Some(Self {
            root,
            slider,
            mute,
            icon,
            fill,
            value,
        })
    }
}

/// Presents engine decisions in the page's DOM.
pub(crate) struct WebHost {
    document: Document,
    hud: Option<HtmlElement>,
    panel: Option<PanelParts>,
    /// Set when the panel was adopted and still needs listeners.
    panel_unbound: bool,
    videos: RefCell<Registry<HtmlVideoElement>>,
}

impl core::fmt::Debug for WebHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebHost")
            .field("hud", &self.hud.is_some())
            .field("panel", &self.panel.is_some())
            .field("videos", &self.videos.borrow().len())
            .finish_non_exhaustive()
    }
}

impl WebHost {
    pub(crate) fn new(document: Document) -> Self {
        Self {
            document,
            hud: None,
            panel: None,
            panel_unbound: false,
            videos: RefCell::new(Registry::new()),
        }
    }

    /// The engine id of `element`, assigning a fresh one on first sight.
    pub(crate) fn identify(&self, element: &HtmlVideoElement) -> MediaId {
        self.videos.borrow_mut().identify(element)
    }

    /// Hands out a newly adopted panel exactly once so the caller can bind
    /// its listeners.
    pub(crate) fn take_unbound_panel(&mut self) -> Option<PanelParts> {
        if !self.panel_unbound {
            return None;
        }
        self.panel_unbound = false;
        self.panel.clone()
    }

    /// Adds the overlay stylesheet to the document once.
    pub(crate) fn install_stylesheet(&self) -> Result<(), wasm_bindgen::JsValue> {
        if self.document.get_element_by_id(markup::STYLE_ID).is_some() {
            return Ok(());
        }
        let style = self.document.create_element("style")?;
        style.set_id(markup::STYLE_ID);
        style.set_text_content(Some(markup::STYLESHEET));
        let parent: Element = match self.document.head() {
            Some(head) => head.into(),
            None => self
                .document
                .document_element()
                .ok_or_else(|| wasm_bindgen::JsValue::from_str("document has no root element"))?,
        };
        parent.append_child(&style)?;
        Ok(())
    }

    /// The fullscreen element, or `<body>` outside fullscreen.
    fn overlay_root(&self) -> Option<Element> {
        fullscreen::element(&self.document).or_else(|| self.document.body().map(Element::from))
    }

    fn create_div(&self) -> Option<HtmlElement> {
        Some(self.document.create_element("div").ok()?.unchecked_into())
    }

    /// Finds the HUD under the overlay root, creating it if needed.
    fn ensure_hud(&mut self) -> Option<HtmlElement> {
        let root = self.overlay_root()?;
        let hud = match root.query_selector(markup::HUD_SELECTOR).ok().flatten() {
            Some(existing) => existing.unchecked_into(),
            None => {
                let hud = self.create_div()?;
                hud.set_class_name(markup::HUD_CLASS);
                hud.set_inner_html(markup::HUD_MARKUP);
                root.append_child(&hud).ok()?;
                hud
            }
        };
        self.hud = Some(hud.clone());
        Some(hud)
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

fn apply_placement(hud: &HtmlElement, placement: &HudPlacement) {
    let css = HudStyle::new(placement);
    let s = hud.style();
    let _ = s.set_property("position", "fixed");
    let _ = s.set_property("left", &css.left);
    let _ = s.set_property("top", &css.top);
    let _ = s.set_property("transform", &css.transform);
}

impl Host for WebHost {
    type Media = WebVideo;

    fn media(&self) -> Vec<WebVideo> {
        self.videos.borrow_mut().retain(|video| video.is_connected());
        let Ok(list) = self.document.query_selector_all("video") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlVideoElement>().ok())
            .map(|element| WebVideo::new(self.identify(&element), element))
            .collect()
    }

    fn is_fullscreen(&self) -> bool {
        fullscreen::element(&self.document).is_some()
    }

    fn request_fullscreen(&mut self, media: &WebVideo) -> bool {
        fullscreen::request(&media.fullscreen_target())
    }

    fn exit_fullscreen(&mut self) -> bool {
        fullscreen::exit(&self.document)
    }

    fn show_hud(&mut self, frame: &HudFrame) {
        let Some(hud) = self.ensure_hud() else {
            return;
        };
        if let Ok(Some(icon)) = hud.query_selector(markup::HUD_ICON_SELECTOR) {
            icon.set_inner_html(&markup::icon_svg(frame.content.icon, frame.content.badge));
        }
        if let Ok(Some(text)) = hud.query_selector(markup::HUD_TEXT_SELECTOR) {
            let label = frame.content.label.as_deref().unwrap_or("");
            text.set_text_content(Some(label));
            if let Some(text) = text.dyn_ref::<HtmlElement>() {
                text.set_hidden(label.is_empty());
            }
        }
        apply_placement(&hud, &frame.placement);

        // Restart the entrance transition even if the HUD is already up.
        let classes = hud.class_list();
        let _ = classes.remove_2(markup::VISIBLE_CLASS, markup::HIDING_CLASS);
        let _ = hud.offset_width();
        let _ = classes.add_1(markup::VISIBLE_CLASS);
    }

    fn place_hud(&mut self, placement: &HudPlacement) {
        if let Some(hud) = &self.hud {
            apply_placement(hud, placement);
        }
    }

    fn fade_hud(&mut self) {
        if let Some(hud) = &self.hud {
            let _ = hud
                .class_list()
                .replace(markup::VISIBLE_CLASS, markup::HIDING_CLASS);
        }
    }

    fn hide_hud(&mut self) {
        if let Some(hud) = &self.hud {
            let _ = hud
                .class_list()
                .remove_2(markup::VISIBLE_CLASS, markup::HIDING_CLASS);
        }
    }

    fn remove_hud(&mut self) {
        for el in self.query_all(markup::HUD_SELECTOR) {
            el.remove();
        }
        self.hud = None;
    }

    fn create_panel(&mut self) {
        if self.panel.is_some() {
            return;
        }
        let root: HtmlElement = match self.document.get_element_by_id(markup::PANEL_ID) {
            Some(existing) => existing.unchecked_into(),
            None => {
                let Some(panel) = self.create_div() else {
                    return;
                };
                panel.set_id(markup::PANEL_ID);
                panel.set_class_name(markup::PANEL_CLASS);
                panel.set_inner_html(markup::PANEL_MARKUP);
                if let Some(body) = self.document.body() {
                    let _ = body.append_child(&panel);
                }
                panel
            }
        };
        self.panel = PanelParts::find(root);
        self.panel_unbound = self.panel.is_some();
    }

    fn attach_panel(&mut self) {
        let (Some(panel), Some(root)) = (&self.panel, self.overlay_root()) else {
            return;
        };
        if panel.root.parent_element().as_ref() != Some(&root) {
            let _ = root.append_child(&panel.root);
        }
    }

    fn set_panel_visible(&mut self, visible: bool) {
        let Some(panel) = &self.panel else {
            return;
        };
        let classes = panel.root.class_list();
        let _ = if visible {
            classes.add_1(markup::VISIBLE_CLASS)
        } else {
            classes.remove_1(markup::VISIBLE_CLASS)
        };
    }

    fn render_panel(&mut self, display: &VolumeDisplay) {
        let Some(panel) = &self.panel else {
            return;
        };
        let percent = display.percent;
        panel.slider.set_value(&percent.to_string());
        panel.value.set_text_content(Some(&format!("{percent}%")));
        let _ = panel
            .fill
            .style()
            .set_property("width", &format!("{percent}%"));
        let _ = panel
            .icon
            .set_attribute("d", markup::volume_path(display.icon));
    }

    fn hide_cursor(&mut self, media: &WebVideo) {
        if let Some(container) = media.container() {
            let _ = container.class_list().add_1(markup::CURSOR_HIDDEN_CLASS);
        }
        let _ = media
            .element()
            .class_list()
            .add_1(markup::CURSOR_HIDDEN_CLASS);
    }

    fn restore_cursors(&mut self) {
        for el in self.query_all(markup::CURSOR_HIDDEN_SELECTOR) {
            let _ = el.class_list().remove_1(markup::CURSOR_HIDDEN_CLASS);
        }
    }
}
