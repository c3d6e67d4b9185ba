use crate::constants::PIXEL_RATIO_CAP;
use anyhow::{anyhow, Context};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Device pixel ratio, capped so high-density screens do not quadruple the
/// fill cost.
#[inline]
pub fn pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .min(PIXEL_RATIO_CAP)
}

/// Resolve `options.dom` into an attached container element.
pub fn container_from_options(options: &JsValue) -> anyhow::Result<web::HtmlElement> {
    if options.is_undefined() || options.is_null() {
        return Err(anyhow!("scene options missing"));
    }
    let dom = js_sys::Reflect::get(options, &JsValue::from_str("dom"))
        .map_err(|e| anyhow!("reading options.dom: {:?}", e))?;
    if dom.is_undefined() || dom.is_null() {
        return Err(anyhow!("scene container missing"));
    }
    let container: web::HtmlElement = dom
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow!("scene container is not an HTML element"))?;
    if !container.is_connected() {
        return Err(anyhow!("scene container is not attached to the document"));
    }
    Ok(container)
}

pub fn option_bool(options: &JsValue, key: &str) -> Option<bool> {
    js_sys::Reflect::get(options, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_bool())
}

pub fn option_string(options: &JsValue, key: &str) -> Option<String> {
    js_sys::Reflect::get(options, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
}

/// Container box in CSS pixels.
#[inline]
pub fn container_box(container: &web::HtmlElement) -> (u32, u32) {
    (
        container.offset_width().max(0) as u32,
        container.offset_height().max(0) as u32,
    )
}

pub fn create_element<T: JsCast>(document: &web::Document, tag: &str) -> anyhow::Result<T> {
    document
        .create_element(tag)
        .map_err(|e| anyhow!("create <{}>: {:?}", tag, e))?
        .dyn_into::<T>()
        .map_err(|_| anyhow!("<{}> has an unexpected type", tag))
}

pub fn set_styles(el: &web::HtmlElement, styles: &[(&str, &str)]) {
    let style = el.style();
    for (k, v) in styles {
        _ = style.set_property(k, v);
    }
}

pub fn append(parent: &web::Node, child: &web::Node) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow!("append_child: {:?}", e))
}

#[inline]
pub fn remove(el: &web::Element) {
    el.remove();
}

/// Create the drawing canvas and append it to `container`.
pub fn mount_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement =
        create_element(document, "canvas").context("creating scene canvas")?;
    canvas.set_class_name(crate::constants::CANVAS_CLASS);
    set_styles(&canvas, &[("display", "block"), ("touch-action", "none")]);
    append(container, &canvas)?;
    Ok(canvas)
}

/// Size the canvas like a renderer `setSize`: CSS box in CSS pixels,
/// backing store in device pixels.
pub fn size_canvas(canvas: &web::HtmlCanvasElement, width: u32, height: u32, backing: (u32, u32)) {
    canvas.set_width(backing.0.max(1));
    canvas.set_height(backing.1.max(1));
    let css_w = format!("{}px", width);
    let css_h = format!("{}px", height);
    set_styles(canvas, &[("width", css_w.as_str()), ("height", css_h.as_str())]);
}

/// Absolutely positioned overlays need a positioned container.
pub fn ensure_positioned(container: &web::HtmlElement) {
    let position = web::window()
        .and_then(|w| w.get_computed_style(container).ok().flatten())
        .and_then(|style| style.get_property_value("position").ok());
    if matches!(position.as_deref(), None | Some("") | Some("static")) {
        set_styles(container, &[("position", "relative")]);
    }
}

/// Removes the tracked elements on drop unless disarmed, so a failed
/// construction leaves the container as it found it.
#[derive(Default)]
pub struct MountGuard {
    elements: Vec<web::Element>,
}

impl MountGuard {
    pub fn track(&mut self, el: &web::Element) {
        self.elements.push(el.clone());
    }

    pub fn disarm(mut self) {
        self.elements.clear();
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        for el in self.elements.drain(..) {
            remove(&el);
        }
    }
}
