use crate::constants::{GUI_CLASS, GUI_TITLE, GUI_WIDTH_PX};
use crate::dom;
use crate::events::EventListener;
use crate::frame::FrameLoop;
use scene_core::{ColorField, Control, SceneState, SliderSpec, WAVE_CONTROLS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Debug panel with one row per entry of `WAVE_CONTROLS`. Every input event
/// writes straight into the bound uniform; while the loop is stopped it also
/// requests a single frame so the edit shows up.
pub struct GuiPanel {
    root: web::HtmlElement,
    _listeners: Vec<EventListener>,
}

impl GuiPanel {
    pub fn mount(
        document: &web::Document,
        container: &web::HtmlElement,
        scene: &Rc<RefCell<SceneState>>,
        frame_loop: &FrameLoop,
    ) -> anyhow::Result<Self> {
        let root: web::HtmlElement = dom::create_element(document, "div")?;
        root.set_class_name(GUI_CLASS);
        let width = format!("{}px", GUI_WIDTH_PX);
        dom::set_styles(
            &root,
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("right", "15px"),
                ("width", width.as_str()),
                ("z-index", "10000"),
                ("background", "#1f1f1f"),
                ("color", "#ebebeb"),
                ("font", "11px -apple-system, system-ui, sans-serif"),
                ("padding", "4px 0"),
            ],
        );

        let title: web::HtmlElement = dom::create_element(document, "div")?;
        title.set_text_content(Some(GUI_TITLE));
        dom::set_styles(&title, &[("padding", "4px 8px"), ("font-weight", "600")]);
        dom::append(&root, &title)?;

        let mut listeners = Vec::with_capacity(WAVE_CONTROLS.len());
        for control in WAVE_CONTROLS {
            let (row, listener) = match control {
                Control::Slider(spec) => slider_row(document, scene, frame_loop, spec)?,
                Control::Color { label, field } => {
                    color_row(document, scene, frame_loop, label, field)?
                }
            };
            dom::append(&root, &row)?;
            listeners.push(listener);
        }

        dom::append(container, &root)?;
        log::info!("[gui] mounted {} controls", listeners.len());
        Ok(Self {
            root,
            _listeners: listeners,
        })
    }

    pub fn remove(&self) {
        dom::remove(&self.root);
    }
}

fn row_shell(document: &web::Document, label: &str) -> anyhow::Result<web::HtmlElement> {
    let row: web::HtmlElement = dom::create_element(document, "div")?;
    dom::set_styles(
        &row,
        &[
            ("display", "flex"),
            ("align-items", "center"),
            ("gap", "6px"),
            ("padding", "2px 8px"),
        ],
    );
    let name: web::HtmlElement = dom::create_element(document, "label")?;
    name.set_text_content(Some(label));
    dom::set_styles(&name, &[("flex", "0 0 40%"), ("overflow", "hidden")]);
    dom::append(&row, &name)?;
    Ok(row)
}

fn slider_row(
    document: &web::Document,
    scene: &Rc<RefCell<SceneState>>,
    frame_loop: &FrameLoop,
    spec: SliderSpec,
) -> anyhow::Result<(web::HtmlElement, EventListener)> {
    let row = row_shell(document, spec.label)?;
    let input: web::HtmlInputElement = dom::create_element(document, "input")?;
    input.set_type("range");
    input.set_min(&spec.min.to_string());
    input.set_max(&spec.max.to_string());
    input.set_step(&spec.step.to_string());
    let initial = scene.borrow().control_value(spec.field);
    input.set_value(&initial.to_string());
    dom::set_styles(&input, &[("flex", "1")]);

    let readout: web::HtmlElement = dom::create_element(document, "span")?;
    readout.set_text_content(Some(&spec.format(initial)));
    dom::set_styles(&readout, &[("flex", "0 0 48px"), ("text-align", "right")]);

    dom::append(&row, &input)?;
    dom::append(&row, &readout)?;

    let scene = scene.clone();
    let frame_loop = frame_loop.clone();
    let source = input.clone();
    let listener = EventListener::new(&input, "input", move |_| {
        let raw = source.value_as_number();
        if !raw.is_finite() {
            return;
        }
        let value = spec.clamp(raw as f32);
        let redraw = {
            let mut scene = scene.borrow_mut();
            scene.set_control(spec.field, value);
            scene.needs_redraw()
        };
        readout.set_text_content(Some(&spec.format(value)));
        if redraw {
            frame_loop.schedule();
        }
    });
    Ok((row, listener))
}

fn color_row(
    document: &web::Document,
    scene: &Rc<RefCell<SceneState>>,
    frame_loop: &FrameLoop,
    label: &'static str,
    field: ColorField,
) -> anyhow::Result<(web::HtmlElement, EventListener)> {
    let row = row_shell(document, label)?;
    let input: web::HtmlInputElement = dom::create_element(document, "input")?;
    input.set_type("color");
    input.set_value(&scene.borrow().color(field).to_hex());
    dom::set_styles(&input, &[("flex", "1")]);
    dom::append(&row, &input)?;

    let scene = scene.clone();
    let frame_loop = frame_loop.clone();
    let listener = EventListener::new(&input, "input", move |ev| {
        let Some(target) = ev
            .target()
            .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        else {
            return;
        };
        let hex = target.value();
        let applied = scene.borrow_mut().set_color(field, &hex);
        match applied {
            Ok(_) if scene.borrow().needs_redraw() => frame_loop.schedule(),
            Ok(_) => {}
            Err(e) => log::warn!("[gui] {}: {}", label, e),
        }
    });
    Ok((row, listener))
}
