use super::EventListener;
use crate::constants::{MOUSE_BUTTON_PRIMARY, MOUSE_BUTTON_SECONDARY, WHEEL_LINE_PX, WHEEL_PAGE_PX};
use scene_core::SceneState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq)]
enum DragMode {
    Rotate,
    Pan,
}

#[derive(Default)]
struct PointerState {
    drag: Option<DragMode>,
    pointer_id: i32,
    last: (f32, f32),
}

/// Pointer and wheel handlers feeding the orbit controls. Handlers only
/// queue motion; the frame loop applies it while playing.
pub fn wire_orbit_controls(
    canvas: &web::HtmlCanvasElement,
    scene: &Rc<RefCell<SceneState>>,
) -> Vec<EventListener> {
    let pointer = Rc::new(RefCell::new(PointerState::default()));
    vec![
        wire_pointerdown(canvas, &pointer),
        wire_pointermove(canvas, scene, &pointer),
        wire_pointerup(canvas, &pointer, "pointerup"),
        wire_pointerup(canvas, &pointer, "pointercancel"),
        wire_wheel(canvas, scene),
        EventListener::new(canvas, "contextmenu", |ev| ev.prevent_default()),
    ]
}

fn wire_pointerdown(
    canvas: &web::HtmlCanvasElement,
    pointer: &Rc<RefCell<PointerState>>,
) -> EventListener {
    let canvas_capture = canvas.clone();
    let pointer = pointer.clone();
    EventListener::new(canvas, "pointerdown", move |ev| {
        let Ok(ev) = ev.dyn_into::<web::PointerEvent>() else {
            return;
        };
        let button = ev.button();
        let modifier = ev.shift_key() || ev.ctrl_key() || ev.meta_key();
        let mode = match button {
            MOUSE_BUTTON_PRIMARY if modifier => DragMode::Pan,
            MOUSE_BUTTON_PRIMARY => DragMode::Rotate,
            MOUSE_BUTTON_SECONDARY => DragMode::Pan,
            _ => return,
        };
        {
            let mut p = pointer.borrow_mut();
            p.drag = Some(mode);
            p.pointer_id = ev.pointer_id();
            p.last = (ev.client_x() as f32, ev.client_y() as f32);
        }
        _ = canvas_capture.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    })
}

fn wire_pointermove(
    canvas: &web::HtmlCanvasElement,
    scene: &Rc<RefCell<SceneState>>,
    pointer: &Rc<RefCell<PointerState>>,
) -> EventListener {
    let canvas_size = canvas.clone();
    let scene = scene.clone();
    let pointer = pointer.clone();
    EventListener::new(canvas, "pointermove", move |ev| {
        let Ok(ev) = ev.dyn_into::<web::PointerEvent>() else {
            return;
        };
        let (mode, dx, dy) = {
            let mut p = pointer.borrow_mut();
            let Some(mode) = p.drag else {
                return;
            };
            if p.pointer_id != ev.pointer_id() {
                return;
            }
            let pos = (ev.client_x() as f32, ev.client_y() as f32);
            let delta = (pos.0 - p.last.0, pos.1 - p.last.1);
            p.last = pos;
            (mode, delta.0, delta.1)
        };
        let client_height = canvas_size.client_height().max(1) as f32;
        let mut guard = scene.borrow_mut();
        let s = &mut *guard;
        match mode {
            DragMode::Rotate => s.controls.rotate(dx, dy, client_height),
            DragMode::Pan => s.controls.pan(dx, dy, client_height, &s.camera),
        }
    })
}

fn wire_pointerup(
    canvas: &web::HtmlCanvasElement,
    pointer: &Rc<RefCell<PointerState>>,
    kind: &'static str,
) -> EventListener {
    let canvas_capture = canvas.clone();
    let pointer = pointer.clone();
    EventListener::new(canvas, kind, move |ev| {
        let Ok(ev) = ev.dyn_into::<web::PointerEvent>() else {
            return;
        };
        let mut p = pointer.borrow_mut();
        if p.drag.is_some() && p.pointer_id == ev.pointer_id() {
            p.drag = None;
            _ = canvas_capture.release_pointer_capture(ev.pointer_id());
        }
    })
}

fn wire_wheel(canvas: &web::HtmlCanvasElement, scene: &Rc<RefCell<SceneState>>) -> EventListener {
    let scene = scene.clone();
    EventListener::new(canvas, "wheel", move |ev| {
        let Ok(ev) = ev.dyn_into::<web::WheelEvent>() else {
            return;
        };
        let px = match ev.delta_mode() {
            web::WheelEvent::DOM_DELTA_LINE => ev.delta_y() * WHEEL_LINE_PX,
            web::WheelEvent::DOM_DELTA_PAGE => ev.delta_y() * WHEEL_PAGE_PX,
            _ => ev.delta_y(),
        };
        scene.borrow_mut().controls.dolly(px as f32);
        ev.prevent_default();
    })
}
