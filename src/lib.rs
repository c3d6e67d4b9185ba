#![cfg(target_arch = "wasm32")]
use anyhow::Context;
use scene_core::settings::DEFAULT_TEXTURE_URL;
use scene_core::{LoopCommand, LoopState, SceneOptions, SceneState, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod gui;
mod overlay;
mod render;

use events::EventListener;
use frame::{FrameContext, FrameLoop};
use gui::GuiPanel;
use overlay::StatsOverlay;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("[scene] wave-scene loaded");
    Ok(())
}

/// Mount a wave scene into `options.dom` and start animating it.
///
/// Options: `dom` (required element), `bloom` (bool, default false),
/// `texture` (image URL, default `abs.png`).
#[wasm_bindgen(js_name = createScene)]
pub async fn create_scene(options: JsValue) -> Result<SceneController, JsValue> {
    build(options).await.map_err(|e| {
        log::error!("[scene] createScene failed: {:#}", e);
        JsValue::from(js_sys::Error::new(&format!("{:#}", e)))
    })
}

/// Keeps canvas, scene viewport and camera in step with the container box.
#[derive(Clone)]
struct ViewportSync {
    container: web::HtmlElement,
    canvas: web::HtmlCanvasElement,
    scene: Rc<RefCell<SceneState>>,
    frame_loop: FrameLoop,
}

impl ViewportSync {
    fn resize(&self) {
        let (width, height) = dom::container_box(&self.container);
        let ratio = dom::pixel_ratio() as f32;
        let resized = self.scene.borrow_mut().resize(width, height, ratio);
        let viewport = match resized {
            Ok(v) => v,
            Err(e) => {
                log::debug!("[scene] resize ignored: {}", e);
                return;
            }
        };
        dom::size_canvas(&self.canvas, viewport.width, viewport.height, viewport.backing_size());
        // The backing store was cleared; draw once if the loop is idle.
        if self.scene.borrow().needs_redraw() {
            self.frame_loop.schedule();
        }
    }
}

#[wasm_bindgen]
pub struct SceneController {
    scene: Rc<RefCell<SceneState>>,
    frame_loop: FrameLoop,
    sync: ViewportSync,
    gui: GuiPanel,
    pointer_listeners: Vec<EventListener>,
    resize_listener: Option<EventListener>,
}

#[wasm_bindgen]
impl SceneController {
    pub fn play(&self) {
        if self.frame_loop.context().borrow().is_lost() {
            log::warn!("[loop] play() ignored, renderer lost");
            return;
        }
        let command = self.scene.borrow_mut().play();
        if command == LoopCommand::Schedule {
            log::info!("[loop] play");
            self.frame_loop.schedule();
        }
    }

    pub fn stop(&self) {
        let command = self.scene.borrow_mut().stop();
        if command == LoopCommand::Cancel {
            log::info!("[loop] stop");
            self.frame_loop.cancel();
        }
    }

    pub fn resize(&self) {
        if self.scene.borrow().loop_state() != LoopState::Disposed {
            self.sync.resize();
        }
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.scene.borrow().is_playing()
    }

    #[wasm_bindgen(js_name = setBloomEnabled)]
    pub fn set_bloom_enabled(&self, enabled: bool) {
        let redraw = {
            let mut scene = self.scene.borrow_mut();
            scene.set_bloom_enabled(enabled);
            scene.needs_redraw()
        };
        log::info!("[scene] bloom {}", if enabled { "on" } else { "off" });
        if redraw {
            self.frame_loop.schedule();
        }
    }

    /// Cancel the loop, detach listeners and remove every element the scene
    /// added to its container. Idempotent.
    pub fn dispose(&mut self) {
        if self.scene.borrow().loop_state() == LoopState::Disposed {
            return;
        }
        self.scene.borrow_mut().dispose();
        self.frame_loop.shutdown();
        self.resize_listener.take();
        self.pointer_listeners.clear();
        self.gui.remove();
        self.frame_loop.context().borrow().stats.remove();
        dom::remove(&self.sync.canvas);
        log::info!("[scene] disposed");
    }
}

async fn build(options: JsValue) -> anyhow::Result<SceneController> {
    let container = dom::container_from_options(&options)?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let scene_options = SceneOptions {
        bloom: dom::option_bool(&options, "bloom").unwrap_or(false),
        texture_url: dom::option_string(&options, "texture")
            .unwrap_or_else(|| DEFAULT_TEXTURE_URL.to_string()),
    };

    let (width, height) = dom::container_box(&container);
    let viewport = Viewport::new(width.max(1), height.max(1), dom::pixel_ratio() as f32)?;
    let scene = Rc::new(RefCell::new(SceneState::new(viewport, &scene_options, 0.0)?));

    let mut mounted = dom::MountGuard::default();
    let canvas = dom::mount_canvas(&document, &container)?;
    mounted.track(&canvas);
    dom::size_canvas(&canvas, viewport.width, viewport.height, viewport.backing_size());

    let (backing_w, backing_h) = viewport.backing_size();
    let gpu = render::GpuState::new(&canvas, backing_w, backing_h)
        .await
        .context("initialising WebGPU")?;

    dom::ensure_positioned(&container);
    let stats = StatsOverlay::mount(&document, &container)?;
    mounted.track(stats.element());

    let frame_loop = FrameLoop::new(FrameContext::new(scene.clone(), gpu, stats));
    let gui = match GuiPanel::mount(&document, &container, &scene, &frame_loop) {
        Ok(gui) => gui,
        Err(e) => {
            frame_loop.shutdown();
            return Err(e);
        }
    };
    mounted.disarm();

    let sync = ViewportSync {
        container,
        canvas: canvas.clone(),
        scene: scene.clone(),
        frame_loop: frame_loop.clone(),
    };
    sync.resize();
    let resize_listener = {
        let sync = sync.clone();
        events::wire_window_resize(move || sync.resize())
    };
    let pointer_listeners = events::pointer::wire_orbit_controls(&canvas, &scene);
    load_texture(scene_options.texture_url.clone(), frame_loop.clone());

    let controller = SceneController {
        scene,
        frame_loop,
        sync,
        gui,
        pointer_listeners,
        resize_listener,
    };
    controller.play();
    log::info!(
        "[scene] created {}x{} @{}x, bloom {}",
        viewport.width,
        viewport.height,
        viewport.pixel_ratio,
        scene_options.bloom
    );
    Ok(controller)
}

fn load_texture(url: String, frame_loop: FrameLoop) {
    spawn_local(async move {
        let image = match render::fetch_rgba(&url).await {
            Ok(image) => image,
            Err(e) => {
                log::warn!("[texture] {:#}; keeping placeholder", e);
                return;
            }
        };
        let ctx = frame_loop.context();
        let state = ctx.borrow().scene.borrow().loop_state();
        if state == LoopState::Disposed {
            return;
        }
        let uploaded = ctx.borrow_mut().gpu.set_texture(&image);
        if let Err(e) = uploaded {
            log::warn!("[texture] {}: {:#}; keeping placeholder", url, e);
            return;
        }
        log::info!("[texture] loaded {} ({}x{})", url, image.width(), image.height());
        if ctx.borrow().scene.borrow().needs_redraw() {
            frame_loop.schedule();
        }
    });
}
