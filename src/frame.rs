use crate::overlay::StatsOverlay;
use crate::render::{self, GpuState};
use instant::Instant;
use scene_core::SceneState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one animation frame touches.
pub struct FrameContext {
    pub scene: Rc<RefCell<SceneState>>,
    pub gpu: GpuState,
    pub stats: StatsOverlay,
    pub started: Instant,
    lost: bool,
}

impl FrameContext {
    pub fn new(scene: Rc<RefCell<SceneState>>, gpu: GpuState, stats: StatsOverlay) -> Self {
        Self {
            scene,
            gpu,
            stats,
            started: Instant::now(),
            lost: false,
        }
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Draw, then advance the scene. Returns whether another frame should
    /// be requested.
    pub fn frame(&mut self) -> bool {
        if self.lost {
            return false;
        }
        if render::device_lost() {
            self.halt("device lost");
            return false;
        }

        let result = {
            let scene = self.scene.borrow();
            self.gpu.render(&scene)
        };
        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost or outdated, reconfiguring");
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("[gpu] surface timeout, skipping frame");
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.halt("out of memory");
                return false;
            }
            Err(e) => {
                log::warn!("[gpu] render error: {:?}", e);
            }
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let step = self.scene.borrow_mut().step(elapsed, elapsed * 1000.0);
        if let Some(sample) = step.stats {
            self.stats.show(&sample);
        }
        self.scene.borrow().is_playing()
    }

    fn halt(&mut self, reason: &str) {
        log::error!("[loop] renderer {}, stopping", reason);
        self.lost = true;
        self.scene.borrow_mut().stop();
    }
}

/// requestAnimationFrame task that can be cancelled and restarted. At most
/// one frame request is pending at any time.
#[derive(Clone)]
pub struct FrameLoop {
    ctx: Rc<RefCell<FrameContext>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn new(ctx: FrameContext) -> Self {
        let ctx = Rc::new(RefCell::new(ctx));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let ctx_tick = ctx.clone();
        let tick_inner = tick.clone();
        let handle_inner = handle.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            handle_inner.set(None);
            let again = ctx_tick.borrow_mut().frame();
            if again {
                request(&tick_inner, &handle_inner);
            }
        }) as Box<dyn FnMut()>));

        Self { ctx, tick, handle }
    }

    pub fn context(&self) -> &Rc<RefCell<FrameContext>> {
        &self.ctx
    }

    /// Request the next frame unless one is already pending or the
    /// renderer is gone.
    pub fn schedule(&self) {
        if self.ctx.borrow().is_lost() {
            log::warn!("[loop] renderer lost, not scheduling");
            return;
        }
        request(&self.tick, &self.handle);
    }

    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
            log::debug!("[loop] cancelled frame {}", id);
        }
    }

    /// Cancel and drop the frame closure. The loop cannot be restarted.
    pub fn shutdown(&self) {
        self.cancel();
        self.tick.borrow_mut().take();
    }
}

fn request(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, handle: &Rc<Cell<Option<i32>>>) {
    if handle.get().is_some() {
        return;
    }
    let Some(window) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => handle.set(Some(id)),
            Err(e) => log::error!("[loop] requestAnimationFrame failed: {:?}", e),
        }
    }
}
