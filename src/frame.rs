use crate::core::{Effect, SceneContext};
use crate::{media, render};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub session: Rc<RefCell<SceneContext>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub video: Option<web::HtmlVideoElement>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now_ms = instant::now();
        let (snapshot, effects) = self.session.borrow_mut().on_frame(now_ms);

        for effect in effects {
            match effect {
                Effect::PlayVideo => {
                    if let Some(v) = &self.video {
                        media::play_video(v, &self.session);
                    }
                }
                other => log::debug!("[frame] ignoring {:?}", other),
            }
        }

        if let Some(g) = &mut self.gpu {
            match g.render(&snapshot, self.video.as_ref()) {
                Ok(()) => {}
                // Transient; the next frame reacquires the surface texture.
                Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Timeout) => {}
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
