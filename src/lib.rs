#![cfg(target_arch = "wasm32")]
use crate::constants::*;
use crate::core::{AssetId, AssetLoadFailure, Effect, SceneContext, SAMPLE_INTERVAL_MS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod frame;
mod media;
mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("orbit-pulse starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    // Sized once; the scene does not follow later viewport changes.
    dom::sync_canvas_backing_size(&canvas);

    let session = Rc::new(RefCell::new(SceneContext::default()));

    // Audio is optional: without it the sampler keeps the box at its floor scale.
    let audio = match audio::AudioGraph::new() {
        Ok(a) => Some(Rc::new(RefCell::new(a))),
        Err(e) => {
            session
                .borrow_mut()
                .report_asset_failure(AssetLoadFailure::new(AssetId::AudioContext, e));
            None
        }
    };

    let video = match media::find_video(&document, VIDEO_ID) {
        Ok(v) => {
            media::wire_video_events(&v, &session);
            Some(v)
        }
        Err(failure) => {
            session.borrow_mut().report_asset_failure(failure);
            None
        }
    };

    wire_click(&document, &session, audio.clone());
    wire_sampler(&session, audio)?;

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        session,
        gpu,
        video,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}

fn wire_click(
    document: &web::Document,
    session: &Rc<RefCell<SceneContext>>,
    audio: Option<Rc<RefCell<audio::AudioGraph>>>,
) {
    let session = session.clone();
    let doc = document.clone();
    dom::add_document_click_listener(document, move || {
        let effects = session.borrow_mut().on_click();
        for effect in effects {
            match effect {
                Effect::LoadAndPlayAudio => {
                    let Some(graph) = &audio else { continue };
                    let nodes = graph.borrow().playback_handles();
                    let session = session.clone();
                    spawn_local(async move {
                        if let Err(failure) = audio::load_and_play(nodes, AUDIO_URL).await {
                            session.borrow_mut().report_asset_failure(failure);
                        }
                    });
                }
                Effect::HidePrompt => overlay::hide(&doc),
                Effect::PlayVideo => {}
            }
        }
    });
}

fn wire_sampler(
    session: &Rc<RefCell<SceneContext>>,
    audio: Option<Rc<RefCell<audio::AudioGraph>>>,
) -> anyhow::Result<()> {
    let session = session.clone();
    dom::set_interval(SAMPLE_INTERVAL_MS, move || match &audio {
        Some(graph) => {
            let mut graph = graph.borrow_mut();
            session.borrow_mut().on_sample(graph.read_spectrum());
        }
        None => {
            session.borrow_mut().on_sample(&[]);
        }
    })?;
    Ok(())
}
