use crate::core::{AssetId, AssetLoadFailure, SceneContext};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

// HTMLMediaElement.HAVE_CURRENT_DATA
const HAVE_CURRENT_DATA: u16 = 2;

pub fn find_video(document: &web::Document, id: &str) -> Result<web::HtmlVideoElement, AssetLoadFailure> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| AssetLoadFailure::new(AssetId::Video, format!("missing #{}", id)))?
        .dyn_into::<web::HtmlVideoElement>()
        .map_err(|_| AssetLoadFailure::new(AssetId::Video, format!("#{} is not a <video>", id)))
}

/// Mark the session video-ready once the element has decodable frames, and
/// record a degraded video if the element reports an error.
pub fn wire_video_events(video: &web::HtmlVideoElement, session: &Rc<RefCell<SceneContext>>) {
    if video.ready_state() >= HAVE_CURRENT_DATA {
        session.borrow_mut().set_video_ready(true);
    }

    let ready_session = session.clone();
    let on_loaded = Closure::wrap(Box::new(move || {
        ready_session.borrow_mut().set_video_ready(true);
    }) as Box<dyn FnMut()>);
    _ = video.add_event_listener_with_callback("loadeddata", on_loaded.as_ref().unchecked_ref());
    on_loaded.forget();

    let error_session = session.clone();
    let video_for_error = video.clone();
    let on_error = Closure::wrap(Box::new(move || {
        let cause = video_for_error
            .error()
            .map(|e| format!("media error code {}", e.code()))
            .unwrap_or_else(|| "unknown media error".to_string());
        error_session
            .borrow_mut()
            .report_asset_failure(AssetLoadFailure::new(AssetId::Video, cause));
    }) as Box<dyn FnMut()>);
    _ = video.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
    on_error.forget();
}

/// Start playback; a rejected play() promise degrades the video.
pub fn play_video(video: &web::HtmlVideoElement, session: &Rc<RefCell<SceneContext>>) {
    let promise = match video.play() {
        Ok(p) => p,
        Err(e) => {
            session
                .borrow_mut()
                .report_asset_failure(AssetLoadFailure::new(AssetId::Video, format!("{:?}", e)));
            return;
        }
    };
    let session = session.clone();
    spawn_local(async move {
        match JsFuture::from(promise).await {
            Ok(_) => log::info!("[media] video playing"),
            Err(e) => session
                .borrow_mut()
                .report_asset_failure(AssetLoadFailure::new(AssetId::Video, format!("{:?}", e))),
        }
    });
}
