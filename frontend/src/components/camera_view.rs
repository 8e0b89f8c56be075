use super::super::{Model, Msg};
use yew::prelude::*;

pub fn render_camera_view(model: &Model, ctx: &Context<Model>) -> Html {
    if !model.session.is_camera_live() {
        return html! {};
    }

    let feed_ready = model.camera.is_some();

    html! {
        <div class="webcam-container">
            <video
                ref={model.video_ref.clone()}
                class="webcam-feed"
                autoplay=true
                playsinline=true
                muted=true
            />
            if !feed_ready {
                <p class="camera-waiting">
                    <i class="fa-solid fa-spinner fa-spin"></i>{" Waiting for camera..."}
                </p>
            }
            <button
                type="button"
                class="analyze-btn capture-btn"
                disabled={!feed_ready}
                onclick={ctx.link().callback(|_| Msg::CaptureFrame)}
            >
                <i class="fa-solid fa-camera-retro"></i>{" Capture from Webcam"}
            </button>
        </div>
    }
}
