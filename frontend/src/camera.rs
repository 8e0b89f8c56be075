use idcard_shared::acquisition::CAPTURE_MIME_TYPE;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

/// A live camera stream. Dropping it stops every track, which releases the device.
pub struct CameraFeed {
    stream: MediaStream,
}

impl CameraFeed {
    pub async fn open() -> Result<Self, String> {
        let window = web_sys::window().ok_or("no global `window` exists")?;
        let devices = window.navigator().media_devices().map_err(js_error)?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::FALSE);
        constraints.set_video(&JsValue::TRUE);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(js_error)?;
        let stream = JsFuture::from(promise)
            .await
            .map_err(js_error)?
            .dyn_into::<MediaStream>()
            .map_err(js_error)?;

        log::info!("Camera feed started");
        Ok(Self { stream })
    }

    /// Binds the stream to the preview element unless it is already showing it.
    /// A feed that replaced an earlier one takes over the element.
    pub fn attach(&self, video: &HtmlVideoElement) {
        if video
            .src_object()
            .is_some_and(|current| current.id() == self.stream.id())
        {
            return;
        }
        video.set_src_object(Some(&self.stream));
        if let Err(e) = video.play() {
            log::warn!("Camera preview did not start: {}", js_error(e));
        }
    }

    /// Draws the current frame onto a canvas and returns it as a JPEG data URL.
    /// `None` until the video has produced its first frame.
    pub fn snapshot(&self, video: &HtmlVideoElement) -> Option<String> {
        let (width, height) = (video.video_width(), video.video_height());
        if width == 0 || height == 0 {
            return None;
        }

        let document = web_sys::window()?.document()?;
        let canvas: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
        context
            .draw_image_with_html_video_element(video, 0.0, 0.0)
            .ok()?;
        canvas.to_data_url_with_type(CAPTURE_MIME_TYPE).ok()
    }
}

impl Drop for CameraFeed {
    fn drop(&mut self) {
        let tracks: js_sys::Array = self.stream.get_tracks();
        for track in tracks.iter() {
            if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
                track.stop();
            }
        }
        log::info!("Camera feed released");
    }
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
