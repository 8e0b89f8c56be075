use strum_macros::Display;

pub const CAPTURE_FILENAME: &str = "webcam-capture.jpg";
pub const CAPTURE_MIME_TYPE: &str = "image/jpeg";

/// Which method currently governs how the image is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum AcquisitionMode {
    #[default]
    None,
    FileUpload,
    Camera,
}

/// Image selected or captured for submission. `B` is whatever holds the bytes:
/// a plain buffer natively, a browser blob in the frontend.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAsset<B = Vec<u8>> {
    pub data: B,
    pub filename: String,
    pub mime_type: String,
}

impl<B> ImageAsset<B> {
    pub fn new(data: B, filename: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn camera_still(data: B) -> Self {
        Self::new(data, CAPTURE_FILENAME, CAPTURE_MIME_TYPE)
    }
}

/// What the host must do with the live camera feed after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CameraEffect {
    Keep,
    Start,
    Stop,
}

/// Owns the file/camera mutual exclusion and the current asset and preview.
///
/// `P` is the preview handle type. Replacing a handle drops the old one, which
/// is where hosts release object URLs.
#[derive(Debug)]
pub struct ImageSourceManager<B, P> {
    mode: AcquisitionMode,
    asset: Option<ImageAsset<B>>,
    preview: Option<P>,
}

impl<B, P> Default for ImageSourceManager<B, P> {
    fn default() -> Self {
        Self {
            mode: AcquisitionMode::None,
            asset: None,
            preview: None,
        }
    }
}

impl<B, P> ImageSourceManager<B, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AcquisitionMode {
        self.mode
    }

    pub fn asset(&self) -> Option<&ImageAsset<B>> {
        self.asset.as_ref()
    }

    pub fn preview(&self) -> Option<&P> {
        self.preview.as_ref()
    }

    pub fn is_camera_live(&self) -> bool {
        self.mode == AcquisitionMode::Camera
    }

    /// A file chosen in the picker replaces whatever was there before.
    pub fn select_file(&mut self, asset: ImageAsset<B>, preview: P) -> CameraEffect {
        let effect = self.leave_camera();
        log::debug!("Selected file {} ({})", asset.filename, asset.mime_type);
        self.asset = Some(asset);
        self.preview = Some(preview);
        self.mode = AcquisitionMode::FileUpload;
        effect
    }

    /// Discards the current asset and asks for a live feed.
    pub fn activate_camera(&mut self) -> CameraEffect {
        self.asset = None;
        self.preview = None;
        if self.is_camera_live() {
            return CameraEffect::Keep;
        }
        log::debug!("Switching to camera from {}", self.mode);
        self.mode = AcquisitionMode::Camera;
        CameraEffect::Start
    }

    /// Takes a single still from the live feed. Capture is single-shot: the
    /// feed is stopped afterwards and must be reactivated for another frame.
    ///
    /// Without a live feed, or without a frame yet, nothing changes.
    pub fn capture_frame(&mut self, frame: Option<(ImageAsset<B>, P)>) -> CameraEffect {
        if !self.is_camera_live() {
            log::warn!("Capture requested while camera is off");
            return CameraEffect::Keep;
        }
        let Some((asset, preview)) = frame else {
            log::debug!("No camera frame available yet");
            return CameraEffect::Keep;
        };
        self.asset = Some(asset);
        self.preview = Some(preview);
        self.mode = AcquisitionMode::None;
        CameraEffect::Stop
    }

    /// The feed could not be opened (no device, permission refused). Falls back
    /// to no method so the camera can be requested again.
    pub fn camera_unavailable(&mut self) -> CameraEffect {
        self.leave_camera()
    }

    fn leave_camera(&mut self) -> CameraEffect {
        if self.is_camera_live() {
            self.mode = AcquisitionMode::None;
            CameraEffect::Stop
        } else {
            CameraEffect::Keep
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Preview handle that counts how many times it has been released.
    struct Preview {
        name: &'static str,
        released: Rc<Cell<u32>>,
    }

    impl Drop for Preview {
        fn drop(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn preview(name: &'static str, released: &Rc<Cell<u32>>) -> Preview {
        Preview { name, released: Rc::clone(released) }
    }

    fn file(name: &str) -> ImageAsset {
        ImageAsset::new(name.as_bytes().to_vec(), name, "image/png")
    }

    #[test]
    fn file_then_file_replaces_asset_and_releases_preview() {
        let released = Rc::new(Cell::new(0));
        let mut sources = ImageSourceManager::new();

        let effect = sources.select_file(file("a.png"), preview("a", &released));
        assert_eq!(effect, CameraEffect::Keep);
        let effect = sources.select_file(file("b.png"), preview("b", &released));
        assert_eq!(effect, CameraEffect::Keep);

        assert_eq!(sources.mode(), AcquisitionMode::FileUpload);
        assert_eq!(sources.asset().unwrap().filename, "b.png");
        assert_eq!(sources.preview().unwrap().name, "b");
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn file_then_camera_discards_file() {
        let released = Rc::new(Cell::new(0));
        let mut sources = ImageSourceManager::new();
        sources.select_file(file("a.png"), preview("a", &released));

        assert_eq!(sources.activate_camera(), CameraEffect::Start);
        assert_eq!(sources.mode(), AcquisitionMode::Camera);
        assert!(sources.asset().is_none());
        assert!(sources.preview().is_none());
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn camera_capture_stops_feed_once() {
        let released = Rc::new(Cell::new(0));
        let mut sources = ImageSourceManager::new();
        sources.activate_camera();

        let frame = (ImageAsset::camera_still(vec![0xff, 0xd8]), preview("still", &released));
        assert_eq!(sources.capture_frame(Some(frame)), CameraEffect::Stop);
        assert!(!sources.is_camera_live());

        let asset = sources.asset().unwrap();
        assert_eq!(asset.filename, CAPTURE_FILENAME);
        assert_eq!(asset.mime_type, CAPTURE_MIME_TYPE);

        // Single-shot: a second capture without reactivating does nothing.
        let again = (ImageAsset::camera_still(vec![1]), preview("again", &released));
        assert_eq!(sources.capture_frame(Some(again)), CameraEffect::Keep);
        assert_eq!(sources.asset().unwrap().data, vec![0xff, 0xd8]);
        assert_eq!(sources.preview().unwrap().name, "still");
    }

    #[test]
    fn capture_without_frame_keeps_feed_and_asset() {
        let mut sources: ImageSourceManager<Vec<u8>, ()> = ImageSourceManager::new();
        sources.activate_camera();

        assert_eq!(sources.capture_frame(None), CameraEffect::Keep);
        assert!(sources.is_camera_live());
        assert!(sources.asset().is_none());
    }

    #[test]
    fn camera_then_file_stops_feed() {
        let released = Rc::new(Cell::new(0));
        let mut sources = ImageSourceManager::new();
        sources.activate_camera();

        let effect = sources.select_file(file("a.png"), preview("a", &released));
        assert_eq!(effect, CameraEffect::Stop);
        assert_eq!(sources.mode(), AcquisitionMode::FileUpload);
        assert_eq!(sources.asset().unwrap().filename, "a.png");
    }

    #[test]
    fn reactivating_live_camera_does_not_restart_feed() {
        let mut sources: ImageSourceManager<Vec<u8>, ()> = ImageSourceManager::new();
        assert_eq!(sources.activate_camera(), CameraEffect::Start);
        assert_eq!(sources.activate_camera(), CameraEffect::Keep);
    }

    #[test]
    fn failed_camera_start_can_be_retried() {
        let mut sources: ImageSourceManager<Vec<u8>, ()> = ImageSourceManager::new();
        assert_eq!(sources.activate_camera(), CameraEffect::Start);

        assert_eq!(sources.camera_unavailable(), CameraEffect::Stop);
        assert_eq!(sources.mode(), AcquisitionMode::None);
        assert_eq!(sources.activate_camera(), CameraEffect::Start);
    }

    #[test]
    fn late_camera_failure_leaves_file_alone() {
        let released = Rc::new(Cell::new(0));
        let mut sources = ImageSourceManager::new();
        sources.activate_camera();
        sources.select_file(file("a.png"), preview("a", &released));

        assert_eq!(sources.camera_unavailable(), CameraEffect::Keep);
        assert_eq!(sources.mode(), AcquisitionMode::FileUpload);
        assert_eq!(sources.asset().unwrap().filename, "a.png");
    }
}
