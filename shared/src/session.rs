use crate::acquisition::{AcquisitionMode, CameraEffect, ImageAsset, ImageSourceManager};
use crate::client::SubmissionTicket;
use crate::error::ValidatorError;
use crate::model::ValidationResult;
use crate::report::{self, ValidationReport};

/// The single slot set behind the validator screen: current asset and preview,
/// user id, last verdict or error, and the outstanding submission if any.
///
/// Every acquisition action clears the verdict and invalidates the outstanding
/// submission, so a response that lands after the user moved on is dropped.
#[derive(Debug)]
pub struct ValidationSession<B, P> {
    sources: ImageSourceManager<B, P>,
    user_id: String,
    result: Option<ValidationResult>,
    error: Option<ValidatorError>,
    last_ticket: u64,
    in_flight: Option<SubmissionTicket>,
}

impl<B, P> ValidationSession<B, P> {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            sources: ImageSourceManager::new(),
            user_id: user_id.into(),
            result: None,
            error: None,
            last_ticket: 0,
            in_flight: None,
        }
    }

    pub fn mode(&self) -> AcquisitionMode {
        self.sources.mode()
    }

    pub fn asset(&self) -> Option<&ImageAsset<B>> {
        self.sources.asset()
    }

    pub fn preview(&self) -> Option<&P> {
        self.sources.preview()
    }

    pub fn is_camera_live(&self) -> bool {
        self.sources.is_camera_live()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.user_id = user_id.into();
    }

    pub fn result(&self) -> Option<&ValidationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&ValidatorError> {
        self.error.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn report(&self) -> Option<ValidationReport> {
        report::render(self.result.as_ref())
    }

    pub fn select_file(&mut self, asset: ImageAsset<B>, preview: P) -> CameraEffect {
        self.reset_outcome();
        self.sources.select_file(asset, preview)
    }

    pub fn activate_camera(&mut self) -> CameraEffect {
        self.reset_outcome();
        self.sources.activate_camera()
    }

    pub fn capture_frame(&mut self, frame: Option<(ImageAsset<B>, P)>) -> CameraEffect {
        let effect = self.sources.capture_frame(frame);
        if effect == CameraEffect::Stop {
            self.reset_outcome();
        }
        effect
    }

    /// The camera could not be opened. Leaves camera mode so that activating it
    /// again asks for a fresh feed.
    pub fn camera_unavailable(&mut self) -> CameraEffect {
        self.sources.camera_unavailable()
    }

    /// Records an error raised outside a submission (camera or picker failures).
    pub fn report_error(&mut self, error: ValidatorError) {
        log::warn!("{}", error);
        self.error = Some(error);
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Starts a submission attempt and hands out a copy of the asset to encode.
    ///
    /// Without an asset this records `NoImageSelected` and returns it, and no
    /// ticket is issued. A new attempt supersedes any outstanding one.
    pub fn begin_submission(&mut self) -> Result<(SubmissionTicket, ImageAsset<B>), ValidatorError>
    where
        B: Clone,
    {
        let Some(asset) = self.sources.asset().cloned() else {
            self.error = Some(ValidatorError::NoImageSelected);
            return Err(ValidatorError::NoImageSelected);
        };
        self.last_ticket += 1;
        let ticket = SubmissionTicket(self.last_ticket);
        self.in_flight = Some(ticket);
        self.error = None;
        Ok((ticket, asset))
    }

    /// Applies the outcome of a submission. Returns `false` when the ticket is
    /// stale and the outcome was discarded.
    ///
    /// A failure leaves the result slot empty but keeps the asset, so the user
    /// can resubmit without acquiring the image again.
    pub fn finish_submission(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<ValidationResult, ValidatorError>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            log::debug!("Discarding stale response for submission {:?}", ticket);
            return false;
        }
        self.in_flight = None;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(error) => {
                self.result = None;
                self.error = Some(error);
            }
        }
        true
    }

    fn reset_outcome(&mut self) {
        self.result = None;
        self.error = None;
        if let Some(ticket) = self.in_flight.take() {
            log::debug!("Abandoning in-flight submission {:?}", ticket);
        }
    }
}
