use crate::acquisition::ImageAsset;
use crate::encoder::{self, BlobReader};
use crate::error::{RequestFailure, ValidatorError};
use crate::model::{HealthStatus, ValidationRequest, ValidationResult, VersionInfo};

/// HTTP seam towards the validation service. Implemented with `gloo-net` in the
/// browser and `reqwest` in the gateway.
#[allow(async_fn_in_trait)]
pub trait ValidationTransport {
    async fn validate(
        &self,
        request: &ValidationRequest,
    ) -> Result<ValidationResult, RequestFailure>;

    async fn health(&self) -> Result<HealthStatus, RequestFailure>;

    async fn version(&self) -> Result<VersionInfo, RequestFailure>;
}

/// Token identifying one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(pub(crate) u64);

/// Encodes the asset and sends it with the user id in a single request.
///
/// No asset means no request: the call fails with `NoImageSelected` before the
/// transport is touched. Failures are never retried here.
pub async fn submit<T, B>(
    transport: &T,
    user_id: &str,
    asset: Option<ImageAsset<B>>,
) -> Result<ValidationResult, ValidatorError>
where
    T: ValidationTransport,
    B: BlobReader,
{
    let asset = asset.ok_or(ValidatorError::NoImageSelected)?;
    let filename = asset.filename.clone();
    let image_base64 = encoder::encode(asset).await?;
    let request = ValidationRequest::new(user_id, image_base64);

    log::info!("Submitting {} for user {}", filename, request.user_id);
    match transport.validate(&request).await {
        Ok(result) => {
            log::info!("Validation finished: {} ({})", result.status, result.message);
            Ok(result)
        }
        Err(e) => {
            log::error!("Validation request failed: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    /// Transport double that records requests and replays a canned outcome.
    pub(crate) struct RecordingTransport {
        pub outcome: Result<ValidationResult, RequestFailure>,
        pub calls: Cell<u32>,
        pub last_request: RefCell<Option<ValidationRequest>>,
    }

    impl RecordingTransport {
        pub fn answering(outcome: Result<ValidationResult, RequestFailure>) -> Self {
            Self {
                outcome,
                calls: Cell::new(0),
                last_request: RefCell::new(None),
            }
        }
    }

    impl ValidationTransport for RecordingTransport {
        async fn validate(
            &self,
            request: &ValidationRequest,
        ) -> Result<ValidationResult, RequestFailure> {
            self.calls.set(self.calls.get() + 1);
            *self.last_request.borrow_mut() = Some(request.clone());
            self.outcome.clone()
        }

        async fn health(&self) -> Result<HealthStatus, RequestFailure> {
            Ok(HealthStatus { status: "ok".into() })
        }

        async fn version(&self) -> Result<VersionInfo, RequestFailure> {
            Ok(VersionInfo::default())
        }
    }

    pub(crate) fn verdict(user_id: &str) -> ValidationResult {
        ValidationResult {
            status: "success".into(),
            message: "Validation completed".into(),
            user_id: user_id.into(),
            text_validation: Default::default(),
            ocr_confidence: Some(0.9),
            image_classification: None,
            validation_score: Some(0.88),
            threshold: Some(0.7),
            label: Some("genuine".into()),
            action: Some("approved".into()),
            reason: None,
            extracted_text: Some(String::new()),
            is_fake_based_on_ocr: Some(false),
        }
    }

    #[test]
    fn missing_asset_never_reaches_the_transport() {
        let transport = RecordingTransport::answering(Ok(verdict("u")));
        let err = block_on(submit::<_, Vec<u8>>(&transport, "u", None)).unwrap_err();

        assert_eq!(err, ValidatorError::NoImageSelected);
        assert_eq!(transport.calls.get(), 0);
    }

    #[test]
    fn sends_user_id_verbatim_with_encoded_image() {
        let transport = RecordingTransport::answering(Ok(verdict(" 22-733-043 ")));
        let asset = ImageAsset::new(b"ABC".to_vec(), "card.png", "image/png");

        let result = block_on(submit(&transport, " 22-733-043 ", Some(asset))).unwrap();

        assert_eq!(result.user_id, " 22-733-043 ");
        assert_eq!(
            transport.last_request.borrow().clone().unwrap(),
            ValidationRequest::new(" 22-733-043 ", "QUJD")
        );
    }

    #[test]
    fn transport_failure_is_reported_once_without_retry() {
        let offline = RequestFailure::Network("offline".into());
        let transport = RecordingTransport::answering(Err(offline));
        let asset = ImageAsset::new(b"ABC".to_vec(), "card.png", "image/png");

        let err = block_on(submit(&transport, "u", Some(asset))).unwrap_err();

        assert_eq!(
            err,
            ValidatorError::ValidationRequestFailed(RequestFailure::Network("offline".into()))
        );
        assert_eq!(transport.calls.get(), 1);
    }
}
