pub mod acquisition;
pub mod client;
pub mod encoder;
pub mod error;
pub mod model;
pub mod report;
pub mod session;

pub use acquisition::{AcquisitionMode, CameraEffect, ImageAsset, ImageSourceManager};
pub use client::{SubmissionTicket, ValidationTransport};
pub use encoder::BlobReader;
pub use error::{RequestFailure, ValidatorError};
pub use model::{
    ClassProbabilities, HealthStatus, ImageClassification, TextValidation, ValidationRequest,
    ValidationResult, VersionInfo,
};
pub use report::{ReportRow, ValidationReport};
pub use session::ValidationSession;
