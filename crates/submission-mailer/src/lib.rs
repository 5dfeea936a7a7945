//! Guarantor assessment submission
//!
//! Packages the rendered assessment form together with the owner and witness
//! signature images and posts it to the Brevo transactional email API.
//!
//! ## Architecture
//!
//! ```text
//! image files ─(reader)─> ImageGroups ─┐
//!                                      ├─(packager)─> Attachment* ─(dispatcher)─> Brevo
//! FormRecord ─(assessment-pdf)─> PDF ──┘
//! ```
//!
//! The caller owns a [`SubmissionState`] and receives progress through a
//! [`SubmissionObserver`].

pub mod config;
pub mod dispatch;
pub mod error;
pub mod packager;
pub mod pipeline;
pub mod reader;
pub mod sanitize;
pub mod transport;
pub mod types;

pub use config::MailerConfig;
pub use dispatch::{
    SignatureFlags, SubmissionDispatcher, SubmissionObserver, SubmissionState, SubmitOutcome,
    FAILURE_MESSAGE, SUCCESS_MESSAGE,
};
pub use error::{ConfigError, ReadError, SubmitError, TransportError};
pub use packager::{package, package_document, package_image};
pub use pipeline::SubmissionPipeline;
pub use reader::{read_image, read_image_groups, read_images};
pub use sanitize::{sanitize_file_name, strip_data_uri};
pub use transport::{BrevoTransport, EmailTransport, TransportResponse};
pub use types::{Attachment, Contact, ImageAsset, ImageGroups, SubmissionPayload};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
