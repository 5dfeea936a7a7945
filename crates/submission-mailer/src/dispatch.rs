//! Submission dispatch
//!
//! The dispatcher owns the envelope and the transport. Caller-side state
//! lives in [`SubmissionState`] and every change the user should see goes
//! through a [`SubmissionObserver`].

use crate::config::MailerConfig;
use crate::error::SubmitError;
use crate::transport::EmailTransport;
use crate::types::{Attachment, ImageGroups, SubmissionPayload};
use assessment_pdf::{FormRecord, RenderedDocument};
use tracing::{error, info, instrument, warn};

pub const SUCCESS_MESSAGE: &str = "Loan request submitted!";
pub const FAILURE_MESSAGE: &str = "Failed to send email.";

/// Receives progress and result notifications for one submission.
pub trait SubmissionObserver: Send {
    /// The form has been rendered and is about to be packaged.
    fn document_rendered(&mut self, _document: &RenderedDocument) {}

    fn loading_changed(&mut self, loading: bool);
    fn succeeded(&mut self, message: &str);
    fn failed(&mut self, message: &str);
}

/// Whether each party has signed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignatureFlags {
    pub owner: bool,
    pub witness: bool,
}

/// Caller-owned form state.
///
/// Cleared after a successful submission and kept untouched after a failed
/// one so the user can retry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmissionState {
    pub loading: bool,
    pub signatures: SignatureFlags,
    /// Selected signature images
    pub images: ImageGroups,
    pub form: FormRecord,
}

impl SubmissionState {
    pub fn new(form: FormRecord, images: ImageGroups) -> Self {
        Self {
            form,
            images,
            ..Self::default()
        }
    }

    /// Back to an empty form
    pub fn reset(&mut self) {
        self.signatures = SignatureFlags::default();
        self.images.clear();
        self.form = FormRecord::new();
    }
}

/// How a submission ended.
#[derive(Debug)]
pub enum SubmitOutcome {
    Sent { status: u16 },
    /// No valid image attachment; nothing was sent
    Aborted,
    Failed(SubmitError),
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent { .. })
    }
}

pub struct SubmissionDispatcher<T> {
    config: MailerConfig,
    transport: T,
}

impl<T: EmailTransport> SubmissionDispatcher<T> {
    pub fn new(config: MailerConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &MailerConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_payload(&self, attachments: Vec<Attachment>) -> SubmissionPayload {
        SubmissionPayload {
            sender: self.config.sender.clone(),
            to: vec![self.config.recipient.clone()],
            subject: self.config.subject.clone(),
            html_content: self.config.html_content.clone(),
            attachment: attachments,
        }
    }

    /// Send the attachments in one request.
    ///
    /// Loading is raised right before the request and lowered after it on
    /// every path. Only HTTP 200 and 201 count as success.
    #[instrument(skip_all, fields(attachments = attachments.len()))]
    pub async fn dispatch(
        &self,
        attachments: Vec<Attachment>,
        state: &mut SubmissionState,
        observer: &mut dyn SubmissionObserver,
    ) -> SubmitOutcome {
        let payload = self.build_payload(attachments);

        state.loading = true;
        observer.loading_changed(true);

        let outcome = match self.transport.send(&payload).await {
            Ok(response) if matches!(response.status, 200 | 201) => {
                info!(status = response.status, "submission sent");
                observer.succeeded(SUCCESS_MESSAGE);
                state.reset();
                SubmitOutcome::Sent {
                    status: response.status,
                }
            }
            Ok(response) => {
                warn!(status = response.status, body = %response.body, "email API rejected submission");
                observer.failed(FAILURE_MESSAGE);
                SubmitOutcome::Failed(SubmitError::Rejected {
                    status: response.status,
                    body: response.body,
                })
            }
            Err(e) => {
                error!(error = %e, "email request failed");
                observer.failed(FAILURE_MESSAGE);
                SubmitOutcome::Failed(e.into())
            }
        };

        state.loading = false;
        observer.loading_changed(false);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageAsset;

    #[test]
    fn test_reset_clears_everything_but_loading() {
        let mut form = FormRecord::new();
        form.insert_text("HG", "yes");
        let mut state = SubmissionState::new(
            form,
            ImageGroups {
                owner: vec![ImageAsset::new("a", "image/png", "a.png")],
                witness: vec![],
            },
        );
        state.signatures = SignatureFlags {
            owner: true,
            witness: true,
        };
        state.loading = true;

        state.reset();
        assert_eq!(state.signatures, SignatureFlags::default());
        assert!(state.images.is_empty());
        assert!(state.form.is_empty());
        assert!(state.loading);
    }
}
