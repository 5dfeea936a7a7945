//! End-to-end submission: render, package, dispatch.

use crate::dispatch::{
    SubmissionDispatcher, SubmissionObserver, SubmissionState, SubmitOutcome, FAILURE_MESSAGE,
};
use crate::error::SubmitError;
use crate::packager::package;
use crate::reader::read_image_groups;
use crate::transport::EmailTransport;
use assessment_pdf::{render_form, FormRecord, LogoImage, RenderedDocument};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

pub struct SubmissionPipeline<T> {
    dispatcher: SubmissionDispatcher<T>,
    logo: Option<LogoImage>,
}

impl<T: EmailTransport> SubmissionPipeline<T> {
    pub fn new(dispatcher: SubmissionDispatcher<T>) -> Self {
        Self {
            dispatcher,
            logo: None,
        }
    }

    pub fn with_logo(mut self, logo: Option<LogoImage>) -> Self {
        self.logo = logo;
        self
    }

    pub fn dispatcher(&self) -> &SubmissionDispatcher<T> {
        &self.dispatcher
    }

    /// Render on the blocking pool.
    pub async fn render_document(&self, form: &FormRecord) -> Result<RenderedDocument, SubmitError> {
        let form = form.clone();
        let logo = self.logo.clone();
        let rendered = tokio::task::spawn_blocking(move || render_form(&form, logo))
            .await
            .map_err(|e| SubmitError::Task(e.to_string()))??;
        Ok(rendered)
    }

    /// Render the form held in `state` and submit it with the selected images.
    #[instrument(skip_all, fields(images = state.images.len()))]
    pub async fn submit(
        &self,
        state: &mut SubmissionState,
        observer: &mut dyn SubmissionObserver,
    ) -> SubmitOutcome {
        match self.render_document(&state.form).await {
            Ok(rendered) => {
                observer.document_rendered(&rendered);
                self.submit_rendered(&rendered, state, observer).await
            }
            Err(e) => fail_before_dispatch(e, state, observer),
        }
    }

    /// Submit an already rendered document.
    pub async fn submit_rendered(
        &self,
        document: &RenderedDocument,
        state: &mut SubmissionState,
        observer: &mut dyn SubmissionObserver,
    ) -> SubmitOutcome {
        let pdf_base64 = STANDARD.encode(&document.bytes);
        let Some(attachments) = package(pdf_base64, &state.images) else {
            warn!("no valid image attachments, submission not sent");
            return SubmitOutcome::Aborted;
        };

        info!(
            pages = document.page_count,
            attachments = attachments.len(),
            "dispatching submission"
        );
        self.dispatcher.dispatch(attachments, state, observer).await
    }

    /// Read the image files into `state`, then submit.
    ///
    /// A read failure fails the submission without touching the selected
    /// images already in `state`.
    pub async fn submit_files(
        &self,
        owner: &[PathBuf],
        witness: &[PathBuf],
        state: &mut SubmissionState,
        observer: &mut dyn SubmissionObserver,
    ) -> SubmitOutcome {
        match read_image_groups(owner, witness).await {
            Ok(images) => {
                state.images = images;
                self.submit(state, observer).await
            }
            Err(e) => fail_before_dispatch(e.into(), state, observer),
        }
    }
}

fn fail_before_dispatch(
    e: SubmitError,
    state: &mut SubmissionState,
    observer: &mut dyn SubmissionObserver,
) -> SubmitOutcome {
    error!(error = %e, "submission failed before dispatch");
    observer.failed(FAILURE_MESSAGE);
    state.loading = false;
    observer.loading_changed(false);
    SubmitOutcome::Failed(e)
}
