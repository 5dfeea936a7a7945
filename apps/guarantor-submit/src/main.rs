//! Guarantor assessment command line
//!
//! `render` writes the assessment PDF for a form; `submit` renders it and
//! emails it with the signature images through Brevo.

use anyhow::{Context, Result};
use assessment_pdf::{load_logo, render_form, FormRecord, LogoImage, RenderedDocument};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use submission_mailer::{
    BrevoTransport, ImageGroups, MailerConfig, SignatureFlags, SubmissionDispatcher,
    SubmissionObserver, SubmissionPipeline, SubmissionState, SubmitOutcome,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "guarantor-submit")]
#[command(version, about = "Render and submit guarantor assessment forms")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the form to a PDF file
    Render {
        /// Form data as JSON
        #[arg(long)]
        form: PathBuf,

        /// Output PDF path
        #[arg(long)]
        out: PathBuf,

        /// Logo drawn at the top right of the first page (PNG or JPEG)
        #[arg(long)]
        logo: Option<PathBuf>,
    },

    /// Render the form and email it with the signature images
    Submit {
        /// Form data as JSON
        #[arg(long)]
        form: PathBuf,

        /// Owner signature image, may be repeated
        #[arg(long)]
        owner: Vec<PathBuf>,

        /// Witness signature image, may be repeated
        #[arg(long)]
        witness: Vec<PathBuf>,

        /// Logo drawn at the top right of the first page (PNG or JPEG)
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Also keep a copy of the rendered PDF
        #[arg(long)]
        save_pdf: Option<PathBuf>,
    },
}

/// Reports submission progress on the terminal and optionally keeps a copy
/// of the rendered PDF.
#[derive(Default)]
struct ConsoleObserver {
    save_pdf: Option<PathBuf>,
    save_error: Option<anyhow::Error>,
}

impl ConsoleObserver {
    fn saving_to(path: Option<&Path>) -> Self {
        Self {
            save_pdf: path.map(Path::to_path_buf),
            save_error: None,
        }
    }
}

impl SubmissionObserver for ConsoleObserver {
    fn document_rendered(&mut self, document: &RenderedDocument) {
        let Some(path) = &self.save_pdf else {
            return;
        };
        match std::fs::write(path, &document.bytes) {
            Ok(()) => info!(path = %path.display(), "PDF copy saved"),
            Err(e) => {
                error!(path = %path.display(), error = %e, "could not save PDF copy");
                self.save_error =
                    Some(anyhow::Error::new(e).context(format!("Failed to write {}", path.display())));
            }
        }
    }

    fn loading_changed(&mut self, loading: bool) {
        if loading {
            eprintln!("Sending...");
        }
    }

    fn succeeded(&mut self, message: &str) {
        println!("{}", message);
    }

    fn failed(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("guarantor_submit=info".parse()?)
                .add_directive("submission_mailer=info".parse()?)
                .add_directive("assessment_pdf=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render { form, out, logo } => render(&form, &out, logo.as_deref()),
        Command::Submit {
            form,
            owner,
            witness,
            logo,
            save_pdf,
        } => {
            let sent = submit(&form, &owner, &witness, logo.as_deref(), save_pdf.as_deref()).await?;
            if !sent {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn read_form(path: &Path) -> Result<FormRecord> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read form data from {}", path.display()))?;
    FormRecord::from_json(&json)
        .with_context(|| format!("Invalid form data in {}", path.display()))
}

fn logo_from(path: Option<&Path>) -> Option<LogoImage> {
    path.and_then(load_logo)
}

fn render(form_path: &Path, out: &Path, logo: Option<&Path>) -> Result<()> {
    let form = read_form(form_path)?;
    let rendered = render_form(&form, logo_from(logo))?;
    std::fs::write(out, &rendered.bytes)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    info!(path = %out.display(), pages = rendered.page_count, "PDF written");
    Ok(())
}

/// Returns whether the submission was accepted.
///
/// Image reading and rendering go through the pipeline so their failures
/// reach the observer like any other failed submission.
async fn submit(
    form_path: &Path,
    owner: &[PathBuf],
    witness: &[PathBuf],
    logo: Option<&Path>,
    save_pdf: Option<&Path>,
) -> Result<bool> {
    let config = MailerConfig::from_env();
    config.validate()?;
    let transport = BrevoTransport::from_config(&config)?;

    let form = read_form(form_path)?;
    let mut state = SubmissionState::new(form, ImageGroups::default());
    state.signatures = SignatureFlags {
        owner: !owner.is_empty(),
        witness: !witness.is_empty(),
    };

    let pipeline = SubmissionPipeline::new(SubmissionDispatcher::new(config, transport))
        .with_logo(logo_from(logo));
    let mut observer = ConsoleObserver::saving_to(save_pdf);
    let outcome = pipeline
        .submit_files(owner, witness, &mut state, &mut observer)
        .await;

    if let Some(e) = observer.save_error.take() {
        return Err(e);
    }
    match outcome {
        SubmitOutcome::Sent { .. } => Ok(true),
        SubmitOutcome::Aborted => {
            eprintln!("No usable signature images, nothing was sent.");
            Ok(false)
        }
        SubmitOutcome::Failed(e) => {
            error!(error = %e, "submission failed");
            Ok(false)
        }
    }
}
