use assessment_pdf::RenderError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reading image files from disk.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unrecognised image type: {0}")]
    UnknownType(PathBuf),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("BREVO_API_KEY is not set")]
    MissingApiKey,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Transport configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Why a submission did not go through.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Failed to render document: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to read images: {0}")]
    Read(#[from] ReadError),

    #[error("Failed to send email: {0}")]
    Transport(#[from] TransportError),

    #[error("Email API rejected the submission with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Render task failed: {0}")]
    Task(String),
}
