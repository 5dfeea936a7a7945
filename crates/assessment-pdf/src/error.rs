use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to encode page content: {0}")]
    ContentError(String),

    #[error("Failed to serialize PDF: {0}")]
    SaveError(String),
}

/// Errors raised while loading the page logo.
///
/// These never abort rendering; the assembler logs them and carries on
/// without the logo.
#[derive(Error, Debug)]
pub enum LogoError {
    #[error("Failed to read logo: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported logo format")]
    UnsupportedFormat,

    #[error("Failed to decode logo: {0}")]
    DecodeError(String),

    #[error("Failed to compress logo data: {0}")]
    CompressionError(String),
}
