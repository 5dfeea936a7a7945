//! Mailer configuration
//!
//! Defaults are the bank's production envelope; every value can be
//! overridden from the environment.

use crate::error::ConfigError;
use crate::types::Contact;

pub const DEFAULT_API_URL: &str = "https://api.brevo.com/v3/smtp/email";
pub const DEFAULT_SENDER_NAME: &str = "Unilag Microfinance Bank";
pub const DEFAULT_SENDER_EMAIL: &str = "info@unilagmfbank.com";
pub const DEFAULT_RECIPIENT_NAME: &str = "UMFB";
pub const DEFAULT_RECIPIENT_EMAIL: &str = "aadebajo@unilagmfbank.com";
pub const DEFAULT_SUBJECT: &str = "Guarantor Assessment Form Submission";
pub const DEFAULT_HTML_CONTENT: &str = "<b>Please find the attached loan form and images.</b>";

/// Configuration for outbound submissions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailerConfig {
    /// Brevo API key, required to send
    pub api_key: Option<String>,

    pub api_url: String,

    pub sender: Contact,

    /// Fixed recipient of every submission
    pub recipient: Contact,

    pub subject: String,

    pub html_content: String,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            sender: Contact::new(DEFAULT_SENDER_NAME, DEFAULT_SENDER_EMAIL),
            recipient: Contact::new(DEFAULT_RECIPIENT_NAME, DEFAULT_RECIPIENT_EMAIL),
            subject: DEFAULT_SUBJECT.to_string(),
            html_content: DEFAULT_HTML_CONTENT.to_string(),
        }
    }
}

impl MailerConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for each variable; unset or blank values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            api_key: var("BREVO_API_KEY"),
            api_url: var("BREVO_API_URL").unwrap_or(defaults.api_url),
            sender: Contact {
                name: var("SENDER_NAME").unwrap_or(defaults.sender.name),
                email: var("SENDER_EMAIL").unwrap_or(defaults.sender.email),
            },
            recipient: Contact {
                name: var("RECIPIENT_NAME").unwrap_or(defaults.recipient.name),
                email: var("RECIPIENT_EMAIL").unwrap_or(defaults.recipient.email),
            },
            subject: var("EMAIL_SUBJECT").unwrap_or(defaults.subject),
            html_content: defaults.html_content,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }

    /// Check the envelope before anything is sent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.is_empty() {
            return Err(ConfigError::MissingField("api_url"));
        }
        for contact in [&self.sender, &self.recipient] {
            if !email_address::EmailAddress::is_valid(&contact.email) {
                return Err(ConfigError::InvalidEmail(contact.email.clone()));
            }
        }
        if self.subject.is_empty() {
            return Err(ConfigError::MissingField("subject"));
        }
        Ok(())
    }
}
