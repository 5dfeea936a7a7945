//! Submission data types
//!
//! The payload types serialize to the JSON body of the Brevo transactional
//! email endpoint.

use serde::{Deserialize, Serialize};

/// A user-selected image, already base64 encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    /// Raw base64 data, or a `data:<mime>;base64,` URI
    pub base64: String,
    pub mime_type: String,
    /// Original file name
    pub name: String,
}

impl ImageAsset {
    pub fn new(
        base64: impl Into<String>,
        mime_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            base64: base64.into(),
            mime_type: mime_type.into(),
            name: name.into(),
        }
    }
}

/// Images grouped by who they belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGroups {
    pub owner: Vec<ImageAsset>,
    pub witness: Vec<ImageAsset>,
}

impl ImageGroups {
    pub fn len(&self) -> usize {
        self.owner.len() + self.witness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_empty() && self.witness.is_empty()
    }

    /// Owner images first, then witness images
    pub fn iter(&self) -> impl Iterator<Item = &ImageAsset> {
        self.owner.iter().chain(self.witness.iter())
    }

    pub fn clear(&mut self) {
        self.owner.clear();
        self.witness.clear();
    }
}

/// Email attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Base64 encoded content
    pub content: String,
    pub name: String,
    pub content_type: String,
}

/// Name and address of a sender or recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Request body for `POST /v3/smtp/email`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub sender: Contact,
    pub to: Vec<Contact>,
    pub subject: String,
    pub html_content: String,
    /// Document first, then owner and witness images
    pub attachment: Vec<Attachment>,
}
