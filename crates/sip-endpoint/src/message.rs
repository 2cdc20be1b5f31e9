//! Instant message view
//!
//! A [`Message`] exists only as an event payload; this layer never stores
//! one.

use serde::Deserialize;

/// Immutable view over a raw SIP MESSAGE payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Message {
    #[serde(rename = "fromUri")]
    from_uri: String,
    #[serde(rename = "toUri")]
    to_uri: String,
    #[serde(rename = "contentType")]
    content_type: String,
    body: String,
}

impl Message {
    /// URI of the sender.
    pub fn from_uri(&self) -> &str {
        &self.from_uri
    }

    /// URI of the recipient.
    pub fn to_uri(&self) -> &str {
        &self.to_uri
    }

    /// MIME type of the body.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Message body.
    pub fn body(&self) -> &str {
        &self.body
    }
}
