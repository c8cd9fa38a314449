//! File attachment metadata carried by announcements and events.

use campus_core::types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Broad media category of an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Video,
    Document,
}

/// A file uploaded to the blob store. The `url` is opaque to this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub id: String,
    pub name: String,
    pub kind: AttachmentKind,
    pub url: String,
    /// Size in bytes.
    pub size: u64,
    pub uploaded_at: Timestamp,
    pub uploaded_by: UserId,
}
