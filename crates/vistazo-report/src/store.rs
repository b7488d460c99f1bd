//! In-memory report attachment store
//!
//! Collects typed binary attachments during a run. An external reporting
//! tool drains the store after the run; nothing here touches the filesystem.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Media type of an attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    /// Browser screenshot
    Png,
}

impl AttachmentKind {
    /// File extension for this attachment kind
    pub fn extension(&self) -> &str {
        match self {
            AttachmentKind::Png => "png",
        }
    }

    /// MIME type for this attachment kind
    pub fn mime_type(&self) -> &str {
        match self {
            AttachmentKind::Png => "image/png",
        }
    }
}

/// One stored attachment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Display name, e.g. `START - login ok @ 14:03:22.123456`
    pub name: String,
    /// Media type
    pub kind: AttachmentKind,
    /// Raw content
    pub bytes: Vec<u8>,
}

/// Append-only in-memory attachment sink
///
/// Interior mutability so the capture hook can append through a shared
/// handle while the runner holds the same store.
#[derive(Default)]
pub struct AttachmentStore {
    attachments: Mutex<Vec<Attachment>>,
}

impl AttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attachment
    pub fn attach(&self, name: impl Into<String>, kind: AttachmentKind, bytes: Vec<u8>) {
        self.attachments.lock().unwrap().push(Attachment {
            name: name.into(),
            kind,
            bytes,
        });
    }

    /// Snapshot of all attachments so far
    pub fn attachments(&self) -> Vec<Attachment> {
        self.attachments.lock().unwrap().clone()
    }

    /// Number of stored attachments
    pub fn len(&self) -> usize {
        self.attachments.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_kind_metadata() {
        assert_eq!(AttachmentKind::Png.extension(), "png");
        assert_eq!(AttachmentKind::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_store_appends_in_order() {
        let store = AttachmentStore::new();
        assert!(store.is_empty());

        store.attach("first", AttachmentKind::Png, vec![1, 2, 3]);
        store.attach("second", AttachmentKind::Png, vec![4]);

        let attachments = store.attachments();
        assert_eq!(store.len(), 2);
        assert_eq!(attachments[0].name, "first");
        assert_eq!(attachments[0].bytes, vec![1, 2, 3]);
        assert_eq!(attachments[1].name, "second");
    }
}
