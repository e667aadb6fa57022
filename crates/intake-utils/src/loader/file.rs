use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// A file pulled through a loader, decoupled from the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub metadata: FileMetadata,
    pub content: Vec<u8>,
}

impl File {
    pub(crate) fn new(metadata: FileMetadata, content: Vec<u8>) -> Self {
        Self { metadata, content }
    }
}

/// Provenance of a loaded file. The digest lets a consumer tell whether a
/// catalog changed without re-parsing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub key: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub digest: Option<FileDigest>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    pub value: String,
    pub algorithm: Cow<'static, str>,
}
