use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// Upload path a file arrived through. Recorded for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeChannel {
    DragAndDrop,
    #[default]
    FilePicker,
}

impl IntakeChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DragAndDrop => "drag_and_drop",
            Self::FilePicker => "file_picker",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "drag_and_drop" => Some(Self::DragAndDrop),
            "file_picker" => Some(Self::FilePicker),
            _ => None,
        }
    }
}

impl fmt::Display for IntakeChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated image payload. Transient: owned by the workspace that staged it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub format: ImageFormat,
    pub bytes: Bytes,
    pub received_via: IntakeChannel,
}

impl Document {
    pub fn new(
        filename: String,
        format: ImageFormat,
        bytes: Bytes,
        received_via: IntakeChannel,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            filename,
            format,
            bytes,
            received_via,
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}
