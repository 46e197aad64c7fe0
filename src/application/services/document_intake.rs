use bytes::Bytes;

use crate::domain::{Document, ImageFormat, IntakeChannel};

pub const DEFAULT_MAX_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// A file as handed over by any upload path, before validation.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Validates uploads. Every channel goes through the same checks.
#[derive(Debug, Clone, Copy)]
pub struct DocumentIntake {
    max_size_bytes: u64,
}

impl Default for DocumentIntake {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE_BYTES)
    }
}

impl DocumentIntake {
    pub fn new(max_size_bytes: u64) -> Self {
        Self { max_size_bytes }
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    #[tracing::instrument(
        skip(self, file),
        fields(filename = %file.filename, content_type = %file.content_type, channel = %channel)
    )]
    pub fn accept(
        &self,
        file: IncomingFile,
        channel: IntakeChannel,
    ) -> Result<Document, IntakeError> {
        let format = ImageFormat::from_mime(&file.content_type)
            .ok_or_else(|| IntakeError::InvalidFormat(file.content_type.clone()))?;

        let size = file.bytes.len() as u64;
        if size == 0 {
            return Err(IntakeError::Empty);
        }
        if size > self.max_size_bytes {
            tracing::warn!(size, limit = self.max_size_bytes, "Rejected oversized upload");
            return Err(IntakeError::TooLarge {
                size,
                limit: self.max_size_bytes,
            });
        }

        let sniffed = image::guess_format(&file.bytes).ok();
        let matches = matches!(
            (format, sniffed),
            (ImageFormat::Jpeg, Some(image::ImageFormat::Jpeg))
                | (ImageFormat::Png, Some(image::ImageFormat::Png))
        );
        if !matches {
            return Err(IntakeError::InvalidFormat(format!(
                "payload is not a valid {}",
                format.as_mime()
            )));
        }

        let document = Document::new(file.filename, format, file.bytes, channel);
        tracing::debug!(
            document_id = %document.id.as_uuid(),
            bytes = size,
            "Document accepted"
        );
        Ok(document)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("unsupported file type: {0}")]
    InvalidFormat(String),
    #[error("file is empty")]
    Empty,
    #[error("file is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}
