use std::fmt;

use serde::Serialize;

/// Where a workspace is in the extraction lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionStatus {
    Idle,
    Pending,
    Ready,
    Failed,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::Idle => "IDLE",
            ExtractionStatus::Pending => "PENDING",
            ExtractionStatus::Ready => "READY",
            ExtractionStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
