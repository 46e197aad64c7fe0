use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::ExtractionEngine;
use crate::presentation::config::{EngineProvider, EngineSettings};

use super::http_extraction_engine::HttpExtractionEngine;
use super::mock_extraction_engine::MockExtractionEngine;

#[derive(Debug, thiserror::Error)]
pub enum EngineFactoryError {
    #[error("engine.base_url is required for the http provider")]
    MissingBaseUrl,
}

pub struct ExtractionEngineFactory;

impl ExtractionEngineFactory {
    pub fn create(
        settings: &EngineSettings,
    ) -> Result<Arc<dyn ExtractionEngine>, EngineFactoryError> {
        match settings.provider {
            EngineProvider::Mock => {
                tracing::info!(delay_ms = settings.mock_delay_ms, "Using mock extraction engine");
                Ok(Arc::new(MockExtractionEngine::new(Duration::from_millis(
                    settings.mock_delay_ms,
                ))))
            }
            EngineProvider::Http => {
                let base_url = settings
                    .base_url
                    .as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .ok_or(EngineFactoryError::MissingBaseUrl)?;
                tracing::info!(base_url, "Using HTTP extraction engine");
                Ok(Arc::new(HttpExtractionEngine::new(
                    base_url,
                    settings.api_key.as_deref(),
                    Duration::from_secs(settings.timeout_secs),
                )))
            }
        }
    }
}
