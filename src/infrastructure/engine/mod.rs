mod engine_factory;
mod http_extraction_engine;
mod mock_extraction_engine;

pub use engine_factory::{EngineFactoryError, ExtractionEngineFactory};
pub use http_extraction_engine::{
    ExtractWireRequest, ExtractWireResponse, HttpExtractionEngine, SuggestWireResponse,
    WireError, WireFieldSpec, WireFieldValue, WireSuggestedField, error_for_status,
    map_wire_error,
};
pub use mock_extraction_engine::{MockExtractionEngine, fields_from_prompt};
