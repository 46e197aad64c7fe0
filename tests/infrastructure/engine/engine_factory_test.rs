use digitize::infrastructure::engine::{EngineFactoryError, ExtractionEngineFactory};
use digitize::presentation::config::{EngineProvider, EngineSettings};

#[test]
fn given_mock_provider_when_creating_engine_then_succeeds() {
    let settings = EngineSettings::default();

    assert!(ExtractionEngineFactory::create(&settings).is_ok());
}

#[test]
fn given_http_provider_without_base_url_when_creating_engine_then_fails() {
    let settings = EngineSettings {
        provider: EngineProvider::Http,
        base_url: Some("  ".to_string()),
        ..EngineSettings::default()
    };

    assert!(matches!(
        ExtractionEngineFactory::create(&settings),
        Err(EngineFactoryError::MissingBaseUrl)
    ));
}

#[test]
fn given_http_provider_with_base_url_when_creating_engine_then_succeeds() {
    let settings = EngineSettings {
        provider: EngineProvider::Http,
        base_url: Some("http://localhost:8085".to_string()),
        api_key: Some("secret".to_string()),
        ..EngineSettings::default()
    };

    assert!(ExtractionEngineFactory::create(&settings).is_ok());
}
