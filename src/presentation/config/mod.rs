mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    EngineProvider, EngineSettings, IntakeSettings, LoggingSettings, ServerSettings, Settings,
    TemplateSettings,
};
