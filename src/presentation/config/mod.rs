mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VARIABLE, Environment};
pub use settings::{
    ExtractionSettings, LoggingSettings, RelaySettings, ScaffoldSettings, ServerSettings,
    Settings,
};
