mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ElevateSettings, LoggingSettings, PollingSettings, ServerSettings, Settings,
};
