mod app;
mod config;
mod effects;
pub mod logging;
pub mod ui;

pub use app::{run_app, App};
pub use config::{AppConfig, ConfigError};
pub use effects::EffectRunner;
