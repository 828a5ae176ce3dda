/// Logger setup on top of `tracing-subscriber`.
pub mod logging;
/// `parley.toml` configuration.
pub mod toml_config;
