// Settings service
// Loads display settings from the per-user TOML file

mod service;

pub use service::SettingsService;
