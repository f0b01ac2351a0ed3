use crate::settings::structs::AppSettings;
use std::path::Path;
use std::sync::LazyLock;

/// Load the app settings from YAML + environment variables
pub fn load_app_settings() -> color_eyre::Result<AppSettings> {
    let config_path = Path::new("config/settings.yaml").canonicalize()?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );
    Ok(builder.build()?.try_deserialize::<AppSettings>()?)
}

/// Immutable global settings, initialized on first access.
pub static SETTINGS: LazyLock<AppSettings> =
    LazyLock::new(|| load_app_settings().expect("Failed to load app settings"));

#[must_use]
pub fn settings() -> &'static AppSettings {
    &SETTINGS
}
