use serde::Deserialize;
use std::env;
use std::path::Path;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use finca_catalog::SeatRing;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub business_rules: BusinessRules,
    #[serde(default)]
    pub layout: SeatRing,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    /// Reject bookings whose check-out is not after check-in.
    pub strict_date_range: bool,
    /// Store new bookings as confirmed instead of pending.
    pub auto_confirm: bool,
}

fn with_defaults(builder: ConfigBuilder<DefaultState>) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("business_rules.strict_date_range", false)?
        .set_default("business_rules.auto_confirm", true)
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &run_mode)
    }

    /// Defaults, then `default`, `{run_mode}` and `local` files from `dir`, then `FINCA__*` env.
    pub fn load_from(dir: impl AsRef<Path>, run_mode: &str) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let file = |name: &str| config::File::with_name(&dir.join(name).to_string_lossy()).required(false);

        let s = with_defaults(config::Config::builder())?
            .add_source(file("default"))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(file(run_mode))
            // Not checked in
            .add_source(file("local"))
            // FINCA__SERVER__PORT=8080 sets server.port
            .add_source(config::Environment::with_prefix("FINCA").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Built-in defaults only, ignoring files and environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        with_defaults(config::Config::builder())?.build()?.try_deserialize()
    }
}
