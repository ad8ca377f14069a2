use crate::config::{AppConfig, ConfigError};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::{Path, PathBuf};

/// Default location of the TOML configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";

/// Prefix for environment overrides, e.g. `RADAR_SCANNER__MIN_APY=7.5`.
pub const ENV_PREFIX: &str = "RADAR_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by layering built-in defaults, `config/Config.toml`
    /// and `RADAR_` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider cannot be parsed or the merged
    /// configuration fails validation.
    pub fn load() -> Result<AppConfig, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration from an explicit TOML file. A missing file is not an
    /// error; the defaults and environment still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or validation fails.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
        Self::extract(Self::base().merge(Toml::file(path.as_ref())))
    }

    /// Loads configuration with a profile overlay (`config/Config.{profile}.toml`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig, ConfigError> {
        Self::load_profile_from(DEFAULT_CONFIG_PATH, profile)
    }

    /// Loads `path` with a profile overlay next to it, e.g. `radar.toml` plus
    /// `radar.staging.toml`. Either file may be missing.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or validation
    /// fails.
    pub fn load_profile_from(
        path: impl AsRef<Path>,
        profile: &str,
    ) -> Result<AppConfig, ConfigError> {
        let path = path.as_ref();
        let figment = Self::base()
            .merge(Toml::file(path))
            .merge(Toml::file(profile_path(path, profile)));

        Self::extract(figment)
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
    }

    fn extract(figment: Figment) -> Result<AppConfig, ConfigError> {
        let mut config: AppConfig =
            figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract()?;
        config.scanner.normalize();
        config.scanner.validate()?;

        tracing::debug!(
            sort_mode = %config.scanner.sort_mode,
            min_apy = %config.scanner.min_apy,
            min_tvl = %config.scanner.min_tvl,
            "Configuration loaded"
        );

        Ok(config)
    }
}

fn profile_path(path: &Path, profile: &str) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Config");
    let file_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{profile}.{ext}"),
        None => format!("{stem}.{profile}"),
    };
    path.with_file_name(file_name)
}
