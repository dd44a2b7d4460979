// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize,
};

use crate::auth::DEFAULT_HASH_COST;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides (`AUTHGATE_PORT`, `AUTHGATE_DATA_DIR`, ...)
pub const ENV_PREFIX: &str = "AUTHGATE_";

/// Shortest accepted signing secret, in bytes
pub const MIN_SECRET_LENGTH: usize = 16;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Deployment environment; production turns on `Secure` cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Application settings
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Interface to bind
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the user store
    pub data_dir: PathBuf,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Deployment environment
    pub environment: Environment,
    /// HMAC secret for session tokens; generated at startup when absent
    #[serde(default, deserialize_with = "secret_from_string_or_number")]
    pub jwt_secret: Option<String>,
    /// Session TTL in seconds
    pub session_ttl_secs: u64,
    /// scrypt cost (`log_n`)
    pub hash_cost: u8,
    /// Origin allowed to call the API with credentials
    pub cors_origin: Option<String>,
}

/// Environment values that look numeric arrive as numbers; a secret is text either way
fn secret_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SecretVisitor;

    impl<'de> Visitor<'de> for SecretVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or number")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(SecretVisitor)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }
    }

    deserializer.deserialize_option(SecretVisitor)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            data_dir: PathBuf::from("data"),
            log_level: "info".to_string(),
            environment: Environment::Development,
            jwt_secret: None,
            session_ttl_secs: 60 * 60, // 1 hour
            hash_cost: DEFAULT_HASH_COST,
            cors_origin: None,
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("data_dir", &self.data_dir)
            .field("log_level", &self.log_level)
            .field("environment", &self.environment)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("hash_cost", &self.hash_cost)
            .field("cors_origin", &self.cors_origin)
            .finish()
    }
}

impl Settings {
    /// Load settings from `config.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load settings from a specific TOML file and the environment.
    ///
    /// Later sources win: defaults, the file, `AUTHGATE_*` variables, then the
    /// bare `PORT`, `JWT_SECRET` and `APP_ENV` variables.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings: Settings = Self::figment(path.as_ref()).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(
                Env::raw()
                    .only(&["port", "jwt_secret", "app_env"])
                    .map(|key| {
                        if key.as_str().eq_ignore_ascii_case("app_env") {
                            "environment".into()
                        } else {
                            key.as_str().into()
                        }
                    }),
            )
    }

    /// Start building settings from defaults
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    /// Check values that would otherwise fail later at runtime
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            bail!(
                "invalid log level `{}`, expected one of {:?}",
                self.log_level,
                LOG_LEVELS
            );
        }
        if self.session_ttl_secs == 0 {
            bail!("session_ttl_secs must be greater than zero");
        }
        if self.hash_cost == 0 || self.hash_cost > 20 {
            bail!("hash_cost must be between 1 and 20, got {}", self.hash_cost);
        }
        match &self.jwt_secret {
            Some(secret) if secret.len() < MIN_SECRET_LENGTH => {
                bail!("jwt_secret must be at least {MIN_SECRET_LENGTH} bytes");
            },
            None if self.is_production() => {
                bail!("jwt_secret is required in production");
            },
            _ => {},
        }
        Ok(())
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

/// Builder for `Settings`
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.settings.host = addr.ip();
        self.settings.port = addr.port();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.settings.port = port;
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.settings.data_dir = dir.into();
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.settings.log_level = level.into();
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.settings.environment = environment;
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.settings.jwt_secret = Some(secret.into());
        self
    }

    pub fn session_ttl(mut self, secs: u64) -> Self {
        self.settings.session_ttl_secs = secs;
        self
    }

    pub fn hash_cost(mut self, cost: u8) -> Self {
        self.settings.hash_cost = cost;
        self
    }

    pub fn cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.settings.cors_origin = Some(origin.into());
        self
    }

    /// Validate and return the settings
    pub fn build(self) -> Result<Settings> {
        self.settings.validate()?;
        Ok(self.settings)
    }
}
