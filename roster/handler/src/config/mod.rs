//! Configuration management for the roster server
use std::net::IpAddr;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use config::Source;
use serde::Deserialize;

use crate::config::error::RosterConfigError;
use crate::config::serialization::duration_milliseconds_deserializer;

mod error;
mod serialization;

/// Hard cap on the page size, whatever the configuration says.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// The configuration bundled with the binary.
const DEFAULT_CONFIG: &str = include_str!("default.toml");

/// Trait for validating configuration values.
trait Validatable {
    /// Validate the configuration values.
    fn validate(&self, cfg: &Settings) -> Result<(), ConfigError>;
}

/// Top-level configuration for the roster server
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    /// HTTP listener configuration
    pub server: ServerConfig,
    /// Paging defaults and limits
    pub paging: PagingConfig,
    /// Log output configuration
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    /// Interface to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl ServerConfig {
    /// The socket address the server listens on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::Message(RosterConfigError::InvalidHost(self.host.clone()).to_string())
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Validatable for ServerConfig {
    fn validate(&self, _: &Settings) -> Result<(), ConfigError> {
        self.socket_addr().map(|_| ())
    }
}

/// Paging configuration, handed explicitly to the paging parser and driver.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagingConfig {
    /// Page size used when the client does not ask for one.
    pub default_limit: u32,
    /// Largest page size a client may ask for.
    pub max_limit: u32,
    /// Deadline shared by every query of one request.
    #[serde(deserialize_with = "duration_milliseconds_deserializer")]
    pub query_timeout: Duration,
}

impl Default for PagingConfig {
    fn default() -> Self {
        PagingConfig {
            default_limit: 20,
            max_limit: MAX_PAGE_LIMIT,
            query_timeout: Duration::from_millis(3000),
        }
    }
}

impl Validatable for PagingConfig {
    fn validate(&self, _: &Settings) -> Result<(), ConfigError> {
        if self.max_limit > MAX_PAGE_LIMIT {
            let err = RosterConfigError::MaxLimitAboveCap(self.max_limit);
            return Err(ConfigError::Message(err.to_string()));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            let err = RosterConfigError::InvalidDefaultLimit {
                default: self.default_limit,
                max: self.max_limit,
            };
            return Err(ConfigError::Message(err.to_string()));
        }
        if self.query_timeout.is_zero() {
            let err = RosterConfigError::ZeroDurationForbidden("paging.query_timeout");
            return Err(ConfigError::Message(err.to_string()));
        }
        Ok(())
    }
}

/// Log output configuration.
#[derive(Deserialize, Clone, Debug)]
pub struct LoggingConfig {
    /// Filter directives used when `RUST_LOG` is not set.
    pub directives: String,
    /// Human readable output instead of JSON lines.
    pub pretty: bool,
}

impl Settings {
    /// Initializing the global config first with default values, then with
    /// the optional config file and finally with environment variables.
    ///
    /// The environment variables are prefixed with `ROSTER_` and the nested
    /// fields are separated with double underscores. For example, the path
    /// `paging.max_limit` is read from:
    ///
    /// ```text
    /// ROSTER_PAGING__MAX_LIMIT
    /// ^^^^^^ ^^^^^^  ^^^^^^^^^
    ///    │  ^  │   ^^   │
    ///    │  │  │   │    └ The `max_limit` field of the `paging` object
    ///    │  │  │   └ separator("__")
    ///    │  │  └ The `paging` field of the root object (`Settings`)
    ///    │  └ prefix_separator("_")
    ///    └ with_prefix("ROSTER")
    /// ```
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::load(File::from(path.as_ref())),
            None => Self::new_from_default_config(),
        }
    }

    /// Loads the configuration bundled with the binary, still applying
    /// environment overrides.
    pub fn new_from_default_config() -> Result<Self, ConfigError> {
        Self::load(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn load<S>(source: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Self::load_with_env(source, environment())
    }

    fn load_with_env<S>(source: S, env: Environment) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let defaults = PagingConfig::default();
        let mut cfg_builder = Config::builder();
        cfg_builder = cfg_builder.set_default("server.host", "127.0.0.1")?;
        cfg_builder = cfg_builder.set_default("server.port", 3031)?;
        cfg_builder = cfg_builder.set_default("paging.default_limit", defaults.default_limit as i64)?;
        cfg_builder = cfg_builder.set_default("paging.max_limit", defaults.max_limit as i64)?;
        cfg_builder = cfg_builder.set_default(
            "paging.query_timeout",
            defaults.query_timeout.as_millis() as i64,
        )?;
        cfg_builder = cfg_builder.set_default("logging.directives", "info")?;
        cfg_builder = cfg_builder.set_default("logging.pretty", false)?;

        cfg_builder = cfg_builder.add_source(source);
        cfg_builder = cfg_builder.add_source(env);

        let cfg = cfg_builder.build()?;

        let settings: Settings = cfg.try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Perform validation on the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate(self)?;
        self.paging.validate(self)?;

        Ok(())
    }
}

/// `ROSTER_` prefixed variables, `__` between nested fields.
fn environment() -> Environment {
    Environment::with_prefix("ROSTER")
        .separator("__")
        .try_parsing(true)
        .prefix_separator("_")
}
