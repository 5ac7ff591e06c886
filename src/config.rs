//! Service configuration, loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },

    #[error("{0} must be greater than zero")]
    ZeroValue(String),
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpSettings {
    pub host: String,
    pub port: u16,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Order router settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RouterSettings {
    /// Number of router instances in the pool.
    pub instances: usize,
    /// Upper bound on a single order service call.
    pub service_timeout: Duration,
    /// Mailbox capacity of each router instance.
    pub mailbox_capacity: usize,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            instances: 4,
            service_timeout: Duration::from_millis(5000),
            mailbox_capacity: 256,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub http: HttpSettings,
    pub router: RouterSettings,
}

impl Settings {
    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or if a
    /// count or duration is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_defaults = HttpSettings::default();
        let router_defaults = RouterSettings::default();

        let http = HttpSettings {
            host: lookup("ORDER_SERVICE_HOST").unwrap_or(http_defaults.host),
            port: parse_var(&lookup, "ORDER_SERVICE_PORT", http_defaults.port)?,
        };

        let timeout_ms = parse_var(
            &lookup,
            "ORDER_ROUTER_SERVICE_TIMEOUT_MS",
            router_defaults.service_timeout.as_millis() as u64,
        )?;

        let router = RouterSettings {
            instances: non_zero(
                "ORDER_ROUTER_INSTANCES",
                parse_var(&lookup, "ORDER_ROUTER_INSTANCES", router_defaults.instances)?,
            )?,
            service_timeout: Duration::from_millis(non_zero(
                "ORDER_ROUTER_SERVICE_TIMEOUT_MS",
                timeout_ms,
            )?),
            mailbox_capacity: non_zero(
                "ORDER_ROUTER_MAILBOX_CAPACITY",
                parse_var(&lookup, "ORDER_ROUTER_MAILBOX_CAPACITY", router_defaults.mailbox_capacity)?,
            )?,
        };

        Ok(Self { http, router })
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: name.to_string(),
            value: raw,
        }),
    }
}

fn non_zero<T>(name: &str, value: T) -> Result<T, ConfigError>
where
    T: PartialEq + Default,
{
    if value == T::default() {
        return Err(ConfigError::ZeroValue(name.to_string()));
    }
    Ok(value)
}
