use std::time::Duration;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::feed::carousel::WrapMode;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub site: SiteConfig,
    pub feed: FeedConfig,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    SingleUser,
    BasicAuth,
    Proxy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    pub proxy: Option<ProxyAuthConfig>,
    pub single_user: Option<SingleUserAuthConfig>,
    pub basic_auth: Option<BasicAuthConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProxyAuthConfig {
    /// Header carrying the identity asserted by the fronting proxy.
    pub header: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SingleUserAuthConfig {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Deserialize)]
pub struct BasicAuthConfig {
    pub username: String,
    /// Argon2 PHC string, see the `hash_password` binary.
    pub password_hash: String,
}

impl std::fmt::Debug for BasicAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuthConfig")
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub serve_origin: Option<String>,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the server address as a string in the format "host:port".
    #[must_use]
    pub fn serve_origin(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// ## Summary
    /// Returns the server origin URL.
    #[must_use]
    pub fn origin(&self) -> String {
        if let Some(origin) = &self.serve_origin {
            origin.clone()
        } else {
            self.serve_origin()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// IANA zone in which event dates and times are written.
    pub timezone: String,
}

impl SiteConfig {
    /// ## Summary
    /// Resolves the configured IANA timezone.
    ///
    /// ## Errors
    /// Returns `ConfigError` if the name is not a known zone.
    pub fn tz(&self) -> CoreResult<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|e| CoreError::ConfigError(format!("site.timezone: {e}")))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    pub poll_interval_ms: u64,
    pub window_size: usize,
    pub tick_interval_ms: u64,
    /// `restart` (the default) stops at the last full window and starts over,
    /// so the carousel comes back after `len - window_size + 1` steps. Choose
    /// `rotate` for a window that cycles through every entry and comes back
    /// after exactly `len` steps.
    pub wrap: WrapMode,
}

impl FeedConfig {
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// ## Summary
    /// Checks that intervals and the window are usable by a feed session.
    ///
    /// ## Errors
    /// Returns `ConfigError` for a zero interval or a zero window size.
    pub fn validate(&self) -> CoreResult<()> {
        if self.poll_interval_ms == 0 || self.tick_interval_ms == 0 {
            return Err(CoreError::ConfigError(
                "feed intervals must be greater than zero".to_string(),
            ));
        }
        if self.window_size == 0 {
            return Err(CoreError::ConfigError(
                "feed.window_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5000,
            window_size: 4,
            tick_interval_ms: 5000,
            wrap: WrapMode::Restart,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub refresh_interval_ms: u64,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `config.toml` and environment variables into a `Settings`.
    /// Environment variables (`TIDINGS_SECTION__KEY`) take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8698)?
            .set_default("database.url", "postgres://localhost/tidings")?
            .set_default("database.max_connections", 4)?
            .set_default("database.backend", "postgres")?
            .set_default("auth.method", "single_user")?
            .set_default("auth.single_user.name", "Administrator")?
            .set_default("auth.single_user.email", "admin@localhost")?
            .set_default("logging.level", "debug")?
            .set_default("site.timezone", "UTC")?
            .set_default("feed.poll_interval_ms", 5000)?
            .set_default("feed.window_size", 4)?
            .set_default("feed.tick_interval_ms", 5000)?
            .set_default("feed.wrap", "restart")?
            .set_default("dashboard.refresh_interval_ms", 2000)?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::with_prefix("TIDINGS")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.site.tz()?;
        settings.feed.validate()?;

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn test_site_timezone_resolves() {
        let site = SiteConfig {
            timezone: "Africa/Lagos".to_string(),
        };
        assert_eq!(site.tz().unwrap(), chrono_tz::Africa::Lagos);
    }

    #[test]
    fn test_unknown_timezone_is_config_error() {
        let site = SiteConfig {
            timezone: "Mars/Olympus".to_string(),
        };
        assert!(matches!(site.tz(), Err(CoreError::ConfigError(_))));
    }

    #[test]
    fn test_feed_config_rejects_zero_window() {
        let feed = FeedConfig {
            window_size: 0,
            ..FeedConfig::default()
        };
        assert!(feed.validate().is_err());
        assert!(FeedConfig::default().validate().is_ok());
    }

    #[test]
    fn test_feed_intervals_are_milliseconds() {
        let feed = FeedConfig::default();
        assert_eq!(feed.poll_interval(), Duration::from_secs(5));
        assert_eq!(feed.tick_interval(), Duration::from_secs(5));
    }

    #[test]
    fn test_feed_wrap_defaults_to_restart_and_accepts_rotate() {
        assert_eq!(FeedConfig::default().wrap, WrapMode::Restart);
        let feed: FeedConfig = serde_json::from_value(serde_json::json!({
            "poll_interval_ms": 5000,
            "window_size": 4,
            "tick_interval_ms": 5000,
            "wrap": "rotate",
        }))
        .unwrap();
        assert_eq!(feed.wrap, WrapMode::Rotate);
    }

    #[test]
    fn test_basic_auth_debug_hides_hash() {
        let basic = BasicAuthConfig {
            username: "editor".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
        };
        let rendered = format!("{basic:?}");
        assert!(rendered.contains("editor"));
        assert!(!rendered.contains("secret"));
    }

    #[test]
    fn test_server_origin_prefers_explicit_value() {
        let mut server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8698,
            serve_origin: None,
        };
        assert_eq!(server.origin(), "http://127.0.0.1:8698");
        server.serve_origin = Some("https://news.example.org".to_string());
        assert_eq!(server.origin(), "https://news.example.org");
    }
}
