//! Application configuration loaded from environment variables.

use std::time::Duration;

use booking::AirlineConfig;

/// Secret used when `JWT_SECRET` is unset. Only suitable for development.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

/// Partner key sent to the airline when `PARTNER_API_KEY` is unset.
pub const DEFAULT_PARTNER_API_KEY: &str = "PARTNER_SECRET";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` / `PORT` (default: `"0.0.0.0"` / `3000`)
/// - `RUST_LOG` (default: `"info"`) and `LOG_FORMAT` (`pretty` or `json`)
/// - `DATABASE_URL` (unset: in-memory stores) and `DATABASE_MAX_CONNECTIONS` (default: `10`)
/// - `JWT_SECRET` and `TOKEN_TTL_HOURS` (default: `168`)
/// - `BCRYPT_COST` (default: `10`)
/// - `AIRLINE_FLIGHT_SCHEDULE_SERVICE` / `AIRLINE_FLIGHT_BOOKING_SERVICE`
/// - `PARTNER_API_KEY` (default: `"PARTNER_SECRET"`) and `AIRLINE_TIMEOUT_SECS` (default: `10`)
/// - `BOOKING_SERVICE_URL` (unset: bookings are marked paid in-process) and
///   `BOOKING_SERVICE_TIMEOUT_SECS` (default: `10`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub airline_schedule_url: Option<String>,
    pub airline_booking_url: Option<String>,
    pub partner_api_key: String,
    pub airline_timeout_secs: u64,
    pub booking_service_url: Option<String>,
    pub booking_service_timeout_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: parsed(&non_empty, "PORT").unwrap_or(defaults.port),
            log_level: non_empty("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: match non_empty("LOG_FORMAT").as_deref() {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            database_url: non_empty("DATABASE_URL"),
            database_max_connections: parsed(&non_empty, "DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database_max_connections),
            jwt_secret: non_empty("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            token_ttl_hours: parsed(&non_empty, "TOKEN_TTL_HOURS")
                .unwrap_or(defaults.token_ttl_hours),
            bcrypt_cost: parsed(&non_empty, "BCRYPT_COST").unwrap_or(defaults.bcrypt_cost),
            airline_schedule_url: non_empty("AIRLINE_FLIGHT_SCHEDULE_SERVICE"),
            airline_booking_url: non_empty("AIRLINE_FLIGHT_BOOKING_SERVICE"),
            partner_api_key: non_empty("PARTNER_API_KEY").unwrap_or(defaults.partner_api_key),
            airline_timeout_secs: parsed(&non_empty, "AIRLINE_TIMEOUT_SECS")
                .unwrap_or(defaults.airline_timeout_secs),
            booking_service_url: non_empty("BOOKING_SERVICE_URL"),
            booking_service_timeout_secs: parsed(&non_empty, "BOOKING_SERVICE_TIMEOUT_SECS")
                .unwrap_or(defaults.booking_service_timeout_secs),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// True when tokens are signed with the built-in development secret.
    pub fn uses_dev_jwt_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    /// Remote booking API used to mark bookings paid, if configured.
    pub fn booking_service(&self) -> Option<(&str, Duration)> {
        let url = self.booking_service_url.as_deref()?;
        Some((url, Duration::from_secs(self.booking_service_timeout_secs)))
    }

    /// Airline endpoints, if both are configured.
    pub fn airline(&self) -> Option<AirlineConfig> {
        Some(AirlineConfig {
            schedule_url: self.airline_schedule_url.clone()?,
            booking_url: self.airline_booking_url.clone()?,
            api_key: self.partner_api_key.clone(),
            timeout: Duration::from_secs(self.airline_timeout_secs),
        })
    }
}

/// Invalid values are ignored so the default applies.
fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|raw| raw.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            database_url: None,
            database_max_connections: 10,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_hours: membership::auth::DEFAULT_TOKEN_TTL_HOURS,
            bcrypt_cost: membership::auth::BCRYPT_COST,
            airline_schedule_url: None,
            airline_booking_url: None,
            partner_api_key: DEFAULT_PARTNER_API_KEY.to_string(),
            airline_timeout_secs: 10,
            booking_service_url: None,
            booking_service_timeout_secs: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.token_ttl_hours, 168);
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.partner_api_key, "PARTNER_SECRET");
        assert!(config.uses_dev_jwt_secret());
        assert!(config.airline().is_none());
        assert!(config.booking_service().is_none());
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Default::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_lookup_overrides() {
        let config = from_pairs(&[
            ("PORT", "4000"),
            ("LOG_FORMAT", "JSON"),
            ("DATABASE_URL", "postgres://localhost/travel"),
            ("JWT_SECRET", "s3cret"),
            ("TOKEN_TTL_HOURS", "1"),
        ]);
        assert_eq!(config.port, 4000);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/travel")
        );
        assert!(!config.uses_dev_jwt_secret());
        assert_eq!(config.token_ttl_hours, 1);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = from_pairs(&[("PORT", "not-a-port"), ("AIRLINE_TIMEOUT_SECS", "")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.airline_timeout_secs, 10);
    }

    #[test]
    fn test_airline_requires_both_urls() {
        let partial = from_pairs(&[("AIRLINE_FLIGHT_SCHEDULE_SERVICE", "http://airline/schedule")]);
        assert!(partial.airline().is_none());

        let full = from_pairs(&[
            ("AIRLINE_FLIGHT_SCHEDULE_SERVICE", "http://airline/schedule"),
            ("AIRLINE_FLIGHT_BOOKING_SERVICE", "http://airline/booking"),
            ("PARTNER_API_KEY", "k"),
        ]);
        let airline = full.airline().unwrap();
        assert_eq!(airline.booking_url, "http://airline/booking");
        assert_eq!(airline.api_key, "k");
        assert_eq!(airline.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_booking_service_url() {
        let config = from_pairs(&[
            ("BOOKING_SERVICE_URL", "http://bookings.internal:3000"),
            ("BOOKING_SERVICE_TIMEOUT_SECS", "3"),
        ]);
        let (url, timeout) = config.booking_service().unwrap();
        assert_eq!(url, "http://bookings.internal:3000");
        assert_eq!(timeout, Duration::from_secs(3));

        let blank = from_pairs(&[("BOOKING_SERVICE_URL", "  ")]);
        assert!(blank.booking_service().is_none());
    }
}
