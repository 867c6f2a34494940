//! Runtime configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOSPITALINFO_PORT` | `3000` |
//! | `HOSPITALINFO_DATA_URL` | `https://prajapatihet.github.io/hospitalinfo-api` |
//! | `HOSPITALINFO_DONOR_AVAILABILITY` | `always` |
//!
//! Unparseable values fall back to the default and are reported with `warn!`.

use std::str::FromStr;

use tracing::warn;

/// Default port if not specified via environment variable.
pub const DEFAULT_PORT: u16 = 3000;

/// Default location of the static dataset host.
pub const DEFAULT_DATA_URL: &str = "https://prajapatihet.github.io/hospitalinfo-api";

/// When donor listings are restricted to donors marked `available: true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AvailabilityPolicy {
    /// Every donor listing hides unavailable donors.
    #[default]
    Always,
    /// Only listings with at least one search parameter hide unavailable donors.
    WhenFiltered,
}

impl FromStr for AvailabilityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(AvailabilityPolicy::Always),
            "when-filtered" | "when_filtered" | "filtered" => Ok(AvailabilityPolicy::WhenFiltered),
            other => Err(format!("unknown donor availability policy '{other}'")),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port to listen on.
    pub port: u16,
    /// Base URL that `bloodbank.json`, `donorinfo.json` etc. are resolved against.
    pub data_url: String,
    /// Donor availability policy.
    pub donor_availability: AvailabilityPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_url: DEFAULT_DATA_URL.to_string(),
            donor_availability: AvailabilityPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = parse_or_default(&lookup, "HOSPITALINFO_PORT", defaults.port);
        let donor_availability = parse_or_default(
            &lookup,
            "HOSPITALINFO_DONOR_AVAILABILITY",
            defaults.donor_availability,
        );

        let data_url = lookup("HOSPITALINFO_DATA_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.data_url);

        Self {
            port,
            data_url,
            donor_availability,
        }
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(e) => {
                warn!(key, value = %raw, error = %e, "Ignoring invalid configuration value");
                default
            }
        },
        None => default,
    }
}
