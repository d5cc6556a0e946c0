use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_LOOKUP_ENDPOINT: &str = "https://api.wikitree.com/api.php";
pub const DEFAULT_CONTAINER_ID: &str = "famous-relative-widget";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        lookup_endpoint: get_env_or_default("WIKITREE_API_URL", DEFAULT_LOOKUP_ENDPOINT),
        bind_addr: parse_env_or_default("RELFINDER_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000))),
        static_dir: get_env_or_default("RELFINDER_STATIC_DIR", "static"),
        container_id: get_env_or_default("RELFINDER_CONTAINER_ID", DEFAULT_CONTAINER_ID),
        failure_policy: parse_env_or_default("RELFINDER_FAILURE_POLICY", FailurePolicy::Distinct),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    pub lookup_endpoint: String,
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub container_id: String,
    pub failure_policy: FailurePolicy,
}

/// How a failed lookup (transport or parse) is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Report "search failed", separate from "no matches".
    #[default]
    Distinct,
    /// Report failures exactly like an empty match list.
    Conflate,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distinct" => Ok(FailurePolicy::Distinct),
            "conflate" => Ok(FailurePolicy::Conflate),
            other => Err(format!("unknown failure policy: {other}")),
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("ignoring invalid {key}={raw:?}: {e}");
            default
        }),
        Err(_) => default,
    }
}
