use std::{env, fmt::Display, net::IpAddr, str::FromStr};

use tracing::{info, warn};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8080";

/// Server settings read from `NESTEGG_HOST` / `NESTEGG_PORT`.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: try_load(&lookup, "NESTEGG_HOST", DEFAULT_HOST),
            port: try_load(&lookup, "NESTEGG_PORT", DEFAULT_PORT),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    match raw.trim().parse() {
        Ok(value) => value,
        Err(e) => {
            warn!("Invalid {key} value {raw:?}: {e}; using default: {default}");
            parse_default(default)
        }
    }
}

fn parse_default<T>(default: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match default.parse() {
        Ok(value) => value,
        Err(e) => panic!("built-in default {default:?} does not parse: {e}"),
    }
}
