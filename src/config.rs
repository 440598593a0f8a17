use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::{info, warn};

/// Runtime settings, all sourced from the environment.
pub struct Config {
    pub port: u16,
    pub bootstrap_admin_email: Option<String>,
    pub bootstrap_admin_token: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "5000"),
            bootstrap_admin_email: optional("BOOTSTRAP_ADMIN_EMAIL"),
            bootstrap_admin_token: optional("BOOTSTRAP_ADMIN_TOKEN"),
        }
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_owned()
        })
        .parse()
        .map_err(|err| {
            warn!("Invalid {key} value: {err}");
        })
        .expect("Environment misconfigured!")
}
