use std::{env, str::FromStr};

use anyhow::Context;

use crate::storage::DEFAULT_DAILY_LIMIT;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_REFRESH_SECS: i64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// MySQL URL of the key-value table. Without it everything lives in memory.
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub daily_limit: usize,
    pub refresh_secs: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            daily_limit: parse_value(
                "DAILY_RESERVATION_LIMIT",
                env::var("DAILY_RESERVATION_LIMIT").ok(),
                DEFAULT_DAILY_LIMIT,
            )?,
            refresh_secs: parse_value(
                "DASHBOARD_REFRESH_SECS",
                env::var("DASHBOARD_REFRESH_SECS").ok(),
                DEFAULT_REFRESH_SECS,
            )?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            daily_limit: DEFAULT_DAILY_LIMIT,
            refresh_secs: DEFAULT_REFRESH_SECS,
        }
    }
}

fn parse_value<T>(name: &str, value: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got `{}`", name, value)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        assert_eq!(parse_value::<usize>("LIMIT", None, 3).unwrap(), 3);
        assert_eq!(parse_value::<usize>("LIMIT", Some(" 5 ".to_string()), 3).unwrap(), 5);
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = parse_value::<i64>("DASHBOARD_REFRESH_SECS", Some("soon".to_string()), 60)
            .unwrap_err();
        assert!(err.to_string().contains("DASHBOARD_REFRESH_SECS"));
    }
}
