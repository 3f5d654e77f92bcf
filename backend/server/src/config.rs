use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{Result, anyhow};
use chrono_tz::Tz;
use roster::{ACTIVITY_PATH, ROSTER_PATH};
use tracing::{info, warn};

use crate::activity::DEFAULT_ACTIVITY_NAME;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub roster_path: PathBuf,
    pub activity_path: PathBuf,
    pub time_zone: Tz,
    pub default_activity: String,
    pub demo_mode: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            host: try_load("CHECKIN_HOST", "0.0.0.0")?,
            port: try_load("RUST_PORT", "3001")?,
            roster_path: try_load("PARTICIPANTS_PATH", ROSTER_PATH)?,
            activity_path: try_load("ACTIVITY_PATH", ACTIVITY_PATH)?,
            time_zone: try_load("CHECKIN_TIME_ZONE", "Asia/Hong_Kong")?,
            default_activity: try_load("DEFAULT_ACTIVITY", DEFAULT_ACTIVITY_NAME)?,
            demo_mode: try_load("DEMO_MODE", "true")?,
        })
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow!("Environment misconfigured: {key}: {e}")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let port: u16 = try_load("CHECKIN_TEST_UNSET_PORT", "3001").unwrap();
        assert_eq!(port, 3001);

        let zone: Tz = try_load("CHECKIN_TEST_UNSET_ZONE", "Asia/Hong_Kong").unwrap();
        assert_eq!(zone, chrono_tz::Asia::Hong_Kong);

        let demo: bool = try_load("CHECKIN_TEST_UNSET_DEMO", "true").unwrap();
        assert!(demo);
    }

    #[test]
    fn test_bad_default_is_an_error() {
        assert!(try_load::<u16>("CHECKIN_TEST_UNSET_PORT", "not a port").is_err());
        assert!(try_load::<Tz>("CHECKIN_TEST_UNSET_ZONE", "Mars/Olympus").is_err());
    }
}
