use std::path::PathBuf;
use std::str::FromStr;

/// What to do with a booking whose dates cannot be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedDatePolicy {
    /// Fail the whole snapshot load.
    #[default]
    Reject,
    /// Drop the record so it blocks nothing.
    AssumeAvailable,
}

impl FromStr for MalformedDatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(MalformedDatePolicy::Reject),
            "assume-available" | "assume_available" => Ok(MalformedDatePolicy::AssumeAvailable),
            other => Err(format!("unknown malformed-date policy: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub malformed_dates: MalformedDatePolicy,
    /// Booking snapshot read by the CLI.
    pub snapshot_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            malformed_dates: MalformedDatePolicy::Reject,
            snapshot_path: PathBuf::from("./bookings.json"),
        }
    }
}

impl Config {
    /// `ROOMCHECK_MALFORMED_DATES` (`reject` | `assume-available`) and
    /// `ROOMCHECK_SNAPSHOT`. Unset or unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let malformed_dates = match lookup("ROOMCHECK_MALFORMED_DATES") {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{e}; using {:?}", defaults.malformed_dates);
                defaults.malformed_dates
            }),
            None => defaults.malformed_dates,
        };
        let snapshot_path = lookup("ROOMCHECK_SNAPSHOT")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.snapshot_path);
        Self {
            malformed_dates,
            snapshot_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn reads_policy_and_path() {
        let config = Config::from_lookup(lookup(&[
            ("ROOMCHECK_MALFORMED_DATES", "Assume-Available"),
            ("ROOMCHECK_SNAPSHOT", "/tmp/snap.json"),
        ]));
        assert_eq!(config.malformed_dates, MalformedDatePolicy::AssumeAvailable);
        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/snap.json"));
    }

    #[test]
    fn unknown_policy_falls_back() {
        let config = Config::from_lookup(lookup(&[("ROOMCHECK_MALFORMED_DATES", "ignore")]));
        assert_eq!(config.malformed_dates, MalformedDatePolicy::Reject);
    }
}
