use std::time::Duration;

pub const TIMEOUT_ENV_VAR: &str = "CFN_RESPONSE_TIMEOUT_MS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifierConfig {
    /// `None` leaves the HTTP client's own default in place.
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer number of milliseconds, got '{value}'")]
    InvalidTimeout { name: &'static str, value: String },
}

impl NotifierConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let request_timeout = match lookup(TIMEOUT_ENV_VAR) {
            None => None,
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(parse_timeout_ms(&raw)?),
        };
        Ok(Self { request_timeout })
    }
}

fn parse_timeout_ms(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(millis) if millis > 0 => Ok(Duration::from_millis(millis)),
        _ => Err(ConfigError::InvalidTimeout {
            name: TIMEOUT_ENV_VAR,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn unset_timeout_keeps_transport_default() {
        let config = NotifierConfig::from_lookup(lookup_from(&[])).expect("config");
        assert_eq!(config, NotifierConfig::default());

        let blank = NotifierConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV_VAR, " ")]))
            .expect("blank value is unset");
        assert!(blank.request_timeout.is_none());
    }

    #[test]
    fn parses_timeout_in_milliseconds() {
        let config = NotifierConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV_VAR, "2500")]))
            .expect("config");
        assert_eq!(config.request_timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn rejects_zero_and_non_numeric_timeouts() {
        for raw in ["0", "soon", "-5"] {
            let error = NotifierConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV_VAR, raw)]))
                .expect_err("timeout should be rejected");
            assert_eq!(
                error,
                ConfigError::InvalidTimeout {
                    name: TIMEOUT_ENV_VAR,
                    value: raw.to_string(),
                }
            );
        }
    }
}
