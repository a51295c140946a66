use std::env;

use roster_core::{AppError, AppResult};
use roster_infrastructure::ApiBaseUrl;

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_base_url: ApiBaseUrl,
    pub http_timeout_secs: u64,
    pub confirm_deletes: bool,
}

impl ConsoleConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let api_base_url = lookup("ROSTER_API_BASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::Validation("ROSTER_API_BASE_URL is required".to_owned()))?;
        let api_base_url = ApiBaseUrl::parse(api_base_url.as_str())?;

        let http_timeout_secs = match lookup("ROSTER_HTTP_TIMEOUT_SECS") {
            Some(value) => value.trim().parse::<u64>().map_err(|error| {
                AppError::Validation(format!(
                    "invalid ROSTER_HTTP_TIMEOUT_SECS value '{value}': {error}"
                ))
            })?,
            None => 15,
        };
        if http_timeout_secs == 0 {
            return Err(AppError::Validation(
                "ROSTER_HTTP_TIMEOUT_SECS must be greater than zero".to_owned(),
            ));
        }

        let confirm_deletes = match lookup("ROSTER_CONFIRM_DELETES") {
            Some(value) => parse_flag("ROSTER_CONFIRM_DELETES", value.as_str())?,
            None => true,
        };

        Ok(Self {
            api_base_url,
            http_timeout_secs,
            confirm_deletes,
        })
    }
}

fn parse_flag(name: &str, value: &str) -> AppResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(AppError::Validation(format!(
            "{name} must be true or false, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::ConsoleConfig;

    fn config(pairs: &[(&str, &str)]) -> Result<ConsoleConfig, roster_core::AppError> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        ConsoleConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn base_url_is_required() {
        assert!(config(&[]).is_err());
        assert!(config(&[("ROSTER_API_BASE_URL", "  ")]).is_err());
    }

    #[test]
    fn defaults_apply() {
        let loaded = config(&[("ROSTER_API_BASE_URL", "http://localhost:5000/")])
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(loaded.api_base_url.to_string(), "http://localhost:5000");
        assert_eq!(loaded.http_timeout_secs, 15);
        assert!(loaded.confirm_deletes);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let loaded = config(&[
            ("ROSTER_API_BASE_URL", "http://localhost:5000"),
            ("ROSTER_HTTP_TIMEOUT_SECS", "0"),
        ]);
        assert!(loaded.is_err());
    }

    #[test]
    fn confirmation_can_be_disabled() {
        let loaded = config(&[
            ("ROSTER_API_BASE_URL", "http://localhost:5000"),
            ("ROSTER_CONFIRM_DELETES", "false"),
        ])
        .unwrap_or_else(|_| unreachable!());
        assert!(!loaded.confirm_deletes);
    }

    #[test]
    fn garbage_flag_is_rejected() {
        let loaded = config(&[
            ("ROSTER_API_BASE_URL", "http://localhost:5000"),
            ("ROSTER_CONFIRM_DELETES", "maybe"),
        ]);
        assert!(loaded.is_err());
    }
}
