//! Runtime configuration.
//!
//! Values come from `ONCOVISION_*` keys. Web builds bake them in at compile
//! time (`option_env!`), native builds read `.env` and the process environment.
//! Anything missing or unparsable falls back to the defaults below.

use std::time::Duration;

use crate::diagnosis::stages::StageTimings;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080/";
pub const DEFAULT_DEMO_EMAIL: &str = "clinician@oncovision.ai";
pub const DEFAULT_DEMO_PASSWORD: &str = "password2026";

const DEFAULT_INTERPRETATION_TIMEOUT_MS: u64 = 12_000;
const DEFAULT_LOGIN_DELAY_MS: u64 = 1_200;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub interpretation: InterpretationConfig,
    pub stages: StageTimings,
    pub demo_account: DemoAccount,
    /// Used when the current location is unknown (desktop) or unparsable.
    pub public_base_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterpretationConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
    /// Total attempts including the first one.
    pub max_attempts: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
    pub verify_delay: Duration,
}

impl Default for InterpretationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_millis(DEFAULT_INTERPRETATION_TIMEOUT_MS),
            max_attempts: 2,
        }
    }
}

impl Default for DemoAccount {
    fn default() -> Self {
        Self {
            email: DEFAULT_DEMO_EMAIL.to_string(),
            password: DEFAULT_DEMO_PASSWORD.to_string(),
            verify_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            interpretation: InterpretationConfig::default(),
            stages: StageTimings::default(),
            demo_account: DemoAccount::default(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let interpretation = InterpretationConfig {
            api_key: get("ONCOVISION_GEMINI_API_KEY"),
            model: get("ONCOVISION_GEMINI_MODEL").unwrap_or(defaults.interpretation.model),
            endpoint: get("ONCOVISION_GEMINI_ENDPOINT")
                .map(|raw| raw.trim_end_matches('/').to_string())
                .unwrap_or(defaults.interpretation.endpoint),
            timeout: get("ONCOVISION_INTERPRETATION_TIMEOUT_MS")
                .and_then(|raw| raw.parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.interpretation.timeout),
            max_attempts: defaults.interpretation.max_attempts,
        };

        let stages = get("ONCOVISION_STAGE_DELAY_SCALE")
            .and_then(|raw| raw.parse::<f64>().ok())
            .filter(|scale| scale.is_finite() && *scale >= 0.0)
            .map(|scale| defaults.stages.scaled(scale))
            .unwrap_or(defaults.stages);

        let demo_account = DemoAccount {
            email: get("ONCOVISION_DEMO_EMAIL").unwrap_or(defaults.demo_account.email),
            password: get("ONCOVISION_DEMO_PASSWORD").unwrap_or(defaults.demo_account.password),
            verify_delay: defaults.demo_account.verify_delay,
        };

        Self {
            interpretation,
            stages,
            demo_account,
            public_base_url: get("ONCOVISION_PUBLIC_BASE_URL")
                .unwrap_or(defaults.public_base_url),
        }
    }

    /// Load from the environment of the current target.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Err(err) = dotenvy::dotenv() {
                tracing::debug!("no .env loaded: {err}");
            }
            Self::from_lookup(|key| std::env::var(key).ok().or_else(|| compile_time_var(key)))
        }

        #[cfg(target_arch = "wasm32")]
        {
            Self::from_lookup(compile_time_var)
        }
    }
}

fn compile_time_var(key: &str) -> Option<String> {
    let value = match key {
        "ONCOVISION_GEMINI_API_KEY" => option_env!("ONCOVISION_GEMINI_API_KEY"),
        "ONCOVISION_GEMINI_MODEL" => option_env!("ONCOVISION_GEMINI_MODEL"),
        "ONCOVISION_GEMINI_ENDPOINT" => option_env!("ONCOVISION_GEMINI_ENDPOINT"),
        "ONCOVISION_INTERPRETATION_TIMEOUT_MS" => option_env!("ONCOVISION_INTERPRETATION_TIMEOUT_MS"),
        "ONCOVISION_STAGE_DELAY_SCALE" => option_env!("ONCOVISION_STAGE_DELAY_SCALE"),
        "ONCOVISION_DEMO_EMAIL" => option_env!("ONCOVISION_DEMO_EMAIL"),
        "ONCOVISION_DEMO_PASSWORD" => option_env!("ONCOVISION_DEMO_PASSWORD"),
        "ONCOVISION_PUBLIC_BASE_URL" => option_env!("ONCOVISION_PUBLIC_BASE_URL"),
        _ => None,
    };
    value.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_yields_defaults() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert!(config.interpretation.api_key.is_none());
        assert_eq!(config.demo_account.email, DEFAULT_DEMO_EMAIL);
    }

    #[test]
    fn values_override_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ONCOVISION_GEMINI_API_KEY", "abc"),
            ("ONCOVISION_GEMINI_ENDPOINT", "http://127.0.0.1:9000/v1/"),
            ("ONCOVISION_INTERPRETATION_TIMEOUT_MS", "250"),
            ("ONCOVISION_DEMO_PASSWORD", "hunter2"),
        ]));
        assert_eq!(config.interpretation.api_key.as_deref(), Some("abc"));
        assert_eq!(config.interpretation.endpoint, "http://127.0.0.1:9000/v1");
        assert_eq!(config.interpretation.timeout, Duration::from_millis(250));
        assert_eq!(config.demo_account.password, "hunter2");
    }

    #[test]
    fn blank_and_garbage_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ONCOVISION_GEMINI_API_KEY", "   "),
            ("ONCOVISION_INTERPRETATION_TIMEOUT_MS", "soon"),
            ("ONCOVISION_STAGE_DELAY_SCALE", "-3"),
        ]));
        assert!(config.interpretation.api_key.is_none());
        assert_eq!(config.interpretation.timeout, Duration::from_millis(12_000));
        assert_eq!(config.stages, StageTimings::default());
    }

    #[test]
    fn stage_scale_shrinks_every_pause() {
        let config = AppConfig::from_lookup(lookup_from(&[("ONCOVISION_STAGE_DELAY_SCALE", "0.5")]));
        assert_eq!(config.stages.preprocessing, Duration::from_millis(400));
        assert_eq!(config.stages.feature_extraction, Duration::from_millis(500));
    }
}
