use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "MedValidate";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the Gemini API key (required).
pub const API_KEY_ENV: &str = "MEDVALIDATE_API_KEY";
/// Optional override for the API base URL.
pub const BASE_URL_ENV: &str = "MEDVALIDATE_BASE_URL";
/// Optional override for the model name.
pub const MODEL_ENV: &str = "MEDVALIDATE_MODEL";
/// Optional override for the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "MEDVALIDATE_TIMEOUT_SECS";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default log filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(&'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Connection settings for the generative model API.
///
/// The API key is never compiled into the binary. It is read from the
/// environment at construction time and sent in a request header, so it
/// cannot leak through URLs in logs.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl GeminiSettings {
    /// Read settings from the environment.
    ///
    /// `MEDVALIDATE_API_KEY` is required; base URL, model, and timeout fall
    /// back to defaults when their variables are unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_ENV))?;

        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = std::env::var(MODEL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_secs = match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: TIMEOUT_ENV,
                    value: raw,
                })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_medvalidate() {
        assert_eq!(APP_NAME, "MedValidate");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_base_url_is_v1beta() {
        assert!(DEFAULT_BASE_URL.ends_with("/v1beta"));
    }

    // Env-backed assertions run in one function: the variables are
    // process-global and cargo runs tests in parallel.
    #[test]
    fn settings_from_env() {
        std::env::remove_var(API_KEY_ENV);
        let err = GeminiSettings::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));

        std::env::set_var(API_KEY_ENV, "test-key");
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(MODEL_ENV);
        std::env::remove_var(TIMEOUT_ENV);
        let settings = GeminiSettings::from_env().unwrap();
        assert_eq!(settings.api_key, "test-key");
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);

        std::env::set_var(BASE_URL_ENV, "http://localhost:9999/v1beta/");
        std::env::set_var(MODEL_ENV, "gemini-test");
        std::env::set_var(TIMEOUT_ENV, "60");
        let settings = GeminiSettings::from_env().unwrap();
        assert_eq!(settings.base_url, "http://localhost:9999/v1beta");
        assert_eq!(settings.model, "gemini-test");
        assert_eq!(settings.timeout_secs, 60);

        std::env::set_var(TIMEOUT_ENV, "not-a-number");
        let err = GeminiSettings::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        std::env::remove_var(API_KEY_ENV);
        std::env::remove_var(BASE_URL_ENV);
        std::env::remove_var(MODEL_ENV);
        std::env::remove_var(TIMEOUT_ENV);
    }
}
