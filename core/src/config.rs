//! Client configuration read from the environment.

use crate::client::PatientClient;

/// Base URL of the patient service when nothing else is configured. The
/// address is the host loopback as seen from an Android emulator.
pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:5000/api";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "WELLCARE_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(BASE_URL_ENV).ok())
    }

    /// Resolve the config from an optional raw environment value. Blank
    /// values fall back to the default.
    pub fn from_env_value(value: Option<String>) -> Self {
        let base_url = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }

    pub fn client(&self) -> PatientClient {
        PatientClient::new(&self.base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env_value(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_value_uses_default() {
        assert_eq!(ClientConfig::from_env_value(None).base_url, DEFAULT_BASE_URL);
        assert_eq!(
            ClientConfig::from_env_value(Some("  ".into())).base_url,
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn explicit_value_wins() {
        let cfg = ClientConfig::from_env_value(Some("http://localhost:5000/api/".into()));
        assert_eq!(cfg.client().base_url(), "http://localhost:5000/api");
    }
}
