//! Client configuration from the environment.

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backend project, without a trailing slash.
    pub base_url: String,
    /// Publishable (anon) API key sent with every request.
    pub anon_key: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            anon_key: anon_key.into(),
        }
    }

    /// Read `SIMROAM_API_URL` / `SIMROAM_ANON_KEY`, warning and falling back
    /// to local-dev defaults when unset.
    pub fn from_env() -> Self {
        let base_url = std::env::var("SIMROAM_API_URL").unwrap_or_else(|_| {
            tracing::warn!("SIMROAM_API_URL not set; using local dev default");
            "http://127.0.0.1:54321".to_string()
        });
        let anon_key = std::env::var("SIMROAM_ANON_KEY").unwrap_or_else(|_| {
            tracing::warn!("SIMROAM_ANON_KEY not set; using local dev default");
            "dev-anon-key".to_string()
        });
        Self::new(base_url, anon_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped() {
        let config = ClientConfig::new("https://api.example.com//", "key");
        assert_eq!(config.base_url, "https://api.example.com");
    }
}
