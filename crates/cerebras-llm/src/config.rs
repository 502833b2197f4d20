//! Configuration for CerebrasLlm.

use std::env;
use std::time::Duration;

use llm_core::LlmError;

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_API_URL: &str = "https://api.cerebras.ai/v1";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-oss-120b";

/// Configuration for CerebrasLlm.
#[derive(Debug, Clone)]
pub struct CerebrasConfig {
    /// Base URL, without the `/chat/completions` suffix.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Overall timeout for non-streaming requests.
    pub timeout: Duration,

    /// Temperature used when a request does not set one.
    pub temperature: Option<f32>,

    /// Max tokens used when a request does not set one.
    pub max_tokens: Option<u32>,
}

impl Default for CerebrasConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(60),
            temperature: Some(0.8),
            max_tokens: Some(2048),
        }
    }
}

impl CerebrasConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CEREBRAS_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `CEREBRAS_API_URL` - API URL (default: https://api.cerebras.ai/v1)
    /// - `CEREBRAS_MODEL` - Model name (default: gpt-oss-120b)
    /// - `CEREBRAS_TIMEOUT_SECS` - Request timeout (default: 60)
    /// - `CEREBRAS_STREAM_TEMPERATURE` - Default temperature (default: 0.8)
    /// - `CEREBRAS_STREAM_MAX_TOKENS` - Default max tokens (default: 2048)
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = env::var("CEREBRAS_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| LlmError::Configuration("CEREBRAS_API_KEY not set".to_string()))?;

        let defaults = Self::default();

        let api_url = env::var("CEREBRAS_API_URL").unwrap_or(defaults.api_url);
        let model = env::var("CEREBRAS_MODEL").unwrap_or(defaults.model);

        let timeout = env::var("CEREBRAS_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let temperature = env::var("CEREBRAS_STREAM_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.temperature);

        let max_tokens = env::var("CEREBRAS_STREAM_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(defaults.max_tokens);

        Ok(Self {
            api_url,
            api_key,
            model,
            timeout,
            temperature,
            max_tokens,
        })
    }

    /// Create a new config builder.
    pub fn builder() -> CerebrasConfigBuilder {
        CerebrasConfigBuilder::default()
    }

    /// Full URL of the chat-completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_url.trim_end_matches('/'))
    }
}

/// Builder for CerebrasConfig.
#[derive(Debug, Default)]
pub struct CerebrasConfigBuilder {
    config: CerebrasConfig,
}

impl CerebrasConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the default temperature.
    pub fn temperature(mut self, temp: f32) -> Self {
        self.config.temperature = Some(temp);
        self
    }

    /// Set the default max tokens.
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.config.max_tokens = Some(tokens);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CerebrasConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CerebrasConfig::default();

        assert_eq!(config.api_url, "https://api.cerebras.ai/v1");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gpt-oss-120b");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.temperature, Some(0.8));
        assert_eq!(config.max_tokens, Some(2048));
    }

    #[test]
    fn test_completions_url_trims_slash() {
        let config = CerebrasConfig::builder()
            .api_url("http://localhost:9000/v1/")
            .build();
        assert_eq!(config.completions_url(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn test_builder_all_options() {
        let config = CerebrasConfig::builder()
            .api_key("key")
            .api_url("https://example.test/v1")
            .model("llama-3.3-70b")
            .timeout(Duration::from_secs(5))
            .temperature(0.2)
            .max_tokens(64)
            .build();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.api_url, "https://example.test/v1");
        assert_eq!(config.model, "llama-3.3-70b");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.max_tokens, Some(64));
    }

    // Env vars are process-global, so all env scenarios run in one test.
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_cerebras_vars() {
            std::env::remove_var("CEREBRAS_API_KEY");
            std::env::remove_var("CEREBRAS_API_URL");
            std::env::remove_var("CEREBRAS_MODEL");
            std::env::remove_var("CEREBRAS_TIMEOUT_SECS");
            std::env::remove_var("CEREBRAS_STREAM_TEMPERATURE");
            std::env::remove_var("CEREBRAS_STREAM_MAX_TOKENS");
        }

        // Missing key
        clear_all_cerebras_vars();
        match CerebrasConfig::from_env() {
            Err(LlmError::Configuration(msg)) => assert!(msg.contains("CEREBRAS_API_KEY")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }

        // Blank key counts as missing
        std::env::set_var("CEREBRAS_API_KEY", "   ");
        assert!(CerebrasConfig::from_env().is_err());

        // Only key set
        clear_all_cerebras_vars();
        std::env::set_var("CEREBRAS_API_KEY", "env-key");
        let config = CerebrasConfig::from_env().unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(60));

        // Everything set, bad numbers fall back to defaults
        clear_all_cerebras_vars();
        std::env::set_var("CEREBRAS_API_KEY", "full-key");
        std::env::set_var("CEREBRAS_API_URL", "http://127.0.0.1:1234/v1");
        std::env::set_var("CEREBRAS_MODEL", "custom");
        std::env::set_var("CEREBRAS_TIMEOUT_SECS", "7");
        std::env::set_var("CEREBRAS_STREAM_TEMPERATURE", "0.5");
        std::env::set_var("CEREBRAS_STREAM_MAX_TOKENS", "not-a-number");
        let config = CerebrasConfig::from_env().unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:1234/v1");
        assert_eq!(config.model, "custom");
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.temperature, Some(0.5));
        assert_eq!(config.max_tokens, Some(2048));

        clear_all_cerebras_vars();
    }
}
