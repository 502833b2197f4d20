//! Configuration for the supervisor.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Tunables for classification, summarization and memory recall.
#[derive(Debug, Clone, PartialEq)]
pub struct SupervisorConfig {
    /// Sampling temperature for the classification call.
    pub classifier_temperature: f32,

    /// Token budget for the classification call.
    pub classifier_max_tokens: u32,

    /// Upper bound on one classification call.
    pub classify_timeout: Duration,

    /// Prior turns included in the classification prompt (0 disables).
    pub history_turns: usize,

    /// Sampling temperature for the summarization call.
    pub summary_temperature: f32,

    /// Token budget for the summarization call.
    pub summary_max_tokens: u32,

    /// Upper bound on one summarization call.
    pub summary_timeout: Duration,

    /// Characters kept when summarization falls back to truncation.
    pub summary_fallback_chars: usize,

    /// Memories recalled per turn.
    pub memory_limit: usize,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            classifier_temperature: 0.3,
            classifier_max_tokens: 256,
            classify_timeout: Duration::from_secs(20),
            history_turns: 6,
            summary_temperature: 0.3,
            summary_max_tokens: 256,
            summary_timeout: Duration::from_secs(30),
            summary_fallback_chars: 280,
            memory_limit: 10,
        }
    }
}

impl SupervisorConfig {
    /// Create configuration from environment variables.
    ///
    /// Every variable is optional; unset or unparsable values keep the default.
    /// - `SUPERVISOR_CLASSIFIER_TEMPERATURE` (default: 0.3)
    /// - `SUPERVISOR_CLASSIFIER_MAX_TOKENS` (default: 256)
    /// - `SUPERVISOR_CLASSIFY_TIMEOUT_SECS` (default: 20)
    /// - `SUPERVISOR_HISTORY_TURNS` (default: 6)
    /// - `SUPERVISOR_SUMMARY_TEMPERATURE` (default: 0.3)
    /// - `SUPERVISOR_SUMMARY_MAX_TOKENS` (default: 256)
    /// - `SUPERVISOR_SUMMARY_TIMEOUT_SECS` (default: 30)
    /// - `SUPERVISOR_SUMMARY_FALLBACK_CHARS` (default: 280)
    /// - `SUPERVISOR_MEMORY_LIMIT` (default: 10)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            classifier_temperature: env_parse("SUPERVISOR_CLASSIFIER_TEMPERATURE")
                .unwrap_or(defaults.classifier_temperature),
            classifier_max_tokens: env_parse("SUPERVISOR_CLASSIFIER_MAX_TOKENS")
                .filter(|&n: &u32| n > 0)
                .unwrap_or(defaults.classifier_max_tokens),
            classify_timeout: env_secs("SUPERVISOR_CLASSIFY_TIMEOUT_SECS")
                .unwrap_or(defaults.classify_timeout),
            history_turns: env_parse("SUPERVISOR_HISTORY_TURNS").unwrap_or(defaults.history_turns),
            summary_temperature: env_parse("SUPERVISOR_SUMMARY_TEMPERATURE")
                .unwrap_or(defaults.summary_temperature),
            summary_max_tokens: env_parse("SUPERVISOR_SUMMARY_MAX_TOKENS")
                .filter(|&n: &u32| n > 0)
                .unwrap_or(defaults.summary_max_tokens),
            summary_timeout: env_secs("SUPERVISOR_SUMMARY_TIMEOUT_SECS")
                .unwrap_or(defaults.summary_timeout),
            summary_fallback_chars: env_parse("SUPERVISOR_SUMMARY_FALLBACK_CHARS")
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.summary_fallback_chars),
            memory_limit: env_parse("SUPERVISOR_MEMORY_LIMIT").unwrap_or(defaults.memory_limit),
        }
    }

    /// Create a new config builder.
    pub fn builder() -> SupervisorConfigBuilder {
        SupervisorConfigBuilder::default()
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

// Zero would make every call time out immediately.
fn env_secs(key: &str) -> Option<Duration> {
    env_parse::<u64>(key)
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs)
}

/// Builder for SupervisorConfig.
#[derive(Debug, Default)]
pub struct SupervisorConfigBuilder {
    config: SupervisorConfig,
}

impl SupervisorConfigBuilder {
    pub fn classifier_temperature(mut self, temperature: f32) -> Self {
        self.config.classifier_temperature = temperature;
        self
    }

    pub fn classifier_max_tokens(mut self, tokens: u32) -> Self {
        self.config.classifier_max_tokens = tokens;
        self
    }

    pub fn classify_timeout(mut self, timeout: Duration) -> Self {
        self.config.classify_timeout = timeout;
        self
    }

    pub fn history_turns(mut self, turns: usize) -> Self {
        self.config.history_turns = turns;
        self
    }

    pub fn summary_temperature(mut self, temperature: f32) -> Self {
        self.config.summary_temperature = temperature;
        self
    }

    pub fn summary_max_tokens(mut self, tokens: u32) -> Self {
        self.config.summary_max_tokens = tokens;
        self
    }

    pub fn summary_timeout(mut self, timeout: Duration) -> Self {
        self.config.summary_timeout = timeout;
        self
    }

    pub fn summary_fallback_chars(mut self, chars: usize) -> Self {
        self.config.summary_fallback_chars = chars;
        self
    }

    pub fn memory_limit(mut self, limit: usize) -> Self {
        self.config.memory_limit = limit;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SupervisorConfig {
        self.config
    }
}
