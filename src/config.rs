use crate::error::ConfigError;
use crate::scoring::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Environment variable overriding the narrator API key
pub const NARRATOR_API_KEY_ENV: &str = "NARRATOR_API_KEY";

/// Top-level analyzer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// How the page is retrieved
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Thresholds, penalties and blend weights
    #[serde(default)]
    pub scoring: ScoringWeights,

    /// Narrative generation
    #[serde(default)]
    pub narrator: NarratorConfig,
}

/// Configuration for the page fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with the request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of redirects followed
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

/// Which narrator to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarratorKind {
    /// No narrative
    #[default]
    None,
    /// Offline text rendered from the numbers
    Template,
    /// OpenAI-compatible chat completions endpoint
    Chat,
}

/// Configuration for narrative generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarratorConfig {
    #[serde(default)]
    pub kind: NarratorKind,

    /// Chat completions URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Bearer token; `NARRATOR_API_KEY` takes precedence when set
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_narrator_timeout")]
    pub timeout_secs: u64,
}

impl AnalyzerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Apply overrides taken from the environment
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(NARRATOR_API_KEY_ENV) {
            if !key.is_empty() {
                self.narrator.api_key = Some(key);
            }
        }
        self
    }
}

/// Default value for the fetch timeout
fn default_fetch_timeout() -> u64 {
    30
}

/// Default value for the User-Agent header
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36".to_string()
}

fn default_max_redirects() -> usize {
    10
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "openai/gpt-oss-20b".to_string()
}

fn default_temperature() -> f32 {
    0.6
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_narrator_timeout() -> u64 {
    60
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
        }
    }
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            kind: NarratorKind::default(),
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_narrator_timeout(),
        }
    }
}
