//! Runtime configuration.

use serde::{Deserialize, Serialize};

/// Prompt written before an integer read.
pub const DEFAULT_PROMPT: &str = "Введите: ";

/// Which read primitive a compiled program targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadMode {
    /// Read a whole line as text; numbers go through an explicit parse call.
    Line,
    /// Write the prompt, then read one whitespace-delimited integer token.
    #[default]
    PromptedInt,
}

impl ReadMode {
    /// C ABI code for this mode.
    pub fn code(self) -> i64 {
        match self {
            ReadMode::Line => 0,
            ReadMode::PromptedInt => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ReadMode::Line),
            1 => Some(ReadMode::PromptedInt),
            _ => None,
        }
    }
}

/// Configuration for a runtime instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Primitive used by `Runtime::read`
    pub read_mode: ReadMode,
    /// Text written before an integer read
    pub prompt: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            read_mode: ReadMode::default(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    /// Create a builder for configuration.
    pub fn builder() -> RuntimeConfigBuilder {
        RuntimeConfigBuilder::default()
    }
}

/// Builder for runtime configuration.
#[derive(Debug, Default)]
pub struct RuntimeConfigBuilder {
    config: RuntimeConfig,
}

impl RuntimeConfigBuilder {
    pub fn read_mode(mut self, mode: ReadMode) -> Self {
        self.config.read_mode = mode;
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.prompt = prompt.into();
        self
    }

    pub fn build(self) -> RuntimeConfig {
        self.config
    }
}
