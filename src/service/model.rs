use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Model selector accepted from clients.
///
/// The selector (not the resolved repository id) is what goes into cache keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelChoice {
    #[default]
    #[serde(rename = "qwen3")]
    Qwen3,
    #[serde(rename = "deepseek-3.1")]
    DeepSeek31,
}

impl ModelChoice {
    pub const ALL: [ModelChoice; 2] = [ModelChoice::Qwen3, ModelChoice::DeepSeek31];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelChoice::Qwen3 => "qwen3",
            ModelChoice::DeepSeek31 => "deepseek-3.1",
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelChoice::ALL
            .into_iter()
            .find(|choice| choice.as_str() == s)
            .ok_or_else(|| format!("unknown model '{s}', expected one of: qwen3, deepseek-3.1"))
    }
}
