use std::fmt;
use std::str::FromStr;

pub const DOCS_URL: &str = "https://console.groq.com/docs/models";

pub const LIMITATIONS: &str = "\
**Current Limitations:**\n\n\
* Max 8192 tokens per request\n\
* Rate limits apply\n\
* Technical accuracy ~85%";

/// The models the assistant can be pointed at. Closed set; the first entry
/// is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelSelector {
    #[default]
    Llama3_70b,
    Llama3_8b,
    Mixtral8x7b,
}

impl ModelSelector {
    pub const ALL: [ModelSelector; 3] = [
        ModelSelector::Llama3_70b,
        ModelSelector::Llama3_8b,
        ModelSelector::Mixtral8x7b,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            ModelSelector::Llama3_70b => "Llama 3 70B",
            ModelSelector::Llama3_8b => "Llama 3 8B",
            ModelSelector::Mixtral8x7b => "Mixtral 8x7B",
        }
    }

    pub fn model_id(self) -> &'static str {
        match self {
            ModelSelector::Llama3_70b => "llama3-70b-8192",
            ModelSelector::Llama3_8b => "llama3-8b-8192",
            ModelSelector::Mixtral8x7b => "mixtral-8x7b-32768",
        }
    }

    /// Two short notes shown next to the model in the sidebar table.
    pub fn highlights(self) -> [&'static str; 2] {
        match self {
            ModelSelector::Llama3_70b => ["8192 token context", "Best for technical queries"],
            ModelSelector::Llama3_8b => ["Faster response times", "Good for simple errors"],
            ModelSelector::Mixtral8x7b => ["Expert mixture model", "Multiple specialists approach"],
        }
    }

    pub fn is_recommended(self) -> bool {
        self == ModelSelector::Llama3_70b
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.display_name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ModelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown model '{0}' (expected one of: Llama 3 70B, Llama 3 8B, Mixtral 8x7B)")]
pub struct UnknownModel(pub String);

impl FromStr for ModelSelector {
    type Err = UnknownModel;

    /// Accepts a display name, a provider model id or a 1-based position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(model) = Self::from_display_name(s) {
            return Ok(model);
        }
        if let Some(model) = Self::ALL
            .into_iter()
            .find(|m| m.model_id().eq_ignore_ascii_case(s))
        {
            return Ok(model);
        }
        s.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}
