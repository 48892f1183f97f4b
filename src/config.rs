use crate::catalog::ModelSelector;
use crate::client::GROQ_ENDPOINT;
use crate::models::{Error, Result};

pub const ENDPOINT_VAR: &str = "SAP_ASSIST_ENDPOINT";
pub const MODEL_VAR: &str = "SAP_ASSIST_MODEL";

/// Runtime settings. The API key is never part of this; it is only ever
/// typed into the form. Nothing here points at on-disk state.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub endpoint: String,
    pub default_model: ModelSelector,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: GROQ_ENDPOINT.to_string(),
            default_model: ModelSelector::default(),
        }
    }
}

impl Config {
    /// Reads overrides from the process environment (after `.env` has been
    /// loaded by the caller).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = non_empty(ENDPOINT_VAR) {
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(model) = non_empty(MODEL_VAR) {
            config.default_model = model
                .parse()
                .map_err(|e| Error::Config(format!("{}: {}", MODEL_VAR, e)))?;
        }

        Ok(config)
    }
}
