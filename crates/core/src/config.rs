use crate::error::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: String,
    pub model_name: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            AppError::Config(
                "GEMINI_API_KEY must be set in environment or .env file".to_string(),
            )
        })?;

        let model_name =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-flash-latest".to_string());

        Ok(Self {
            gemini_api_key: api_key,
            model_name,
        })
    }

    /// Starts a builder for constructing a config with explicit overrides.
    ///
    /// Fields left empty fall back to the environment, so the settings panel
    /// can override just the API key or just the model.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for [`Config`] with environment fallback per field.
#[derive(Default)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    model: Option<String>,
}

impl ConfigBuilder {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        if !api_key.trim().is_empty() {
            self.api_key = Some(api_key);
        }
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        if !model.trim().is_empty() {
            self.model = Some(model);
        }
        self
    }

    pub fn build(self) -> Result<Config> {
        let _ = dotenv();

        let api_key = match self.api_key {
            Some(key) => key,
            None => env::var("GEMINI_API_KEY").map_err(|_| {
                AppError::Config(
                    "GEMINI_API_KEY must be set in environment or .env file".to_string(),
                )
            })?,
        };

        let model_name = self
            .model
            .or_else(|| env::var("GEMINI_MODEL").ok())
            .unwrap_or_else(|| "gemini-flash-latest".to_string());

        Ok(Config {
            gemini_api_key: api_key,
            model_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_take_precedence() {
        let config = Config::builder()
            .with_api_key("test-key")
            .with_model("gemini-2.5-pro")
            .build()
            .unwrap();

        assert_eq!(config.gemini_api_key, "test-key");
        assert_eq!(config.model_name, "gemini-2.5-pro");
    }

    #[test]
    fn builder_ignores_blank_overrides() {
        let builder = Config::builder().with_api_key("  ").with_model("");
        assert!(builder.api_key.is_none());
        assert!(builder.model.is_none());
    }
}
