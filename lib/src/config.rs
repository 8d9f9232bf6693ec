use std::env;
use std::str::FromStr;
use anyhow::{bail, Context, Result};

use crate::env_keys::{CHAT_MODEL, CLASSIFIER, HOST, PORT, WATSON_URL};
use crate::service::watson_service::DEFAULT_WATSON_URL;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierBackend {
    #[default]
    Watson,
    Bedrock,
}

impl FromStr for ClassifierBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "watson" => Ok(Self::Watson),
            "bedrock" => Ok(Self::Bedrock),
            other => bail!("Unknown classifier backend: {}", other),
        }
    }
}


/// Everything the server needs at startup. Built once in `main` and
/// handed to the listener and the service constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub classifier: ClassifierBackend,
    pub watson_url: String,
    pub chat_model_id: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            classifier: ClassifierBackend::default(),
            watson_url: DEFAULT_WATSON_URL.to_owned(),
            chat_model_id: "".to_owned(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = read(HOST) {
            config.host = host.trim().to_owned();
        }

        if let Some(port) = read(PORT) {
            config.port = port.trim().parse()
                .with_context(|| format!("Error parsing {}: {}", PORT, port))?;
        }

        if let Some(classifier) = read(CLASSIFIER) {
            config.classifier = classifier.parse()?;
        }

        if let Some(url) = read(WATSON_URL) {
            config.watson_url = url.trim().trim_end_matches('/').to_owned();
        }

        if let Some(model) = read(CHAT_MODEL) {
            config.chat_model_id = model.trim().to_owned();
        }

        if config.classifier == ClassifierBackend::Bedrock && config.chat_model_id.is_empty() {
            bail!("{} must be set when {} is bedrock", CHAT_MODEL, CLASSIFIER);
        }

        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
