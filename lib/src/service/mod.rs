pub mod bedrock_service;
pub mod watson_service;
pub mod common_structs;

use std::sync::Arc;
use anyhow::Result;
use async_trait::async_trait;
use aws_config::SdkConfig;

use crate::config::{ClassifierBackend, ServerConfig};
use common_structs::{EmotionDetection, EmotionScores};


/// An external emotion scoring capability.
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Scores `text`. `Ok(None)` means the text could not be classified.
    async fn classify(&self, text: &str) -> Result<Option<EmotionScores>>;
}


pub async fn detect_emotion(classifier: &dyn EmotionClassifier, text: &str) -> Result<EmotionDetection> {
    let scores = classifier.classify(text).await?;
    let detection = EmotionDetection::from(scores);
    tracing::debug!(?detection, "emotion detected");
    Ok(detection)
}


#[derive(Clone)]
pub struct CommonService {
    pub classifier: Arc<dyn EmotionClassifier>,
}

impl CommonService {
    pub fn new(classifier: Arc<dyn EmotionClassifier>) -> Self {
        Self { classifier }
    }

    /// Builds the classifier selected by `config`. The AWS config is only
    /// read for the bedrock backend.
    pub fn from_config(config: &ServerConfig, sdk_config: Option<&SdkConfig>) -> Result<Self> {
        let classifier: Arc<dyn EmotionClassifier> = match config.classifier {
            ClassifierBackend::Watson => {
                Arc::new(watson_service::WatsonService::new(&config.watson_url)?)
            },
            ClassifierBackend::Bedrock => {
                let Some(sdk_config) = sdk_config else {
                    anyhow::bail!("AWS config is required for the bedrock classifier");
                };
                let client = aws_sdk_bedrockruntime::Client::new(sdk_config);
                Arc::new(bedrock_service::BedrockService::new(&client, &config.chat_model_id))
            },
        };
        Ok(Self::new(classifier))
    }

    pub async fn detect_emotion(&self, text: &str) -> Result<EmotionDetection> {
        detect_emotion(self.classifier.as_ref(), text).await
    }
}
