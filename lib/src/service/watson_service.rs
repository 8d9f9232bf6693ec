use std::time::Duration;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{header::{HeaderMap, HeaderName, HeaderValue}, Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::common_structs::EmotionScores;
use super::EmotionClassifier;

pub const DEFAULT_WATSON_URL: &str = "https://sn-watson-emotion.labs.skills.network";
pub const EMOTION_PREDICT_PATH: &str = "/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";

const MODEL_ID_HEADER: &str = "grpc-metadata-mm-model-id";
const EMOTION_MODEL_ID: &str = "emotion_aggregated-workflow_lang_en_stock";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);


#[derive(Debug, Clone)]
pub struct WatsonService {
    client: Client,
    endpoint: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct EmotionPredictRequest<'a> {
    pub raw_document: RawDocument<'a>,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct RawDocument<'a> {
    pub text: &'a str,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EmotionPredictResponse {
    #[serde(default)]
    pub emotion_predictions: Vec<EmotionPrediction>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmotionPrediction {
    pub emotion: EmotionScores,
}


impl WatsonService {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(MODEL_ID_HEADER), HeaderValue::from_static(EMOTION_MODEL_ID));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Error building watson http client")?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), EMOTION_PREDICT_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn emotion_predict(&self, text: &str) -> Result<Option<EmotionScores>> {
        let body = EmotionPredictRequest { raw_document: RawDocument { text } };

        let response = self.client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("Error sending emotion predict request")?;

        let status = response.status();
        // the service answers 400 for text it cannot classify (blank input, unsupported language)
        if status == StatusCode::BAD_REQUEST {
            tracing::info!("watson could not classify the given text");
            return Ok(None);
        }

        let body_string = response.text().await.context("Error reading emotion predict response")?;
        if !status.is_success() {
            bail!("Emotion predict failed with status {}: {}", status, body_string);
        }

        let predictions = serde_json::from_str::<EmotionPredictResponse>(&body_string)
            .context("Error parsing emotion predict response")?;

        let prediction = predictions.emotion_predictions
            .into_iter()
            .next()
            .context("Emotion predict response has no predictions")?;

        tracing::debug!(scores = ?prediction.emotion, "watson emotion scores");
        Ok(Some(prediction.emotion))
    }
}


#[async_trait]
impl EmotionClassifier for WatsonService {
    async fn classify(&self, text: &str) -> Result<Option<EmotionScores>> {
        self.emotion_predict(text).await
    }
}
