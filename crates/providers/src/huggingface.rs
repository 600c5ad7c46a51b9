use crate::{ClassifyResponse, ProviderError, TextClassifier};
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Clone)]
pub struct InferenceConfig {
    pub base_url: String,
    pub model: String,
    pub api_token: Option<String>,
}

/// Text-classification client for a hosted inference API
/// (`POST {base_url}/models/{model}` with `{"inputs": text}`).
#[derive(Clone)]
pub struct InferenceClassifier {
    client: Client,
    cfg: Arc<InferenceConfig>,
}

impl InferenceClassifier {
    pub fn new(cfg: InferenceConfig) -> Self {
        Self {
            client: Client::new(),
            cfg: Arc::new(cfg),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}",
            self.cfg.base_url.trim_end_matches('/'),
            self.cfg.model
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Prediction {
    label: String,
    score: f32,
}

/// The API answers with either a flat list of predictions or a list per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictionPayload {
    Batched(Vec<Vec<Prediction>>),
    Flat(Vec<Prediction>),
}

pub(crate) fn best_prediction(body: &[u8]) -> Result<ClassifyResponse, ProviderError> {
    let payload: PredictionPayload = serde_json::from_slice(body)
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
    let predictions = match payload {
        PredictionPayload::Batched(batches) => batches.into_iter().next().unwrap_or_default(),
        PredictionPayload::Flat(preds) => preds,
    };
    predictions
        .into_iter()
        .filter(|p| !p.score.is_nan())
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|p| ClassifyResponse {
            label: p.label,
            score: p.score,
        })
        .ok_or_else(|| ProviderError::InvalidResponse("no predictions returned".into()))
}

#[async_trait::async_trait]
impl TextClassifier for InferenceClassifier {
    async fn classify(&self, text: &str) -> Result<ClassifyResponse, ProviderError> {
        #[derive(serde::Serialize)]
        struct InferenceRequest<'a> {
            inputs: &'a str,
        }

        let mut builder = self
            .client
            .post(self.endpoint())
            .json(&InferenceRequest { inputs: text });
        if let Some(token) = &self.cfg.api_token {
            builder = builder.bearer_auth(token);
        }
        let resp = builder
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.bytes().await.unwrap_or(Bytes::from_static(b""));
            return Err(ProviderError::RequestFailed(format!(
                "status {} body {:?}",
                status, body
            )));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;
        best_prediction(&body)
    }
}
