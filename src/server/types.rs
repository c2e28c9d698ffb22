use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    pub text: String,
    pub model_name: String,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub text: String,
    pub model_name: String,
    pub predicted_intent: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictAllRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PredictAllResponse {
    pub text: String,
    pub results: BTreeMap<String, ModelOutcome>,
}

/// Per-model entry in the batch response: either a prediction or that model's
/// own error, never both.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ModelOutcome {
    Prediction { predicted_intent: String },
    Failure { error: String },
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<&'static str>,
    pub description: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub models_loaded: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}
