use super::types::{
    ErrorResponse, HealthResponse, MessageResponse, ModelOutcome, ModelsResponse,
    PredictAllRequest, PredictAllResponse, PredictionRequest, PredictionResponse,
};
use crate::registry::{ModelKind, ModelRegistry};
use crate::Error;
use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn reject(err: Error) -> ApiError {
    let status = if err.is_invalid_argument() {
        StatusCode::BAD_REQUEST
    } else {
        error!("Prediction error: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorResponse {
            detail: err.to_string(),
        }),
    )
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Intent Classification API is running".to_string(),
    })
}

pub async fn list_models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: state.registry.names(),
        description: ModelKind::ALL
            .iter()
            .map(|kind| (kind.as_str(), kind.description()))
            .collect(),
    })
}

pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    info!(
        "Received prediction request for model '{}'",
        request.model_name
    );

    let kind = state.registry.get(&request.model_name).map_err(reject)?;
    if request.text.trim().is_empty() {
        return Err(reject(Error::EmptyInput));
    }

    let predicted_intent = state.registry.predict(kind, &request.text).map_err(|e| {
        error!("Prediction error: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                detail: format!("Internal server error during prediction: {}", e),
            }),
        )
    })?;

    info!(
        "Model '{}' predicted intent '{}'",
        request.model_name, predicted_intent
    );

    Ok(Json(PredictionResponse {
        text: request.text,
        model_name: request.model_name,
        predicted_intent,
    }))
}

pub async fn predict_all(
    State(state): State<AppState>,
    Json(request): Json<PredictAllRequest>,
) -> Result<Json<PredictAllResponse>, ApiError> {
    info!("Received prediction request for all models");

    if request.text.trim().is_empty() {
        return Err(reject(Error::EmptyInput));
    }

    let results = state
        .registry
        .predict_all(&request.text)
        .into_iter()
        .map(|(kind, outcome)| {
            let entry = match outcome {
                Ok(predicted_intent) => ModelOutcome::Prediction { predicted_intent },
                Err(e) => ModelOutcome::Failure {
                    error: e.to_string(),
                },
            };
            (kind.as_str().to_string(), entry)
        })
        .collect();

    Ok(Json(PredictAllResponse {
        text: request.text,
        results,
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        models_loaded: state.registry.len(),
    })
}
