#![allow(dead_code)]

use axum::Router;
use intent_server::registry::{ModelRegistry, VECTORIZER_FILE};
use intent_server::server::{self, handlers::AppState};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Writes a consistent set of fixture artifacts into `dir`: vocabulary of
/// four terms, one naive Bayes model and two linear models over three
/// intents, all with feature dimension 4.
pub fn write_artifacts(dir: &Path) {
    let vectorizer = json!({
        "vocabulary": {"book": 0, "flight": 1, "hello": 2, "weather": 3},
        "idf": [1.2, 1.4, 1.0, 1.1]
    });
    let naive_bayes = json!({
        "classes": ["book_flight", "check_weather", "greeting"],
        "class_log_prior": [-1.0986, -1.0986, -1.0986],
        "feature_log_prob": [
            [-0.3, -0.3, -4.0, -4.0],
            [-4.0, -4.0, -4.0, -0.3],
            [-4.0, -4.0, -0.3, -4.0]
        ]
    });
    let logistic_regression = json!({
        "classes": ["book_flight", "check_weather", "greeting"],
        "coef": [
            [2.0, 2.0, -1.0, -1.0],
            [-1.0, -1.0, -1.0, 2.0],
            [-1.0, -1.0, 2.0, -1.0]
        ],
        "intercept": [0.0, 0.0, 0.0]
    });
    // Binary decision form: one coefficient row, positive score picks the
    // second class.
    let linear_svm = json!({
        "classes": ["book_flight", "greeting"],
        "coef": [[-1.0, -1.0, 2.0, 0.5]],
        "intercept": [-0.1]
    });

    write_json(dir, VECTORIZER_FILE, &vectorizer);
    write_json(dir, "naive_bayes.json", &naive_bayes);
    write_json(dir, "logistic_regression.json", &logistic_regression);
    write_json(dir, "linear_svm.json", &linear_svm);
}

pub fn write_json(dir: &Path, file: &str, value: &serde_json::Value) {
    std::fs::write(dir.join(file), value.to_string()).unwrap();
}

/// Loads a registry from fixture artifacts. The temp dir can be dropped once
/// the registry is in memory.
pub fn test_registry() -> ModelRegistry {
    let dir = TempDir::new().unwrap();
    write_artifacts(dir.path());
    ModelRegistry::load(dir.path()).unwrap()
}

pub fn test_app() -> Router {
    server::app(AppState {
        registry: Arc::new(test_registry()),
    })
}

pub fn app_for(registry: ModelRegistry) -> Router {
    server::app(AppState {
        registry: Arc::new(registry),
    })
}
