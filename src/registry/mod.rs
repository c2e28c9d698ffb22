use crate::model::{
    load_json, Classifier, LinearModel, NaiveBayesModel, SparseVector, TfidfVectorizer,
    VectorizerArtifact,
};
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info, warn};

/// Closed set of served models. Fixed at build time; the registry never grows
/// or shrinks after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    NaiveBayes,
    LogisticRegression,
    LinearSvm,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [
        ModelKind::NaiveBayes,
        ModelKind::LogisticRegression,
        ModelKind::LinearSvm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NaiveBayes => "naive_bayes",
            Self::LogisticRegression => "logistic_regression",
            Self::LinearSvm => "linear_svm",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::NaiveBayes => "Naive Bayes Classifier",
            Self::LogisticRegression => "Logistic Regression Classifier",
            Self::LinearSvm => "Linear Support Vector Machine",
        }
    }

    /// Artifact file name under the models directory.
    pub fn artifact_file(&self) -> &'static str {
        match self {
            Self::NaiveBayes => "naive_bayes.json",
            Self::LogisticRegression => "logistic_regression.json",
            Self::LinearSvm => "linear_svm.json",
        }
    }

    pub fn parse(name: &str) -> Option<ModelKind> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }
}

/// File name of the shared vectorizer artifact.
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";

/// Immutable registry of the shared vectorizer and all loaded classifiers.
/// Built once at startup and shared read-only across requests.
#[derive(Debug)]
pub struct ModelRegistry {
    vectorizer: TfidfVectorizer,
    models: HashMap<ModelKind, Classifier>,
}

impl ModelRegistry {
    /// Loads the vectorizer and every classifier from `dir`. Any missing or
    /// inconsistent artifact fails the whole load; the caller aborts startup.
    pub fn load(dir: &Path) -> Result<Self> {
        let vectorizer_path = dir.join(VECTORIZER_FILE);
        let vectorizer_artifact: VectorizerArtifact = load_json(&vectorizer_path)?;
        let vectorizer = TfidfVectorizer::from_artifact(vectorizer_artifact)?;
        info!(
            "Loaded vectorizer with {} features from {}",
            vectorizer.dimension(),
            vectorizer_path.display()
        );

        let mut models = HashMap::new();
        for kind in ModelKind::ALL {
            let path = dir.join(kind.artifact_file());
            let classifier = match kind {
                ModelKind::NaiveBayes => {
                    Classifier::NaiveBayes(load_json::<NaiveBayesModel>(&path)?)
                }
                ModelKind::LogisticRegression | ModelKind::LinearSvm => {
                    Classifier::Linear(load_json::<LinearModel>(&path)?)
                }
            };
            classifier.validate()?;
            if classifier.dimension() != vectorizer.dimension() {
                error!(
                    "Model '{}' dimension {} does not match vectorizer dimension {}",
                    kind.as_str(),
                    classifier.dimension(),
                    vectorizer.dimension()
                );
                return Err(Error::artifact(format!(
                    "model '{}' expects {} features but vectorizer produces {}",
                    kind.as_str(),
                    classifier.dimension(),
                    vectorizer.dimension()
                )));
            }
            info!(
                "Loaded model '{}' with {} classes",
                kind.as_str(),
                classifier.classes().len()
            );
            models.insert(kind, classifier);
        }

        info!("All models loaded successfully");
        Ok(Self { vectorizer, models })
    }

    /// Assembles a registry from already-built parts. Skips the cross-artifact
    /// dimension checks `load` performs.
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        models: HashMap<ModelKind, Classifier>,
    ) -> Self {
        Self { vectorizer, models }
    }

    /// Registered model names, in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        ModelKind::ALL.iter().map(|kind| kind.as_str()).collect()
    }

    /// Valid names formatted for the not-found error message.
    fn available(&self) -> String {
        format!("['{}']", self.names().join("', '"))
    }

    pub fn get(&self, name: &str) -> Result<ModelKind> {
        ModelKind::parse(name)
            .filter(|kind| self.models.contains_key(kind))
            .ok_or_else(|| Error::ModelNotFound {
                model_name: name.to_string(),
                available: self.available(),
            })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn vectorize(&self, text: &str) -> SparseVector {
        self.vectorizer.transform(text)
    }

    /// Runs one named classifier against the text.
    pub fn predict(&self, kind: ModelKind, text: &str) -> Result<String> {
        let classifier = self
            .models
            .get(&kind)
            .ok_or_else(|| Error::ModelNotFound {
                model_name: kind.as_str().to_string(),
                available: self.available(),
            })?;
        let features = self.vectorizer.transform(text);
        classifier.predict(&features)
    }

    /// Vectorizes once and runs every classifier against the same features.
    /// One model's failure never suppresses the others' results.
    pub fn predict_all(&self, text: &str) -> Vec<(ModelKind, Result<String>)> {
        let features = self.vectorizer.transform(text);
        ModelKind::ALL
            .iter()
            .filter_map(|kind| self.models.get_key_value(kind))
            .map(|(&kind, classifier)| {
                let outcome = classifier.predict(&features);
                if let Err(ref e) = outcome {
                    warn!("Model '{}' failed to predict: {}", kind.as_str(), e);
                }
                (kind, outcome)
            })
            .collect()
    }

    /// Class labels a registered model can emit.
    pub fn classes(&self, kind: ModelKind) -> Option<&[String]> {
        self.models.get(&kind).map(Classifier::classes)
    }
}
