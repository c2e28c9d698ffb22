mod artifact;
mod classifier;
mod vectorizer;

pub use artifact::load_json;
pub use classifier::{Classifier, LinearModel, NaiveBayesModel};
pub use vectorizer::{SparseVector, TfidfVectorizer, VectorizerArtifact};
