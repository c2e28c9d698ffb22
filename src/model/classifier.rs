use super::SparseVector;
use crate::{Error, Result};
use serde::Deserialize;
use std::cmp::Ordering;

/// Serialized multinomial naive Bayes parameters.
#[derive(Debug, Deserialize)]
pub struct NaiveBayesModel {
    pub classes: Vec<String>,
    pub class_log_prior: Vec<f64>,
    pub feature_log_prob: Vec<Vec<f64>>,
}

/// Serialized linear decision model (logistic regression or linear SVM share
/// this layout: one coefficient row per class, or a single row for binary).
#[derive(Debug, Deserialize)]
pub struct LinearModel {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// A loaded classifier: maps a feature vector to a predicted intent label.
/// Immutable after load.
#[derive(Debug)]
pub enum Classifier {
    NaiveBayes(NaiveBayesModel),
    Linear(LinearModel),
}

impl Classifier {
    /// Validates internal dimensional consistency of the loaded parameters.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::NaiveBayes(model) => {
                if model.classes.is_empty() {
                    return Err(Error::artifact("naive Bayes model has no classes"));
                }
                if model.class_log_prior.len() != model.classes.len()
                    || model.feature_log_prob.len() != model.classes.len()
                {
                    return Err(Error::artifact(format!(
                        "naive Bayes parameter rows ({} priors, {} likelihood rows) do not match {} classes",
                        model.class_log_prior.len(),
                        model.feature_log_prob.len(),
                        model.classes.len()
                    )));
                }
                if !row_lengths_equal(&model.feature_log_prob) {
                    return Err(Error::artifact(
                        "naive Bayes likelihood rows have inconsistent lengths",
                    ));
                }
            }
            Self::Linear(model) => {
                if model.classes.is_empty() {
                    return Err(Error::artifact("linear model has no classes"));
                }
                if model.coef.len() != model.intercept.len() {
                    return Err(Error::artifact(format!(
                        "linear model has {} coefficient rows but {} intercepts",
                        model.coef.len(),
                        model.intercept.len()
                    )));
                }
                let binary = model.classes.len() == 2 && model.coef.len() == 1;
                if !binary && model.coef.len() != model.classes.len() {
                    return Err(Error::artifact(format!(
                        "linear model has {} coefficient rows for {} classes",
                        model.coef.len(),
                        model.classes.len()
                    )));
                }
                if !row_lengths_equal(&model.coef) {
                    return Err(Error::artifact(
                        "linear model coefficient rows have inconsistent lengths",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Labels this model can predict.
    pub fn classes(&self) -> &[String] {
        match self {
            Self::NaiveBayes(model) => &model.classes,
            Self::Linear(model) => &model.classes,
        }
    }

    /// Feature dimension each input vector must stay within.
    pub fn dimension(&self) -> usize {
        match self {
            Self::NaiveBayes(model) => model.feature_log_prob.first().map_or(0, Vec::len),
            Self::Linear(model) => model.coef.first().map_or(0, Vec::len),
        }
    }

    pub fn predict(&self, features: &SparseVector) -> Result<String> {
        match self {
            Self::NaiveBayes(model) => {
                let mut scores = Vec::with_capacity(model.classes.len());
                for (prior, likelihood) in model.class_log_prior.iter().zip(&model.feature_log_prob)
                {
                    scores.push(prior + sparse_dot(features, likelihood)?);
                }
                argmax_label(&model.classes, &scores)
            }
            Self::Linear(model) => {
                // Binary form: a single decision row, positive picks the
                // second class.
                if let (true, [row], [intercept]) = (
                    model.classes.len() == 2,
                    &model.coef[..],
                    &model.intercept[..],
                ) {
                    let score = intercept + sparse_dot(features, row)?;
                    let index = usize::from(score > 0.0);
                    return Ok(model.classes[index].clone());
                }
                let mut scores = Vec::with_capacity(model.coef.len());
                for (intercept, row) in model.intercept.iter().zip(&model.coef) {
                    scores.push(intercept + sparse_dot(features, row)?);
                }
                argmax_label(&model.classes, &scores)
            }
        }
    }
}

fn row_lengths_equal(rows: &[Vec<f64>]) -> bool {
    rows.windows(2).all(|pair| pair[0].len() == pair[1].len())
}

fn sparse_dot(features: &SparseVector, row: &[f64]) -> Result<f64> {
    let mut total = 0.0;
    for (index, weight) in features.iter() {
        let coefficient = row.get(index).ok_or_else(|| {
            Error::prediction(format!(
                "feature index {} outside model dimension {}",
                index,
                row.len()
            ))
        })?;
        total += weight * coefficient;
    }
    Ok(total)
}

fn argmax_label(classes: &[String], scores: &[f64]) -> Result<String> {
    let best = scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal))
        .ok_or_else(|| Error::prediction("model produced no scores"))?;
    classes
        .get(best.0)
        .cloned()
        .ok_or_else(|| Error::prediction(format!("score index {} has no class label", best.0)))
}
