#![deny(unsafe_code)]

//! Classifier capability trait and the exported logistic regression model.

use std::fmt;

use medscreen_model::FeatureVector;

use crate::error::InferenceError;

/// A binary classifier over dense feature vectors.
///
/// Implementations are immutable once constructed and safe to share across
/// threads. Probability support is optional: artifacts without calibrated
/// probabilities return `None` from [`Classifier::predict_proba`] and callers
/// degrade to label-only predictions.
pub trait Classifier: fmt::Debug + Send + Sync {
    /// Number of features the model was trained on.
    fn feature_count(&self) -> usize;

    /// Class labels in probability column order.
    fn classes(&self) -> &[i64];

    /// Predict the class label for one feature vector.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::FeatureCount`] when the vector length does
    /// not match [`Classifier::feature_count`].
    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError>;

    /// Per-class probabilities aligned with [`Classifier::classes`], or
    /// `None` when the model does not expose probabilities.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::FeatureCount`] on a shape mismatch.
    fn predict_proba(&self, features: &FeatureVector)
    -> Result<Option<Vec<f64>>, InferenceError>;
}

/// Probability of the class the model just predicted.
///
/// This is deliberately not the maximum probability: the column is selected
/// by locating `label` in the model's class list, so a model whose decision
/// rule disagrees with its probability ranking still reports the probability
/// of the label it returned.
///
/// # Errors
///
/// Propagates shape mismatches from [`Classifier::predict_proba`].
pub fn predicted_class_confidence(
    model: &dyn Classifier,
    features: &FeatureVector,
    label: i64,
) -> Result<Option<f64>, InferenceError> {
    let Some(proba) = model.predict_proba(features)? else {
        return Ok(None);
    };
    let column = model.classes().iter().position(|&class| class == label);
    Ok(column.and_then(|index| proba.get(index).copied()))
}

/// Binary logistic regression restored from an exported-parameter artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    feature_names: Vec<String>,
    weights: Vec<f64>,
    intercept: f64,
    classes: [i64; 2],
}

impl LogisticModel {
    /// Assemble a model from validated parameters.
    ///
    /// Callers are expected to have checked that `weights` matches
    /// `feature_names` in length; artifact loading enforces this.
    #[must_use]
    pub fn new(
        feature_names: Vec<String>,
        weights: Vec<f64>,
        intercept: f64,
        classes: [i64; 2],
    ) -> Self {
        Self {
            feature_names,
            weights,
            intercept,
            classes,
        }
    }

    /// Trained feature names in column order.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Signed distance from the decision boundary.
    fn decision(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let values = features.values();
        if values.len() != self.weights.len() {
            return Err(InferenceError::FeatureCount {
                expected: self.weights.len(),
                actual: values.len(),
            });
        }
        let dot: f64 = self
            .weights
            .iter()
            .zip(values)
            .map(|(w, x)| w * x)
            .sum();
        Ok(dot + self.intercept)
    }
}

impl Classifier for LogisticModel {
    fn feature_count(&self) -> usize {
        self.weights.len()
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        let z = self.decision(features)?;
        // z == 0 sits on the boundary and resolves to the negative class.
        if z > 0.0 {
            Ok(self.classes[1])
        } else {
            Ok(self.classes[0])
        }
    }

    fn predict_proba(
        &self,
        features: &FeatureVector,
    ) -> Result<Option<Vec<f64>>, InferenceError> {
        let z = self.decision(features)?;
        let positive = sigmoid(z);
        Ok(Some(vec![1.0 - positive, positive]))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_model() -> LogisticModel {
        LogisticModel::new(
            vec!["a".to_string(), "b".to_string()],
            vec![1.0, -1.0],
            0.0,
            [0, 1],
        )
    }

    #[test]
    fn predicts_positive_class_above_boundary() {
        let model = unit_model();
        let label = model
            .predict(&FeatureVector::new(vec![2.0, 0.5]))
            .unwrap();
        assert_eq!(label, 1);
    }

    #[test]
    fn boundary_resolves_to_negative_class() {
        let model = unit_model();
        let label = model
            .predict(&FeatureVector::new(vec![1.0, 1.0]))
            .unwrap();
        assert_eq!(label, 0);
    }

    #[test]
    fn probabilities_align_with_classes_and_sum_to_one() {
        let model = unit_model();
        let features = FeatureVector::new(vec![3.0, 1.0]);
        let proba = model.predict_proba(&features).unwrap().unwrap();
        assert_eq!(proba.len(), 2);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
        assert!(proba[1] > proba[0], "positive decision favors classes[1]");
        let label = model.predict(&features).unwrap();
        assert_eq!(label, 1);
        let confidence = predicted_class_confidence(&model, &features, label)
            .unwrap()
            .unwrap();
        assert!((confidence - proba[1]).abs() < 1e-12);
    }

    #[test]
    fn wrong_feature_count_is_rejected() {
        let model = unit_model();
        let err = model
            .predict(&FeatureVector::new(vec![1.0]))
            .unwrap_err();
        match err {
            InferenceError::FeatureCount { expected, actual } => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
        }
    }

    #[test]
    fn confidence_tracks_label_position_in_nonstandard_class_order() {
        // Classes stored as [2, 1]: label 1 lives in the positive column.
        let model = LogisticModel::new(
            vec!["x".to_string()],
            vec![1.0],
            0.0,
            [2, 1],
        );
        let features = FeatureVector::new(vec![-4.0]);
        let label = model.predict(&features).unwrap();
        assert_eq!(label, 2);
        let confidence = predicted_class_confidence(&model, &features, label)
            .unwrap()
            .unwrap();
        assert!(confidence > 0.5, "negative-class probability is 1 - sigmoid(z)");
    }
}
