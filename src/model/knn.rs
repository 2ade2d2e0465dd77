//! K-nearest-neighbors risk classifier
//!
//! The concrete pretrained artifact the pipeline consumes: a stored
//! training matrix with one risk label per row, saved as JSON. Prediction
//! uses Euclidean distance with majority voting; ties go to the label
//! seen closest first.

use anyhow::{Context, Result};
use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use super::{Classifier, RiskLabel};
use crate::error::PipelineError;
use crate::features::FeatureVector;

/// Serializable KNN classifier artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnnClassifier {
    k: usize,
    features: Vec<[f64; FeatureVector::LEN]>,
    labels: Vec<RiskLabel>,
}

impl KnnClassifier {
    /// Build an artifact from labeled training vectors.
    ///
    /// `x` must be (n_samples x 4) with one label per row and `k >= 1`.
    pub fn fit(k: usize, x: &Array2<f64>, labels: &[RiskLabel]) -> Result<Self, PipelineError> {
        if k == 0 {
            return Err(PipelineError::Data("k must be at least 1".to_string()));
        }
        if x.ncols() != FeatureVector::LEN {
            return Err(PipelineError::Data(format!(
                "training matrix has {} columns, expected {}",
                x.ncols(),
                FeatureVector::LEN
            )));
        }
        if x.nrows() != labels.len() {
            return Err(PipelineError::Data(format!(
                "{} training rows but {} labels",
                x.nrows(),
                labels.len()
            )));
        }
        if labels.is_empty() {
            return Err(PipelineError::Data(
                "training data must not be empty".to_string(),
            ));
        }

        let features = x
            .rows()
            .into_iter()
            .map(|row| {
                let mut sample = [0.0; FeatureVector::LEN];
                for (slot, value) in sample.iter_mut().zip(row.iter()) {
                    *slot = *value;
                }
                sample
            })
            .collect();

        Ok(Self {
            k,
            features,
            labels: labels.to_vec(),
        })
    }

    /// Load an artifact from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open model file: {:?}", path.as_ref()))?;

        let model: KnnClassifier =
            serde_json::from_reader(file).context("Failed to parse model artifact")?;
        model.validate().context("Invalid model artifact")?;
        Ok(model)
    }

    /// Save the artifact to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create model file: {:?}", path.as_ref()))?;

        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), PipelineError> {
        if self.k == 0 {
            return Err(PipelineError::Data("k must be at least 1".to_string()));
        }
        if self.features.is_empty() {
            return Err(PipelineError::Data(
                "model has no training samples".to_string(),
            ));
        }
        if self.features.len() != self.labels.len() {
            return Err(PipelineError::Data(format!(
                "{} training samples but {} labels",
                self.features.len(),
                self.labels.len()
            )));
        }
        Ok(())
    }

    fn predict_one(&self, sample: ArrayView1<f64>) -> RiskLabel {
        // Distances to every training point, then the k nearest vote.
        let mut distances: Vec<(usize, f64)> = self
            .features
            .iter()
            .enumerate()
            .map(|(i, train)| {
                let dist: f64 = train
                    .iter()
                    .zip(sample.iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum::<f64>()
                    .sqrt();
                (i, dist)
            })
            .collect();

        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let neighbors = &distances[..self.k.min(distances.len())];

        let mut counts: HashMap<RiskLabel, usize> = HashMap::new();
        for (idx, _) in neighbors {
            *counts.entry(self.labels[*idx]).or_insert(0) += 1;
        }

        // Walking neighbors in distance order makes ties deterministic:
        // the tied label whose vote appeared closest wins.
        let mut best = self.labels[neighbors[0].0];
        let mut best_count = counts[&best];
        for (idx, _) in neighbors {
            let label = self.labels[*idx];
            let count = counts[&label];
            if count > best_count {
                best = label;
                best_count = count;
            }
        }

        best
    }
}

impl Classifier for KnnClassifier {
    fn predict_batch(&self, x: &Array2<f64>) -> Result<Vec<RiskLabel>, PipelineError> {
        self.validate()?;
        if x.ncols() != FeatureVector::LEN {
            return Err(PipelineError::Classifier(format!(
                "feature matrix has {} columns, expected {}",
                x.ncols(),
                FeatureVector::LEN
            )));
        }

        Ok(x.rows()
            .into_iter()
            .map(|row| self.predict_one(row))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tempfile::tempdir;

    /// Short/clear routes labeled Low, long/congested routes labeled High.
    fn model() -> KnnClassifier {
        let x = array![
            [2.0, 0.0, 0.0, 0.0],
            [4.0, 0.0, 1.0, 1.0],
            [12.0, 2.0, 5.0, 3.0],
            [15.0, 2.0, 6.0, 2.0],
        ];
        let labels = vec![
            RiskLabel::Low,
            RiskLabel::Low,
            RiskLabel::High,
            RiskLabel::High,
        ];
        KnnClassifier::fit(3, &x, &labels).unwrap()
    }

    #[test]
    fn predicts_nearest_cluster() {
        let model = model();
        let x = array![[3.0, 0.0, 0.0, 0.0], [14.0, 2.0, 5.0, 3.0]];

        let labels = model.predict_batch(&x).unwrap();
        assert_eq!(labels, vec![RiskLabel::Low, RiskLabel::High]);
    }

    #[test]
    fn output_length_matches_input() {
        let model = model();
        let x = Array2::zeros((5, 4));

        let labels = model.predict_batch(&x).unwrap();
        assert_eq!(labels.len(), 5);
    }

    #[test]
    fn k1_returns_exact_training_label() {
        let x = array![[5.0, 0.0, 0.0, 0.0], [9.0, 1.0, 2.0, 2.0]];
        let labels = vec![RiskLabel::Low, RiskLabel::Medium];
        let model = KnnClassifier::fit(1, &x, &labels).unwrap();

        let predicted = model.predict_batch(&array![[9.0, 1.0, 2.0, 2.0]]).unwrap();
        assert_eq!(predicted, vec![RiskLabel::Medium]);
    }

    #[test]
    fn tie_goes_to_closest_neighbor() {
        // k=2 with one vote each; the nearer training point decides.
        let x = array![[0.0, 0.0, 0.0, 0.0], [10.0, 0.0, 0.0, 0.0]];
        let labels = vec![RiskLabel::Low, RiskLabel::High];
        let model = KnnClassifier::fit(2, &x, &labels).unwrap();

        let predicted = model.predict_batch(&array![[1.0, 0.0, 0.0, 0.0]]).unwrap();
        assert_eq!(predicted, vec![RiskLabel::Low]);
    }

    #[test]
    fn fit_rejects_mismatched_shapes() {
        let x = array![[1.0, 0.0, 0.0, 0.0]];
        assert!(KnnClassifier::fit(1, &x, &[]).is_err());
        assert!(KnnClassifier::fit(0, &x, &[RiskLabel::Low]).is_err());

        let wide = Array2::zeros((1, 6));
        assert!(KnnClassifier::fit(1, &wide, &[RiskLabel::Low]).is_err());
    }

    #[test]
    fn predict_rejects_wrong_width() {
        let model = model();
        let x = Array2::zeros((1, 3));
        assert!(model.predict_batch(&x).is_err());
    }

    #[test]
    fn save_and_load_round_trip() {
        let model = model();

        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");

        model.save(&path).unwrap();
        let loaded = KnnClassifier::from_file(&path).unwrap();

        let x = array![[3.0, 0.0, 0.0, 0.0]];
        assert_eq!(
            loaded.predict_batch(&x).unwrap(),
            model.predict_batch(&x).unwrap()
        );
    }

    #[test]
    fn artifact_with_unknown_label_is_rejected() {
        let raw = r#"{"k":1,"features":[[1.0,0.0,0.0,0.0]],"labels":["Extreme Risk"]}"#;
        assert!(serde_json::from_str::<KnnClassifier>(raw).is_err());
    }
}
