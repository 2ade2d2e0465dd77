//! Classifier interface and risk labels

pub mod knn;

pub use knn::KnnClassifier;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// The classifier's categorical risk assessment for a route.
///
/// The label set is closed. An artifact or prediction carrying any other
/// label string is an error; there is no silent default tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLabel::Low => "Low Risk",
            RiskLabel::Medium => "Medium Risk",
            RiskLabel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLabel {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low Risk" => Ok(RiskLabel::Low),
            "Medium Risk" => Ok(RiskLabel::Medium),
            "High Risk" => Ok(RiskLabel::High),
            other => Err(PipelineError::UnknownLabel(other.to_string())),
        }
    }
}

/// A pretrained risk classifier.
///
/// Treated as a pure, stateless function by the pipeline: N feature rows
/// in, N labels out, index-aligned. Implementations are loaded once at
/// startup and only read afterwards.
pub trait Classifier {
    fn predict_batch(&self, x: &Array2<f64>) -> Result<Vec<RiskLabel>, PipelineError>;
}
