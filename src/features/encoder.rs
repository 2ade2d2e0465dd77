//! Feature encoding for route records
//!
//! Maps a route's categorical fields onto the fixed numeric codes the
//! classifier was trained with and assembles the 4-feature input:
//! `[distance_km, congestion_code, accidents, time_code]`.
//!
//! The code tables are frozen; they must match the model artifact's
//! training data. Unknown categorical values are refused, never defaulted.

use ndarray::Array2;
use std::fmt;

use crate::data::RouteRecord;
use crate::error::PipelineError;

/// Congestion buckets with their fixed training codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
}

impl CongestionLevel {
    pub const ALL: [CongestionLevel; 3] = [
        CongestionLevel::Low,
        CongestionLevel::Medium,
        CongestionLevel::High,
    ];

    /// Numeric code: Low=0, Medium=1, High=2
    pub fn code(self) -> f64 {
        match self {
            CongestionLevel::Low => 0.0,
            CongestionLevel::Medium => 1.0,
            CongestionLevel::High => 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CongestionLevel::Low => "Low",
            CongestionLevel::Medium => "Medium",
            CongestionLevel::High => "High",
        }
    }

    /// Exact, case-sensitive lookup from the dataset's string form.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for CongestionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Time-of-day buckets with their fixed training codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Afternoon,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    /// Numeric code: Morning=0, Afternoon=1, Evening=2, Night=3
    pub fn code(self) -> f64 {
        match self {
            TimeOfDay::Morning => 0.0,
            TimeOfDay::Afternoon => 1.0,
            TimeOfDay::Evening => 2.0,
            TimeOfDay::Night => 3.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }

    /// Exact, case-sensitive lookup from the dataset's string form.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The fixed-length numeric input consumed by the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; 4]);

impl FeatureVector {
    /// Number of features per route
    pub const LEN: usize = 4;
}

/// Feature encoder: RouteRecord -> FeatureVector
pub struct FeatureEncoder;

impl FeatureEncoder {
    /// Encode one record.
    ///
    /// Deterministic: the same record always yields the same vector.
    /// Fails if `congestion_level` or `time_of_day` is outside its
    /// enumeration.
    pub fn encode(record: &RouteRecord) -> Result<FeatureVector, PipelineError> {
        let congestion = CongestionLevel::from_name(&record.congestion_level).ok_or_else(|| {
            PipelineError::Encoding {
                route_id: record.route_id.clone(),
                field: "congestion_level",
                value: record.congestion_level.clone(),
            }
        })?;

        let time = TimeOfDay::from_name(&record.time_of_day).ok_or_else(|| {
            PipelineError::Encoding {
                route_id: record.route_id.clone(),
                field: "time_of_day",
                value: record.time_of_day.clone(),
            }
        })?;

        Ok(FeatureVector([
            record.distance_km,
            congestion.code(),
            record.accidents as f64,
            time.code(),
        ]))
    }

    /// Encode a batch of records into an (n_records x 4) feature matrix,
    /// row i corresponding to `records[i]`.
    pub fn encode_batch(records: &[&RouteRecord]) -> Result<Array2<f64>, PipelineError> {
        let mut x = Array2::zeros((records.len(), FeatureVector::LEN));

        for (i, record) in records.iter().enumerate() {
            let FeatureVector(values) = Self::encode(record)?;
            for (j, value) in values.iter().enumerate() {
                x[[i, j]] = *value;
            }
        }

        Ok(x)
    }
}
