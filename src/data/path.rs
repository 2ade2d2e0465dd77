//! Route path codec
//!
//! Dataset rows carry their geometry as a string literal of (lat, lon)
//! pairs, e.g. `[(13.0,80.2),(13.1,80.3)]`. This module decodes that
//! literal into typed coordinates through a strict schema instead of a
//! generic literal evaluator, and re-encodes the canonical form.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Decode a path literal into a coordinate sequence.
///
/// Accepts the tuple-literal form `[(lat,lon),...]` written by the dataset
/// generator and the JSON form `[[lat,lon],...]`. The sequence must contain
/// at least one pair; anything else is a [`PipelineError::PathDecode`].
pub fn decode_path(raw: &str) -> Result<Vec<LatLon>, PipelineError> {
    // Tuple parentheses map 1:1 onto JSON arrays; after normalization the
    // literal must parse as exactly a list of two-element number arrays.
    let normalized: String = raw
        .chars()
        .map(|c| match c {
            '(' => '[',
            ')' => ']',
            _ => c,
        })
        .collect();

    let pairs: Vec<[f64; 2]> =
        serde_json::from_str(normalized.trim()).map_err(|e| PipelineError::PathDecode {
            reason: e.to_string(),
        })?;

    if pairs.is_empty() {
        return Err(PipelineError::PathDecode {
            reason: "path contains no coordinates".to_string(),
        });
    }

    Ok(pairs
        .into_iter()
        .map(|[lat, lon]| LatLon { lat, lon })
        .collect())
}

/// Encode a coordinate sequence back into the canonical tuple-literal form.
pub fn encode_path(coords: &[LatLon]) -> String {
    let pairs: Vec<String> = coords
        .iter()
        .map(|c| format!("({},{})", c.lat, c.lon))
        .collect();
    format!("[{}]", pairs.join(","))
}
