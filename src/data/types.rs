//! Core data types for the route dataset
//!
//! This module defines the structures the rest of the pipeline consumes:
//! - RouteRecord: one candidate route as supplied by the data source
//! - RouteQuery: the (source, destination, time-of-day) lookup triple
//! - ScoredRoute: a route paired with its predicted risk

use serde::{Deserialize, Serialize};

use crate::model::RiskLabel;

/// One candidate route between a source and destination at a given time bucket.
///
/// Records are produced by the external data source and are read-only here.
/// `time_of_day` and `congestion_level` are kept as the raw strings the source
/// supplied; the feature encoder validates membership against the known
/// enumerations and refuses anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRecord {
    /// Unique route identifier (e.g., "R1")
    pub route_id: String,
    /// Starting location name
    pub source: String,
    /// Ending location name
    pub destination: String,
    /// Time bucket: Morning, Afternoon, Evening or Night
    pub time_of_day: String,
    /// Route length in kilometers
    pub distance_km: f64,
    /// Congestion bucket: Low, Medium or High
    pub congestion_level: String,
    /// Historical accident count on this route
    pub accidents: u32,
    /// Encoded coordinate list, e.g. `[(13.0,80.2),(13.1,80.3)]`
    pub path: String,
}

/// The lookup triple a caller asks about.
///
/// Matching is exact, case-sensitive string equality on all three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    pub source: String,
    pub destination: String,
    pub time_of_day: String,
}

impl RouteQuery {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        time_of_day: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            time_of_day: time_of_day.into(),
        }
    }

    /// Whether a record's triple equals this query's triple.
    pub fn matches(&self, record: &RouteRecord) -> bool {
        record.source == self.source
            && record.destination == self.destination
            && record.time_of_day == self.time_of_day
    }
}

/// A route paired with its predicted risk label.
///
/// Exists only for the duration of rendering one query's response.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRoute {
    pub record: RouteRecord,
    pub risk: RiskLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RouteRecord {
        RouteRecord {
            route_id: "R1".to_string(),
            source: "A".to_string(),
            destination: "B".to_string(),
            time_of_day: "Morning".to_string(),
            distance_km: 5.0,
            congestion_level: "Low".to_string(),
            accidents: 0,
            path: "[(13.0,80.2),(13.1,80.3)]".to_string(),
        }
    }

    #[test]
    fn query_matches_exact_triple() {
        let query = RouteQuery::new("A", "B", "Morning");
        assert!(query.matches(&record()));
    }

    #[test]
    fn query_matching_is_case_sensitive() {
        let query = RouteQuery::new("a", "B", "Morning");
        assert!(!query.matches(&record()));

        let query = RouteQuery::new("A", "B", "morning");
        assert!(!query.matches(&record()));
    }
}
