//! Query pipeline
//!
//! Wires the stages together: filter -> encode -> score -> render.
//! The dataset and classifier are injected by the caller, loaded once at
//! startup and only read here; every query is a stateless, idempotent
//! pass over the matched rows.

use tracing::{debug, info};

use crate::data::{RouteQuery, RouteRecord, ScoredRoute};
use crate::error::PipelineError;
use crate::features::FeatureEncoder;
use crate::model::Classifier;
use crate::render::map::{render_map, MapSpec};
use crate::render::table::{render_table, TableRow};

/// Select the records whose (source, destination, time_of_day) triple
/// equals the query's, in dataset order. An empty result means "no known
/// route for this combination" and is not an error.
pub fn filter_routes<'a>(routes: &'a [RouteRecord], query: &RouteQuery) -> Vec<&'a RouteRecord> {
    routes.iter().filter(|r| query.matches(r)).collect()
}

/// Score matched records with the classifier, one label per record,
/// index-aligned. Feature vectors are batched into a single classifier
/// call; record order is preserved throughout.
pub fn score_routes<C: Classifier>(
    records: &[&RouteRecord],
    classifier: &C,
) -> Result<Vec<ScoredRoute>, PipelineError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let x = FeatureEncoder::encode_batch(records)?;
    let labels = classifier.predict_batch(&x)?;

    if labels.len() != records.len() {
        return Err(PipelineError::Classifier(format!(
            "classifier returned {} labels for {} routes",
            labels.len(),
            records.len()
        )));
    }

    Ok(records
        .iter()
        .zip(labels)
        .map(|(record, risk)| ScoredRoute {
            record: (*record).clone(),
            risk,
        })
        .collect())
}

/// One query's rendered result.
#[derive(Debug)]
pub enum QueryOutcome {
    /// No route in the dataset matches the requested triple.
    NoMatch,
    /// Matched routes, scored and rendered as both views.
    Routes {
        scored: Vec<ScoredRoute>,
        table: Vec<TableRow>,
        map: MapSpec,
    },
}

/// The full lookup pipeline over an injected dataset and classifier.
pub struct RiskPipeline<'a, C: Classifier> {
    routes: &'a [RouteRecord],
    classifier: &'a C,
}

impl<'a, C: Classifier> RiskPipeline<'a, C> {
    pub fn new(routes: &'a [RouteRecord], classifier: &'a C) -> Self {
        Self { routes, classifier }
    }

    /// Run one query end to end.
    ///
    /// Encoding and classifier errors abort this query's result and
    /// surface as a single failure; the shared dataset and classifier
    /// are never touched.
    pub fn run(&self, query: &RouteQuery) -> Result<QueryOutcome, PipelineError> {
        let matched = filter_routes(self.routes, query);
        debug!(
            source = %query.source,
            destination = %query.destination,
            time_of_day = %query.time_of_day,
            matched = matched.len(),
            "filtered routes"
        );

        if matched.is_empty() {
            info!(
                source = %query.source,
                destination = %query.destination,
                time_of_day = %query.time_of_day,
                "no routes for query"
            );
            return Ok(QueryOutcome::NoMatch);
        }

        let scored = score_routes(&matched, self.classifier)?;
        let table = render_table(&scored);
        let map = render_map(&scored);

        Ok(QueryOutcome::Routes { scored, table, map })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{KnnClassifier, RiskLabel};
    use crate::render::map::TierColor;
    use ndarray::{array, Array2};

    /// Classifier stub that returns a fixed label sequence.
    struct FixedClassifier(Vec<RiskLabel>);

    impl Classifier for FixedClassifier {
        fn predict_batch(&self, x: &Array2<f64>) -> Result<Vec<RiskLabel>, PipelineError> {
            Ok(self.0.iter().copied().cycle().take(x.nrows()).collect())
        }
    }

    fn record(route_id: &str, source: &str, destination: &str, time: &str) -> RouteRecord {
        RouteRecord {
            route_id: route_id.to_string(),
            source: source.to_string(),
            destination: destination.to_string(),
            time_of_day: time.to_string(),
            distance_km: 5.0,
            congestion_level: "Low".to_string(),
            accidents: 0,
            path: "[(13.0,80.2),(13.1,80.3)]".to_string(),
        }
    }

    fn dataset() -> Vec<RouteRecord> {
        vec![
            record("R1", "A", "B", "Morning"),
            record("R2", "A", "B", "Morning"),
            record("R3", "A", "B", "Night"),
            record("R4", "B", "A", "Morning"),
        ]
    }

    #[test]
    fn filter_returns_exact_matches_in_order() {
        let routes = dataset();
        let matched = filter_routes(&routes, &RouteQuery::new("A", "B", "Morning"));

        let ids: Vec<&str> = matched.iter().map(|r| r.route_id.as_str()).collect();
        assert_eq!(ids, vec!["R1", "R2"]);
    }

    #[test]
    fn filter_absent_triple_is_empty() {
        let routes = dataset();
        assert!(filter_routes(&routes, &RouteQuery::new("X", "Y", "Night")).is_empty());
    }

    #[test]
    fn scores_align_with_records() {
        let routes = dataset();
        let matched = filter_routes(&routes, &RouteQuery::new("A", "B", "Morning"));
        let classifier = FixedClassifier(vec![RiskLabel::High, RiskLabel::Low]);

        let scored = score_routes(&matched, &classifier).unwrap();
        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].record.route_id, "R1");
        assert_eq!(scored[0].risk, RiskLabel::High);
        assert_eq!(scored[1].record.route_id, "R2");
        assert_eq!(scored[1].risk, RiskLabel::Low);
    }

    #[test]
    fn scoring_no_records_yields_nothing() {
        let classifier = FixedClassifier(vec![RiskLabel::Low]);
        assert!(score_routes(&[], &classifier).unwrap().is_empty());
    }

    #[test]
    fn no_match_is_not_an_error() {
        let routes = dataset();
        let classifier = FixedClassifier(vec![RiskLabel::Low]);
        let pipeline = RiskPipeline::new(&routes, &classifier);

        let outcome = pipeline.run(&RouteQuery::new("X", "Y", "Night")).unwrap();
        assert!(matches!(outcome, QueryOutcome::NoMatch));
    }

    #[test]
    fn unknown_congestion_aborts_query() {
        let mut routes = dataset();
        routes[1].congestion_level = "Extreme".to_string();
        let classifier = FixedClassifier(vec![RiskLabel::Low]);
        let pipeline = RiskPipeline::new(&routes, &classifier);

        let err = pipeline.run(&RouteQuery::new("A", "B", "Morning")).unwrap_err();
        assert!(matches!(err, PipelineError::Encoding { .. }));
    }

    #[test]
    fn end_to_end_scenario() {
        // Dataset: one row R1 (A, B, Morning). A k=1 model trained on the
        // exact feature vector returns Low Risk; the table row and green
        // polyline with its markers follow.
        let routes = vec![record("R1", "A", "B", "Morning")];
        let x = array![[5.0, 0.0, 0.0, 0.0], [20.0, 2.0, 9.0, 3.0]];
        let labels = vec![RiskLabel::Low, RiskLabel::High];
        let classifier = KnnClassifier::fit(1, &x, &labels).unwrap();

        let pipeline = RiskPipeline::new(&routes, &classifier);
        let outcome = pipeline.run(&RouteQuery::new("A", "B", "Morning")).unwrap();

        let QueryOutcome::Routes { scored, table, map } = outcome else {
            panic!("expected scored routes");
        };

        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].risk, RiskLabel::Low);

        assert_eq!(table.len(), 1);
        assert_eq!(table[0].route_id, "R1");
        assert_eq!(table[0].distance_km, 5.0);
        assert_eq!(table[0].congestion, "Low");
        assert_eq!(table[0].accidents, 0);
        assert_eq!(table[0].predicted_risk, "Low Risk");

        assert_eq!(map.routes.len(), 1);
        assert_eq!(map.routes[0].color, TierColor::Green);
        assert_eq!(map.markers[0].at.lat, 13.0);
        assert_eq!(map.markers[1].at.lon, 80.3);
        assert!(map.skipped.is_empty());
    }

    #[test]
    fn identical_queries_yield_identical_results() {
        let routes = dataset();
        let classifier = FixedClassifier(vec![RiskLabel::Medium]);
        let pipeline = RiskPipeline::new(&routes, &classifier);
        let query = RouteQuery::new("A", "B", "Night");

        let first = pipeline.run(&query).unwrap();
        let second = pipeline.run(&query).unwrap();

        let (QueryOutcome::Routes { table: t1, .. }, QueryOutcome::Routes { table: t2, .. }) =
            (first, second)
        else {
            panic!("expected scored routes");
        };
        assert_eq!(t1, t2);
    }
}
