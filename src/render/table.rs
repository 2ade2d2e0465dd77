//! Table view of scored routes
//!
//! A pure projection: one display row per scored route, in the order the
//! routes were matched. No sorting, filtering or aggregation happens here.

use serde::Serialize;

use crate::data::ScoredRoute;

/// One row of the route comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub route_id: String,
    pub distance_km: f64,
    pub congestion: String,
    pub accidents: u32,
    pub predicted_risk: String,
}

/// Project scored routes into display rows, preserving input order.
pub fn render_table(scored: &[ScoredRoute]) -> Vec<TableRow> {
    scored
        .iter()
        .map(|s| TableRow {
            route_id: s.record.route_id.clone(),
            distance_km: s.record.distance_km,
            congestion: s.record.congestion_level.clone(),
            accidents: s.record.accidents,
            predicted_risk: s.risk.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RouteRecord;
    use crate::model::RiskLabel;

    fn scored(route_id: &str, risk: RiskLabel) -> ScoredRoute {
        ScoredRoute {
            record: RouteRecord {
                route_id: route_id.to_string(),
                source: "A".to_string(),
                destination: "B".to_string(),
                time_of_day: "Morning".to_string(),
                distance_km: 5.0,
                congestion_level: "Low".to_string(),
                accidents: 0,
                path: "[(13.0,80.2),(13.1,80.3)]".to_string(),
            },
            risk,
        }
    }

    #[test]
    fn projects_scenario_row() {
        let rows = render_table(&[scored("R1", RiskLabel::Low)]);

        assert_eq!(
            rows,
            vec![TableRow {
                route_id: "R1".to_string(),
                distance_km: 5.0,
                congestion: "Low".to_string(),
                accidents: 0,
                predicted_risk: "Low Risk".to_string(),
            }]
        );
    }

    #[test]
    fn preserves_input_order() {
        let rows = render_table(&[
            scored("R2", RiskLabel::High),
            scored("R1", RiskLabel::Low),
            scored("R3", RiskLabel::Medium),
        ]);

        let ids: Vec<&str> = rows.iter().map(|r| r.route_id.as_str()).collect();
        assert_eq!(ids, vec!["R2", "R1", "R3"]);
    }

    #[test]
    fn empty_input_renders_no_rows() {
        assert!(render_table(&[]).is_empty());
    }
}
