//! Example: score a route query end to end
//!
//! Demonstrates the full lookup pipeline:
//! 1. Build a small route table
//! 2. Fit a KNN classifier artifact
//! 3. Filter, encode and score one query
//! 4. Render the table and map views
//!
//! Run with: cargo run --example score_route

use ndarray::array;
use safepath::{
    QueryOutcome, KnnClassifier, RiskLabel, RiskPipeline, RouteQuery, RouteRecord,
};

fn main() -> anyhow::Result<()> {
    println!("=== SafePath Scoring Example ===\n");

    // Step 1: a small in-memory route table
    let routes = vec![
        RouteRecord {
            route_id: "R1".to_string(),
            source: "A".to_string(),
            destination: "B".to_string(),
            time_of_day: "Morning".to_string(),
            distance_km: 5.0,
            congestion_level: "Low".to_string(),
            accidents: 0,
            path: "[(13.0,80.2),(13.1,80.3)]".to_string(),
        },
        RouteRecord {
            route_id: "R2".to_string(),
            source: "A".to_string(),
            destination: "B".to_string(),
            time_of_day: "Morning".to_string(),
            distance_km: 11.0,
            congestion_level: "High".to_string(),
            accidents: 4,
            path: "[(13.0,80.2),(13.05,80.1),(13.1,80.3)]".to_string(),
        },
    ];
    println!("Step 1: {} routes in the table", routes.len());

    // Step 2: fit a small artifact (normally loaded with from_file)
    let x = array![
        [4.0, 0.0, 0.0, 0.0],
        [6.0, 1.0, 1.0, 1.0],
        [10.0, 2.0, 4.0, 0.0],
        [14.0, 2.0, 6.0, 3.0],
    ];
    let labels = vec![
        RiskLabel::Low,
        RiskLabel::Medium,
        RiskLabel::High,
        RiskLabel::High,
    ];
    let classifier = KnnClassifier::fit(1, &x, &labels)?;
    println!("Step 2: fitted KNN artifact (k=1)\n");

    // Step 3: run the query
    let pipeline = RiskPipeline::new(&routes, &classifier);
    let outcome = pipeline.run(&RouteQuery::new("A", "B", "Morning"))?;

    let QueryOutcome::Routes { table, map, .. } = outcome else {
        println!("No routes found");
        return Ok(());
    };

    // Step 4: render
    println!(
        "{:<10} {:>12} {:>10} {:>9}  {}",
        "Route ID", "Distance km", "Congestion", "Accidents", "Predicted Risk"
    );
    println!("{:-<60}", "");
    for row in &table {
        println!(
            "{:<10} {:>12.2} {:>10} {:>9}  {}",
            row.route_id, row.distance_km, row.congestion, row.accidents, row.predicted_risk
        );
    }

    println!("\nMap GeoJSON:\n{}", serde_json::to_string_pretty(&map.to_geojson())?);

    Ok(())
}
