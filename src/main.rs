//! SafePath - Route Risk Scoring CLI
//!
//! Command-line front end for the lookup pipeline: load the route table
//! and the pretrained model once, answer one query, print the table and
//! optionally write the map as GeoJSON.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{info, Level};

use safepath::{
    DataLoader, KnnClassifier, QueryOutcome, RiskPipeline, RouteQuery, TimeOfDay,
};

#[derive(Parser)]
#[command(name = "safepath")]
#[command(about = "Route risk lookup and map rendering")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score the routes matching a (source, destination, time) triple
    Query {
        /// Route dataset CSV
        #[arg(long, default_value = "routes_with_paths.csv")]
        data: PathBuf,

        /// Pretrained classifier artifact (JSON)
        #[arg(long, default_value = "model.json")]
        model: PathBuf,

        /// Starting location
        #[arg(short, long)]
        source: String,

        /// Ending location
        #[arg(short, long)]
        destination: String,

        /// Time of travel: Morning, Afternoon, Evening or Night
        #[arg(short, long)]
        time: String,

        /// Write the map view to this GeoJSON file
        #[arg(long)]
        map_out: Option<PathBuf>,
    },

    /// Summarize a route dataset (row count, selectable values)
    Inspect {
        /// Route dataset CSV
        #[arg(long, default_value = "routes_with_paths.csv")]
        data: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Commands::Query {
            data,
            model,
            source,
            destination,
            time,
            map_out,
        } => run_query(data, model, source, destination, time, map_out),
        Commands::Inspect { data } => run_inspect(data),
    }
}

/// Map a CLI time argument onto the canonical bucket name, any case.
fn canonical_time(raw: &str) -> Result<TimeOfDay> {
    TimeOfDay::ALL
        .into_iter()
        .find(|t| t.name().eq_ignore_ascii_case(raw))
        .with_context(|| {
            format!("time {raw:?} must be one of Morning, Afternoon, Evening, Night")
        })
}

fn run_query(
    data: PathBuf,
    model: PathBuf,
    source: String,
    destination: String,
    time: String,
    map_out: Option<PathBuf>,
) -> Result<()> {
    let time = canonical_time(&time)?;

    let routes = DataLoader::load_routes(&data)?;
    let classifier = KnnClassifier::from_file(&model)?;
    info!(model = ?model, "loaded classifier artifact");

    let pipeline = RiskPipeline::new(&routes, &classifier);
    let query = RouteQuery::new(source, destination, time.name());

    let outcome = pipeline
        .run(&query)
        .context("query failed")?;

    let (table, map) = match outcome {
        QueryOutcome::NoMatch => {
            println!(
                "No routes found for {} -> {} ({})",
                query.source, query.destination, query.time_of_day
            );
            return Ok(());
        }
        QueryOutcome::Routes { table, map, .. } => (table, map),
    };

    println!(
        "Routes for {} -> {} ({})\n",
        query.source, query.destination, query.time_of_day
    );
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

    for skip in &map.skipped {
        eprintln!("warning: route {} left off map: {}", skip.route_id, skip.reason);
    }

    if let Some(path) = map_out {
        let geojson = serde_json::to_string_pretty(&map.to_geojson())?;
        std::fs::write(&path, geojson)
            .with_context(|| format!("Failed to write map file: {path:?}"))?;
        println!("\nMap written to {}", path.display());
    }

    Ok(())
}

fn run_inspect(data: PathBuf) -> Result<()> {
    let routes = DataLoader::load_routes(&data)?;
    if routes.is_empty() {
        bail!("dataset {data:?} contains no routes");
    }

    let sources: BTreeSet<&str> = routes.iter().map(|r| r.source.as_str()).collect();
    let destinations: BTreeSet<&str> = routes.iter().map(|r| r.destination.as_str()).collect();
    let times: BTreeSet<&str> = routes.iter().map(|r| r.time_of_day.as_str()).collect();

    println!("Routes:       {}", routes.len());
    println!("Sources:      {}", sources.into_iter().collect::<Vec<_>>().join(", "));
    println!("Destinations: {}", destinations.into_iter().collect::<Vec<_>>().join(", "));
    println!("Time buckets: {}", times.into_iter().collect::<Vec<_>>().join(", "));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_time_is_case_insensitive() {
        assert_eq!(canonical_time("morning").unwrap(), TimeOfDay::Morning);
        assert_eq!(canonical_time("NIGHT").unwrap(), TimeOfDay::Night);
    }

    #[test]
    fn canonical_time_rejects_unknown_bucket() {
        assert!(canonical_time("Dawn").is_err());
    }
}
