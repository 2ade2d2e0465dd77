//! Dataset loading and saving utilities
//!
//! Provides functions to load and save the route table to/from CSV and
//! JSON files. File order is preserved: the pipeline never reorders the
//! dataset.

use anyhow::{Context, Result};
use csv::{Reader, Writer};
use std::fs::File;
use std::path::Path;
use tracing::info;

use super::types::RouteRecord;

/// Data loader for route tables
pub struct DataLoader;

impl DataLoader {
    /// Load route records from a CSV file
    pub fn load_routes<P: AsRef<Path>>(path: P) -> Result<Vec<RouteRecord>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        let mut reader = Reader::from_reader(file);
        let mut routes = Vec::new();

        for result in reader.deserialize() {
            let route: RouteRecord = result.context("Failed to parse route record")?;
            routes.push(route);
        }

        info!(rows = routes.len(), "loaded route dataset");
        Ok(routes)
    }

    /// Save route records to a CSV file
    pub fn save_routes<P: AsRef<Path>>(routes: &[RouteRecord], path: P) -> Result<()> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

        let mut writer = Writer::from_writer(file);

        for route in routes {
            writer.serialize(route)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Load route records from a JSON file
    pub fn load_routes_json<P: AsRef<Path>>(path: P) -> Result<Vec<RouteRecord>> {
        let file = File::open(&path)
            .with_context(|| format!("Failed to open file: {:?}", path.as_ref()))?;

        let routes: Vec<RouteRecord> = serde_json::from_reader(file)?;
        Ok(routes)
    }

    /// Save route records to a JSON file
    pub fn save_routes_json<P: AsRef<Path>>(routes: &[RouteRecord], path: P) -> Result<()> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path.as_ref()))?;

        serde_json::to_writer_pretty(file, routes)?;
        Ok(())
    }
}
