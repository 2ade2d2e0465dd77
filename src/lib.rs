//! # SafePath - Route Risk Scoring Pipeline
//!
//! Looks up precomputed candidate routes for a (source, destination,
//! time-of-day) triple, scores each with a pretrained classifier, and
//! renders the results as a comparison table and a color-coded map spec:
//!
//! - Query filter over the route table (exact triple match)
//! - Feature encoding to the classifier's fixed 4-feature input
//! - Risk scoring through an opaque, batched classifier interface
//! - Table and map presenters (GeoJSON export)
//!
//! The dataset and classifier are loaded once and injected; every query
//! is a stateless, synchronous pass over at most a few dozen rows.

pub mod data;
pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod render;

pub use data::loader::DataLoader;
pub use data::path::{decode_path, encode_path, LatLon};
pub use data::types::{RouteQuery, RouteRecord, ScoredRoute};
pub use error::{PipelineError, PipelineResult};
pub use features::encoder::{CongestionLevel, FeatureEncoder, FeatureVector, TimeOfDay};
pub use model::{Classifier, KnnClassifier, RiskLabel};
pub use pipeline::{filter_routes, score_routes, QueryOutcome, RiskPipeline};
pub use render::map::{render_map, MapSpec};
pub use render::table::{render_table, TableRow};
