//! Route dataset structures and utilities

pub mod loader;
pub mod path;
pub mod types;

pub use loader::DataLoader;
pub use path::{decode_path, encode_path, LatLon};
pub use types::{RouteQuery, RouteRecord, ScoredRoute};
