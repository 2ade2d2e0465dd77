//! Feature encoding modules

pub mod encoder;

pub use encoder::{CongestionLevel, FeatureEncoder, FeatureVector, TimeOfDay};
