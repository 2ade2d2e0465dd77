//! Presenter modules: table and map views

pub mod map;
pub mod table;

pub use map::{render_map, MapSpec, TierColor};
pub use table::{render_table, TableRow};
