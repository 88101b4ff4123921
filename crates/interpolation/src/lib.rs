//! Scattered-sample interpolation onto regular pixel grids.
//!
//! The only method implemented is inverse distance weighting (IDW). Every
//! grid cell is a weighted average of all samples, so the cost is
//! `O(samples x width x height)`. Rows are independent and can be evaluated
//! on the rayon pool (see [`IdwParams::parallel`]).

pub mod idw;
pub mod params;

pub use idw::{estimate_at, interpolate, interpolate_with};
pub use params::IdwParams;
