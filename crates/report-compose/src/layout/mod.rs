//! Layout calculation modules for composition
//!
//! This module handles the geometric side of page composition:
//! - Unit conversion and contain-fitting
//! - Gallery slot selection for page images
//! - Grid walking for thumbnails and team cards

mod gallery;
mod grid;
mod types;
pub mod units;

pub use gallery::*;
pub use grid::*;
pub use types::*;
pub use units::{contain_fit, to_page_units};
