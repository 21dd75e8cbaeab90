//! # Controllers
//!
//! Glue between the domain workflows and the reactive state.

pub mod reports;
pub mod stats;

pub use reports::*;
pub use stats::*;
