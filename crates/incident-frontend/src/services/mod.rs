//! # Services Module
//!
//! Backend HTTP client and browser capabilities.

pub mod api;
pub mod geolocation;

pub use api::*;
pub use geolocation::*;
