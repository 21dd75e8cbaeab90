//! # UI Components Module
//!
//! Leptos components for the incident map.

pub mod charts;
pub mod footer;
pub mod header;
pub mod map;
pub mod modal;
pub mod report_form;
pub mod report_list;
pub mod stats_modal;
pub mod stats_panel;
pub mod stats_view;

pub use charts::*;
pub use footer::*;
pub use header::*;
pub use map::*;
pub use modal::*;
pub use report_form::*;
pub use report_list::*;
pub use stats_modal::*;
pub use stats_panel::*;
pub use stats_view::*;
