//! Output formatting for calculation results.
//!
//! This module turns result descriptors into text:
//! - [`csv`] - CSV rows for subnet listings
//! - [`terminal`] - Terminal output with colors
//!
//! JSON output goes through `serde_json` on the descriptors directly.

mod csv;
mod terminal;

pub use csv::{format_field, subnet_list_csv, window_csv};
pub use terminal::{
    format_row, render_address, render_containment, render_findings, render_groups,
    render_neighbours, render_range, render_reverse, render_scenario, render_subnet_list,
    render_window,
};
