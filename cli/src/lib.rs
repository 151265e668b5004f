//! Output rendering for the `fixedcols` command-line driver.
//!
//! The parsing itself lives in the `fixedcols` crate; this crate only turns
//! parsed columns into text for a terminal or a file.

pub mod render;

pub use render::{render_json, render_rows};
