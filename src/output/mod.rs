//! Output formatting module
//!
//! Renders suite results and exports them to disk.

mod export;
mod formatter;

pub use export::save_summary;
pub use formatter::{OutputFormat, ResultFormatter};
