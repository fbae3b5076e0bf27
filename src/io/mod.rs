//! Input/output helpers.
//!
//! - series CSV export and default file naming (`export`)

pub mod export;

pub use export::*;
