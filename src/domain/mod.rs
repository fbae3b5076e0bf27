//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - providers and queries (`Provider`, `SeriesQuery`)
//! - raw provider tables (`RawTable`)
//! - normalized outputs (`SeriesResult`, `EmptyResult`, `Normalized`)

pub mod table;
pub mod types;

pub use table::*;
pub use types::*;
