//! `open-stats` library crate.
//!
//! The binary (`ostat`) is a thin wrapper around this library so that:
//!
//! - the normalizer, statistics and cache are testable without the network
//! - provider fetchers sit behind one trait and can be swapped for fakes
//! - presentation (text report, CSV) stays separate from data handling

pub mod app;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod normalize;
pub mod report;
pub mod stats;
