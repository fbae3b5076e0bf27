//! Shared test utilities for the open-stats integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

#![allow(dead_code)]

pub mod builders;
pub mod fake_provider;
pub mod fake_source;

pub use builders::*;
pub use fake_provider::*;
pub use fake_source::*;
