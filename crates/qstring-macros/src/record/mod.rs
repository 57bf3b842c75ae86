//! Implementation of the `#[derive(QueryRecord)]` macro.
//!
//! This module provides derive macro support for qstring records,
//! generating descriptor tables and field accessors from struct definitions.

mod attrs;
mod derive;

pub use derive::query_record_derive_impl;
