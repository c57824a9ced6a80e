//! File-oriented front end for the parameter scan builder.
//!
//! This crate owns plan parsing, document storage and the `param-scan` binary.
//! Axis discovery, expansion and key allocation live in `param_scan_core`.

pub mod adapters;
pub mod handlers;
