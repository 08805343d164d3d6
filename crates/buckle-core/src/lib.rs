//! Core data types for the Buckle resolver.
//!
//! This crate defines the values the resolver works on: package identifiers,
//! semantic versions and version requirements, project records, and the
//! resolver configuration.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod config;
pub mod project;
pub mod version;
