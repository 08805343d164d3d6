//! Shared utilities for the Buckle resolver.
//!
//! This crate provides the cross-cutting error type used by the other Buckle
//! crates.

pub mod errors;
