//! Dependency resolution engine: breadth-first traversal with first-seen-wins
//! visiting, greatest-version selection per edge, and aggregated reporting of
//! every unsatisfiable requirement.
//!
//! The resolver performs no I/O itself. Candidate versions come from a
//! [`fetch::Fetcher`] (or [`fetch::AsyncFetcher`]) supplied by the caller.

pub mod cache;
pub mod conflict;
pub mod error;
pub mod fetch;
pub mod graph;
pub mod outcome;
pub mod registry;
pub mod resolver;

pub use error::{ResolutionFailure, VersionRequirementNotSatisfied};
pub use fetch::{AsyncFetcher, FetchResult, Fetcher};
pub use outcome::Resolution;
pub use resolver::{resolve, resolve_concurrent, resolve_with};
