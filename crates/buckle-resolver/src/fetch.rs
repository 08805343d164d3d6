//! The candidate-lookup capability the resolver consumes.

use std::collections::BTreeMap;
use std::future::Future;

use buckle_core::project::Project;
use buckle_core::version::{Identifier, SemanticVersion, SemanticVersionRequirement};

/// Answer to a single `(identifier, requirement)` lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// No release of the package satisfies the requirement, or the package
    /// is unknown.
    Unresolved,
    /// Every known release satisfying the requirement, each with the project
    /// record describing that release's own dependencies.
    Candidates(BTreeMap<SemanticVersion, Project>),
}

impl FetchResult {
    /// Build a result from candidates, collapsing an empty set to `Unresolved`.
    pub fn from_candidates(candidates: BTreeMap<SemanticVersion, Project>) -> Self {
        if candidates.is_empty() {
            Self::Unresolved
        } else {
            Self::Candidates(candidates)
        }
    }

    pub fn is_unresolved(&self) -> bool {
        match self {
            Self::Unresolved => true,
            Self::Candidates(c) => c.is_empty(),
        }
    }

    /// The greatest candidate version and its project, if any.
    pub fn into_latest(self) -> Option<(SemanticVersion, Project)> {
        match self {
            Self::Unresolved => None,
            Self::Candidates(mut c) => c.pop_last(),
        }
    }
}

/// Synchronous source of candidate versions.
///
/// Implementations must turn their own failures (network, malformed data)
/// into [`FetchResult::Unresolved`]; the resolver has no other error channel.
pub trait Fetcher {
    fn fetch(&self, identifier: &Identifier, requirement: &SemanticVersionRequirement)
        -> FetchResult;
}

/// Asynchronous source of candidate versions, used by
/// [`resolve_concurrent`](crate::resolver::resolve_concurrent).
///
/// Every [`Fetcher`] is also an `AsyncFetcher` whose futures are immediately
/// ready.
pub trait AsyncFetcher {
    fn fetch_async(
        &self,
        identifier: &Identifier,
        requirement: &SemanticVersionRequirement,
    ) -> impl Future<Output = FetchResult>;
}

impl<F: Fetcher + ?Sized> AsyncFetcher for F {
    fn fetch_async(
        &self,
        identifier: &Identifier,
        requirement: &SemanticVersionRequirement,
    ) -> impl Future<Output = FetchResult> {
        std::future::ready(self.fetch(identifier, requirement))
    }
}

/// A [`Fetcher`] backed by a closure. See [`fetch_fn`].
#[derive(Debug, Clone)]
pub struct FnFetcher<F> {
    f: F,
}

/// Wrap a closure as a [`Fetcher`].
pub fn fetch_fn<F>(f: F) -> FnFetcher<F>
where
    F: Fn(&Identifier, &SemanticVersionRequirement) -> FetchResult,
{
    FnFetcher { f }
}

impl<F> Fetcher for FnFetcher<F>
where
    F: Fn(&Identifier, &SemanticVersionRequirement) -> FetchResult,
{
    fn fetch(
        &self,
        identifier: &Identifier,
        requirement: &SemanticVersionRequirement,
    ) -> FetchResult {
        (self.f)(identifier, requirement)
    }
}
