//! Memoization of fetch results across resolution runs.
//!
//! The resolver itself never asks for the same identifier twice in one run.
//! Repeated runs against a slow source (e.g. re-resolving after a manifest
//! edit) can share a [`CachingFetcher`] to avoid repeating lookups.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use buckle_core::version::{Identifier, SemanticVersionRequirement};

use crate::fetch::{FetchResult, Fetcher};

type CacheKey = (Identifier, SemanticVersionRequirement);

/// Wraps a [`Fetcher`] and remembers each `(identifier, requirement)` answer.
#[derive(Debug)]
pub struct CachingFetcher<F> {
    inner: F,
    entries: Mutex<HashMap<CacheKey, FetchResult>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl<F: Fetcher> CachingFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            entries: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Forget every remembered answer.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F: Fetcher> Fetcher for CachingFetcher<F> {
    fn fetch(
        &self,
        identifier: &Identifier,
        requirement: &SemanticVersionRequirement,
    ) -> FetchResult {
        let key = (identifier.clone(), requirement.clone());
        if let Some(hit) = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit.clone();
        }

        // lock is not held while the inner fetcher runs
        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = self.inner.fetch(identifier, requirement);
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, result.clone());
        result
    }
}
