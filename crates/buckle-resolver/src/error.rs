//! Failure records produced by an unsuccessful resolution.

use std::fmt;

use buckle_core::version::{Identifier, SemanticVersionRequirement};
use buckle_util::errors::BuckleError;
use miette::Diagnostic;
use thiserror::Error;

/// A dependency edge whose requirement no fetched candidate satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("no version of `{identifier}` satisfies `{requirement}`")]
#[diagnostic(help("Relax the requirement or publish a release of `{identifier}` that matches it"))]
pub struct VersionRequirementNotSatisfied {
    pub identifier: Identifier,
    pub requirement: SemanticVersionRequirement,
}

impl VersionRequirementNotSatisfied {
    pub fn new(identifier: Identifier, requirement: SemanticVersionRequirement) -> Self {
        Self {
            identifier,
            requirement,
        }
    }
}

/// Every unsatisfied requirement found during one resolution, in discovery
/// order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{}", Summary(.failures.len()))]
pub struct ResolutionFailure {
    #[related]
    failures: Vec<VersionRequirementNotSatisfied>,
}

struct Summary(usize);

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "1 version requirement could not be satisfied"),
            n => write!(f, "{n} version requirements could not be satisfied"),
        }
    }
}

impl ResolutionFailure {
    /// Returns `None` when there is nothing to report.
    pub(crate) fn new(failures: Vec<VersionRequirementNotSatisfied>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    pub fn failures(&self) -> &[VersionRequirementNotSatisfied] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<VersionRequirementNotSatisfied> {
        self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VersionRequirementNotSatisfied> {
        self.failures.iter()
    }

    /// Multi-line report with one unsatisfied requirement per line.
    pub fn report(&self) -> String {
        let mut out = format!("{self}:\n");
        for failure in &self.failures {
            out.push_str(&format!("  {failure}\n"));
        }
        out
    }
}

impl<'a> IntoIterator for &'a ResolutionFailure {
    type Item = &'a VersionRequirementNotSatisfied;
    type IntoIter = std::slice::Iter<'a, VersionRequirementNotSatisfied>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}

impl From<ResolutionFailure> for BuckleError {
    fn from(failure: ResolutionFailure) -> Self {
        let details: Vec<String> = failure.iter().map(ToString::to_string).collect();
        BuckleError::Resolution {
            message: details.join("; "),
        }
    }
}
