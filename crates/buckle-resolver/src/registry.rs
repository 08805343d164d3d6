//! In-memory package index usable as a [`Fetcher`].
//!
//! An index can be built in code with [`Registry::publish`] or loaded from a
//! TOML file listing one `[[package]]` table per release:
//!
//! ```toml
//! [[package]]
//! name = "a"
//! version = "1.0.0"
//! [package.dependencies]
//! b = "^1.0"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use buckle_core::project::{Dependencies, Project};
use buckle_core::version::{Identifier, SemanticVersion, SemanticVersionRequirement};
use buckle_util::errors::BuckleError;
use serde::Deserialize;

use crate::fetch::{FetchResult, Fetcher};

/// Every known release of every known package.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    packages: HashMap<Identifier, BTreeMap<SemanticVersion, Project>>,
}

#[derive(Debug, Deserialize)]
struct IndexFile {
    #[serde(default)]
    package: Vec<IndexEntry>,
}

#[derive(Debug, Deserialize)]
struct IndexEntry {
    name: Identifier,
    version: SemanticVersion,
    #[serde(default)]
    dependencies: Dependencies,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a release. Returns the project previously published at the same
    /// name and version, if any.
    pub fn publish(&mut self, version: SemanticVersion, project: Project) -> Option<Project> {
        self.packages
            .entry(project.name().clone())
            .or_default()
            .insert(version, project)
    }

    /// All releases of a package, oldest first.
    pub fn versions(&self, name: &str) -> Option<&BTreeMap<SemanticVersion, Project>> {
        self.packages.get(name)
    }

    /// Number of distinct packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Parse an index from TOML text.
    pub fn from_toml_str(content: &str) -> miette::Result<Self> {
        let index: IndexFile = toml::from_str(content).map_err(|e| BuckleError::Registry {
            message: format!("Failed to parse registry index: {e}"),
        })?;

        let mut registry = Self::new();
        for entry in index.package {
            let project = Project::new(entry.name.clone(), entry.dependencies);
            if registry.publish(entry.version.clone(), project).is_some() {
                return Err(BuckleError::Registry {
                    message: format!("{} v{} is listed more than once", entry.name, entry.version),
                }
                .into());
            }
        }
        tracing::debug!("Loaded registry index with {} packages", registry.len());
        Ok(registry)
    }

    /// Load and parse an index file.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(BuckleError::from)?;
        Self::from_toml_str(&content)
    }
}

impl Fetcher for Registry {
    fn fetch(
        &self,
        identifier: &Identifier,
        requirement: &SemanticVersionRequirement,
    ) -> FetchResult {
        let Some(releases) = self.packages.get(identifier) else {
            tracing::debug!("Registry has no package named {identifier}");
            return FetchResult::Unresolved;
        };
        let matching = releases
            .iter()
            .filter(|(version, _)| requirement.matches(version))
            .map(|(version, project)| (version.clone(), project.clone()))
            .collect();
        FetchResult::from_candidates(matching)
    }
}
