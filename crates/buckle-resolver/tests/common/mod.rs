#![allow(dead_code)]

use std::cell::RefCell;

use buckle_core::project::Project;
use buckle_core::version::{Identifier, SemanticVersion, SemanticVersionRequirement};
use buckle_resolver::fetch::{FetchResult, Fetcher};
use buckle_resolver::registry::Registry;

pub fn v(s: &str) -> SemanticVersion {
    SemanticVersion::parse(s).unwrap()
}

pub fn req(s: &str) -> SemanticVersionRequirement {
    SemanticVersionRequirement::parse(s).unwrap()
}

/// Registry wrapper that logs every lookup it answers.
pub struct RecordingFetcher {
    pub registry: Registry,
    pub calls: RefCell<Vec<(Identifier, SemanticVersionRequirement)>>,
}

impl RecordingFetcher {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn fetched_names(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(id, _)| id.to_string())
            .collect()
    }
}

impl Fetcher for RecordingFetcher {
    fn fetch(
        &self,
        identifier: &Identifier,
        requirement: &SemanticVersionRequirement,
    ) -> FetchResult {
        self.calls
            .borrow_mut()
            .push((identifier.clone(), requirement.clone()));
        self.registry.fetch(identifier, requirement)
    }
}

/// Publish `name` at each version with the given dependencies.
pub fn publish(registry: &mut Registry, name: &str, versions: &[&str], deps: &[(&str, &str)]) {
    for version in versions {
        let mut builder = Project::builder(name);
        for (dep, requirement) in deps {
            builder = builder.dependency(*dep, req(requirement));
        }
        registry.publish(v(version), builder.build());
    }
}

pub fn root(deps: &[(&str, &str)]) -> Project {
    let mut builder = Project::builder("root");
    for (dep, requirement) in deps {
        builder = builder.dependency(*dep, req(requirement));
    }
    builder.build()
}
