//! Immutable project records: a package name plus its declared dependencies.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::version::{Identifier, SemanticVersionRequirement};

/// Declared dependencies of a project, in declaration order.
pub type Dependencies = IndexMap<Identifier, SemanticVersionRequirement>;

/// One concrete release's view of a package: its name and the requirements it
/// declares on other packages.
///
/// Two projects with the same name but different dependency sets are
/// different values. The resolver keys its visited set by [`Project::name`]
/// and its result mapping by the whole value. Declaration order does not
/// take part in equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: Identifier,
    dependencies: Dependencies,
}

impl Project {
    pub fn new(name: impl Into<Identifier>, dependencies: Dependencies) -> Self {
        Self {
            name: name.into(),
            dependencies,
        }
    }

    /// A project with no dependencies.
    pub fn leaf(name: impl Into<Identifier>) -> Self {
        Self::new(name, Dependencies::new())
    }

    pub fn builder(name: impl Into<Identifier>) -> ProjectBuilder {
        ProjectBuilder {
            name: name.into(),
            dependencies: Dependencies::new(),
        }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// Declared dependencies, in declaration order.
    pub fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    pub fn requirement_on(&self, name: &str) -> Option<&SemanticVersionRequirement> {
        self.dependencies.get(name)
    }
}

impl Hash for Project {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        // order-independent, like IndexMap's equality
        let mut combined = 0u64;
        for entry in &self.dependencies {
            let mut hasher = DefaultHasher::new();
            entry.hash(&mut hasher);
            combined = combined.wrapping_add(hasher.finish());
        }
        state.write_usize(self.dependencies.len());
        state.write_u64(combined);
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())
    }
}

/// Incremental construction of a [`Project`].
#[derive(Debug, Clone)]
pub struct ProjectBuilder {
    name: Identifier,
    dependencies: Dependencies,
}

impl ProjectBuilder {
    /// Declare a dependency. A later declaration on the same name replaces
    /// the earlier requirement and keeps the earlier position.
    pub fn dependency(
        mut self,
        name: impl Into<Identifier>,
        requirement: SemanticVersionRequirement,
    ) -> Self {
        self.dependencies.insert(name.into(), requirement);
        self
    }

    pub fn build(self) -> Project {
        Project {
            name: self.name,
            dependencies: self.dependencies,
        }
    }
}
