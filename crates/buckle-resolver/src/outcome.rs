//! The successful result of a resolution.

use std::collections::HashMap;

use buckle_core::project::Project;
use buckle_core::version::{Identifier, SemanticVersion};

use crate::conflict::{SkipReport, SkippedEdge};
use crate::graph::DependencyGraph;

/// Every project reached from the root, each at its chosen version.
///
/// Entries keep the order in which they were resolved. No two entries share
/// a name, and the root project itself is not an entry.
#[derive(Debug, Clone)]
pub struct Resolution {
    root: Identifier,
    entries: Vec<(Project, SemanticVersion)>,
    index: HashMap<Identifier, usize>,
    skipped: SkipReport,
    graph: DependencyGraph,
}

impl Resolution {
    pub(crate) fn new(
        root: Identifier,
        entries: Vec<(Project, SemanticVersion)>,
        skipped: SkipReport,
        graph: DependencyGraph,
    ) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (project, _))| (project.name().clone(), i))
            .collect();
        Self {
            root,
            entries,
            index,
            skipped,
            graph,
        }
    }

    /// Name of the project resolution started from.
    pub fn root(&self) -> &Identifier {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Chosen version for this exact project value.
    pub fn get(&self, project: &Project) -> Option<&SemanticVersion> {
        let (p, v) = &self.entries[*self.index.get(project.name())?];
        (p == project).then_some(v)
    }

    /// Chosen version for a package name.
    pub fn version_of(&self, name: &str) -> Option<&SemanticVersion> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Project record chosen for a package name.
    pub fn project(&self, name: &str) -> Option<&Project> {
        self.index.get(name).map(|&i| &self.entries[i].0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entries in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = (&Project, &SemanticVersion)> {
        self.entries.iter().map(|(p, v)| (p, v))
    }

    pub fn to_map(&self) -> HashMap<Project, SemanticVersion> {
        self.entries.iter().cloned().collect()
    }

    pub fn into_map(self) -> HashMap<Project, SemanticVersion> {
        self.entries.into_iter().collect()
    }

    /// Edges that were not evaluated because their target was already visited.
    pub fn skipped(&self) -> &SkipReport {
        &self.skipped
    }

    /// Skipped edges whose requirement the chosen version does not satisfy.
    ///
    /// These are the places where first-seen-wins picked a version some
    /// dependent would not have accepted. Edges pointing at the root are
    /// never reported since the root has no chosen version.
    pub fn incompatible_skips(&self) -> Vec<&SkippedEdge> {
        self.skipped
            .iter()
            .filter(|edge| {
                self.version_of(edge.identifier.as_str())
                    .is_some_and(|v| !edge.requirement.matches(v))
            })
            .collect()
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }
}
