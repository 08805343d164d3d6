//! Core dependency resolution algorithm: breadth-first traversal from the
//! root project, first-seen-wins visiting, greatest-version selection, and
//! aggregation of every unsatisfied requirement.

use std::collections::{HashSet, VecDeque};

use buckle_core::config::ResolverConfig;
use buckle_core::project::Project;
use buckle_core::version::{Identifier, SemanticVersion, SemanticVersionRequirement};
use futures_util::stream::{self, StreamExt};

use crate::conflict::{SkipReport, SkippedEdge};
use crate::error::{ResolutionFailure, VersionRequirementNotSatisfied};
use crate::fetch::{AsyncFetcher, FetchResult, Fetcher};
use crate::graph::DependencyGraph;
use crate::outcome::Resolution;

/// Resolve every project reachable from `root` with default settings.
///
/// Either every dependency edge resolves and the full mapping is returned,
/// or every unsatisfied edge is returned. A mix never yields a partial
/// mapping.
pub fn resolve<F>(root: &Project, fetcher: &F) -> Result<Resolution, ResolutionFailure>
where
    F: Fetcher + ?Sized,
{
    resolve_with(root, fetcher, &ResolverConfig::default())
}

/// Resolve with explicit settings.
///
/// Edges are examined one at a time in queue order, then in the dependent's
/// declaration order, and each fetch completes before the next is issued.
pub fn resolve_with<F>(
    root: &Project,
    fetcher: &F,
    config: &ResolverConfig,
) -> Result<Resolution, ResolutionFailure>
where
    F: Fetcher + ?Sized,
{
    let mut traversal = Traversal::new(root, config.record_skipped);

    while let Some(current) = traversal.next_project() {
        for (identifier, requirement) in current.dependencies() {
            if traversal.skip_if_visited(&current, identifier, requirement) {
                continue;
            }
            tracing::debug!("Fetching {identifier} {requirement} for {current}");
            let result = fetcher.fetch(identifier, requirement);
            traversal.record(&current, identifier, requirement, result);
        }
    }

    traversal.finish()
}

/// Resolve with the fetches for one project's dependencies in flight
/// together, at most `config.fetch_concurrency` at a time.
///
/// Results are applied in declaration order regardless of completion order,
/// so the outcome (including failure order) matches [`resolve_with`].
pub async fn resolve_concurrent<F>(
    root: &Project,
    fetcher: &F,
    config: &ResolverConfig,
) -> Result<Resolution, ResolutionFailure>
where
    F: AsyncFetcher + ?Sized,
{
    let mut traversal = Traversal::new(root, config.record_skipped);
    let concurrency = config.effective_concurrency();

    while let Some(current) = traversal.next_project() {
        let pending: Vec<(&Identifier, &SemanticVersionRequirement)> = current
            .dependencies()
            .iter()
            .filter(|(identifier, requirement)| {
                !traversal.skip_if_visited(&current, identifier, requirement)
            })
            .collect();
        if pending.is_empty() {
            continue;
        }

        tracing::debug!("Fetching {} dependencies of {current}", pending.len());
        let results: Vec<FetchResult> = stream::iter(
            pending
                .iter()
                .map(|&(identifier, requirement)| fetcher.fetch_async(identifier, requirement)),
        )
        .buffered(concurrency)
        .collect()
        .await;

        for ((identifier, requirement), result) in pending.into_iter().zip(results) {
            // an earlier result in this batch may have claimed the name
            if traversal.skip_if_visited(&current, identifier, requirement) {
                continue;
            }
            traversal.record(&current, identifier, requirement, result);
        }
    }

    traversal.finish()
}

/// Mutable state of a single resolution run.
struct Traversal {
    root: Identifier,
    queue: VecDeque<Project>,
    visited: HashSet<Identifier>,
    resolved: Vec<(Project, SemanticVersion)>,
    failures: Vec<VersionRequirementNotSatisfied>,
    skipped: SkipReport,
    graph: DependencyGraph,
    record_skipped: bool,
    fetches: usize,
}

impl Traversal {
    fn new(root: &Project, record_skipped: bool) -> Self {
        let mut visited = HashSet::new();
        visited.insert(root.name().clone());
        Self {
            root: root.name().clone(),
            queue: VecDeque::from([root.clone()]),
            visited,
            resolved: Vec::new(),
            failures: Vec::new(),
            skipped: SkipReport::new(),
            graph: DependencyGraph::new(root.name().clone()),
            record_skipped,
            fetches: 0,
        }
    }

    fn next_project(&mut self) -> Option<Project> {
        self.queue.pop_front()
    }

    /// Returns `true` if the edge's target was already visited. Such edges
    /// are neither fetched nor checked against the earlier choice.
    fn skip_if_visited(
        &mut self,
        dependent: &Project,
        identifier: &Identifier,
        requirement: &SemanticVersionRequirement,
    ) -> bool {
        if !self.visited.contains(identifier) {
            return false;
        }
        tracing::trace!("Skipping {identifier} {requirement} from {dependent}: already visited");
        if self.record_skipped {
            self.skipped.add(SkippedEdge {
                dependent: dependent.name().clone(),
                identifier: identifier.clone(),
                requirement: requirement.clone(),
            });
        }
        true
    }

    /// Apply one fetch result for the edge `dependent -> identifier`.
    fn record(
        &mut self,
        dependent: &Project,
        identifier: &Identifier,
        requirement: &SemanticVersionRequirement,
        result: FetchResult,
    ) {
        self.fetches += 1;
        self.visited.insert(identifier.clone());

        let Some((version, project)) = result.into_latest() else {
            tracing::debug!("No candidate for {identifier} {requirement}");
            self.fail(identifier, requirement);
            return;
        };

        if project.name() != identifier {
            tracing::warn!(
                "Fetcher answered {identifier} {requirement} with a project named {}",
                project.name()
            );
            if !self.visited.insert(project.name().clone()) {
                tracing::warn!("Discarding {} v{version}: already visited", project.name());
                self.fail(identifier, requirement);
                return;
            }
        }

        tracing::debug!("Selected {} v{version} for {requirement}", project.name());
        self.graph.add_resolved(
            dependent.name(),
            project.name().clone(),
            version.clone(),
            requirement.clone(),
        );
        self.resolved.push((project.clone(), version));
        self.queue.push_back(project);
    }

    fn fail(&mut self, identifier: &Identifier, requirement: &SemanticVersionRequirement) {
        self.failures.push(VersionRequirementNotSatisfied::new(
            identifier.clone(),
            requirement.clone(),
        ));
    }

    fn finish(self) -> Result<Resolution, ResolutionFailure> {
        if let Some(failure) = ResolutionFailure::new(self.failures) {
            tracing::info!(
                "Resolution of {} failed after {} fetches: {failure}",
                self.root,
                self.fetches
            );
            return Err(failure);
        }
        tracing::info!(
            "Resolved {} packages for {} with {} fetches",
            self.resolved.len(),
            self.root,
            self.fetches
        );
        Ok(Resolution::new(
            self.root,
            self.resolved,
            self.skipped,
            self.graph,
        ))
    }
}
