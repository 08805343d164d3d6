//! The tree of "who pulled in whom" built during resolution.
//!
//! Each resolved project has exactly one incoming edge: the edge from the
//! project whose dependency first reached it. Skipped edges are not part of
//! the graph; see [`crate::conflict`].

use std::collections::HashMap;
use std::fmt;

use buckle_core::version::{Identifier, SemanticVersion, SemanticVersionRequirement};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

/// A node in the resolved dependency graph.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResolvedNode {
    pub name: Identifier,
    /// `None` for the root project, which is not itself resolved.
    pub version: Option<SemanticVersion>,
}

impl fmt::Display for ResolvedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{} v{v}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Resolution tree backed by petgraph. Edge weights are the requirement that
/// selected the child.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<ResolvedNode, SemanticVersionRequirement>,
    index: HashMap<Identifier, NodeIndex>,
    root: NodeIndex,
}

impl DependencyGraph {
    pub fn new(root: Identifier) -> Self {
        let mut graph = DiGraph::new();
        let idx = graph.add_node(ResolvedNode {
            name: root.clone(),
            version: None,
        });
        let mut index = HashMap::new();
        index.insert(root, idx);
        Self {
            graph,
            index,
            root: idx,
        }
    }

    /// Record that `parent` pulled in `name` at `version` via `requirement`.
    ///
    /// Returns `None` if `parent` is unknown or `name` is already present.
    pub fn add_resolved(
        &mut self,
        parent: &Identifier,
        name: Identifier,
        version: SemanticVersion,
        requirement: SemanticVersionRequirement,
    ) -> Option<NodeIndex> {
        let parent_idx = self.find(parent.as_str())?;
        if self.index.contains_key(&name) {
            return None;
        }
        let idx = self.graph.add_node(ResolvedNode {
            name: name.clone(),
            version: Some(version),
        });
        self.index.insert(name, idx);
        self.graph.add_edge(parent_idx, idx, requirement);
        Some(idx)
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Look up a node by package name.
    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &ResolvedNode {
        &self.graph[idx]
    }

    /// Projects pulled in by a node, in resolution order.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<(NodeIndex, &SemanticVersionRequirement)> {
        let mut deps: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), e.weight()))
            .collect();
        // petgraph yields outgoing edges newest first
        deps.sort_by_key(|(target, _)| target.index());
        deps
    }

    /// The node that pulled this one in, if it is not the root.
    pub fn dependent_of(&self, idx: NodeIndex) -> Option<(NodeIndex, &SemanticVersionRequirement)> {
        self.graph
            .edges_directed(idx, Direction::Incoming)
            .next()
            .map(|e| (e.source(), e.weight()))
    }

    /// Chain of nodes from the root down to `name`.
    pub fn find_path(&self, name: &str) -> Option<Vec<&ResolvedNode>> {
        let mut idx = self.find(name)?;
        let mut path = vec![&self.graph[idx]];
        while let Some((parent, _)) = self.dependent_of(idx) {
            path.push(&self.graph[parent]);
            idx = parent;
        }
        path.reverse();
        Some(path)
    }

    /// Render the tree, optionally stopping below `max_depth`.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = format!("{}\n", self.graph[self.root]);
        let deps = self.dependencies_of(self.root);
        let count = deps.len();
        for (i, (idx, _)) in deps.iter().enumerate() {
            self.print_subtree(&mut output, *idx, "", i == count - 1, 1, max_depth);
        }
        output
    }

    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        output.push_str(&format!("{prefix}{connector}{}\n", self.graph[idx]));

        if max_depth.is_some_and(|max| depth >= max) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let deps = self.dependencies_of(idx);
        let count = deps.len();
        for (i, (child, _)) in deps.iter().enumerate() {
            self.print_subtree(output, *child, &child_prefix, i == count - 1, depth + 1, max_depth);
        }
    }

    /// Number of resolved nodes (excluding root).
    pub fn len(&self) -> usize {
        self.graph.node_count() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
