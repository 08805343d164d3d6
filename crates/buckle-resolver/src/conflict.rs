//! Reporting of dependency edges skipped by first-seen-wins visiting.
//!
//! An edge is skipped when its target was already visited at the time it was
//! examined. The resolver never re-fetches or re-checks such an edge, so a
//! stricter requirement discovered later has no effect on the outcome. This
//! report keeps those edges so callers can audit them afterwards.

use std::fmt;

use buckle_core::version::{Identifier, SemanticVersionRequirement};

/// All skipped edges of one resolution, in examination order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipReport {
    pub skipped: Vec<SkippedEdge>,
}

/// An edge `dependent -> identifier` that was not evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEdge {
    pub dependent: Identifier,
    pub identifier: Identifier,
    pub requirement: SemanticVersionRequirement,
}

impl SkipReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, edge: SkippedEdge) {
        self.skipped.push(edge);
    }

    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SkippedEdge> {
        self.skipped.iter()
    }
}

impl fmt::Display for SkipReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.skipped.is_empty() {
            return write!(f, "No skipped requirements.");
        }
        writeln!(f, "Skipped requirements ({}):", self.skipped.len())?;
        for edge in &self.skipped {
            writeln!(
                f,
                "  {} requires {} {} (already visited)",
                edge.dependent, edge.identifier, edge.requirement
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for SkippedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} {}",
            self.dependent, self.identifier, self.requirement
        )
    }
}
