//! Shared-base reference counting.
//!
//! After the eligible-class list is final, every eligible class's ancestor
//! chain is walked once, incrementing a count per ancestor encountered.
//! Any class with a nonzero count is referenced as a shared base and gets
//! its own named base type; everything else has its fields inlined at each
//! use site. The counting pass must fully complete before synthesis reads
//! it — the one hard sequencing constraint in the pipeline.

use crate::session::Session;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Ancestor usage counts, preserving first-encounter order so base types
/// are emitted in a stable order run to run.
#[derive(Debug, Default)]
pub struct ReferenceCounts {
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl ReferenceCounts {
    /// Returns `true` if the class is referenced as a shared base.
    #[must_use]
    pub fn contains(&self, class: &str) -> bool {
        self.counts.contains_key(class)
    }

    /// The count for a class; zero means "not shared".
    #[must_use]
    pub fn get(&self, class: &str) -> usize {
        self.counts.get(class).copied().unwrap_or(0)
    }

    /// Counted classes in first-encounter order.
    pub fn ordered(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of distinct counted classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing was counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn increment(&mut self, class: &str) {
        match self.counts.get_mut(class) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(class.to_string(), 1);
                self.order.push(class.to_string());
            }
        }
    }
}

impl Session {
    /// Counts ancestor references across the eligible-class list.
    ///
    /// Each class's chain contributes at most once: a shared chain prefix
    /// reached through several descendants is walked a single time, so an
    /// ancestor's count reflects its distinct direct descendants, not
    /// every path to it.
    #[must_use]
    pub fn count_references(&mut self, eligible: &[String]) -> ReferenceCounts {
        let mut counts = ReferenceCounts::default();
        let mut visited: HashSet<String> = HashSet::new();
        for class in eligible {
            self.count_chain(class, &mut counts, &mut visited);
        }
        info!(shared = counts.len(), "counted ancestor references");
        counts
    }

    fn count_chain(
        &mut self,
        class: &str,
        counts: &mut ReferenceCounts,
        visited: &mut HashSet<String>,
    ) {
        if !visited.insert(class.to_string()) {
            return;
        }
        if let Some(superclass) = self.corpus().superclass(class).map(str::to_string) {
            counts.increment(&superclass);
            self.count_chain(&superclass, counts, visited);
        }
    }
}
