//! The task tree: named nodes with merge-on-insert children.
//!
//! Children are unique by lowercased name and keep first-insertion order.
//! Inserting a child whose name already exists (in any casing) merges it
//! into the existing node, adding durations and recursing into children.

use chrono::Duration;
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::duration::Rounding;

/// A named task with its own duration and ordered sub-tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskNode {
    /// Display name, in the casing first seen.
    name: String,

    /// Time attributed directly to this task.
    own_duration: Duration,

    /// Sub-tasks keyed by lowercased name.
    children: IndexMap<String, TaskNode>,
}

impl Default for TaskNode {
    fn default() -> Self {
        Self::root()
    }
}

impl TaskNode {
    /// Creates the unnamed root of an aggregate tree.
    pub fn root() -> Self {
        Self::new("", Duration::zero())
    }

    /// Creates a childless node.
    pub fn new(name: impl Into<String>, own_duration: Duration) -> Self {
        Self {
            name: name.into(),
            own_duration,
            children: IndexMap::new(),
        }
    }

    /// Builds a single-branch chain `names[0] -> names[1] -> ...`.
    ///
    /// Only the deepest node receives `duration`. Returns `None` when
    /// `names` is empty.
    pub fn from_chain<I, S>(names: I, duration: Duration) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        I::IntoIter: DoubleEndedIterator,
        S: Into<String>,
    {
        let mut names = names.into_iter().rev();
        let mut node = Self::new(names.next()?, duration);
        for name in names {
            let mut parent = Self::new(name, Duration::zero());
            parent.children.insert(node.key(), node);
            node = parent;
        }
        Some(node)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The case-insensitive identity of this node among its siblings.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn own_duration(&self) -> Duration {
        self.own_duration
    }

    /// Own duration plus the total of every descendant.
    pub fn total_duration(&self) -> Duration {
        self.children
            .values()
            .fold(self.own_duration, |total, child| total + child.total_duration())
    }

    /// Sub-tasks in first-insertion order.
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.children.values()
    }

    /// Looks up a direct child by name, ignoring case.
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children.get(&name.to_lowercase())
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Nodes without children, depth-first in display order.
    pub fn leaves(&self) -> Vec<&Self> {
        let mut leaves = Vec::new();
        let mut stack: Vec<&Self> = self.children.values().rev().collect();
        while let Some(node) = stack.pop() {
            if node.has_children() {
                stack.extend(node.children.values().rev());
            } else {
                leaves.push(node);
            }
        }
        leaves
    }

    /// Inserts `node` as a child, merging with an existing same-named child.
    ///
    /// A merged node adds its own duration to the existing one and its
    /// children are merged recursively; the existing display name is kept.
    pub fn merge(&mut self, node: Self) {
        match self.children.entry(node.key()) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.own_duration += node.own_duration;
                for child in node.children.into_values() {
                    existing.merge(child);
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(node);
            }
        }
    }

    /// Copy of this tree with every non-zero own duration rounded.
    ///
    /// Zero durations stay zero so pure grouping nodes are not inflated by
    /// the rounding minimum.
    #[must_use]
    pub fn rounded(&self, rounding: &Rounding) -> Self {
        let own_duration = if self.own_duration.is_zero() {
            self.own_duration
        } else {
            rounding.round(self.own_duration)
        };

        Self {
            name: self.name.clone(),
            own_duration,
            children: self
                .children
                .iter()
                .map(|(key, child)| (key.clone(), child.rounded(rounding)))
                .collect(),
        }
    }
}
