//! Category indexer: maps a user's category number to a source's fetch target.

use crate::models::CategoryIndex;
use std::collections::HashMap;

/// Ordered category labels plus the fetch target behind each label.
///
/// Built once when a source is constructed and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CategoryTable<T> {
    labels: Vec<String>,
    targets: HashMap<String, T>,
}

/// Outcome of resolving a [`CategoryIndex`] against a [`CategoryTable`].
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved<'a, T> {
    /// The number is outside `[1, len]`.
    OutOfRange,
    /// The label exists but nothing is mapped to it.
    Unmapped(&'a str),
    Target { label: &'a str, target: &'a T },
}

impl<T> CategoryTable<T> {
    /// Build from an explicit label order and a separate label → target map.
    ///
    /// Labels missing from `targets` resolve to [`Resolved::Unmapped`].
    pub fn new(labels: Vec<String>, targets: HashMap<String, T>) -> Self {
        Self { labels, targets }
    }

    /// Build labels and targets together so every label has a target.
    pub fn from_pairs<L, I>(pairs: I) -> Self
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, T)>,
    {
        let mut labels = Vec::new();
        let mut targets = HashMap::new();
        for (label, target) in pairs {
            let label = label.into();
            labels.push(label.clone());
            targets.insert(label, target);
        }
        Self { labels, targets }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn resolve(&self, index: CategoryIndex) -> Resolved<'_, T> {
        let Some(position) = index.position(self.labels.len()) else {
            return Resolved::OutOfRange;
        };
        let label = self.labels[position].as_str();
        match self.targets.get(label) {
            Some(target) => Resolved::Target { label, target },
            None => Resolved::Unmapped(label),
        }
    }
}
