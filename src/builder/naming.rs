//! Default names for generated types

use crate::resolution::ClassifiedTypes;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Monotonic label source, owned by whoever generates types
#[derive(Debug, Default)]
pub struct LabelSequencer {
    next: AtomicUsize,
}

impl LabelSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting at `first`
    pub fn starting_at(first: usize) -> Self {
        Self {
            next: AtomicUsize::new(first),
        }
    }

    pub fn next(&self) -> usize {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// `{prefix}_{ShortName}_{label}`, or `{prefix}_{label}` without source types
pub fn default_type_name(prefix: &str, classified: &ClassifiedTypes, label: usize) -> String {
    match classified.primary_type() {
        Some(primary) => format!("{}_{}_{}", prefix, primary.short_name(), label),
        None => format!("{}_{}", prefix, label),
    }
}
