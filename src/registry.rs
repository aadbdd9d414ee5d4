//! Type Registry
//!
//! Read-only store of already-reflected type descriptors. Resolution requests
//! name their source types; the registry turns those names into descriptors
//! and rejects names it has never seen.

use crate::core::SourceType;
use crate::errors::{ResolutionError, Result};
use im::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, Arc<SourceType>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of descriptors into a registry
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        let descriptors: Vec<SourceType> = serde_json::from_str(contents)?;
        Ok(descriptors.into_iter().collect())
    }

    /// Register a descriptor, replacing any previous one of the same name
    pub fn register(&mut self, source_type: SourceType) -> Arc<SourceType> {
        let source_type = Arc::new(source_type);
        self.types
            .insert(source_type.name.clone(), Arc::clone(&source_type));
        source_type
    }

    pub fn with_type(mut self, source_type: SourceType) -> Self {
        self.register(source_type);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<SourceType>> {
        self.types.get(normalize_name(name)).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolve names into descriptors, collapsing duplicates.
    ///
    /// The first occurrence of each name fixes its position.
    pub fn resolve<I, S>(&self, names: I) -> Result<Vec<Arc<SourceType>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolved: Vec<Arc<SourceType>> = Vec::new();

        for name in names {
            let name = name.as_ref();
            let source_type = self
                .get(name)
                .ok_or_else(|| ResolutionError::invalid_type_reference(name))?;

            if !resolved.iter().any(|seen| seen.name == source_type.name) {
                resolved.push(source_type);
            }
        }

        Ok(resolved)
    }
}

impl FromIterator<SourceType> for TypeRegistry {
    fn from_iter<T: IntoIterator<Item = SourceType>>(iter: T) -> Self {
        let mut registry = Self::new();
        for source_type in iter {
            registry.register(source_type);
        }
        registry
    }
}

/// Fully qualified names may be written with a leading namespace separator
fn normalize_name(name: &str) -> &str {
    name.strip_prefix('\\').unwrap_or(name)
}
