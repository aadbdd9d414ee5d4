use super::custom::CustomMembers;
use crate::core::SourceType;
use std::sync::Arc;

/// Everything needed to resolve one generated type.
///
/// Built once per mock definition, consumed by the resolver, never mutated
/// after classification begins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionRequest {
    types: Vec<Arc<SourceType>>,
    custom: CustomMembers,
    type_name: Option<String>,
}

impl ResolutionRequest {
    /// Duplicate source types are collapsed; the first occurrence keeps its place.
    /// Types are identified by name, so descriptors are assumed unique by name.
    pub fn new(
        types: impl IntoIterator<Item = Arc<SourceType>>,
        custom: CustomMembers,
        type_name: Option<String>,
    ) -> Self {
        Self {
            types: dedup_types(types),
            custom,
            type_name,
        }
    }

    pub fn types(&self) -> &[Arc<SourceType>] {
        &self.types
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }

    pub fn custom(&self) -> &CustomMembers {
        &self.custom
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }
}

pub(crate) fn dedup_types(types: impl IntoIterator<Item = Arc<SourceType>>) -> Vec<Arc<SourceType>> {
    let mut unique: Vec<Arc<SourceType>> = Vec::new();
    for source_type in types {
        if !unique.iter().any(|seen| seen.name == source_type.name) {
            unique.push(source_type);
        }
    }
    unique
}
