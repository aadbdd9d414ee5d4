//! Type Classifier
//!
//! Partitions source types into the single base type, capability types and
//! mixin types. Pure; fails fast before any merging happens.

use crate::core::{SourceType, TypeKind};
use crate::definition::request::dedup_types;
use crate::errors::{ResolutionError, Result};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedTypes {
    pub base: Option<Arc<SourceType>>,
    /// In listed order; first listed wins on conflicts
    pub capabilities: Vec<Arc<SourceType>>,
    /// In listed order; first listed wins on conflicts
    pub mixins: Vec<Arc<SourceType>>,
}

impl ClassifiedTypes {
    pub fn base_name(&self) -> Option<&str> {
        self.base.as_ref().map(|t| t.name.as_str())
    }

    pub fn capability_names(&self) -> Vec<String> {
        self.capabilities.iter().map(|t| t.name.clone()).collect()
    }

    pub fn mixin_names(&self) -> Vec<String> {
        self.mixins.iter().map(|t| t.name.clone()).collect()
    }

    /// The type a default generated name is derived from
    pub fn primary_type(&self) -> Option<&Arc<SourceType>> {
        self.base
            .as_ref()
            .or_else(|| self.capabilities.first())
            .or_else(|| self.mixins.first())
    }
}

/// Classify source types, collapsing duplicates first.
pub fn classify(types: &[Arc<SourceType>]) -> Result<ClassifiedTypes> {
    let mut classified = ClassifiedTypes::default();

    for source_type in dedup_types(types.iter().cloned()) {
        match source_type.kind {
            TypeKind::Extensible => {
                if source_type.is_sealed {
                    return Err(ResolutionError::sealed(&source_type.name));
                }
                if let Some(base) = &classified.base {
                    return Err(ResolutionError::multiple_base_types(
                        &base.name,
                        &source_type.name,
                    ));
                }
                classified.base = Some(source_type);
            }
            TypeKind::Capability => classified.capabilities.push(source_type),
            TypeKind::Mixin => classified.mixins.push(source_type),
        }
    }

    Ok(classified)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &[SourceType]) -> Vec<Arc<SourceType>> {
        list.iter().cloned().map(Arc::new).collect()
    }

    #[test]
    fn test_partitions_by_kind_preserving_order() {
        let classified = classify(&types(&[
            SourceType::capability("Countable"),
            SourceType::mixin("Loud"),
            SourceType::extensible("Animal"),
            SourceType::capability("Nameable"),
            SourceType::mixin("Quiet"),
        ]))
        .unwrap();

        assert_eq!(classified.base_name(), Some("Animal"));
        assert_eq!(classified.capability_names(), vec!["Countable", "Nameable"]);
        assert_eq!(classified.mixin_names(), vec!["Loud", "Quiet"]);
    }

    #[test]
    fn test_second_base_type_fails() {
        let err = classify(&types(&[
            SourceType::extensible("Animal"),
            SourceType::capability("Nameable"),
            SourceType::extensible("Vehicle"),
        ]))
        .unwrap_err();

        assert_eq!(err, ResolutionError::multiple_base_types("Animal", "Vehicle"));
    }

    #[test]
    fn test_sealed_base_fails() {
        let err = classify(&types(&[SourceType::extensible("Final").sealed()])).unwrap_err();

        assert_eq!(err, ResolutionError::sealed("Final"));
    }

    #[test]
    fn test_duplicates_do_not_count_as_multiple_bases() {
        let animal = SourceType::extensible("Animal");
        let classified = classify(&types(&[animal.clone(), animal])).unwrap();

        assert_eq!(classified.base_name(), Some("Animal"));
    }

    #[test]
    fn test_primary_type_falls_back_to_capabilities_then_mixins() {
        let classified = classify(&types(&[
            SourceType::mixin("Loud"),
            SourceType::capability("Nameable"),
        ]))
        .unwrap();

        assert_eq!(classified.primary_type().unwrap().name, "Nameable");
        assert!(classify(&[]).unwrap().primary_type().is_none());
    }
}
