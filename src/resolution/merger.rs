//! Method Merger
//!
//! Folds classified source types and custom members into one method table per
//! namespace. Precedence, lowest first:
//!
//! 1. constructors and final methods of the base are unmockable
//! 2. base methods
//! 3. mixin defaults, first listed mixin wins
//! 4. capability contracts, first listed capability wins
//! 5. names that cannot be declared as methods are dropped
//! 6. custom static methods
//! 7. custom instance methods
//!
//! Steps 2-4 only fill names that are still free. Steps 6 and 7 overwrite
//! unconditionally, including unmockable and reserved names.

use super::classifier::ClassifiedTypes;
use super::identifier::IdentifierValidator;
use crate::core::{MethodSignature, SourceType};
use crate::definition::{CustomMembers, MethodDefinition, MethodDefinitionCollection};
use im::OrdSet;
use indexmap::IndexMap;
use tracing::debug;

/// Output of a merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedMethods {
    pub methods: MethodDefinitionCollection,
    /// Base methods excluded from automatic overriding
    pub unmockable: OrdSet<String>,
}

pub struct MethodMerger<'a> {
    validator: &'a IdentifierValidator,
}

impl<'a> MethodMerger<'a> {
    pub fn new(validator: &'a IdentifierValidator) -> Self {
        Self { validator }
    }

    pub fn merge(&self, classified: &ClassifiedTypes, custom: &CustomMembers) -> MergedMethods {
        let unmockable = classified
            .base
            .as_deref()
            .map(unmockable_names)
            .unwrap_or_default();

        let mut table: IndexMap<String, MethodDefinition> = IndexMap::new();
        let mut mixin_methods = Vec::new();

        if let Some(base) = &classified.base {
            for method in considered(base).filter(|m| !unmockable.contains(&m.name)) {
                table.insert(
                    method.name.clone(),
                    MethodDefinition::inherited(method.clone(), &base.name),
                );
            }
        }

        for mixin in &classified.mixins {
            for method in considered(mixin) {
                if !method.is_abstract {
                    mixin_methods.push(MethodDefinition::mixin_default(method.clone(), &mixin.name));
                }
                if unmockable.contains(&method.name) {
                    continue;
                }
                table
                    .entry(method.name.clone())
                    .or_insert_with(|| MethodDefinition::mixin_default(method.clone(), &mixin.name));
            }
        }

        for capability in &classified.capabilities {
            for method in considered(capability) {
                if unmockable.contains(&method.name) {
                    continue;
                }
                table
                    .entry(method.name.clone())
                    .or_insert_with(|| MethodDefinition::contract(method.clone(), &capability.name));
            }
        }

        self.drop_undeclarable(&mut table);

        let (mut statics, mut instance): (IndexMap<_, _>, IndexMap<_, _>) = table
            .into_iter()
            .partition(|(_, definition)| definition.is_static());

        for (name, method) in &custom.static_methods {
            instance.shift_remove(name);
            statics.insert(
                name.clone(),
                MethodDefinition::custom(name, true, method.clone()),
            );
        }

        for (name, method) in &custom.methods {
            if statics.get(name).is_some_and(|existing| !existing.is_custom()) {
                statics.shift_remove(name);
            }
            instance.insert(
                name.clone(),
                MethodDefinition::custom(name, false, method.clone()),
            );
        }

        if !unmockable.is_empty() {
            debug!(unmockable = ?unmockable, "Excluded unmockable base methods");
        }

        MergedMethods {
            methods: MethodDefinitionCollection::new(instance, statics, mixin_methods),
            unmockable,
        }
    }

    fn drop_undeclarable(&self, table: &mut IndexMap<String, MethodDefinition>) {
        let valid = self
            .validator
            .filter_valid_names(table.keys().map(String::as_str));

        table.retain(|name, _| {
            let keep = valid.contains(name);
            if !keep {
                debug!(method = %name, "Dropping method that is not a legal identifier");
            }
            keep
        });
    }
}

/// Private members are never considered
fn considered(source_type: &SourceType) -> impl Iterator<Item = &MethodSignature> {
    source_type.methods.iter().filter(|m| !m.is_private())
}

fn unmockable_names(base: &SourceType) -> OrdSet<String> {
    considered(base)
        .filter(|m| m.is_unmockable())
        .map(|m| m.name.clone())
        .collect()
}
