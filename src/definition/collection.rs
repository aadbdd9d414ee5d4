//! Resolved method tables handed to the code generator

use super::method::MethodDefinition;
use crate::core::Visibility;
use indexmap::IndexMap;

/// The final, conflict-free method tables of a generated type.
///
/// Static and instance methods live in separate namespaces. Each name appears
/// at most once per table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodDefinitionCollection {
    instance: IndexMap<String, MethodDefinition>,
    statics: IndexMap<String, MethodDefinition>,
    mixin_methods: Vec<MethodDefinition>,
}

impl MethodDefinitionCollection {
    pub fn new(
        instance: IndexMap<String, MethodDefinition>,
        statics: IndexMap<String, MethodDefinition>,
        mixin_methods: Vec<MethodDefinition>,
    ) -> Self {
        Self {
            instance,
            statics,
            mixin_methods,
        }
    }

    pub fn instance_methods(&self) -> &IndexMap<String, MethodDefinition> {
        &self.instance
    }

    pub fn static_methods(&self) -> &IndexMap<String, MethodDefinition> {
        &self.statics
    }

    /// Concrete mixin bodies kept for default-body emission, including those
    /// shadowed in the tables
    pub fn mixin_methods(&self) -> &[MethodDefinition] {
        &self.mixin_methods
    }

    pub fn get(&self, name: &str) -> Option<&MethodDefinition> {
        self.instance.get(name)
    }

    pub fn get_static(&self, name: &str) -> Option<&MethodDefinition> {
        self.statics.get(name)
    }

    /// Static and instance definitions, statics first
    pub fn all_methods(&self) -> impl Iterator<Item = &MethodDefinition> {
        self.statics.values().chain(self.instance.values())
    }

    pub fn public_methods(&self) -> impl Iterator<Item = &MethodDefinition> {
        with_visibility(&self.instance, Visibility::Public)
    }

    pub fn protected_methods(&self) -> impl Iterator<Item = &MethodDefinition> {
        with_visibility(&self.instance, Visibility::Protected)
    }

    pub fn public_static_methods(&self) -> impl Iterator<Item = &MethodDefinition> {
        with_visibility(&self.statics, Visibility::Public)
    }

    pub fn protected_static_methods(&self) -> impl Iterator<Item = &MethodDefinition> {
        with_visibility(&self.statics, Visibility::Protected)
    }

    pub fn len(&self) -> usize {
        self.instance.len() + self.statics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instance.is_empty() && self.statics.is_empty()
    }
}

fn with_visibility(
    table: &IndexMap<String, MethodDefinition>,
    visibility: Visibility,
) -> impl Iterator<Item = &MethodDefinition> {
    table
        .values()
        .filter(move |definition| definition.visibility() == visibility)
}
