//! Mock builder facade
//!
//! Accumulates source types and custom members for one generated type and
//! produces the [`ResolutionRequest`] the resolver consumes. Every mutator
//! validates its input before touching the builder, so a failed call leaves
//! the builder as it was.

pub mod naming;

pub use naming::{default_type_name, LabelSequencer};

use crate::config::ResolverConfig;
use crate::core::SourceType;
use crate::definition::request::dedup_types;
use crate::definition::{AdHocValue, CustomMembers, CustomMethod, ResolutionRequest};
use crate::errors::{ResolutionError, Result};
use crate::registry::TypeRegistry;
use crate::resolution::{classify, IdentifierValidator, Resolution, Resolver};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug)]
pub struct MockBuilder<'r> {
    registry: &'r TypeRegistry,
    validator: IdentifierValidator,
    prefix: String,
    types: Vec<Arc<SourceType>>,
    custom: CustomMembers,
    type_name: Option<String>,
    /// Default name drawn on first request, reused afterwards
    generated_name: Option<String>,
    finalized: bool,
}

impl<'r> MockBuilder<'r> {
    pub fn new(registry: &'r TypeRegistry, config: &ResolverConfig) -> Self {
        Self {
            registry,
            validator: IdentifierValidator::new(&config.identifiers),
            prefix: config.naming.prefix.clone(),
            types: Vec::new(),
            custom: CustomMembers::new(),
            type_name: None,
            generated_name: None,
            finalized: false,
        }
    }

    /// Add source types by name
    pub fn like<I, S>(&mut self, names: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ensure_open()?;
        let resolved = self.registry.resolve(names)?;
        self.add_types(resolved)
    }

    /// Add already-reflected source types
    pub fn like_types<I>(&mut self, types: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Arc<SourceType>>,
    {
        self.ensure_open()?;
        self.add_types(types)
    }

    /// Add members from an ad-hoc definition map
    pub fn like_definition<I, K>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, AdHocValue)>,
        K: AsRef<str>,
    {
        self.ensure_open()?;
        let members = CustomMembers::from_definition(entries)?;
        self.custom.merge(members);
        Ok(self)
    }

    /// Add members from an ad-hoc definition given as a JSON object
    pub fn like_json(&mut self, definition: &Value) -> Result<&mut Self> {
        self.ensure_open()?;
        let members = CustomMembers::from_json(definition)?;
        self.custom.merge(members);
        Ok(self)
    }

    pub fn add_method(&mut self, name: impl Into<String>, method: CustomMethod) -> Result<&mut Self> {
        self.ensure_open()?;
        self.custom.methods.insert(name.into(), method);
        Ok(self)
    }

    pub fn add_static_method(
        &mut self,
        name: impl Into<String>,
        method: CustomMethod,
    ) -> Result<&mut Self> {
        self.ensure_open()?;
        self.custom.static_methods.insert(name.into(), method);
        Ok(self)
    }

    pub fn add_property(&mut self, name: impl Into<String>, value: Value) -> Result<&mut Self> {
        self.ensure_open()?;
        self.custom.properties.insert(name.into(), value);
        Ok(self)
    }

    pub fn add_static_property(
        &mut self,
        name: impl Into<String>,
        value: Value,
    ) -> Result<&mut Self> {
        self.ensure_open()?;
        self.custom.static_properties.insert(name.into(), value);
        Ok(self)
    }

    pub fn add_constant(&mut self, name: impl Into<String>, value: Value) -> Result<&mut Self> {
        self.ensure_open()?;
        self.custom.constants.insert(name.into(), value);
        Ok(self)
    }

    /// Set an explicit name for the generated type
    pub fn named(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        self.ensure_open()?;
        let name = name.into();
        if !self.validator.is_valid_type_name(&name) {
            return Err(ResolutionError::invalid_type_name(name));
        }
        self.type_name = Some(name);
        Ok(self)
    }

    /// Prevent further changes. Idempotent.
    pub fn finalize(&mut self) -> &mut Self {
        self.finalized = true;
        self
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn types(&self) -> &[Arc<SourceType>] {
        &self.types
    }

    pub fn custom(&self) -> &CustomMembers {
        &self.custom
    }

    /// Finalize and produce the resolution request
    pub fn request(&mut self) -> ResolutionRequest {
        self.finalize();
        ResolutionRequest::new(
            self.types.iter().cloned(),
            self.custom.clone(),
            self.type_name.clone(),
        )
    }

    /// Finalize and resolve
    pub fn resolve(&mut self, resolver: &Resolver) -> Result<Resolution> {
        let request = self.request();
        resolver.resolve(&request)
    }

    /// The explicit type name, or a default one drawn from `sequencer` on the
    /// first call and returned unchanged by every later call
    pub fn type_name(&mut self, sequencer: &LabelSequencer) -> Result<String> {
        self.finalize();
        if let Some(name) = self.type_name.as_ref().or(self.generated_name.as_ref()) {
            return Ok(name.clone());
        }
        let classified = classify(&self.types)?;
        let name = default_type_name(&self.prefix, &classified, sequencer.next());
        self.generated_name = Some(name.clone());
        Ok(name)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.finalized {
            Err(ResolutionError::FinalizedDefinition)
        } else {
            Ok(())
        }
    }

    /// Classify the combined type list before committing to it. Types are
    /// identified by name, so two different descriptors sharing one name are
    /// rejected rather than collapsed.
    fn add_types<I>(&mut self, types: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Arc<SourceType>>,
    {
        let incoming: Vec<Arc<SourceType>> = types.into_iter().collect();
        for candidate in &incoming {
            let first = self
                .types
                .iter()
                .chain(incoming.iter())
                .find(|seen| seen.name == candidate.name);
            if first.is_some_and(|first| first != candidate) {
                return Err(ResolutionError::conflicting_type(&candidate.name));
            }
        }

        let combined = dedup_types(self.types.iter().cloned().chain(incoming));
        classify(&combined)?;
        self.types = combined;
        Ok(self)
    }
}

/// A copy is always open for modification
impl Clone for MockBuilder<'_> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry,
            validator: self.validator.clone(),
            prefix: self.prefix.clone(),
            types: self.types.clone(),
            custom: self.custom.clone(),
            type_name: self.type_name.clone(),
            generated_name: None,
            finalized: false,
        }
    }
}
