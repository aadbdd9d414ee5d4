//! Mock Definition Resolution Engine
//!
//! Turns a [`ResolutionRequest`] into the method tables and fingerprint a
//! code generator needs:
//!
//! ```text
//! classify -> merge (+ identifier validation) -> fingerprint
//! ```
//!
//! A [`Resolver`] holds no mutable state, so one instance can serve
//! concurrent requests.

pub mod classifier;
pub mod fingerprint;
pub mod identifier;
pub mod merger;

pub use classifier::{classify, ClassifiedTypes};
pub use fingerprint::{CallableIdentity, CustomMethodIdentity, Fingerprint};
pub use identifier::IdentifierValidator;
pub use merger::{MergedMethods, MethodMerger};

use crate::config::ResolverConfig;
use crate::definition::{CustomMembers, MethodDefinitionCollection, ResolutionRequest};
use crate::errors::Result;
use im::OrdSet;
use rayon::prelude::*;
use tracing::{debug, debug_span};

/// Everything the code generator consumes for one generated type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub methods: MethodDefinitionCollection,
    pub unmockable: OrdSet<String>,
    pub base_type: Option<String>,
    pub capability_types: Vec<String>,
    pub mixin_types: Vec<String>,
    pub custom: CustomMembers,
    pub type_name: Option<String>,
    pub fingerprint: Fingerprint,
}

#[derive(Debug, Clone, Default)]
pub struct Resolver {
    validator: IdentifierValidator,
}

impl Resolver {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            validator: IdentifierValidator::new(&config.identifiers),
        }
    }

    pub fn validator(&self) -> &IdentifierValidator {
        &self.validator
    }

    /// Resolve a single request.
    ///
    /// Classification runs first; on failure nothing else is computed.
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<Resolution> {
        let span = debug_span!("resolve", types = request.types().len());
        let _enter = span.enter();

        let classified = classify(request.types())?;
        let merged = MethodMerger::new(&self.validator).merge(&classified, request.custom());
        let fingerprint = Fingerprint::of(request);

        debug!(
            instance = merged.methods.instance_methods().len(),
            statics = merged.methods.static_methods().len(),
            mixin_bodies = merged.methods.mixin_methods().len(),
            "Resolved method tables"
        );

        Ok(Resolution {
            methods: merged.methods,
            unmockable: merged.unmockable,
            base_type: classified.base_name().map(str::to_string),
            capability_types: classified.capability_names(),
            mixin_types: classified.mixin_names(),
            custom: request.custom().clone(),
            type_name: request.type_name().map(str::to_string),
            fingerprint,
        })
    }

    /// Resolve independent requests in parallel; results keep input order
    pub fn resolve_all(&self, requests: &[ResolutionRequest]) -> Vec<Result<Resolution>> {
        requests
            .par_iter()
            .map(|request| self.resolve(request))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MethodSignature, SourceType};
    use crate::errors::ResolutionError;
    use std::sync::Arc;

    #[test]
    fn test_failed_classification_yields_no_resolution() {
        let request = ResolutionRequest::new(
            vec![Arc::new(SourceType::extensible("Locked").sealed())],
            CustomMembers::new(),
            None,
        );

        let result = Resolver::default().resolve(&request);

        assert_eq!(result, Err(ResolutionError::sealed("Locked")));
    }

    #[test]
    fn test_resolve_all_keeps_order() {
        let ok = ResolutionRequest::new(
            vec![Arc::new(
                SourceType::capability("Nameable").with_method(MethodSignature::new("name")),
            )],
            CustomMembers::new(),
            None,
        );
        let bad = ResolutionRequest::new(
            vec![
                Arc::new(SourceType::extensible("A")),
                Arc::new(SourceType::extensible("B")),
            ],
            CustomMembers::new(),
            None,
        );

        let results = Resolver::default().resolve_all(&[ok, bad.clone(), bad]);

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_err());
    }

    #[test]
    fn test_relaxed_keywords_from_config() {
        let mut config = ResolverConfig::default();
        config.identifiers.relaxed_keywords = true;
        let request = ResolutionRequest::new(
            vec![Arc::new(
                SourceType::capability("Listing").with_method(MethodSignature::new("list")),
            )],
            CustomMembers::new(),
            None,
        );

        let resolution = Resolver::new(&config).resolve(&request).unwrap();

        assert!(resolution.methods.get("list").is_some());
    }
}
