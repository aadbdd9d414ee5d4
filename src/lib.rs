// Export modules for library usage
pub mod builder;
pub mod config;
pub mod core;
pub mod definition;
pub mod errors;
pub mod registry;
pub mod resolution;

// Re-export commonly used types
pub use crate::core::{MethodSignature, Parameter, SourceType, TypeKind, Visibility};

pub use crate::definition::{
    AdHocValue, Callable, CustomMembers, CustomMethod, DefinitionSite, Dispatch,
    MethodDefinition, MethodDefinitionCollection, ResolutionRequest,
};

pub use crate::resolution::{
    classify, CallableIdentity, ClassifiedTypes, CustomMethodIdentity, Fingerprint,
    IdentifierValidator, MethodMerger, Resolution, Resolver,
};

pub use crate::builder::{LabelSequencer, MockBuilder};
pub use crate::config::{load_config, ResolverConfig};
pub use crate::errors::{ErrorCode, ResolutionError, Result};
pub use crate::registry::TypeRegistry;
