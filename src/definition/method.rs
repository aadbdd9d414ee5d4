//! Method definition variants
//!
//! A closed set of descriptors telling the code generator how each method of
//! the generated type behaves when invoked.

use crate::core::{MethodSignature, Parameter, TypeKind, Visibility};
use im::Vector;
use serde::{Deserialize, Serialize};
use std::panic::Location;
use std::path::PathBuf;

/// Where an anonymous callable was declared.
///
/// Closures are not value-comparable, so their declaration site stands in for
/// identity. Two closures registered from the same site are the same
/// definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefinitionSite {
    pub file: PathBuf,
    pub start_line: u32,
    pub end_line: u32,
}

impl DefinitionSite {
    pub fn new(file: impl Into<PathBuf>, start_line: u32, end_line: u32) -> Self {
        Self {
            file: file.into(),
            start_line,
            end_line,
        }
    }

    /// Site of the caller's call expression
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line(), location.line())
    }
}

/// Reference to the user-supplied implementation of a custom method
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Callable {
    /// A plain named function or `Type::method` reference
    Named(String),
    /// An anonymous closure, identified by where it was declared
    Closure(DefinitionSite),
}

/// Registration record for a custom method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CustomMethod {
    /// `None` produces a method with an empty body
    pub callable: Option<Callable>,
    /// Parameters reflected from the callable at registration time
    pub parameters: Vector<Parameter>,
    pub return_type: Option<String>,
}

impl CustomMethod {
    /// A custom method without an implementation
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn named(reference: impl Into<String>) -> Self {
        Self {
            callable: Some(Callable::Named(reference.into())),
            ..Self::default()
        }
    }

    pub fn closure(site: DefinitionSite) -> Self {
        Self {
            callable: Some(Callable::Closure(site)),
            ..Self::default()
        }
    }

    /// A closure declared at the caller's location
    #[track_caller]
    pub fn closure_here() -> Self {
        Self::closure(DefinitionSite::caller())
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push_back(parameter);
        self
    }

    pub fn returning(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }
}

/// What an invocation of a generated method ends up calling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The base type's real implementation
    Real,
    /// A capability contract with nothing behind it yet; the generator
    /// synthesizes a default body
    Unimplemented,
    /// The mixin's default body
    MixinBody,
    /// The user-supplied callable
    Callable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodDefinition {
    /// Derived from the base or a capability type
    Inherited {
        signature: MethodSignature,
        declaring_type: String,
        origin: TypeKind,
    },
    /// Default body provided by a mixin
    MixinDefault {
        signature: MethodSignature,
        declaring_type: String,
    },
    /// User-supplied member, replacing any derived definition of the same name
    Custom {
        name: String,
        is_static: bool,
        method: CustomMethod,
    },
}

impl MethodDefinition {
    pub fn inherited(signature: MethodSignature, declaring_type: impl Into<String>) -> Self {
        Self::Inherited {
            signature,
            declaring_type: declaring_type.into(),
            origin: TypeKind::Extensible,
        }
    }

    pub fn contract(signature: MethodSignature, declaring_type: impl Into<String>) -> Self {
        Self::Inherited {
            signature,
            declaring_type: declaring_type.into(),
            origin: TypeKind::Capability,
        }
    }

    pub fn mixin_default(signature: MethodSignature, declaring_type: impl Into<String>) -> Self {
        Self::MixinDefault {
            signature,
            declaring_type: declaring_type.into(),
        }
    }

    pub fn custom(name: impl Into<String>, is_static: bool, method: CustomMethod) -> Self {
        Self::Custom {
            name: name.into(),
            is_static,
            method,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Inherited { signature, .. } | Self::MixinDefault { signature, .. } => {
                &signature.name
            }
            Self::Custom { name, .. } => name,
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            Self::Inherited { signature, .. } | Self::MixinDefault { signature, .. } => {
                signature.is_static
            }
            Self::Custom { is_static, .. } => *is_static,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }

    /// Custom methods are always public
    pub fn visibility(&self) -> Visibility {
        match self {
            Self::Inherited { signature, .. } | Self::MixinDefault { signature, .. } => {
                signature.visibility
            }
            Self::Custom { .. } => Visibility::Public,
        }
    }

    pub fn parameters(&self) -> &Vector<Parameter> {
        match self {
            Self::Inherited { signature, .. } | Self::MixinDefault { signature, .. } => {
                &signature.parameters
            }
            Self::Custom { method, .. } => &method.parameters,
        }
    }

    pub fn return_type(&self) -> Option<&str> {
        match self {
            Self::Inherited { signature, .. } | Self::MixinDefault { signature, .. } => {
                signature.return_type.as_deref()
            }
            Self::Custom { method, .. } => method.return_type.as_deref(),
        }
    }

    pub fn signature(&self) -> Option<&MethodSignature> {
        match self {
            Self::Inherited { signature, .. } | Self::MixinDefault { signature, .. } => {
                Some(signature)
            }
            Self::Custom { .. } => None,
        }
    }

    pub fn dispatch(&self) -> Dispatch {
        match self {
            Self::Inherited {
                origin: TypeKind::Capability,
                ..
            } => Dispatch::Unimplemented,
            Self::Inherited { signature, .. } if signature.is_abstract => Dispatch::Unimplemented,
            Self::Inherited { .. } => Dispatch::Real,
            Self::MixinDefault { signature, .. } if signature.is_abstract => {
                Dispatch::Unimplemented
            }
            Self::MixinDefault { .. } => Dispatch::MixinBody,
            Self::Custom { .. } => Dispatch::Callable,
        }
    }
}
