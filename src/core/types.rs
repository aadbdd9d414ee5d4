//! Type and method descriptors
//!
//! These are the already-reflected shapes of source types handed to the
//! resolver. They carry no behavior and are never mutated once registered.

use im::Vector;
use serde::{Deserialize, Serialize};

/// How a source type participates in the generated type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A concrete type that can be subclassed; at most one per resolution
    Extensible,
    /// An interface-like contract contributing method shapes only
    Capability,
    /// A type providing reusable default method bodies
    Mixin,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeKind::Extensible => write!(f, "extensible"),
            TypeKind::Capability => write!(f, "capability"),
            TypeKind::Mixin => write!(f, "mixin"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// A single declared parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub by_reference: bool,
    #[serde(default)]
    pub has_default: bool,
    #[serde(default)]
    pub is_variadic: bool,
    /// Declared type, if any
    #[serde(default)]
    pub type_hint: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            by_reference: false,
            has_default: false,
            is_variadic: false,
            type_hint: None,
        }
    }

    pub fn by_reference(mut self) -> Self {
        self.by_reference = true;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }

    pub fn typed(mut self, type_hint: impl Into<String>) -> Self {
        self.type_hint = Some(type_hint.into());
        self
    }
}

/// Reflected shape of a method on a source type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    #[serde(default)]
    pub parameters: Vector<Parameter>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_final: bool,
    #[serde(default)]
    pub is_constructor: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub return_type: Option<String>,
}

impl MethodSignature {
    /// A public, concrete, non-static method with no parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vector::new(),
            visibility: Visibility::Public,
            is_abstract: false,
            is_final: false,
            is_constructor: false,
            is_static: false,
            return_type: None,
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push_back(parameter);
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn returning(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn abstract_method(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn final_method(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub fn constructor(mut self) -> Self {
        self.is_constructor = true;
        self
    }

    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }

    /// Constructors and final methods can never be overridden automatically
    pub fn is_unmockable(&self) -> bool {
        self.is_constructor || self.is_final
    }
}

/// A named type descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceType {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub methods: Vector<MethodSignature>,
    /// The type forbids extension
    #[serde(default)]
    pub is_sealed: bool,
}

impl SourceType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            methods: Vector::new(),
            is_sealed: false,
        }
    }

    pub fn extensible(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Extensible)
    }

    pub fn capability(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Capability)
    }

    pub fn mixin(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Mixin)
    }

    pub fn with_method(mut self, method: MethodSignature) -> Self {
        self.methods.push_back(method);
        self
    }

    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    /// Last namespace segment of the type name
    pub fn short_name(&self) -> &str {
        self.name.rsplit('\\').next().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_strips_namespace() {
        assert_eq!(SourceType::extensible("Zoo\\Animal").short_name(), "Animal");
        assert_eq!(SourceType::extensible("Animal").short_name(), "Animal");
    }

    #[test]
    fn test_unmockable_flags() {
        assert!(MethodSignature::new("__construct").constructor().is_unmockable());
        assert!(MethodSignature::new("id").final_method().is_unmockable());
        assert!(!MethodSignature::new("speak").is_unmockable());
    }

    #[test]
    fn test_descriptor_defaults_from_json() {
        let ty: SourceType = serde_json::from_str(
            r#"{"name": "Nameable", "kind": "capability",
                "methods": [{"name": "name", "is_abstract": true}]}"#,
        )
        .unwrap();

        assert_eq!(ty.kind, TypeKind::Capability);
        assert!(!ty.is_sealed);
        assert_eq!(ty.methods.len(), 1);
        assert_eq!(ty.methods[0].visibility, Visibility::Public);
        assert!(ty.methods[0].parameters.is_empty());
    }
}
