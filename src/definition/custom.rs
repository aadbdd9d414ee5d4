//! Custom members and the ad-hoc definition convention
//!
//! Ad-hoc definitions are maps whose keys read like declarations:
//!
//! - `"name"`: a method when the value is callable, otherwise a property
//! - `"var name"`: always a property
//! - `"function name"`: always a method
//! - `"static name"`, `"static var name"`, `"static function name"`: the
//!   static counterparts
//! - `"const NAME"`: a constant

use super::method::{Callable, CustomMethod};
use crate::errors::{ResolutionError, Result};
use indexmap::IndexMap;
use serde_json::Value;

/// User-supplied members of the generated type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomMembers {
    pub methods: IndexMap<String, CustomMethod>,
    pub static_methods: IndexMap<String, CustomMethod>,
    pub properties: IndexMap<String, Value>,
    pub static_properties: IndexMap<String, Value>,
    pub constants: IndexMap<String, Value>,
}

/// Value side of an ad-hoc definition entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdHocValue {
    Method(CustomMethod),
    Data(Value),
}

impl From<CustomMethod> for AdHocValue {
    fn from(method: CustomMethod) -> Self {
        Self::Method(method)
    }
}

impl From<Value> for AdHocValue {
    fn from(value: Value) -> Self {
        Self::Data(value)
    }
}

/// Which member table an ad-hoc entry lands in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Method,
    StaticMethod,
    Property,
    StaticProperty,
    Constant,
}

/// Parsed form of an ad-hoc definition key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionKey {
    pub name: String,
    pub is_static: bool,
    pub is_function: bool,
    pub is_property: bool,
    pub is_constant: bool,
}

impl DefinitionKey {
    pub fn parse(key: &str) -> Result<Self> {
        let mut words: Vec<&str> = key.split_whitespace().collect();
        let name = words
            .pop()
            .ok_or_else(|| ResolutionError::invalid_definition(key, "missing member name"))?;

        let mut parsed = Self {
            name: name.to_string(),
            is_static: false,
            is_function: false,
            is_property: false,
            is_constant: false,
        };

        for modifier in words {
            match modifier {
                "static" => parsed.is_static = true,
                "function" => parsed.is_function = true,
                "var" => parsed.is_property = true,
                "const" => parsed.is_constant = true,
                other => {
                    return Err(ResolutionError::invalid_definition(
                        key,
                        format!("unknown modifier '{other}'"),
                    ))
                }
            }
        }

        if parsed.is_constant && (parsed.is_static || parsed.is_function || parsed.is_property) {
            return Err(ResolutionError::invalid_definition(
                key,
                "constants take no other modifiers",
            ));
        }
        if parsed.is_function && parsed.is_property {
            return Err(ResolutionError::invalid_definition(
                key,
                "a member cannot be both a method and a property",
            ));
        }

        Ok(parsed)
    }

    /// Decide the member table, letting the value break ties
    pub fn kind_for(&self, value: &AdHocValue) -> MemberKind {
        let is_method = self.is_function
            || (!self.is_property && matches!(value, AdHocValue::Method(_)));

        match (self.is_constant, self.is_static, is_method) {
            (true, _, _) => MemberKind::Constant,
            (false, true, true) => MemberKind::StaticMethod,
            (false, true, false) => MemberKind::StaticProperty,
            (false, false, true) => MemberKind::Method,
            (false, false, false) => MemberKind::Property,
        }
    }
}

impl CustomMembers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole ad-hoc definition. Nothing is returned unless every entry
    /// is well formed.
    pub fn from_definition<I, K>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, AdHocValue)>,
        K: AsRef<str>,
    {
        let mut members = Self::new();
        for (key, value) in entries {
            members.apply(key.as_ref(), value)?;
        }
        Ok(members)
    }

    /// Parse an ad-hoc definition given as a JSON object.
    ///
    /// JSON cannot carry closures, so methods must use the `function`
    /// modifier with a string naming the callable.
    pub fn from_json(definition: &Value) -> Result<Self> {
        let object = definition.as_object().ok_or_else(|| {
            ResolutionError::invalid_definition(
                definition.to_string(),
                "ad-hoc definitions must be keyed by member name",
            )
        })?;

        let mut members = Self::new();
        for (key, value) in object {
            let parsed = DefinitionKey::parse(key)?;
            let value = if parsed.is_function {
                let reference = value.as_str().ok_or_else(|| {
                    ResolutionError::invalid_definition(
                        key.as_str(),
                        "methods must name their callable",
                    )
                })?;
                AdHocValue::Method(CustomMethod::named(reference))
            } else {
                AdHocValue::Data(value.clone())
            };
            members.insert(&parsed, key, value)?;
        }
        Ok(members)
    }

    pub fn apply(&mut self, key: &str, value: AdHocValue) -> Result<()> {
        let parsed = DefinitionKey::parse(key)?;
        self.insert(&parsed, key, value)
    }

    fn insert(&mut self, parsed: &DefinitionKey, key: &str, value: AdHocValue) -> Result<()> {
        let name = parsed.name.clone();

        match (parsed.kind_for(&value), value) {
            (MemberKind::Method, AdHocValue::Method(method)) => {
                self.methods.insert(name, method);
            }
            (MemberKind::StaticMethod, AdHocValue::Method(method)) => {
                self.static_methods.insert(name, method);
            }
            (MemberKind::Method | MemberKind::StaticMethod, AdHocValue::Data(_)) => {
                return Err(ResolutionError::invalid_definition(
                    key,
                    "methods require a callable value",
                ));
            }
            (MemberKind::Constant, AdHocValue::Method(_)) => {
                return Err(ResolutionError::invalid_definition(
                    key,
                    "constants require a data value",
                ));
            }
            (MemberKind::Constant, AdHocValue::Data(data)) => {
                self.constants.insert(name, data);
            }
            (kind, value) => {
                let data = into_data(key, value)?;
                if kind == MemberKind::StaticProperty {
                    self.static_properties.insert(name, data);
                } else {
                    self.properties.insert(name, data);
                }
            }
        }

        Ok(())
    }

    /// Fold another member set into this one; later entries win
    pub fn merge(&mut self, other: CustomMembers) {
        self.methods.extend(other.methods);
        self.static_methods.extend(other.static_methods);
        self.properties.extend(other.properties);
        self.static_properties.extend(other.static_properties);
        self.constants.extend(other.constants);
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
            && self.static_methods.is_empty()
            && self.properties.is_empty()
            && self.static_properties.is_empty()
            && self.constants.is_empty()
    }
}

/// A callable stored in a `var` slot is kept as plain data
fn into_data(key: &str, value: AdHocValue) -> Result<Value> {
    match value {
        AdHocValue::Data(data) => Ok(data),
        AdHocValue::Method(method) => match method.callable {
            Some(Callable::Named(reference)) => Ok(Value::String(reference)),
            _ => serde_json::to_value(&method)
                .map_err(|e| ResolutionError::invalid_definition(key, e.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_key_modifiers() {
        let key = DefinitionKey::parse("static  function   create").unwrap();

        assert_eq!(key.name, "create");
        assert!(key.is_static);
        assert!(key.is_function);
        assert!(!key.is_property);
    }

    #[test]
    fn test_parse_key_rejects_malformed_keys() {
        for key in ["", "   ", "public name", "const static NAME", "var function x"] {
            let err = DefinitionKey::parse(key).unwrap_err();
            assert!(
                matches!(err, ResolutionError::InvalidDefinition { .. }),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_definition_sorts_members_by_key_and_value() {
        let method_c = CustomMethod::named("strtoupper");
        let callback_e = CustomMethod::named("strtolower");
        let members = CustomMembers::from_definition(vec![
            ("static methodA", CustomMethod::empty().into()),
            ("static propertyA", AdHocValue::Data(json!("valueA"))),
            ("methodC", method_c.clone().into()),
            ("propertyC", AdHocValue::Data(json!("valueC"))),
            ("var propertyD", callback_e.into()),
            ("const constantA", AdHocValue::Data(json!("constantValueA"))),
        ])
        .unwrap();

        assert_eq!(
            members.static_methods.keys().collect::<Vec<_>>(),
            vec!["methodA"]
        );
        assert_eq!(members.methods.get("methodC"), Some(&method_c));
        assert_eq!(members.static_properties.get("propertyA"), Some(&json!("valueA")));
        assert_eq!(members.properties.get("propertyC"), Some(&json!("valueC")));
        assert_eq!(members.properties.get("propertyD"), Some(&json!("strtolower")));
        assert_eq!(members.constants.get("constantA"), Some(&json!("constantValueA")));
    }

    #[test]
    fn test_function_modifier_requires_callable() {
        let err = CustomMembers::from_definition(vec![(
            "function speak",
            AdHocValue::Data(json!("quiet")),
        )])
        .unwrap_err();

        assert_eq!(err.code(), crate::errors::ErrorCode::INVALID_DEFINITION);
    }

    #[test]
    fn test_json_definition() {
        let members = CustomMembers::from_json(&json!({
            "function speak": "strtoupper",
            "static function create": "Factory::create",
            "volume": 11,
            "const LIMIT": 3,
        }))
        .unwrap();

        assert_eq!(members.methods.get("speak"), Some(&CustomMethod::named("strtoupper")));
        assert!(members.static_methods.contains_key("create"));
        assert_eq!(members.properties.get("volume"), Some(&json!(11)));
        assert_eq!(members.constants.get("LIMIT"), Some(&json!(3)));
    }

    #[test]
    fn test_json_definition_must_be_an_object() {
        let err = CustomMembers::from_json(&json!(["propertyA", "valueA"])).unwrap_err();

        assert!(matches!(err, ResolutionError::InvalidDefinition { .. }));
    }

    #[test]
    fn test_merge_later_entries_win() {
        let mut members = CustomMembers::new();
        members.apply("volume", json!(1).into()).unwrap();
        let mut other = CustomMembers::new();
        other.apply("volume", json!(2).into()).unwrap();

        members.merge(other);

        assert_eq!(members.properties.get("volume"), Some(&json!(2)));
    }
}
