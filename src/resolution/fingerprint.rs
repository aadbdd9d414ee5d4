//! Signature/Identity Builder
//!
//! Projects a resolution request onto a comparable value. Equal fingerprints
//! mean a previously generated type can be reused; unequal ones mean a new
//! type must be generated.
//!
//! Source type order is significant and kept. Member maps are keyed by name
//! and normalized, so the order in which the caller listed them does not
//! matter. Source types are identified by name alone; descriptors are assumed
//! unique by name within one request.

use crate::core::Parameter;
use crate::definition::{Callable, CustomMethod, DefinitionSite, ResolutionRequest};
use im::Vector;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Identity of a custom method's implementation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallableIdentity {
    /// Custom method with no implementation
    Absent,
    /// A named reference compares by its literal value
    Named { reference: String },
    /// A closure compares by where it was declared
    Closure {
        file: String,
        start_line: u32,
        end_line: u32,
    },
}

impl CallableIdentity {
    fn of(method: &CustomMethod) -> Self {
        match &method.callable {
            None => Self::Absent,
            Some(Callable::Named(reference)) => Self::Named {
                reference: reference.clone(),
            },
            Some(Callable::Closure(DefinitionSite {
                file,
                start_line,
                end_line,
            })) => Self::Closure {
                file: file.to_string_lossy().into_owned(),
                start_line: *start_line,
                end_line: *end_line,
            },
        }
    }
}

/// A custom method as it will be declared: implementation plus signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CustomMethodIdentity {
    pub callable: CallableIdentity,
    pub parameters: Vector<Parameter>,
    pub return_type: Option<String>,
}

impl CustomMethodIdentity {
    fn of(method: &CustomMethod) -> Self {
        Self {
            callable: CallableIdentity::of(method),
            parameters: method.parameters.clone(),
            return_type: method.return_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Fingerprint {
    types: Vec<String>,
    custom_methods: BTreeMap<String, CustomMethodIdentity>,
    custom_static_methods: BTreeMap<String, CustomMethodIdentity>,
    /// Values are canonical JSON text
    custom_properties: BTreeMap<String, String>,
    custom_static_properties: BTreeMap<String, String>,
    custom_constants: BTreeMap<String, String>,
    type_name: Option<String>,
}

impl Fingerprint {
    pub fn of(request: &ResolutionRequest) -> Self {
        let custom = request.custom();

        Self {
            types: request.type_names().map(str::to_string).collect(),
            custom_methods: method_identities(&custom.methods),
            custom_static_methods: method_identities(&custom.static_methods),
            custom_properties: canonical_values(&custom.properties),
            custom_static_properties: canonical_values(&custom.static_properties),
            custom_constants: canonical_values(&custom.constants),
            type_name: request.type_name().map(str::to_string),
        }
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn custom_method(&self, name: &str) -> Option<&CustomMethodIdentity> {
        self.custom_methods.get(name)
    }

    pub fn custom_static_method(&self, name: &str) -> Option<&CustomMethodIdentity> {
        self.custom_static_methods.get(name)
    }

    /// Lowercase hex SHA-256 of the fingerprint, usable as a cache key
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();

        hasher.update((self.types.len() as u64).to_le_bytes());
        for name in &self.types {
            hash_str(&mut hasher, name);
        }
        hash_methods(&mut hasher, &self.custom_methods);
        hash_methods(&mut hasher, &self.custom_static_methods);
        hash_values(&mut hasher, &self.custom_properties);
        hash_values(&mut hasher, &self.custom_static_properties);
        hash_values(&mut hasher, &self.custom_constants);
        hash_optional(&mut hasher, self.type_name.as_deref());

        format!("{:x}", hasher.finalize())
    }
}

// Every variable-length field is length-prefixed so adjacent fields cannot
// run into each other.
fn hash_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn hash_optional(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        None => hasher.update([0u8]),
        Some(value) => {
            hasher.update([1u8]);
            hash_str(hasher, value);
        }
    }
}

fn hash_methods(hasher: &mut Sha256, methods: &BTreeMap<String, CustomMethodIdentity>) {
    hasher.update((methods.len() as u64).to_le_bytes());
    for (name, method) in methods {
        hash_str(hasher, name);
        match &method.callable {
            CallableIdentity::Absent => hasher.update([0u8]),
            CallableIdentity::Named { reference } => {
                hasher.update([1u8]);
                hash_str(hasher, reference);
            }
            CallableIdentity::Closure {
                file,
                start_line,
                end_line,
            } => {
                hasher.update([2u8]);
                hash_str(hasher, file);
                hasher.update(start_line.to_le_bytes());
                hasher.update(end_line.to_le_bytes());
            }
        }
        hasher.update((method.parameters.len() as u64).to_le_bytes());
        for parameter in &method.parameters {
            hash_str(hasher, &parameter.name);
            hasher.update([
                u8::from(parameter.by_reference),
                u8::from(parameter.has_default),
                u8::from(parameter.is_variadic),
            ]);
            hash_optional(hasher, parameter.type_hint.as_deref());
        }
        hash_optional(hasher, method.return_type.as_deref());
    }
}

fn hash_values(hasher: &mut Sha256, values: &BTreeMap<String, String>) {
    hasher.update((values.len() as u64).to_le_bytes());
    for (name, value) in values {
        hash_str(hasher, name);
        hash_str(hasher, value);
    }
}

fn method_identities(
    methods: &IndexMap<String, CustomMethod>,
) -> BTreeMap<String, CustomMethodIdentity> {
    methods
        .iter()
        .map(|(name, method)| (name.clone(), CustomMethodIdentity::of(method)))
        .collect()
}

fn canonical_values(values: &IndexMap<String, Value>) -> BTreeMap<String, String> {
    values
        .iter()
        .map(|(name, value)| (name.clone(), canonical_json(value)))
        .collect()
}

/// JSON text with object keys sorted at every depth
fn canonical_json(value: &Value) -> String {
    fn sort(value: &Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<&String, Value> =
                    map.iter().map(|(k, v)| (k, sort(v))).collect();
                Value::Object(sorted.into_iter().map(|(k, v)| (k.clone(), v)).collect())
            }
            Value::Array(items) => Value::Array(items.iter().map(sort).collect()),
            other => other.clone(),
        }
    }

    sort(value).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Parameter, SourceType};
    use crate::definition::{CustomMembers, CustomMethod};
    use serde_json::json;
    use std::sync::Arc;

    fn request(types: &[&str], custom: CustomMembers) -> ResolutionRequest {
        ResolutionRequest::new(
            types
                .iter()
                .map(|name| Arc::new(SourceType::capability(*name))),
            custom,
            None,
        )
    }

    #[test]
    fn test_type_order_is_significant() {
        let ab = Fingerprint::of(&request(&["A", "B"], CustomMembers::new()));
        let ba = Fingerprint::of(&request(&["B", "A"], CustomMembers::new()));

        assert_ne!(ab, ba);
        assert_ne!(ab.digest(), ba.digest());
    }

    #[test]
    fn test_property_order_is_not_significant() {
        let mut first = CustomMembers::new();
        first.properties.insert("a".into(), json!(1));
        first.properties.insert("b".into(), json!({"y": 1, "x": 2}));
        let mut second = CustomMembers::new();
        second.properties.insert("b".into(), json!({"x": 2, "y": 1}));
        second.properties.insert("a".into(), json!(1));

        let first = Fingerprint::of(&request(&["A"], first));
        let second = Fingerprint::of(&request(&["A"], second));

        assert_eq!(first, second);
        assert_eq!(first.digest(), second.digest());
    }

    #[test]
    fn test_closures_compare_by_definition_site() {
        let site = DefinitionSite::new("tests/mock.rs", 10, 12);
        let fingerprint_for = |site: DefinitionSite| {
            let mut custom = CustomMembers::new();
            custom
                .methods
                .insert("speak".into(), CustomMethod::closure(site));
            Fingerprint::of(&request(&["A"], custom))
        };

        assert_eq!(fingerprint_for(site.clone()), fingerprint_for(site));
        assert_ne!(
            fingerprint_for(DefinitionSite::new("tests/mock.rs", 10, 12)),
            fingerprint_for(DefinitionSite::new("tests/mock.rs", 20, 22))
        );
    }

    #[test]
    fn test_static_and_instance_methods_are_distinguished() {
        let mut instance = CustomMembers::new();
        instance.methods.insert("make".into(), CustomMethod::empty());
        let mut statics = CustomMembers::new();
        statics.static_methods.insert("make".into(), CustomMethod::empty());

        assert_ne!(
            Fingerprint::of(&request(&[], instance)),
            Fingerprint::of(&request(&[], statics))
        );
    }

    #[test]
    fn test_custom_signature_is_part_of_identity() {
        let fingerprint_for = |method: CustomMethod| {
            let mut custom = CustomMembers::new();
            custom.methods.insert("speak".into(), method);
            Fingerprint::of(&request(&["A"], custom))
        };

        let bare = fingerprint_for(CustomMethod::named("f"));
        let by_reference = fingerprint_for(
            CustomMethod::named("f").with_parameter(Parameter::new("x").by_reference()),
        );
        let returning = fingerprint_for(CustomMethod::named("f").returning("int"));

        assert_ne!(bare, by_reference);
        assert_ne!(bare, returning);
        assert_ne!(bare.digest(), by_reference.digest());
        assert_ne!(bare.digest(), returning.digest());
        assert_eq!(
            by_reference.custom_method("speak").unwrap().parameters.len(),
            1
        );
    }

    #[test]
    fn test_static_custom_signature_is_part_of_identity() {
        let fingerprint_for = |method: CustomMethod| {
            let mut custom = CustomMembers::new();
            custom.static_methods.insert("make".into(), method);
            Fingerprint::of(&request(&[], custom))
        };

        let plain = fingerprint_for(CustomMethod::named("Factory::make"));
        let variadic = fingerprint_for(
            CustomMethod::named("Factory::make").with_parameter(Parameter::new("args").variadic()),
        );

        assert_ne!(plain, variadic);
        assert_ne!(plain.digest(), variadic.digest());
        assert_eq!(
            plain.custom_static_method("make").unwrap().callable,
            CallableIdentity::Named {
                reference: "Factory::make".into()
            }
        );
    }

    #[test]
    fn test_digest_separates_adjacent_fields() {
        let ab = Fingerprint::of(&request(&["ab", "c"], CustomMembers::new()));
        let a_bc = Fingerprint::of(&request(&["a", "bc"], CustomMembers::new()));

        assert_ne!(ab.digest(), a_bc.digest());
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let digest = Fingerprint::of(&request(&["A"], CustomMembers::new())).digest();

        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
