// Test utility module for mockdef integration tests
#![allow(dead_code)]

use indoc::indoc;
use mockdef::{ResolutionRequest, SourceType, TypeRegistry};
use std::sync::Arc;

/// Descriptors shared by the scenario tests
pub const ZOO_TYPES: &str = indoc! {r#"
    [
        {
            "name": "Zoo\\Animal",
            "kind": "extensible",
            "methods": [
                {"name": "__construct", "is_constructor": true,
                 "parameters": [{"name": "name"}, {"name": "tags", "is_variadic": true}]},
                {"name": "speak", "return_type": "string"},
                {"name": "id", "is_final": true},
                {"name": "digest", "visibility": "protected"},
                {"name": "secret", "visibility": "private"},
                {"name": "create", "is_static": true}
            ]
        },
        {
            "name": "Zoo\\Vehicle",
            "kind": "extensible"
        },
        {
            "name": "Zoo\\Extinct",
            "kind": "extensible",
            "is_sealed": true,
            "methods": [{"name": "speak"}]
        },
        {
            "name": "Zoo\\Loud",
            "kind": "mixin",
            "methods": [
                {"name": "speak", "return_type": "string"},
                {"name": "shout", "parameters": [{"name": "volume", "has_default": true}]},
                {"name": "pitch", "is_abstract": true}
            ]
        },
        {
            "name": "Zoo\\Nameable",
            "kind": "capability",
            "methods": [
                {"name": "name", "is_abstract": true, "return_type": "string"},
                {"name": "id", "is_abstract": true}
            ]
        },
        {
            "name": "Zoo\\Listable",
            "kind": "capability",
            "methods": [
                {"name": "list", "is_abstract": true},
                {"name": "count", "is_abstract": true,
                 "parameters": [{"name": "into", "by_reference": true}]}
            ]
        }
    ]
"#};

pub fn zoo_registry() -> TypeRegistry {
    TypeRegistry::from_json(ZOO_TYPES).expect("fixture descriptors parse")
}

pub fn request_for(registry: &TypeRegistry, names: &[&str]) -> ResolutionRequest {
    let types = registry.resolve(names).expect("fixture types resolve");
    ResolutionRequest::new(types, Default::default(), None)
}

pub fn arc(source_type: SourceType) -> Arc<SourceType> {
    Arc::new(source_type)
}
