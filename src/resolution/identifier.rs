//! Identifier Validator
//!
//! Decides whether a name can be declared as a method (or type) of the
//! generated type. A name is legal when it has identifier shape and is not a
//! reserved word of the target runtime. Reserved words are compared
//! case-insensitively.

use crate::config::IdentifierConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_\x{80}-\x{10FFFF}][A-Za-z0-9_\x{80}-\x{10FFFF}]*$")
        .expect("identifier pattern is valid")
});

/// Words the target tokenizer never reads back as a plain identifier
pub const RESERVED_WORDS: &[&str] = &[
    "__halt_compiler",
    "abstract",
    "and",
    "array",
    "as",
    "break",
    "callable",
    "case",
    "catch",
    "class",
    "clone",
    "const",
    "continue",
    "declare",
    "default",
    "die",
    "do",
    "echo",
    "else",
    "elseif",
    "empty",
    "enddeclare",
    "endfor",
    "endforeach",
    "endif",
    "endswitch",
    "endwhile",
    "eval",
    "exit",
    "extends",
    "final",
    "finally",
    "fn",
    "for",
    "foreach",
    "function",
    "global",
    "goto",
    "if",
    "implements",
    "include",
    "include_once",
    "instanceof",
    "insteadof",
    "interface",
    "isset",
    "list",
    "match",
    "namespace",
    "new",
    "or",
    "print",
    "private",
    "protected",
    "public",
    "readonly",
    "require",
    "require_once",
    "return",
    "static",
    "switch",
    "throw",
    "trait",
    "try",
    "unset",
    "use",
    "var",
    "while",
    "xor",
    "yield",
    "__class__",
    "__dir__",
    "__file__",
    "__function__",
    "__line__",
    "__method__",
    "__namespace__",
    "__trait__",
];

/// With relaxed keywords the tokenizer accepts keywords in method-name
/// position, except this one.
const ALWAYS_RESERVED: &str = "class";

#[derive(Debug, Clone)]
pub struct IdentifierValidator {
    reserved: HashSet<String>,
    relaxed_keywords: bool,
}

impl Default for IdentifierValidator {
    fn default() -> Self {
        Self::new(&IdentifierConfig::default())
    }
}

impl IdentifierValidator {
    pub fn new(config: &IdentifierConfig) -> Self {
        let reserved = RESERVED_WORDS
            .iter()
            .map(|word| word.to_string())
            .chain(
                config
                    .additional_reserved
                    .iter()
                    .map(|word| word.to_ascii_lowercase()),
            )
            .collect();

        Self {
            reserved,
            relaxed_keywords: config.relaxed_keywords,
        }
    }

    /// Any string shaped like an identifier
    pub fn has_identifier_shape(name: &str) -> bool {
        IDENTIFIER.is_match(name)
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(&name.to_ascii_lowercase())
    }

    /// Whether `name` can be declared as a method
    pub fn is_valid_method_name(&self, name: &str) -> bool {
        if !Self::has_identifier_shape(name) {
            return false;
        }
        if self.relaxed_keywords {
            !name.eq_ignore_ascii_case(ALWAYS_RESERVED)
        } else {
            !self.is_reserved(name)
        }
    }

    /// Keep only the names that can be declared as methods
    pub fn filter_valid_names<'a, I>(&self, candidates: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates
            .into_iter()
            .filter(|name| self.is_valid_method_name(name))
            .map(str::to_string)
            .collect()
    }

    /// Whether `name` can be used as the generated type's name.
    ///
    /// Namespaced names are accepted; every segment must be a legal,
    /// non-reserved identifier.
    pub fn is_valid_type_name(&self, name: &str) -> bool {
        let name = name.strip_prefix('\\').unwrap_or(name);
        !name.is_empty()
            && name
                .split('\\')
                .all(|segment| Self::has_identifier_shape(segment) && !self.is_reserved(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relaxed() -> IdentifierValidator {
        IdentifierValidator::new(&IdentifierConfig {
            relaxed_keywords: true,
            additional_reserved: Vec::new(),
        })
    }

    #[test]
    fn test_filter_removes_reserved_words() {
        let validator = IdentifierValidator::default();
        let valid = validator.filter_valid_names(["speak", "list", "Print", "name", "1st"]);

        assert!(valid.contains("speak"));
        assert!(valid.contains("name"));
        assert!(!valid.contains("list"));
        assert!(!valid.contains("Print"));
        assert!(!valid.contains("1st"));
    }

    #[test]
    fn test_relaxed_keywords_only_forbid_class() {
        let validator = relaxed();

        assert!(validator.is_valid_method_name("list"));
        assert!(validator.is_valid_method_name("print"));
        assert!(!validator.is_valid_method_name("class"));
        assert!(!validator.is_valid_method_name("CLASS"));
    }

    #[test]
    fn test_additional_reserved_words() {
        let validator = IdentifierValidator::new(&IdentifierConfig {
            relaxed_keywords: false,
            additional_reserved: vec!["Enum".to_string()],
        });

        assert!(!validator.is_valid_method_name("enum"));
    }

    #[test]
    fn test_unicode_identifiers() {
        assert!(IdentifierValidator::has_identifier_shape("größe"));
        assert!(!IdentifierValidator::has_identifier_shape("with space"));
        assert!(!IdentifierValidator::has_identifier_shape(""));
    }

    #[test]
    fn test_type_names() {
        let validator = IdentifierValidator::default();

        assert!(validator.is_valid_type_name("AnotherClassName"));
        assert!(validator.is_valid_type_name("\\Vendor\\Package\\Mock"));
        assert!(!validator.is_valid_type_name("1"));
        assert!(!validator.is_valid_type_name("Vendor\\\\Mock"));
        assert!(!validator.is_valid_type_name("Vendor\\list"));
        assert!(!validator.is_valid_type_name(""));
    }
}
