use serde::{Deserialize, Serialize};

/// Root configuration structure for the resolver
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Method name legality rules of the target runtime
    #[serde(default)]
    pub identifiers: IdentifierConfig,

    /// Generated type naming
    #[serde(default)]
    pub naming: NamingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct IdentifierConfig {
    /// The target tokenizer accepts keywords as method names (except `class`)
    #[serde(default)]
    pub relaxed_keywords: bool,

    /// Extra words to treat as reserved, on top of the built-in set
    #[serde(default)]
    pub additional_reserved: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamingConfig {
    /// Prefix of generated type names
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

pub fn default_prefix() -> String {
    "Mock".to_string()
}
