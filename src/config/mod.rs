// Core configuration types
mod core;
mod loader;

pub use self::core::{default_prefix, IdentifierConfig, NamingConfig, ResolverConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
