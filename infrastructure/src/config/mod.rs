//! Configuration file loading for routewise
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed with `ROUTEWISE_` (nested keys split on `__`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./routewise.toml` or `./.routewise.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/routewise/config.toml`
//! 5. Fallback: `~/.config/routewise/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileCustomProvider, FileGeocodingConfig, FileMapConfig, FileOutputConfig,
    FileOutputFormat, FilePlannerConfig, FileProviderConfig, FileProvidersConfig,
};
pub use loader::ConfigLoader;
