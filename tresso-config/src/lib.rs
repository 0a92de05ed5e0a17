//! Tresso configuration management using Figment
//!
//! Configuration is assembled from, in increasing precedence:
//!
//! 1. built-in defaults ([`TressoConfig::default`])
//! 2. the global file `~/.tresso/tresso.{toml,yaml,yml,json}`
//! 3. the project file `./.tresso/tresso.{toml,yaml,yml,json}`
//! 4. `TRESSO_` environment variables, with `__` separating nested keys
//!    (`TRESSO_DATABASE__PATH=/tmp/board.db`)
//!
//! ```no_run
//! use tresso_config::load_configuration;
//!
//! let config = load_configuration()?;
//! println!("database at {}", config.database.path.display());
//! # Ok::<(), tresso_config::ConfigError>(())
//! ```
//!
//! ## Example TOML configuration
//!
//! ```toml
//! [database]
//! path = "boards.db"
//!
//! [log]
//! level = "debug"
//!
//! [user]
//! id = 3
//! actor = "alice"
//!
//! [ordering]
//! compact_on_fetch = true
//! min_gap = 1e-9
//! ```

mod discovery;
mod error;
mod provider;
mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::ConfigProvider;
pub use types::{DatabaseConfig, LogConfig, OrderingConfig, TressoConfig, UserConfig};

/// Directory name searched for configuration files
pub const CONFIG_DIR_NAME: &str = ".tresso";

/// Base file name (without extension) of configuration files
pub const CONFIG_FILE_STEM: &str = "tresso";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "TRESSO_";

/// Load configuration from all available sources
pub fn load_configuration() -> ConfigResult<TressoConfig> {
    ConfigProvider::new().load()
}
