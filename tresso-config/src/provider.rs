//! Configuration provider using Figment

use crate::{
    discovery::{ConfigFile, ConfigFormat, FileDiscovery},
    error::ConfigResult,
    types::TressoConfig,
    ENV_PREFIX,
};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use tracing::{debug, info, trace};

/// Loads [`TressoConfig`] from defaults, files and environment.
///
/// No caching is performed; every call reads the sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    /// Provider using the standard discovery locations
    pub fn new() -> Self {
        Self {
            discovery: FileDiscovery::new(),
        }
    }

    /// Provider using a custom discovery (tests, embedding)
    pub fn with_discovery(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Load and validate the configuration
    pub fn load(&self) -> ConfigResult<TressoConfig> {
        let config: TressoConfig = self.build_figment().extract()?;
        config.validate()?;

        info!(
            database = %config.database.path.display(),
            user = config.user.id,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Sources in precedence order (later sources override earlier ones):
    /// defaults, discovered files, environment variables.
    fn build_figment(&self) -> Figment {
        debug!("Building figment configuration with precedence order");

        let mut figment = Figment::from(Serialized::defaults(TressoConfig::default()));

        for file in self.discovery.discover_all() {
            trace!("Loading config file: {} ({:?})", file.path.display(), file.format);
            figment = figment.merge(Self::file_provider(&file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn file_provider(file: &ConfigFile) -> Figment {
        match file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(&file.path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(&file.path)),
            ConfigFormat::Json => Figment::from(Json::file(&file.path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, CONFIG_DIR_NAME};
    use serial_test::serial;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn provider_for(temp: &TempDir) -> (ConfigProvider, PathBuf, PathBuf) {
        let global = temp.path().join("home").join(CONFIG_DIR_NAME);
        let project = temp.path().join("project").join(CONFIG_DIR_NAME);
        fs::create_dir_all(&global).unwrap();
        fs::create_dir_all(&project).unwrap();
        let discovery = FileDiscovery::with_dirs(Some(project.clone()), Some(global.clone()));
        (ConfigProvider::with_discovery(discovery), project, global)
    }

    #[test]
    #[serial]
    fn test_defaults_without_files() {
        let temp = TempDir::new().unwrap();
        let (provider, _, _) = provider_for(&temp);

        let config = provider.load().unwrap();
        assert_eq!(config, TressoConfig::default());
    }

    #[test]
    #[serial]
    fn test_project_overrides_global() {
        let temp = TempDir::new().unwrap();
        let (provider, project, global) = provider_for(&temp);

        fs::write(
            global.join("tresso.toml"),
            "[log]\nlevel = \"warn\"\n\n[user]\nid = 4\n",
        )
        .unwrap();
        fs::write(
            project.join("tresso.json"),
            r#"{"log": {"level": "debug"}}"#,
        )
        .unwrap();

        let config = provider.load().unwrap();
        assert_eq!(config.log.level, "debug");
        // Global-only value survives
        assert_eq!(config.user.id, 4);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_files() {
        let temp = TempDir::new().unwrap();
        let (provider, project, _) = provider_for(&temp);

        fs::write(
            project.join("tresso.yaml"),
            "database:\n  path: file.db\nordering:\n  compact_on_fetch: false\n",
        )
        .unwrap();

        std::env::set_var("TRESSO_DATABASE__PATH", "env.db");
        std::env::set_var("TRESSO_ORDERING__COMPACT_ON_FETCH", "true");

        let config = provider.load();

        std::env::remove_var("TRESSO_DATABASE__PATH");
        std::env::remove_var("TRESSO_ORDERING__COMPACT_ON_FETCH");

        let config = config.unwrap();
        assert_eq!(config.database.path, PathBuf::from("env.db"));
        assert!(config.ordering.compact_on_fetch);
    }

    #[test]
    #[serial]
    fn test_invalid_value_rejected() {
        let temp = TempDir::new().unwrap();
        let (provider, project, _) = provider_for(&temp);

        fs::write(project.join("tresso.toml"), "[user]\nid = -2\n").unwrap();

        let result = provider.load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let (provider, project, _) = provider_for(&temp);

        fs::write(project.join("tresso.toml"), "[user]\nid = \"not a number\"\n").unwrap();

        let result = provider.load();
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
