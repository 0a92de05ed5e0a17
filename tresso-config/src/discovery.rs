//! Configuration file discovery
//!
//! Looks for `tresso.{toml,yaml,yml,json}` inside a `.tresso/` directory in
//! the home directory (global scope) and the working directory (project
//! scope). Project files take precedence over global ones.

use crate::{CONFIG_DIR_NAME, CONFIG_FILE_STEM};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A discovered configuration file
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
    pub scope: ConfigScope,
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Where a file was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigScope {
    Global,
    Project,
}

const EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Finds configuration files in the global and project directories
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery {
    project_dir: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl FileDiscovery {
    /// Discover relative to the current directory and the home directory
    pub fn new() -> Self {
        Self {
            project_dir: std::env::current_dir()
                .ok()
                .map(|dir| dir.join(CONFIG_DIR_NAME)),
            global_dir: dirs::home_dir().map(|dir| dir.join(CONFIG_DIR_NAME)),
        }
    }

    /// Discover in explicit directories (each is the `.tresso` dir itself)
    pub fn with_dirs(project_dir: Option<PathBuf>, global_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            global_dir,
        }
    }

    /// All existing files, lowest precedence first
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let mut files = Vec::new();

        if let Some(dir) = &self.global_dir {
            files.extend(Self::discover_in(dir, ConfigScope::Global));
        }
        // A home directory used as the working directory must not load twice
        if let Some(dir) = &self.project_dir {
            if self.global_dir.as_ref() != Some(dir) {
                files.extend(Self::discover_in(dir, ConfigScope::Project));
            }
        }

        debug!("Discovered {} configuration files", files.len());
        files
    }

    fn discover_in(dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
        EXTENSIONS
            .iter()
            .filter_map(|ext| {
                let path = dir.join(format!("{}.{}", CONFIG_FILE_STEM, ext));
                trace!("Checking {}", path.display());
                if !path.is_file() {
                    return None;
                }
                let format = ConfigFormat::from_extension(ext)?;
                Some(ConfigFile {
                    path,
                    format,
                    scope,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("yml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("ini"), None);
    }

    #[test]
    fn test_discovery_orders_global_before_project() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("home").join(CONFIG_DIR_NAME);
        let project = temp.path().join("project").join(CONFIG_DIR_NAME);
        fs::create_dir_all(&global).unwrap();
        fs::create_dir_all(&project).unwrap();
        fs::write(global.join("tresso.yaml"), "log:\n  level: warn\n").unwrap();
        fs::write(project.join("tresso.toml"), "[log]\nlevel = \"debug\"\n").unwrap();

        let files = FileDiscovery::with_dirs(Some(project), Some(global)).discover_all();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].scope, ConfigScope::Global);
        assert_eq!(files[0].format, ConfigFormat::Yaml);
        assert_eq!(files[1].scope, ConfigScope::Project);
    }

    #[test]
    fn test_missing_dirs_discover_nothing() {
        let temp = TempDir::new().unwrap();
        let files =
            FileDiscovery::with_dirs(Some(temp.path().join("nope")), None).discover_all();
        assert!(files.is_empty());
    }
}
