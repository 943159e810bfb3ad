//! Configuration handling for Untask
//!
//! Configuration is stored in `untask.toml` (project, found by walking
//! up from the input file) and `~/.config/untask/config.toml` (global).
//! Both levels can add markers; the project level can also map
//! nonstandard file extensions onto language families:
//!
//! ```toml
//! markers = ["fixme", "xxx"]
//!
//! [languages]
//! inc = "c"
//! pgsql = "sql"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::MarkerSet;
use crate::scanner::Language;

/// Name of the project-level configuration file
pub const PROJECT_CONFIG_NAME: &str = "untask.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Unknown language '{language}' mapped to extension '{ext}'")]
    UnknownLanguage { ext: String, language: String },
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Extra markers recognized beside the built-in set
    pub markers: Vec<String>,

    /// Maps file extensions to language names, e.g. `inc = "c"`
    pub languages: HashMap<String, String>,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Extra markers applied everywhere
    pub markers: Vec<String>,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration for an input path (`None` for stdin)
    ///
    /// The project file is searched upwards from the input's directory,
    /// or from the working directory for stdin.
    pub fn for_input(input: Option<&Path>) -> Result<Self> {
        let start = match input.and_then(|p| p.canonicalize().ok()) {
            Some(canonical) => match canonical.parent() {
                Some(parent) => parent.to_path_buf(),
                None => canonical,
            },
            None => env::current_dir().context("Failed to resolve working directory")?,
        };

        let global = Self::load_global()?;
        let (project, project_root) = Self::load_project(&start)?;

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "untask", "untask").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// The marker set from both config levels on top of the defaults
    pub fn marker_set(&self) -> MarkerSet {
        MarkerSet::default()
            .with_extra(self.global.markers.iter().cloned())
            .with_extra(self.project.markers.iter().cloned())
    }

    /// Resolves the language for an input
    ///
    /// Precedence: explicit flag, then the project's extension
    /// overrides, then the built-in extension table.
    pub fn resolve_language(
        &self,
        input: Option<&Path>,
        flag: Option<Language>,
    ) -> Result<Language> {
        if let Some(language) = flag {
            return Ok(language);
        }

        let Some(path) = input else {
            anyhow::bail!("Cannot infer a language for standard input (use --language)");
        };

        if let Some(language) = self.language_override(path)? {
            return Ok(language);
        }

        Language::from_path(path).with_context(|| {
            format!(
                "Cannot determine the language of {} (use --language)",
                path.display()
            )
        })
    }

    fn language_override(&self, path: &Path) -> Result<Option<Language>> {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Ok(None);
        };
        let Some(name) = self.project.languages.get(&ext.to_lowercase()) else {
            return Ok(None);
        };
        let language = name.parse::<Language>().map_err(|_| {
            ConfigError::UnknownLanguage {
                ext: ext.to_string(),
                language: name.clone(),
            }
        })?;
        Ok(Some(language))
    }

    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    fn load_project(start: &Path) -> Result<(ProjectConfig, Option<PathBuf>)> {
        let Some(config_path) = Self::find_project_file(start) else {
            return Ok((ProjectConfig::default(), None));
        };

        let content = fs::read_to_string(&config_path).with_context(|| {
            format!("Failed to read project config: {}", config_path.display())
        })?;

        let project: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let root = config_path.parent().map(Path::to_path_buf);
        Ok((project, root))
    }

    fn find_project_file(start: &Path) -> Option<PathBuf> {
        let mut dir = Some(start);
        while let Some(current) = dir {
            let candidate = current.join(PROJECT_CONFIG_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            dir = current.parent();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_project_config() {
        let config: ProjectConfig = toml::from_str(
            r#"
            markers = ["fixme", "xxx"]

            [languages]
            inc = "c"
            "#,
        )
        .unwrap();

        assert_eq!(config.markers, vec!["fixme", "xxx"]);
        assert_eq!(config.languages.get("inc"), Some(&"c".to_string()));
    }

    #[test]
    fn missing_keys_default() {
        let config: ProjectConfig = toml::from_str("").unwrap();
        assert!(config.markers.is_empty());
        assert!(config.languages.is_empty());
    }

    #[test]
    fn marker_set_merges_both_levels() {
        let config = Config {
            project: ProjectConfig {
                markers: vec!["fixme".to_string()],
                languages: HashMap::new(),
            },
            global: GlobalConfig {
                markers: vec!["xxx".to_string()],
            },
            project_root: None,
        };

        let markers = config.marker_set();
        assert!(markers.matches_line("// todo: built-in"));
        assert!(markers.matches_line("// FIXME: project"));
        assert!(markers.matches_line("// xxx: global"));
    }

    #[test]
    fn language_override_beats_extension_table() {
        let mut languages = HashMap::new();
        languages.insert("rs".to_string(), "python".to_string());
        let config = Config {
            project: ProjectConfig {
                markers: vec![],
                languages,
            },
            global: GlobalConfig::default(),
            project_root: None,
        };

        let language = config
            .resolve_language(Some(Path::new("weird.rs")), None)
            .unwrap();
        assert_eq!(language, Language::Python);
    }

    #[test]
    fn flag_beats_everything() {
        let config = Config::default();
        let language = config
            .resolve_language(Some(Path::new("main.py")), Some(Language::Sql))
            .unwrap();
        assert_eq!(language, Language::Sql);
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let config = Config::default();
        let err = config
            .resolve_language(Some(Path::new("data.xyz")), None)
            .unwrap_err();
        assert!(err.to_string().contains("--language"));
    }

    #[test]
    fn bad_override_is_an_error() {
        let mut languages = HashMap::new();
        languages.insert("inc".to_string(), "klingon".to_string());
        let config = Config {
            project: ProjectConfig {
                markers: vec![],
                languages,
            },
            global: GlobalConfig::default(),
            project_root: None,
        };

        let err = config
            .resolve_language(Some(Path::new("x.inc")), None)
            .unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn project_file_is_found_walking_up() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_NAME), r#"markers = ["note"]"#).unwrap();
        let nested = dir.path().join("src/deep");
        fs::create_dir_all(&nested).unwrap();

        let input = nested.join("main.rs");
        fs::write(&input, "fn main() {}\n").unwrap();

        let config = Config::for_input(Some(&input)).unwrap();
        assert_eq!(config.project.markers, vec!["note"]);
        assert!(config.project_root.is_some());
    }

    #[test]
    fn no_project_file_defaults() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("main.rs");
        fs::write(&input, "fn main() {}\n").unwrap();

        let config = Config::for_input(Some(&input)).unwrap();
        assert!(config.project.markers.is_empty());
    }
}
