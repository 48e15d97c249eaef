//! Where IOL config lives, and loading it in layers.
//!
//! Two files are merged, the later one winning field by field:
//! 1. `config.toml` in the config directory (`$IOL_CONFIG_DIR`, else the
//!    platform config dir plus `iol`)
//! 2. `iol.toml` in the project directory (the working directory by default)
//!
//! The config directory also holds the CLI session and its log files.

use std::path::{Path, PathBuf};

use crate::{ConfigError, IolConfig, Result};

/// Environment variable that relocates the config directory.
pub const CONFIG_DIR_ENV: &str = "IOL_CONFIG_DIR";

/// User config file within the config directory.
pub const USER_CONFIG_FILE: &str = "config.toml";

/// Project-local config file.
pub const PROJECT_CONFIG_FILE: &str = "iol.toml";

const APP_DIR: &str = "iol";
const LOGS_DIR: &str = "logs";

/// Which file a layer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    User,
    Project,
}

/// What happened to a layer during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerOutcome {
    /// No file at the layer's path.
    Missing,
    /// Parsed, validated and merged.
    Loaded,
    /// Present but unusable; the reason is kept for reporting.
    Skipped(String),
}

#[derive(Debug, Clone)]
pub struct LayerStatus {
    pub layer: Layer,
    pub path: PathBuf,
    pub outcome: LayerOutcome,
}

/// Merged configuration plus how each layer fared.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: IolConfig,
    /// Layers in merge order (user first).
    pub layers: Vec<LayerStatus>,
}

impl LoadedConfig {
    /// Paths of the layers that were merged.
    pub fn loaded_from(&self) -> Vec<&Path> {
        self.layers
            .iter()
            .filter(|l| l.outcome == LayerOutcome::Loaded)
            .map(|l| l.path.as_path())
            .collect()
    }

    /// One message per skipped layer.
    pub fn warnings(&self) -> Vec<String> {
        self.layers
            .iter()
            .filter_map(|l| match &l.outcome {
                LayerOutcome::Skipped(reason) => {
                    Some(format!("Ignoring {}: {}", l.path.display(), reason))
                }
                _ => None,
            })
            .collect()
    }
}

/// The directories IOL reads config from and keeps its state in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    config_dir: PathBuf,
    project_dir: PathBuf,
}

impl ConfigPaths {
    pub fn new(config_dir: impl Into<PathBuf>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            project_dir: project_dir.into(),
        }
    }

    /// Resolve from the environment, with the working directory as project.
    ///
    /// `None` when neither `IOL_CONFIG_DIR` nor a platform config dir exists.
    pub fn discover() -> Option<Self> {
        Some(Self::new(default_config_dir()?, "."))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn user_file(&self) -> PathBuf {
        self.config_dir.join(USER_CONFIG_FILE)
    }

    pub fn project_file(&self) -> PathBuf {
        self.project_dir.join(PROJECT_CONFIG_FILE)
    }

    /// Directory for rolling log files.
    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join(LOGS_DIR)
    }

    /// Load and merge both layers. Never fails: unusable layers are skipped.
    pub fn load(&self) -> LoadedConfig {
        let mut loaded = LoadedConfig::default();

        for (layer, path) in [
            (Layer::User, self.user_file()),
            (Layer::Project, self.project_file()),
        ] {
            let outcome = match read_layer(&path) {
                Ok(None) => LayerOutcome::Missing,
                Ok(Some(config)) => {
                    loaded.config.merge(config);
                    tracing::debug!(path = %path.display(), ?layer, "Merged config layer");
                    LayerOutcome::Loaded
                }
                Err(e) => LayerOutcome::Skipped(e.to_string()),
            };
            loaded.layers.push(LayerStatus {
                layer,
                path,
                outcome,
            });
        }

        loaded
    }
}

/// `$IOL_CONFIG_DIR` when set and non-empty, else `<platform config dir>/iol`.
pub fn default_config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|d| d.join(APP_DIR)),
    }
}

/// Read and parse one config file, without validation or merging.
pub fn load_config_file(path: &Path) -> Result<IolConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::Syntax {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a config file, creating its directory first.
pub fn save_config(config: &IolConfig, path: &Path) -> Result<()> {
    config.validate()?;
    let text = config.to_toml()?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, text).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_layer(path: &Path) -> Result<Option<IolConfig>> {
    if !path.is_file() {
        return Ok(None);
    }
    let config = load_config_file(path)?;
    config.validate()?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn paths(user: &TempDir, project: &TempDir) -> ConfigPaths {
        ConfigPaths::new(user.path(), project.path())
    }

    #[test]
    fn test_path_layout() {
        let paths = ConfigPaths::new("/cfg/iol", "/work");
        assert_eq!(paths.config_dir(), Path::new("/cfg/iol"));
        assert_eq!(paths.user_file(), PathBuf::from("/cfg/iol/config.toml"));
        assert_eq!(paths.project_file(), PathBuf::from("/work/iol.toml"));
        assert_eq!(paths.logs_dir(), PathBuf::from("/cfg/iol/logs"));
    }

    #[test]
    fn test_no_files_gives_defaults() {
        let user = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();

        let loaded = paths(&user, &project).load();
        assert_eq!(loaded.config, IolConfig::new());
        assert_eq!(loaded.layers.len(), 2);
        assert!(loaded.layers.iter().all(|l| l.outcome == LayerOutcome::Missing));
        assert!(loaded.loaded_from().is_empty());
        assert!(loaded.warnings().is_empty());
    }

    #[test]
    fn test_project_layer_overrides_user_layer() {
        let user = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();

        fs::write(
            user.path().join("config.toml"),
            r#"
[api]
base_url = "https://api.invertironline.com"

[auth]
username = "trader"

[defaults]
market = "nYSE"
"#,
        )
        .unwrap();
        fs::write(
            project.path().join("iol.toml"),
            "[api]\nbase_url = \"http://localhost:9000\"\n",
        )
        .unwrap();

        let loaded = paths(&user, &project).load();
        assert_eq!(loaded.config.base_url(), "http://localhost:9000");
        assert_eq!(loaded.config.auth.username.as_deref(), Some("trader"));
        assert_eq!(loaded.config.market(), "nYSE");
        assert_eq!(loaded.config.country(), "argentina");
        assert_eq!(loaded.loaded_from().len(), 2);
        assert_eq!(loaded.layers[0].layer, Layer::User);
        assert_eq!(loaded.layers[1].layer, Layer::Project);
    }

    #[test]
    fn test_malformed_layer_is_skipped_with_warning() {
        let user = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(user.path().join("config.toml"), "[auth]\nusername = \"trader\"\n").unwrap();
        fs::write(project.path().join("iol.toml"), "not valid toml {{{{").unwrap();

        let loaded = paths(&user, &project).load();
        assert_eq!(loaded.config.auth.username.as_deref(), Some("trader"));
        assert!(matches!(loaded.layers[1].outcome, LayerOutcome::Skipped(_)));

        let warnings = loaded.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Ignoring "));
        assert!(warnings[0].contains("iol.toml"));
    }

    #[test]
    fn test_layer_with_unusable_base_url_is_skipped() {
        let user = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            project.path().join("iol.toml"),
            "[api]\nbase_url = \"ftp://example.com\"\n\n[defaults]\nmarket = \"rOFX\"\n",
        )
        .unwrap();

        let loaded = paths(&user, &project).load();
        assert_eq!(loaded.config.base_url(), "https://api.invertironline.com");
        assert_eq!(loaded.config.market(), "bCBA");
        assert!(loaded.warnings()[0].contains("invalid base_url"));
    }

    #[test]
    fn test_load_config_file_errors_carry_path() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("absent.toml");
        let err = load_config_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Io { ref path, .. } if *path == missing));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "[defaults\ncountry = 1").unwrap();
        let err = load_config_file(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { ref path, .. } if *path == broken));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = IolConfig::new();
        config.defaults.country = Some("estados_Unidos".to_string());
        save_config(&config, &path).unwrap();

        assert_eq!(load_config_file(&path).unwrap(), config);
    }

    #[test]
    fn test_save_rejects_invalid_base_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = IolConfig::new();
        config.api.base_url = Some("not a url".to_string());

        assert!(matches!(
            save_config(&config, &path),
            Err(ConfigError::BaseUrl { .. })
        ));
        assert!(!path.exists());
    }
}
