//! Configuration file support for molboot
//!
//! Reads $MOLBOOT_CONFIG, falling back to ~/.config/molboot/config.toml.
//! A missing or unparsable file never blocks startup; defaults apply.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Remote the community script repository is mirrored from.
pub const DEFAULT_REPO_URL: &str = "https://github.com/Pymol-Scripts/Pymol-script-repo.git";

/// Gist serving the ColorBrewer palette definitions as a JS fragment.
pub const DEFAULT_PALETTE_URL: &str =
    "https://gist.githubusercontent.com/frankrowe/9007567/raw/colorbrewer.js";

const REPO_DIR_NAME: &str = "Pymol-script-repo";
const MARKER_FILE_NAME: &str = "script-repo-last-check";

/// Configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Config {
    /// Script repository sync settings
    #[serde(default)]
    pub repo: RepoConfig,

    /// Palette download settings
    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Script-repository-related configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RepoConfig {
    /// Remote to clone and pull from
    #[serde(default = "default_repo_url")]
    pub url: String,

    /// Local clone location; default is the repository name under home
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Days between remote checks; 0 checks on every run
    /// Default: 7
    #[serde(default = "default_check_interval_days")]
    pub check_interval_days: u64,

    /// Environment variable the host's module loader reads
    #[serde(default = "default_modules_env_var")]
    pub modules_env_var: String,
}

/// Palette-related configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaletteConfig {
    /// Source of the colorbrewer object literal
    #[serde(default = "default_palette_url")]
    pub url: String,
}

fn default_repo_url() -> String {
    DEFAULT_REPO_URL.to_string()
}

fn default_check_interval_days() -> u64 {
    7
}

fn default_modules_env_var() -> String {
    "PYMOL_GIT_MOD".to_string()
}

fn default_palette_url() -> String {
    DEFAULT_PALETTE_URL.to_string()
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            url: default_repo_url(),
            dir: None,
            check_interval_days: default_check_interval_days(),
            modules_env_var: default_modules_env_var(),
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            url: default_palette_url(),
        }
    }
}

impl Config {
    /// Load config from $MOLBOOT_CONFIG or ~/.config/molboot/config.toml.
    /// Returns default config if no readable file is found.
    pub fn load() -> Self {
        if let Some(path) = Self::find_config_path() {
            if let Ok(contents) = std::fs::read_to_string(&path) {
                if let Ok(config) = toml::from_str(&contents) {
                    return config;
                }
            }
        }
        Self::default()
    }

    /// Env override first, then the well-known location under home.
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("MOLBOOT_CONFIG") {
            return Some(PathBuf::from(path));
        }
        let home = home::home_dir()?;
        let path = home.join(".config").join("molboot").join("config.toml");
        path.exists().then_some(path)
    }

    /// Local clone location: explicit override or `Pymol-script-repo`
    /// directly under home.
    pub fn repo_dir(&self) -> PathBuf {
        if let Some(dir) = &self.repo.dir {
            return dir.clone();
        }
        home::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(REPO_DIR_NAME)
    }

    /// Marker stamp under $XDG_CACHE_HOME (default ~/.cache), namespaced
    /// to molboot.
    pub fn marker_path(&self) -> PathBuf {
        let cache = match std::env::var("XDG_CACHE_HOME") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => home::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".cache"),
        };
        cache.join("molboot").join(MARKER_FILE_NAME)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.repo.check_interval_days * 24 * 3600)
    }
}
