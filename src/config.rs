//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/arborplot/arborplot.toml`
//! 3. Local config: file given with `--config`
//! 4. Environment variables: `ARBORPLOT_*` prefix, `__` between nested keys

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{expand_env_vars, ColorScheme, Rgb};

const APP_NAME: &str = "arborplot";
const ENV_PREFIX: &str = "ARBORPLOT";

/// Unified configuration for arborplot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Bar chart directory when no `--output-dir` is given
    pub analysis_directory: PathBuf,
    /// Histogram directory, created on first use
    pub histogram_directory: PathBuf,
    /// Searched for `.ttf`/`.otf` files
    pub fonts_directory: PathBuf,
    /// Preferred font family, matched against font file names
    pub font_family: String,
    pub colors: ColorScheme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            analysis_directory: PathBuf::from("."),
            histogram_directory: default_histogram_directory(),
            fonts_directory: default_fonts_directory(),
            font_family: "Arial".to_string(),
            colors: ColorScheme::default(),
        }
    }
}

/// Raw color overrides; `None` keeps the inherited color.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawColors {
    pub axon: Option<Rgb>,
    pub basal_dendrites: Option<Rgb>,
    pub apical_dendrite: Option<Rgb>,
}

/// Raw settings for intermediate parsing; absent keys stay `None`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub analysis_directory: Option<PathBuf>,
    pub histogram_directory: Option<PathBuf>,
    pub fonts_directory: Option<PathBuf>,
    pub font_family: Option<String>,
    pub colors: RawColors,
}

fn default_histogram_directory() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join("arborplot-output"))
        .unwrap_or_else(|| PathBuf::from("~/arborplot-output"))
}

fn default_fonts_directory() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().join("fonts"))
        .unwrap_or_else(|| PathBuf::from("~/.local/share/arborplot/fonts"))
}

/// Get the XDG config directory for arborplot.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("arborplot.toml"))
}

/// Load a TOML file into RawSettings for merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in path fields.
    fn expand_paths(&mut self) {
        for path in [
            &mut self.analysis_directory,
            &mut self.histogram_directory,
            &mut self.fonts_directory,
        ] {
            *path = PathBuf::from(expand_env_vars(path.to_string_lossy().as_ref()));
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            analysis_directory: overlay
                .analysis_directory
                .clone()
                .unwrap_or_else(|| self.analysis_directory.clone()),
            histogram_directory: overlay
                .histogram_directory
                .clone()
                .unwrap_or_else(|| self.histogram_directory.clone()),
            fonts_directory: overlay
                .fonts_directory
                .clone()
                .unwrap_or_else(|| self.fonts_directory.clone()),
            font_family: overlay
                .font_family
                .clone()
                .unwrap_or_else(|| self.font_family.clone()),
            colors: ColorScheme {
                axon: overlay.colors.axon.unwrap_or(self.colors.axon),
                basal_dendrites: overlay
                    .colors
                    .basal_dendrites
                    .unwrap_or(self.colors.basal_dendrites),
                apical_dendrite: overlay
                    .colors
                    .apical_dendrite
                    .unwrap_or(self.colors.apical_dendrite),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_config` - Optional file given on the command line; must exist
    pub fn load(local_config: Option<&Path>) -> ApplicationResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local_path) = local_config {
            debug!("local config: {}", local_path.display());
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        current = Self::apply_env_overrides(current, env_source())?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, source: Environment) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(source)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("analysis_directory") {
            settings.analysis_directory = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("histogram_directory") {
            settings.histogram_directory = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("fonts_directory") {
            settings.fonts_directory = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("font_family") {
            settings.font_family = val;
        }
        if let Ok(val) = config.get_string("colors.axon") {
            settings.colors.axon = val.parse()?;
        }
        if let Ok(val) = config.get_string("colors.basal_dendrites") {
            settings.colors.basal_dendrites = val.parse()?;
        }
        if let Ok(val) = config.get_string("colors.apical_dendrite") {
            settings.colors.apical_dendrite = val.parse()?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r##"# arborplot configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/arborplot/arborplot.toml
#   Local:  file passed with --config
#   Env:    ARBORPLOT_* environment variables, e.g.
#           ARBORPLOT_HISTOGRAM_DIRECTORY=/tmp/hist
#           ARBORPLOT_COLORS__AXON=#ff0000

# Bar charts go here unless --output-dir is given
# analysis_directory = "."

# Histograms go here; created when missing
# histogram_directory = "~/arborplot-output"

# Searched for .ttf/.otf files; built-in Helvetica when nothing matches
# fonts_directory = "~/.local/share/arborplot/fonts"
# font_family = "Arial"

[colors]
# Hex string or [r, g, b] with components in 0..1
# axon = "#d62728"
# basal_dendrites = "#1f77b4"
# apical_dendrite = [0.17, 0.63, 0.17]
"##
        .to_string()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
