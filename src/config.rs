//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/logwall/logwall.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `LOGWALL_*` prefix (`__` separates nesting)
//!
//! CLI flags on `plan` are applied on top by the command layer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{BuckingMode, ReductionRange, WallParameters};
use crate::util::path::expand_env_vars;

/// Unified configuration for logwall.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// JSON file holding the log inventory
    pub inventory_path: PathBuf,
    /// Course count used when neither `--courses` nor `--height` is given
    pub course_count: usize,
    /// Seed for randomized bucking (None = OS entropy)
    pub seed: Option<u64>,
    /// Geometry and correction parameters
    pub wall: WallParameters,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            inventory_path: default_inventory_path(),
            course_count: 9,
            seed: None,
            wall: WallParameters::default(),
        }
    }
}

/// Raw wall section for intermediate parsing (None = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawWall {
    pub diameters: Option<Vec<u32>>,
    pub long_length_mm: Option<u32>,
    pub short_length_mm: Option<u32>,
    pub reduction_per_meter: Option<f64>,
    pub shrinkage_percent: Option<f64>,
    pub bark_thickness_mm: Option<f64>,
    pub belly_groove_mm: Option<f64>,
    pub bucking: Option<BuckingMode>,
    pub random_reduction: Option<ReductionRange>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub inventory_path: Option<PathBuf>,
    pub course_count: Option<usize>,
    pub seed: Option<u64>,
    #[serde(default)]
    pub wall: RawWall,
}

/// Get the default inventory file (`<data_dir>/inventory.json`).
fn default_inventory_path() -> PathBuf {
    ProjectDirs::from("", "", "logwall")
        .map(|dirs| dirs.data_dir().join("inventory.json"))
        .unwrap_or_else(|| PathBuf::from("~/.logwall/inventory.json"))
}

/// Get the XDG config directory for logwall.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "logwall").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("logwall.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl WallParameters {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawWall) -> Self {
        Self {
            diameters: overlay
                .diameters
                .clone()
                .unwrap_or_else(|| self.diameters.clone()),
            long_length_mm: overlay.long_length_mm.unwrap_or(self.long_length_mm),
            short_length_mm: overlay.short_length_mm.unwrap_or(self.short_length_mm),
            reduction_per_meter: overlay
                .reduction_per_meter
                .unwrap_or(self.reduction_per_meter),
            shrinkage_percent: overlay.shrinkage_percent.unwrap_or(self.shrinkage_percent),
            bark_thickness_mm: overlay.bark_thickness_mm.unwrap_or(self.bark_thickness_mm),
            belly_groove_mm: overlay.belly_groove_mm.unwrap_or(self.belly_groove_mm),
            bucking: overlay.bucking.unwrap_or(self.bucking),
            random_reduction: overlay.random_reduction.unwrap_or(self.random_reduction),
        }
    }
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.inventory_path.to_string_lossy().as_ref());
        self.inventory_path = PathBuf::from(expanded);
    }

    /// Merge overlay config onto self (base). Scalars and arrays both replace.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            inventory_path: overlay
                .inventory_path
                .clone()
                .unwrap_or_else(|| self.inventory_path.clone()),
            course_count: overlay.course_count.unwrap_or(self.course_count),
            seed: overlay.seed.or(self.seed),
            wall: self.wall.merge_with(&overlay.wall),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file, applied after the global one
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/logwall/logwall.toml`
    /// 3. Explicit config file (must exist)
    /// 4. Environment variables: `LOGWALL_*` prefix
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Explicit config
        if let Some(path) = config_file {
            debug!("load: config file {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current, None)?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply LOGWALL_* environment variables as explicit overrides.
    ///
    /// `source` replaces the process environment when given (for tests).
    pub fn apply_env_overrides(
        mut settings: Self,
        source: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let env = Environment::with_prefix("LOGWALL")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("wall.diameters")
            .try_parsing(true)
            .source(source);
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("inventory_path") {
            settings.inventory_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get::<usize>("course_count") {
            settings.course_count = val;
        }
        if let Ok(val) = config.get::<u64>("seed") {
            settings.seed = Some(val);
        }
        if let Ok(val) = config.get::<Vec<u32>>("wall.diameters") {
            settings.wall.diameters = val;
        }
        if let Ok(val) = config.get::<u32>("wall.long_length_mm") {
            settings.wall.long_length_mm = val;
        }
        if let Ok(val) = config.get::<u32>("wall.short_length_mm") {
            settings.wall.short_length_mm = val;
        }
        if let Ok(val) = config.get::<f64>("wall.reduction_per_meter") {
            settings.wall.reduction_per_meter = val;
        }
        if let Ok(val) = config.get::<f64>("wall.shrinkage_percent") {
            settings.wall.shrinkage_percent = val;
        }
        if let Ok(val) = config.get::<f64>("wall.bark_thickness_mm") {
            settings.wall.bark_thickness_mm = val;
        }
        if let Ok(val) = config.get::<f64>("wall.belly_groove_mm") {
            settings.wall.belly_groove_mm = val;
        }
        if let Ok(val) = config.get_string("wall.bucking") {
            settings.wall.bucking = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("LOGWALL_WALL__BUCKING: {e}"),
            })?;
        }
        if let Ok(val) = config.get::<u32>("wall.random_reduction.min") {
            settings.wall.random_reduction.min = val;
        }
        if let Ok(val) = config.get::<u32>("wall.random_reduction.max") {
            settings.wall.random_reduction.max = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# logwall configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/logwall/logwall.toml
#   File:   --config <path>
#   Env:    LOGWALL_* environment variables, e.g. LOGWALL_WALL__DIAMETERS=290,280

# Inventory of already-available logs
# inventory_path = "~/.local/share/logwall/inventory.json"

# Courses to plan when neither --courses nor --height is given
# course_count = 9

# Seed for fixed-root bucking (omit for a fresh random draw every run)
# seed = 42

[wall]
# Root diameters (fixed-root) or first-log midpoint diameters (target-midpoint), mm
# diameters = [290, 280, 270]

# Nominal log lengths, mm
# long_length_mm = 5150
# short_length_mm = 4050

# Stem taper, mm of diameter per meter
# reduction_per_meter = 10.0

# Drying shrinkage after debarking, percent
# shrinkage_percent = 4.0

# Bark thickness per face, mm
# bark_thickness_mm = 5.0

# Height lost to the belly groove on every course above the bottom one, mm
# belly_groove_mm = 20.0

# "target-midpoint" or "fixed-root"
# bucking = "target-midpoint"

# Top-log reduction range for fixed-root bucking, mm
# random_reduction = { min = 40, max = 50 }
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_overrides_when_defaulting_then_matches_reference_wall() {
        let settings = Settings::default();
        assert_eq!(settings.course_count, 9);
        assert_eq!(settings.wall.diameters, vec![290, 280, 270]);
        assert_eq!(settings.wall.long_length_mm, 5150);
        assert_eq!(settings.wall.short_length_mm, 4050);
        assert!(settings.inventory_path.ends_with("inventory.json"));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_only_given_fields_change() {
        let raw: RawSettings = toml::from_str(
            r#"
course_count = 5

[wall]
diameters = [300]
bucking = "fixed-root"
"#,
        )
        .unwrap();

        let merged = Settings::default().merge_with(&raw);

        assert_eq!(merged.course_count, 5);
        assert_eq!(merged.wall.diameters, vec![300]);
        assert_eq!(merged.wall.bucking, BuckingMode::FixedRoot);
        assert_eq!(merged.wall.long_length_mm, 5150);
    }

    #[test]
    fn given_env_source_when_applying_overrides_then_replaces_values() {
        let env = HashMap::from([
            ("LOGWALL_COURSE_COUNT".to_string(), "12".to_string()),
            ("LOGWALL_SEED".to_string(), "7".to_string()),
            ("LOGWALL_WALL__DIAMETERS".to_string(), "310,300".to_string()),
            ("LOGWALL_WALL__BELLY_GROOVE_MM".to_string(), "15.5".to_string()),
            ("LOGWALL_WALL__BUCKING".to_string(), "fixed-root".to_string()),
        ]);

        let settings = Settings::apply_env_overrides(Settings::default(), Some(env)).unwrap();

        assert_eq!(settings.course_count, 12);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.wall.diameters, vec![310, 300]);
        assert_eq!(settings.wall.belly_groove_mm, 15.5);
        assert_eq!(settings.wall.bucking, BuckingMode::FixedRoot);
    }

    #[test]
    fn given_bad_bucking_env_when_applying_overrides_then_config_error() {
        let env = HashMap::from([("LOGWALL_WALL__BUCKING".to_string(), "sideways".to_string())]);
        let err = Settings::apply_env_overrides(Settings::default(), Some(env)).unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn given_settings_when_rendering_toml_then_round_trips_through_raw() {
        let settings = Settings::default();
        let rendered = settings.to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&rendered).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }

    #[test]
    fn given_template_when_parsing_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.wall.diameters.is_none());
    }
}
