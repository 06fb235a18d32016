use crate::error::ConfigError;
use crate::map::DEFAULT_JUMP_PERC;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "gridmaps.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Use the `[debug]` profile instead of `[dataset]`
    #[serde(default)]
    pub run_debug_mode: bool,
    /// Seed for the map generator; OS entropy when unset
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default = "default_debug_profile")]
    pub debug: DatasetConfig,
}

/// One generation profile: which maps to build and where to write them
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Side lengths of the square maps to generate
    #[serde(default = "default_rows")]
    pub rows: Vec<usize>,
    #[serde(default = "default_obstacle_percs")]
    pub obstacle_percs: Vec<u32>,
    /// Distinct maps wanted per (rows, obstacle_perc) configuration
    #[serde(default = "default_num_maps")]
    pub num_maps: usize,
    #[serde(default = "default_pairs_per_map")]
    pub pairs_per_map: usize,
    /// Consecutive duplicate maps tolerated before giving up on a configuration
    #[serde(default = "default_max_duplicate_attempts")]
    pub max_duplicate_attempts: usize,
    #[serde(default = "default_jump_perc")]
    pub jump_perc: u32,
    #[serde(default = "default_shuffle_edges")]
    pub shuffle_edges: bool,
    #[serde(default = "default_maps_dir")]
    pub maps_dir: PathBuf,
    #[serde(default = "default_pddl_dir")]
    pub pddl_dir: PathBuf,
    #[serde(default = "default_problem_extension")]
    pub problem_extension: String,
    /// Append to existing record files instead of truncating them
    #[serde(default)]
    pub append_records: bool,
}

// Default values
fn default_rows() -> Vec<usize> { vec![5, 10, 15, 20] }
fn default_obstacle_percs() -> Vec<u32> { vec![0, 10, 20, 30, 40] }
fn default_num_maps() -> usize { 10 }
fn default_pairs_per_map() -> usize { 20 }
fn default_max_duplicate_attempts() -> usize { 1000 }
fn default_jump_perc() -> u32 { DEFAULT_JUMP_PERC }
fn default_shuffle_edges() -> bool { true }
fn default_maps_dir() -> PathBuf { PathBuf::from("data/maps") }
fn default_pddl_dir() -> PathBuf { PathBuf::from("data/pddl") }
fn default_problem_extension() -> String { "pddl".to_string() }

fn default_debug_profile() -> DatasetConfig {
    DatasetConfig {
        rows: vec![3],
        obstacle_percs: vec![30],
        num_maps: 2,
        pairs_per_map: 2,
        maps_dir: PathBuf::from("debug/maps"),
        pddl_dir: PathBuf::from("debug/pddl"),
        ..DatasetConfig::default()
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            obstacle_percs: default_obstacle_percs(),
            num_maps: default_num_maps(),
            pairs_per_map: default_pairs_per_map(),
            max_duplicate_attempts: default_max_duplicate_attempts(),
            jump_perc: default_jump_perc(),
            shuffle_edges: default_shuffle_edges(),
            maps_dir: default_maps_dir(),
            pddl_dir: default_pddl_dir(),
            problem_extension: default_problem_extension(),
            append_records: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            run_debug_mode: false,
            seed: None,
            dataset: DatasetConfig::default(),
            debug: default_debug_profile(),
        }
    }
}

impl DatasetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows.is_empty() {
            return Err(ConfigError::Invalid("rows must not be empty".to_string()));
        }
        if let Some(&rows) = self.rows.iter().find(|&&rows| rows == 0) {
            return Err(ConfigError::Invalid(format!(
                "rows must be greater than 0, got {}",
                rows
            )));
        }
        if self.obstacle_percs.is_empty() {
            return Err(ConfigError::Invalid("obstacle_percs must not be empty".to_string()));
        }
        if let Some(&perc) = self.obstacle_percs.iter().find(|&&perc| perc > 100) {
            return Err(ConfigError::Invalid(format!(
                "obstacle_percs must be between 0 and 100, got {}",
                perc
            )));
        }
        if self.jump_perc > 100 {
            return Err(ConfigError::Invalid(format!(
                "jump_perc must be between 0 and 100, got {}",
                self.jump_perc
            )));
        }
        if self.problem_extension.is_empty() {
            return Err(ConfigError::Invalid("problem_extension must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.active().validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from file, or use defaults if it is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => {
                info!("No {} found, using default configuration", path.display());
                Config::default()
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                warn!("Using default configuration");
                Config::default()
            }
        }
    }

    /// The profile selected by `run_debug_mode`
    pub fn active(&self) -> &DatasetConfig {
        if self.run_debug_mode {
            &self.debug
        } else {
            &self.dataset
        }
    }
}
