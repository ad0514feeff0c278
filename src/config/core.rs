//! Core configuration structure for newton-gbt.
//!
//! [`Config`] holds every training hyperparameter, validates it, and can be
//! read from JSON/TOML files or overridden through `NEWTON_GBT_*` environment
//! variables. [`TreeParams`] is the immutable subset the tree builder needs.

use crate::config_error;
use crate::core::constants::*;
use crate::core::error::{GbtError, Result};
use crate::core::types::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Training configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of boosting rounds (trees in the final ensemble)
    pub num_rounds: usize,
    /// Maximum depth at which a node may still split
    pub max_depth: usize,
    /// Nominal shrink factor recorded on every tree after the first
    pub shrinkage_rate: f64,
    /// Minimum gain a split must reach (gamma)
    pub min_split_gain: f64,
    /// Nodes with fewer rows than this become leaves
    pub min_node_size: usize,
    /// L2 regularization added to the hessian sum (lambda)
    pub lambda: f64,
    /// Loss function
    pub loss: LossType,
    /// Node score used in split gain
    pub gain_formula: GainFormula,
    /// Which value is recorded as split threshold
    pub threshold_mode: ThresholdMode,
    /// Whether the per-tree shrink factor scales predictions
    pub shrinkage_mode: ShrinkageMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            num_rounds: DEFAULT_NUM_ROUNDS,
            max_depth: DEFAULT_MAX_DEPTH,
            shrinkage_rate: DEFAULT_SHRINKAGE_RATE,
            min_split_gain: DEFAULT_MIN_SPLIT_GAIN,
            min_node_size: DEFAULT_MIN_NODE_SIZE,
            lambda: DEFAULT_LAMBDA,
            loss: LossType::default(),
            gain_formula: GainFormula::default(),
            threshold_mode: ThresholdMode::default(),
            shrinkage_mode: ShrinkageMode::default(),
        }
    }
}

/// Hyperparameters consumed by the tree builder.
///
/// Extracted once per training run and passed by reference through the
/// recursive construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeParams {
    /// Maximum depth at which a node may still split
    pub max_depth: usize,
    /// Minimum admissible gain (gamma)
    pub min_split_gain: f64,
    /// Minimum rows for split search
    pub min_node_size: usize,
    /// L2 leaf regularization
    pub lambda: f64,
    /// Node score strategy
    pub gain_formula: GainFormula,
    /// Threshold recording strategy
    pub threshold_mode: ThresholdMode,
}

impl Default for TreeParams {
    fn default() -> Self {
        Config::default().tree_params()
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate all hyperparameters.
    pub fn validate(&self) -> Result<()> {
        if self.num_rounds == 0 {
            return Err(GbtError::invalid_parameter(
                "num_rounds",
                self.num_rounds.to_string(),
                "must be positive",
            ));
        }

        if self.max_depth == 0 {
            return Err(GbtError::invalid_parameter(
                "max_depth",
                self.max_depth.to_string(),
                "must be positive",
            ));
        }

        if !(self.shrinkage_rate > 0.0 && self.shrinkage_rate <= 1.0) {
            return Err(GbtError::invalid_parameter(
                "shrinkage_rate",
                self.shrinkage_rate.to_string(),
                "must be in range (0.0, 1.0]",
            ));
        }

        if !self.lambda.is_finite() || self.lambda < 0.0 {
            return Err(GbtError::invalid_parameter(
                "lambda",
                self.lambda.to_string(),
                "must be finite and non-negative",
            ));
        }

        if !self.min_split_gain.is_finite() {
            return Err(GbtError::invalid_parameter(
                "min_split_gain",
                self.min_split_gain.to_string(),
                "must be finite",
            ));
        }

        Ok(())
    }

    /// True when `shrinkage_rate` is set but cannot affect predictions
    /// under [`ShrinkageMode::Recorded`].
    pub fn has_inert_shrinkage(&self) -> bool {
        self.shrinkage_mode == ShrinkageMode::Recorded && self.shrinkage_rate != 1.0
    }

    /// Logs a warning for [`Config::has_inert_shrinkage`]. Called once per
    /// model, not by [`Config::validate`].
    pub fn warn_inert_shrinkage(&self) {
        if self.has_inert_shrinkage() {
            log::warn!(
                "shrinkage_rate {} is recorded on each tree but does not scale predictions \
                 (shrinkage_mode = recorded)",
                self.shrinkage_rate
            );
        }
    }

    /// Hyperparameters handed to the tree builder.
    pub fn tree_params(&self) -> TreeParams {
        TreeParams {
            max_depth: self.max_depth,
            min_split_gain: self.min_split_gain,
            min_node_size: self.min_node_size,
            lambda: self.lambda,
            gain_formula: self.gain_formula,
            threshold_mode: self.threshold_mode,
        }
    }

    /// Nominal shrink factor recorded on the tree of the given round.
    pub fn shrinkage_for_round(&self, round: IterationIndex) -> f64 {
        if round == 0 {
            1.0
        } else {
            self.shrinkage_rate
        }
    }

    /// Load configuration from a `.json` or `.toml` file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: Config = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(GbtError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => {
                return Err(GbtError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from `NEWTON_GBT_*` environment variables on top of
    /// the defaults.
    pub fn load_from_environment() -> Result<Self> {
        let mut config = Config::default();
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Apply `NEWTON_GBT_*` environment variables to this configuration and
    /// re-validate it.
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup. Keys are the upper-case
    /// field names with the `NEWTON_GBT_` prefix, e.g. `NEWTON_GBT_MAX_DEPTH`.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: FromStr>(key: &str, raw: &str) -> Result<T> {
            raw.trim()
                .parse()
                .map_err(|_| config_error!("Invalid {}: '{}'", key, raw))
        }

        let var = |name: &str| {
            let key = format!("{}{}", ENV_PREFIX, name);
            lookup(&key).map(|value| (key, value))
        };

        if let Some((key, val)) = var("NUM_ROUNDS") {
            self.num_rounds = parse(&key, &val)?;
        }
        if let Some((key, val)) = var("MAX_DEPTH") {
            self.max_depth = parse(&key, &val)?;
        }
        if let Some((key, val)) = var("SHRINKAGE_RATE") {
            self.shrinkage_rate = parse(&key, &val)?;
        }
        if let Some((key, val)) = var("MIN_SPLIT_GAIN") {
            self.min_split_gain = parse(&key, &val)?;
        }
        if let Some((key, val)) = var("MIN_NODE_SIZE") {
            self.min_node_size = parse(&key, &val)?;
        }
        if let Some((key, val)) = var("LAMBDA") {
            self.lambda = parse(&key, &val)?;
        }
        if let Some((key, val)) = var("LOSS") {
            self.loss = parse(&key, &val)?;
        }
        if let Some((key, val)) = var("GAIN_FORMULA") {
            self.gain_formula = parse(&key, &val)?;
        }
        if let Some((key, val)) = var("THRESHOLD_MODE") {
            self.threshold_mode = parse(&key, &val)?;
        }
        if let Some((key, val)) = var("SHRINKAGE_MODE") {
            self.shrinkage_mode = parse(&key, &val)?;
        }

        self.validate()
    }
}

/// Builder for [`Config`] that collects validation problems until `build`.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
    validation_errors: Vec<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the number of boosting rounds
    pub fn num_rounds(mut self, rounds: usize) -> Self {
        if rounds == 0 {
            self.validation_errors
                .push("num_rounds must be positive".to_string());
        }
        self.config.num_rounds = rounds;
        self
    }

    /// Set the maximum tree depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        if depth == 0 {
            self.validation_errors
                .push("max_depth must be positive".to_string());
        }
        self.config.max_depth = depth;
        self
    }

    /// Set the nominal shrinkage rate
    pub fn shrinkage_rate(mut self, rate: f64) -> Self {
        if !(rate > 0.0 && rate <= 1.0) {
            self.validation_errors
                .push("shrinkage_rate must be in range (0.0, 1.0]".to_string());
        }
        self.config.shrinkage_rate = rate;
        self
    }

    /// Set the minimum split gain (gamma)
    pub fn min_split_gain(mut self, gain: f64) -> Self {
        if !gain.is_finite() {
            self.validation_errors
                .push("min_split_gain must be finite".to_string());
        }
        self.config.min_split_gain = gain;
        self
    }

    /// Set the minimum node size
    pub fn min_node_size(mut self, size: usize) -> Self {
        self.config.min_node_size = size;
        self
    }

    /// Set L2 leaf regularization
    pub fn lambda(mut self, lambda: f64) -> Self {
        if !lambda.is_finite() || lambda < 0.0 {
            self.validation_errors
                .push("lambda must be finite and non-negative".to_string());
        }
        self.config.lambda = lambda;
        self
    }

    /// Set the loss function
    pub fn loss(mut self, loss: LossType) -> Self {
        self.config.loss = loss;
        self
    }

    /// Set the gain formula
    pub fn gain_formula(mut self, formula: GainFormula) -> Self {
        self.config.gain_formula = formula;
        self
    }

    /// Set the threshold mode
    pub fn threshold_mode(mut self, mode: ThresholdMode) -> Self {
        self.config.threshold_mode = mode;
        self
    }

    /// Set the shrinkage mode
    pub fn shrinkage_mode(mut self, mode: ShrinkageMode) -> Self {
        self.config.shrinkage_mode = mode;
        self
    }

    /// Build the configuration, failing on the first collected problem.
    pub fn build(self) -> Result<Config> {
        if !self.validation_errors.is_empty() {
            return Err(config_error!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            ));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.num_rounds, 100);
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.shrinkage_rate, 0.3);
        assert_eq!(config.min_split_gain, 0.0);
        assert_eq!(config.min_node_size, 1);
        assert_eq!(config.lambda, 0.1);
        assert_eq!(config.loss, LossType::Squared);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.max_depth = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.num_rounds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.lambda = -0.5;
        let err = config.validate().unwrap_err();
        assert!(err.is_configuration_error());

        let mut config = Config::default();
        config.shrinkage_rate = 0.0;
        assert!(config.validate().is_err());
        config.shrinkage_rate = 1.5;
        assert!(config.validate().is_err());
        config.shrinkage_rate = 1.0;
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.min_split_gain = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.min_node_size = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .num_rounds(10)
            .max_depth(3)
            .lambda(0.0)
            .loss(LossType::Logistic)
            .gain_formula(GainFormula::Standard)
            .build()
            .unwrap();

        assert_eq!(config.num_rounds, 10);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.lambda, 0.0);
        assert_eq!(config.loss, LossType::Logistic);
        assert_eq!(config.gain_formula, GainFormula::Standard);
    }

    #[test]
    fn test_builder_collects_errors() {
        let result = ConfigBuilder::new().max_depth(0).lambda(-1.0).build();
        let message = result.unwrap_err().to_string();
        assert!(message.contains("max_depth"));
        assert!(message.contains("lambda"));
    }

    #[test]
    fn test_tree_params_extraction() {
        let config = ConfigBuilder::new()
            .max_depth(4)
            .min_split_gain(0.5)
            .min_node_size(3)
            .threshold_mode(ThresholdMode::SortedBoundary)
            .build()
            .unwrap();
        let params = config.tree_params();
        assert_eq!(params.max_depth, 4);
        assert_eq!(params.min_split_gain, 0.5);
        assert_eq!(params.min_node_size, 3);
        assert_eq!(params.threshold_mode, ThresholdMode::SortedBoundary);
    }

    #[test]
    fn test_shrinkage_for_round() {
        let config = Config::default();
        assert_eq!(config.shrinkage_for_round(0), 1.0);
        assert_eq!(config.shrinkage_for_round(1), 0.3);
        assert_eq!(config.shrinkage_for_round(99), 0.3);
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("NEWTON_GBT_NUM_ROUNDS", "7"),
            ("NEWTON_GBT_LOSS", "logistic"),
            ("NEWTON_GBT_SHRINKAGE_MODE", "applied"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.num_rounds, 7);
        assert_eq!(config.loss, LossType::Logistic);
        assert_eq!(config.shrinkage_mode, ShrinkageMode::Applied);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides_from(|key| {
            (key == "NEWTON_GBT_MAX_DEPTH").then(|| "deep".to_string())
        });
        assert!(result.is_err());

        let mut config = Config::default();
        let result = config.apply_overrides_from(|key| {
            (key == "NEWTON_GBT_LAMBDA").then(|| "-1".to_string())
        });
        assert!(matches!(result, Err(GbtError::InvalidParameter { .. })));
    }

    #[test]
    fn test_inert_shrinkage_detection() {
        assert!(Config::default().has_inert_shrinkage());

        let config = ConfigBuilder::new().shrinkage_rate(1.0).build().unwrap();
        assert!(!config.has_inert_shrinkage());

        let config = ConfigBuilder::new()
            .shrinkage_mode(ShrinkageMode::Applied)
            .build()
            .unwrap();
        assert!(!config.has_inert_shrinkage());
    }

    #[test]
    fn test_unsupported_extension() {
        let config = Config::default();
        assert!(config.save_to_file("config.yaml").is_err());
    }
}
