use crate::core::models::algorithm::Algorithm;
use crate::core::scoring::ScoreWeights;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Fragment (AFP) detection parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FragmentConfig {
    /// Window length in residues.
    pub length: usize,
    /// Stride between window starts in both chains.
    pub step: usize,
    /// Largest accepted mean difference of intra-window distances, in Å.
    pub distance_tolerance: f64,
    /// Largest accepted local RMSD after superposition, in Å.
    pub rmsd_cut: f64,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            length: 8,
            step: 1,
            distance_tolerance: 3.0,
            rmsd_cut: 3.0,
        }
    }
}

/// Fragment chaining parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ChainingConfig {
    pub max_twists: usize,
    /// Largest gap between chained fragments, and largest internal gap count of a block.
    pub max_gap_length: usize,
    /// Deviation (Å) above which a predecessor's transform no longer fits a fragment.
    pub twist_rmsd_cut: f64,
}

impl Default for ChainingConfig {
    fn default() -> Self {
        Self {
            max_twists: 5,
            max_gap_length: 30,
            twist_rmsd_cut: 3.0,
        }
    }
}

/// Block refinement parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct OptimizationConfig {
    /// Hard cap on extend/split/merge/trim cycles.
    pub max_iterations: usize,
    /// Smallest block kept in a result.
    pub min_block_size: usize,
    pub extension_rmsd_cut: f64,
    pub extension_distance_cut: f64,
    pub split_rmsd_cut: f64,
    pub trim_distance_cut: f64,
    /// Largest rotation angle (degrees) between blocks that may merge.
    pub merge_angle_tolerance: f64,
    /// Largest displacement (Å) of the shared centroid between blocks that may merge.
    pub merge_shift_tolerance: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            min_block_size: 3,
            extension_rmsd_cut: 3.0,
            extension_distance_cut: 4.0,
            split_rmsd_cut: 3.0,
            trim_distance_cut: 5.0,
            merge_angle_tolerance: 10.0,
            merge_shift_tolerance: 2.0,
        }
    }
}

/// Extreme-value model of random alignment scores, used for P-values.
///
/// The location and scale of the Gumbel distribution grow with the logarithm of the
/// shorter chain length: `mu = a·ln L + b`, `beta = c·ln L + d`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SignificanceConfig {
    pub location_slope: f64,
    pub location_offset: f64,
    pub scale_slope: f64,
    pub scale_offset: f64,
}

impl Default for SignificanceConfig {
    fn default() -> Self {
        Self {
            location_slope: 5.0,
            location_offset: 2.0,
            scale_slope: 0.8,
            scale_offset: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AlignmentConfig {
    pub algorithm: Algorithm,
    pub fragment: FragmentConfig,
    pub chaining: ChainingConfig,
    pub scoring: ScoreWeights,
    pub optimization: OptimizationConfig,
    pub significance: SignificanceConfig,
}

impl AlignmentConfig {
    /// Parses and validates a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Twist budget after applying the algorithm's own restriction.
    pub fn effective_max_twists(&self) -> usize {
        if self.algorithm.allows_twists() {
            self.chaining.max_twists
        } else {
            0
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fragment.length < 3 {
            return Err(invalid("fragment.length", "must be at least 3"));
        }
        if self.fragment.step == 0 {
            return Err(invalid("fragment.step", "must be at least 1"));
        }
        if self.optimization.min_block_size < 3 {
            return Err(invalid("optimization.min-block-size", "must be at least 3"));
        }
        if self.optimization.max_iterations == 0 {
            return Err(invalid("optimization.max-iterations", "must be at least 1"));
        }
        for (parameter, value) in [
            ("fragment.distance-tolerance", self.fragment.distance_tolerance),
            ("fragment.rmsd-cut", self.fragment.rmsd_cut),
            ("chaining.twist-rmsd-cut", self.chaining.twist_rmsd_cut),
            ("optimization.extension-rmsd-cut", self.optimization.extension_rmsd_cut),
            ("optimization.extension-distance-cut", self.optimization.extension_distance_cut),
            ("optimization.split-rmsd-cut", self.optimization.split_rmsd_cut),
            ("optimization.trim-distance-cut", self.optimization.trim_distance_cut),
            ("optimization.merge-angle-tolerance", self.optimization.merge_angle_tolerance),
            ("optimization.merge-shift-tolerance", self.optimization.merge_shift_tolerance),
            ("significance.scale-offset", self.significance.scale_offset),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(parameter, "must be a positive number"));
            }
        }
        for (parameter, value) in [
            ("scoring.gap-penalty", self.scoring.gap_penalty),
            ("scoring.rmsd-penalty", self.scoring.rmsd_penalty),
            ("scoring.twist-penalty", self.scoring.twist_penalty),
            ("significance.scale-slope", self.significance.scale_slope),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(parameter, "must be a non-negative number"));
            }
        }
        Ok(())
    }
}

fn invalid(parameter: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        parameter,
        reason: reason.to_string(),
    }
}

/// Builds an [`AlignmentConfig`] from the defaults, overriding selected parameters.
#[derive(Default)]
pub struct AlignmentConfigBuilder {
    config: AlignmentConfig,
}

impl AlignmentConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: AlignmentConfig) -> Self {
        Self { config }
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.config.algorithm = algorithm;
        self
    }
    pub fn fragment_length(mut self, length: usize) -> Self {
        self.config.fragment.length = length;
        self
    }
    pub fn fragment_step(mut self, step: usize) -> Self {
        self.config.fragment.step = step;
        self
    }
    pub fn distance_tolerance(mut self, tolerance: f64) -> Self {
        self.config.fragment.distance_tolerance = tolerance;
        self
    }
    pub fn fragment_rmsd_cut(mut self, cut: f64) -> Self {
        self.config.fragment.rmsd_cut = cut;
        self
    }
    pub fn max_twists(mut self, twists: usize) -> Self {
        self.config.chaining.max_twists = twists;
        self
    }
    pub fn max_gap_length(mut self, length: usize) -> Self {
        self.config.chaining.max_gap_length = length;
        self
    }
    pub fn twist_rmsd_cut(mut self, cut: f64) -> Self {
        self.config.chaining.twist_rmsd_cut = cut;
        self
    }
    pub fn scoring(mut self, weights: ScoreWeights) -> Self {
        self.config.scoring = weights;
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.config.optimization.max_iterations = iterations;
        self
    }
    pub fn min_block_size(mut self, size: usize) -> Self {
        self.config.optimization.min_block_size = size;
        self
    }
    pub fn optimization(mut self, optimization: OptimizationConfig) -> Self {
        self.config.optimization = optimization;
        self
    }
    pub fn significance(mut self, significance: SignificanceConfig) -> Self {
        self.config.significance = significance;
        self
    }

    pub fn build(self) -> Result<AlignmentConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AlignmentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fragment.length, 8);
        assert_eq!(config.chaining.max_twists, 5);
        assert_eq!(config.algorithm, Algorithm::FatCatFlexible);
    }

    #[test]
    fn from_toml_str_overrides_only_given_keys() {
        let config = AlignmentConfig::from_toml_str(
            r#"
            algorithm = "fatcat-rigid"

            [fragment]
            length = 6

            [scoring]
            gap-penalty = 1.5
            "#,
        )
        .unwrap();
        assert_eq!(config.algorithm, Algorithm::FatCatRigid);
        assert_eq!(config.fragment.length, 6);
        assert_eq!(config.fragment.step, 1);
        assert_eq!(config.scoring.gap_penalty, 1.5);
        assert_eq!(config.scoring.twist_penalty, 5.0);
    }

    #[test]
    fn from_toml_str_rejects_unknown_keys() {
        let result = AlignmentConfig::from_toml_str("[fragment]\nwidth = 8\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn from_toml_str_validates_values() {
        let result = AlignmentConfig::from_toml_str("[optimization]\nmin-block-size = 2\n");
        assert_eq!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "optimization.min-block-size",
                reason: "must be at least 3".to_string(),
            })
        );
    }

    #[test]
    fn builder_rejects_negative_tolerance() {
        let result = AlignmentConfigBuilder::new().distance_tolerance(-1.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                parameter: "fragment.distance-tolerance",
                ..
            })
        ));
    }

    #[test]
    fn rigid_algorithms_have_no_twist_budget() {
        let flexible = AlignmentConfigBuilder::new().max_twists(3).build().unwrap();
        assert_eq!(flexible.effective_max_twists(), 3);

        let rigid = AlignmentConfigBuilder::new()
            .algorithm(Algorithm::FatCatRigid)
            .max_twists(3)
            .build()
            .unwrap();
        assert_eq!(rigid.effective_max_twists(), 0);
    }
}
