//! Planner parameters

use std::f64::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::{PlanningError, PlanningResult};

/// Configuration for the bidirectional SE(3) RRT planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Maximum orientation step per extension (in metric units)
    pub step_size: f64,
    /// Duration of every interpolant between two vertices [s]
    pub interpolation_duration: f64,
    /// Time step for sampled collision checking along interpolants [s]
    pub discretization_time_step: f64,
    /// Number of nearest neighbors tried per extension, `None` for all
    pub max_neighbors: Option<usize>,
    /// Weight of the rotation geodesic term of the distance metric
    pub rotation_weight: f64,
    /// Weight of the translation term of the distance metric
    pub translation_weight: f64,
    /// Angular rate given to sampled configurations, per axis
    pub sample_angular_rate: f64,
    /// Linear rate given to sampled configurations, per axis
    pub sample_linear_rate: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            step_size: 0.7,
            interpolation_duration: 0.5,
            discretization_time_step: 1e-2,
            max_neighbors: None,
            rotation_weight: 1.0 / PI,
            translation_weight: 1.0,
            sample_angular_rate: 1e-3,
            sample_linear_rate: 0.0,
        }
    }
}

impl PlannerConfig {
    pub fn from_yaml_str(yaml: &str) -> PlanningResult<Self> {
        let config: PlannerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> PlanningResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> PlanningResult<()> {
        let positive = [
            ("step_size", self.step_size),
            ("interpolation_duration", self.interpolation_duration),
            ("discretization_time_step", self.discretization_time_step),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(PlanningError::InvalidParameter(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        let weights = [
            ("rotation_weight", self.rotation_weight),
            ("translation_weight", self.translation_weight),
        ];
        for (name, value) in weights {
            if !(value.is_finite() && value >= 0.0) {
                return Err(PlanningError::InvalidParameter(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        if self.max_neighbors == Some(0) {
            return Err(PlanningError::InvalidParameter(
                "max_neighbors must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
