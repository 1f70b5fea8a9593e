//! Common types used throughout se3_planning

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

use crate::common::error::{PlanningError, PlanningResult};

/// A sample point in the planning space: a pose in SE(3) plus rates.
///
/// `orientation` is a `UnitQuaternion`, so it stays on the unit 3-sphere
/// by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub orientation: UnitQuaternion<f64>,
    pub angular_rate: Vector3<f64>,
    pub position: Vector3<f64>,
    pub linear_rate: Vector3<f64>,
}

impl Configuration {
    /// Configuration at rest
    pub fn new(orientation: UnitQuaternion<f64>, position: Vector3<f64>) -> Self {
        Self {
            orientation,
            angular_rate: Vector3::zeros(),
            position,
            linear_rate: Vector3::zeros(),
        }
    }

    pub fn with_rates(
        orientation: UnitQuaternion<f64>,
        angular_rate: Vector3<f64>,
        position: Vector3<f64>,
        linear_rate: Vector3<f64>,
    ) -> Self {
        Self {
            orientation,
            angular_rate,
            position,
            linear_rate,
        }
    }

    pub fn identity() -> Self {
        Self::new(UnitQuaternion::identity(), Vector3::zeros())
    }

    /// Rigid-body transform of this configuration
    pub fn pose(&self) -> Isometry3<f64> {
        compose_pose(&self.orientation, &self.position)
    }
}

/// Combine an orientation and a position into one rigid-body transform.
pub fn compose_pose(orientation: &UnitQuaternion<f64>, position: &Vector3<f64>) -> Isometry3<f64> {
    Isometry3::from_parts(Translation3::from(*position), *orientation)
}

/// Per-axis box bounds of the translational part of the planning space
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationLimits {
    pub lower: Vector3<f64>,
    pub upper: Vector3<f64>,
}

impl TranslationLimits {
    pub fn new(lower: Vector3<f64>, upper: Vector3<f64>) -> PlanningResult<Self> {
        for i in 0..3 {
            if !lower[i].is_finite() || !upper[i].is_finite() {
                return Err(PlanningError::InvalidParameter(format!(
                    "translational limit on axis {} is not finite",
                    i
                )));
            }
            if lower[i] > upper[i] {
                return Err(PlanningError::InvalidParameter(format!(
                    "lower translational limit {} exceeds upper limit {} on axis {}",
                    lower[i], upper[i], i
                )));
            }
        }
        Ok(Self { lower, upper })
    }

    /// Mirror `upper` into the lower limits. The lower z limit is clamped
    /// at the floor plane (z = 0).
    pub fn symmetric(upper: Vector3<f64>) -> PlanningResult<Self> {
        let mut lower = -upper;
        if lower.z < 0.0 {
            lower.z = 0.0;
        }
        Self::new(lower, upper)
    }

    pub fn contains(&self, position: &Vector3<f64>) -> bool {
        (0..3).all(|i| position[i] >= self.lower[i] && position[i] <= self.upper[i])
    }
}
