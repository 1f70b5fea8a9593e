//! Cubic rotation interpolants on SO(3)
//!
//! The path is `R(t) = R0 * exp(r(t))` where `r` is a cubic polynomial in
//! the Lie algebra so(3) with `r(0) = 0` and `r(T) = log(R0^T * R1)`. The
//! rates are body-frame angular velocities; the end rate is pulled back
//! into the algebra through the inverse right Jacobian.

use nalgebra::{Matrix3, UnitQuaternion, Vector3};

use crate::common::{RotationPath, RotationSynthesizer};

const SMALL_ANGLE: f64 = 1e-6;

/// Inverse of the right Jacobian of SO(3) at rotation vector `phi`
pub fn right_jacobian_inverse(phi: &Vector3<f64>) -> Matrix3<f64> {
    let theta = phi.norm();
    let skew = phi.cross_matrix();
    let coeff = if theta < SMALL_ANGLE {
        1.0 / 12.0
    } else {
        // (1 + cos) / sin == cot(theta / 2), finite at theta = pi
        1.0 / (theta * theta) - 1.0 / (2.0 * theta * (theta / 2.0).tan())
    };
    Matrix3::identity() + 0.5 * skew + coeff * skew * skew
}

/// Rotation path produced by [`So3CubicInterpolator`]
#[derive(Debug, Clone)]
pub struct So3CubicPath {
    start: UnitQuaternion<f64>,
    // r(t) = c[0] t + c[1] t^2 + c[2] t^3
    coefficients: [Vector3<f64>; 3],
    duration: f64,
}

impl So3CubicPath {
    /// Rotation vector `r(t)` relative to the start orientation
    pub fn rotation_vector(&self, t: f64) -> Vector3<f64> {
        let t = t.clamp(0.0, self.duration);
        let [c1, c2, c3] = &self.coefficients;
        ((c3 * t + c2) * t + c1) * t
    }

    pub fn start(&self) -> &UnitQuaternion<f64> {
        &self.start
    }
}

impl RotationPath for So3CubicPath {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn evaluate(&self, t: f64) -> UnitQuaternion<f64> {
        self.start * UnitQuaternion::from_scaled_axis(self.rotation_vector(t))
    }
}

/// Builds [`So3CubicPath`]s matching orientation and angular rate at both ends
#[derive(Debug, Clone, Copy, Default)]
pub struct So3CubicInterpolator;

impl RotationSynthesizer for So3CubicInterpolator {
    type Path = So3CubicPath;

    fn build(
        &self,
        begin: &UnitQuaternion<f64>,
        end: &UnitQuaternion<f64>,
        rate_begin: &Vector3<f64>,
        rate_end: &Vector3<f64>,
        duration: f64,
    ) -> So3CubicPath {
        let phi = (begin.inverse() * end).scaled_axis();
        let v0 = *rate_begin;
        let v1 = right_jacobian_inverse(&phi) * rate_end;

        let t = duration;
        let c2 = (3.0 * phi - (2.0 * v0 + v1) * t) / (t * t);
        let c3 = (-2.0 * phi + (v0 + v1) * t) / (t * t * t);

        So3CubicPath {
            start: *begin,
            coefficients: [v0, c2, c3],
            duration,
        }
    }
}
