//! Common traits defining the services the planner consumes

use nalgebra::{Isometry3, UnitQuaternion, Vector3};

/// Collision oracle for a rigid body moving through a static scene
pub trait CollisionChecker {
    /// Whether the body placed at `pose` intersects the scene.
    ///
    /// Must be a pure query: callers may ask about any pose, in any order.
    fn is_colliding(&self, pose: &Isometry3<f64>) -> bool;
}

impl<F> CollisionChecker for F
where
    F: Fn(&Isometry3<f64>) -> bool,
{
    fn is_colliding(&self, pose: &Isometry3<f64>) -> bool {
        self(pose)
    }
}

/// Time-parameterized orientation on `[0, duration]`
pub trait RotationPath {
    fn duration(&self) -> f64;

    fn evaluate(&self, t: f64) -> UnitQuaternion<f64>;
}

/// Time-parameterized position on `[0, duration]`
pub trait TranslationPath {
    fn duration(&self) -> f64;

    fn evaluate(&self, t: f64) -> Vector3<f64>;
}

/// Builds rotation interpolants between two orientations
pub trait RotationSynthesizer {
    type Path: RotationPath + Clone;

    /// Interpolant from `begin` to `end`, matching the angular rates at
    /// both ends, over a fixed `duration`.
    fn build(
        &self,
        begin: &UnitQuaternion<f64>,
        end: &UnitQuaternion<f64>,
        rate_begin: &Vector3<f64>,
        rate_end: &Vector3<f64>,
        duration: f64,
    ) -> Self::Path;
}

/// Builds translation interpolants between two positions
pub trait TranslationSynthesizer {
    type Path: TranslationPath + Clone;

    fn build(
        &self,
        begin: &Vector3<f64>,
        end: &Vector3<f64>,
        rate_begin: &Vector3<f64>,
        rate_end: &Vector3<f64>,
        duration: f64,
    ) -> Self::Path;
}
