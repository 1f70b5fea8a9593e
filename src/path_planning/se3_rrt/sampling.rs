//! Random configuration sampling

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::common::{Configuration, PlanningError, PlanningResult, TranslationLimits};
use crate::path_planning::se3_rrt::config::PlannerConfig;

/// Orientation drawn uniformly from SO(3).
///
/// A normalized 4D standard Gaussian is uniform on the unit 3-sphere, which
/// is the Haar measure on rotations. Normalizing a box-uniform 4-vector
/// instead would favor the corners of the box.
pub fn uniform_orientation<R: Rng + ?Sized>(rng: &mut R) -> UnitQuaternion<f64> {
    loop {
        let q = Quaternion::new(
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
            rng.sample::<f64, _>(StandardNormal),
        );
        if q.norm() > 1e-9 {
            return UnitQuaternion::from_quaternion(q);
        }
    }
}

/// Random pose in the planning space.
///
/// Rates are not sampled: they are fixed to the small constants of
/// `config`.
pub fn random_configuration<R: Rng + ?Sized>(
    rng: &mut R,
    limits: Option<&TranslationLimits>,
    config: &PlannerConfig,
) -> PlanningResult<Configuration> {
    let limits = limits.ok_or_else(|| {
        PlanningError::Configuration("translational limits have not been set".to_string())
    })?;

    let orientation = uniform_orientation(rng);
    let position = Vector3::from_fn(|i, _| rng.gen_range(limits.lower[i]..=limits.upper[i]));

    Ok(Configuration::with_rates(
        orientation,
        Vector3::repeat(config.sample_angular_rate),
        position,
        Vector3::repeat(config.sample_linear_rate),
    ))
}
