//! Sampled collision checking of poses and interpolants

use crate::common::{compose_pose, CollisionChecker, Configuration, RotationPath, TranslationPath};

/// Outcome of a trajectory feasibility check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feasibility {
    Feasible,
    /// First sampled instant found in collision
    Infeasible { time: f64 },
}

impl Feasibility {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible)
    }
}

/// Standalone check of the static pose of `config`
pub fn is_feasible_configuration<C: CollisionChecker + ?Sized>(checker: &C, config: &Configuration) -> bool {
    !checker.is_colliding(&config.pose())
}

/// Sweep the shared time domain of a rotation and a translation
/// interpolant at `time_step`, then check the final endpoint once more.
///
/// This is a sampled approximation: an obstacle thinner than the motion
/// between two samples can be missed.
pub fn check_trajectory<C, RP, TP>(checker: &C, rotation: &RP, translation: &TP, time_step: f64) -> Feasibility
where
    C: CollisionChecker + ?Sized,
    RP: RotationPath,
    TP: TranslationPath,
{
    let duration = rotation.duration().min(translation.duration());
    let colliding_at = |t: f64| checker.is_colliding(&compose_pose(&rotation.evaluate(t), &translation.evaluate(t)));

    // index-based so that rounding does not accumulate over the sweep
    let mut i = 0usize;
    loop {
        let t = i as f64 * time_step;
        if t >= duration {
            break;
        }
        if colliding_at(t) {
            return Feasibility::Infeasible { time: t };
        }
        i += 1;
    }

    if colliding_at(duration) {
        return Feasibility::Infeasible { time: duration };
    }
    Feasibility::Feasible
}
