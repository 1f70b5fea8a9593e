//! Trajectory segments between vertices and their concatenation

use nalgebra::Isometry3;

use crate::common::{compose_pose, RotationPath, TranslationPath};

/// Rotation and translation interpolants sharing one time domain
#[derive(Debug, Clone)]
pub struct TrajectorySegment<RP, TP> {
    pub rotation: RP,
    pub translation: TP,
}

impl<RP: RotationPath, TP: TranslationPath> TrajectorySegment<RP, TP> {
    pub fn new(rotation: RP, translation: TP) -> Self {
        Self { rotation, translation }
    }

    pub fn duration(&self) -> f64 {
        self.rotation.duration().min(self.translation.duration())
    }

    pub fn pose_at(&self, t: f64) -> Isometry3<f64> {
        compose_pose(&self.rotation.evaluate(t), &self.translation.evaluate(t))
    }

    pub fn start_pose(&self) -> Isometry3<f64> {
        self.pose_at(0.0)
    }

    pub fn end_pose(&self) -> Isometry3<f64> {
        self.pose_at(self.duration())
    }
}

/// Segments played back to back from start to goal
#[derive(Debug, Clone)]
pub struct Se3Trajectory<RP, TP> {
    segments: Vec<TrajectorySegment<RP, TP>>,
}

impl<RP: RotationPath, TP: TranslationPath> Se3Trajectory<RP, TP> {
    pub fn new(segments: Vec<TrajectorySegment<RP, TP>>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[TrajectorySegment<RP, TP>] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration()).sum()
    }

    /// Pose at global time `t`, clamped to `[0, duration]`.
    /// `None` for an empty trajectory.
    pub fn pose_at(&self, t: f64) -> Option<Isometry3<f64>> {
        let last = self.segments.last()?;
        let mut remaining = t.max(0.0);
        for segment in &self.segments {
            let d = segment.duration();
            if remaining <= d {
                return Some(segment.pose_at(remaining));
            }
            remaining -= d;
        }
        Some(last.end_pose())
    }
}
