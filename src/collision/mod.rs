//! Collision oracle for a rigid body among static obstacles
//!
//! Backed by parry's pairwise intersection test. The scene is immutable
//! once handed to the planner, so every query is a pure function of the
//! pose.

use nalgebra::Isometry3;
use parry3d_f64::query;
use parry3d_f64::shape::SharedShape;

use crate::common::CollisionChecker;

/// Static obstacle placed in the world frame
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub pose: Isometry3<f64>,
    pub shape: SharedShape,
}

impl Obstacle {
    pub fn new(pose: Isometry3<f64>, shape: SharedShape) -> Self {
        Self { pose, shape }
    }
}

/// Rigid body shape checked against a list of obstacles
#[derive(Debug, Clone)]
pub struct SceneCollisionChecker {
    robot: SharedShape,
    obstacles: Vec<Obstacle>,
}

impl SceneCollisionChecker {
    pub fn new(robot: SharedShape) -> Self {
        Self {
            robot,
            obstacles: Vec::new(),
        }
    }

    pub fn with_obstacle(mut self, pose: Isometry3<f64>, shape: SharedShape) -> Self {
        self.add_obstacle(pose, shape);
        self
    }

    pub fn add_obstacle(&mut self, pose: Isometry3<f64>, shape: SharedShape) {
        self.obstacles.push(Obstacle::new(pose, shape));
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

impl CollisionChecker for SceneCollisionChecker {
    fn is_colliding(&self, pose: &Isometry3<f64>) -> bool {
        self.obstacles.iter().any(|obstacle| {
            match query::intersection_test(pose, &*self.robot, &obstacle.pose, &*obstacle.shape) {
                Ok(hit) => hit,
                Err(_) => {
                    // unknown shape pair: refuse the pose
                    log::warn!("Unsupported shape pair in intersection test, treating pose as colliding");
                    true
                }
            }
        })
    }
}
