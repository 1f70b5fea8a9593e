//! se3_planning - collision-free reorientation and translation planning
//!
//! This crate provides a bidirectional RRT planner over rigid-body poses,
//! together with default rotation/translation interpolants and a
//! collision oracle backed by parry.

// Core modules
pub mod common;

// Algorithm modules
pub mod collision;
pub mod path_planning;
pub mod trajectory;

// Re-export common types for convenience
pub use common::{compose_pose, Configuration, TranslationLimits};
pub use common::{CollisionChecker, RotationPath, RotationSynthesizer, TranslationPath, TranslationSynthesizer};
pub use common::{PlanningError, PlanningResult};
pub use path_planning::{BiRrtPlanner, ExtendStatus, PlannerConfig, TreeRole};
