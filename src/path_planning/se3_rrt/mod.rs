//! Bidirectional RRT over rigid-body poses
//!
//! Plans a collision-free rotation-and-translation motion between two
//! poses. The configuration space is the unit quaternion sphere times a
//! translation box; vertices are joined by rotation and translation
//! interpolants that are collision checked at a fixed time step.

pub mod config;
pub mod feasibility;
pub mod metric;
pub mod planner;
pub mod sampling;
pub mod segment;
pub mod tree;

pub use config::*;
pub use feasibility::*;
pub use metric::*;
pub use planner::*;
pub use sampling::*;
pub use segment::*;
pub use tree::*;
