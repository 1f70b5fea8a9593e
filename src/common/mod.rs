//! Common types, traits, and error definitions for se3_planning
//!
//! This module provides the foundational building blocks shared by the
//! planner, the trajectory synthesizers and the collision oracle.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
