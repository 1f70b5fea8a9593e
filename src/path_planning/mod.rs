// Path Planning algorithms module

pub mod se3_rrt;

pub use se3_rrt::*;
