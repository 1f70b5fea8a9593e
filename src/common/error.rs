//! Error types for se3_planning

use thiserror::Error;

/// Main error type for the planner and its collaborators
#[derive(Error, Debug)]
pub enum PlanningError {
    /// Planner was not configured before use (e.g. translational limits unset)
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    /// Malformed piecewise-polynomial text
    #[error("Trajectory format error: {0}")]
    TrajectoryFormat(String),
    /// Planner configuration could not be parsed
    #[error("Config load error: {0}")]
    ConfigLoad(String),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for PlanningError {
    fn from(e: serde_yaml::Error) -> Self {
        PlanningError::ConfigLoad(e.to_string())
    }
}

/// Result type alias for planning operations
pub type PlanningResult<T> = Result<T, PlanningError>;
