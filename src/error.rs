//! Error types for gati-plan.

use thiserror::Error;

/// Errors raised during path construction or trajectory generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// A waypoint velocity constraint cannot be met under the configured
    /// acceleration limit and sampling step.
    #[error("waypoint velocity constraint of {velocity} at distance {dist} cannot be met")]
    ConstraintInfeasible {
        /// Arc-length position of the constraint.
        dist: f64,
        /// The required velocity.
        velocity: f64,
    },

    /// Generation parameters or robot specs are out of range.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// An arc-length lookup was attempted before the table was generated.
    #[error("arc-length lookup table not generated")]
    PrecomputationMissing,
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, PlanError>;
