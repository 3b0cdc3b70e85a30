use thiserror::Error;

/// Rejected-request conditions, detected before any randomness is drawn.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("at least 2 locations are required, got {0}")]
    TooFewLocations(usize),
    #[error("population size must be at least 4 so the survivor half holds two parents, got {0}")]
    PopulationTooSmall(usize),
}
