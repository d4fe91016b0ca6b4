use thiserror::Error;

/// Failures of the collaborators around the simulation. The simulation
/// itself cannot fail; these are fatal at the process boundary.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("failed to set up logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
