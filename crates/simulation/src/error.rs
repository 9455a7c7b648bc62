use descent_mesh::MeshError;
use thiserror::Error;

use crate::ConfigError;

/// Errors returned by [`Simulation`](crate::Simulation) commands.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("mesh generation failed: {0}")]
    Mesh(#[from] MeshError),
}
