//! Error types for the interpolation kernels

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Kernel not initialized")]
    NotInitialized,

    #[error("Weights sum to zero over {count} neighbors, cannot normalize")]
    ZeroWeightSum { count: usize },

    #[error("Weights over {count} neighbors do not sum to a finite value")]
    NonFiniteWeightSum { count: usize },

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, KernelError>;
