//! Interpolation weighting kernels for point clouds
//!
//! The centerpiece is an ellipsoidal Gaussian kernel: neighbors are weighted
//! by an anisotropic Gaussian oriented along each point's normal, so that
//! blending follows a surface instead of bleeding across it.

pub mod api;
pub mod core;
pub mod data;
pub mod kernel;
pub mod locator;
pub mod persistence;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{BoundKernel, KernelInfo, KernelSetup, QueryStats};
pub use crate::core::traits::*;
pub use crate::core::types::*;
pub use crate::core::{KernelError, Result};
pub use crate::data::{DataArray, PointCloud};
pub use crate::kernel::{
    EllipsoidalGaussianKernel, GaussianKernel, InterpolationKernel, KernelType, LinearKernel,
    ShepardKernel,
};
pub use crate::locator::{BruteForceLocator, RTreeLocator};

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
