//! High-level API for computing interpolation weights
//!
//! This module wires a kernel, an R-tree locator and a point cloud together
//! so that weights can be requested with a single call per query point.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pointkernel::api::KernelSetup;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let kernel = KernelSetup::new()
//!     .with_radius(0.5)
//!     .with_sharpness(2.0)
//!     .with_eccentricity(4.0)
//!     .bind_csv("surface.csv")?;
//!
//! let hood = kernel.weights_at(&[0.1, 0.2, 0.0])?;
//! for (id, w) in hood.iter() {
//!     println!("{id}: {w:.4}");
//! }
//! # Ok(())
//! # }
//! ```

use crate::core::{EllipsoidalConfig, Neighborhood, Point3, Result};
use crate::data::PointCloud;
use crate::kernel::{EllipsoidalGaussianKernel, InterpolationKernel};
use crate::locator::RTreeLocator;
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;

/// Kernel configuration with builder pattern
pub struct KernelSetup<K: InterpolationKernel = EllipsoidalGaussianKernel> {
    kernel: K,
}

impl KernelSetup<EllipsoidalGaussianKernel> {
    /// Create a setup for the ellipsoidal Gaussian kernel with default parameters
    pub fn new() -> Self {
        Self {
            kernel: EllipsoidalGaussianKernel::default(),
        }
    }

    /// Create a setup for the ellipsoidal Gaussian kernel from a configuration
    pub fn from_config(config: EllipsoidalConfig) -> Self {
        Self {
            kernel: EllipsoidalGaussianKernel::new(config),
        }
    }

    /// Set search radius
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.kernel.set_radius(radius);
        self
    }

    /// Set falloff sharpness
    pub fn with_sharpness(mut self, sharpness: f64) -> Self {
        self.kernel.set_sharpness(sharpness);
        self
    }

    /// Set ellipsoid eccentricity
    pub fn with_eccentricity(mut self, eccentricity: f64) -> Self {
        self.kernel.set_eccentricity(eccentricity);
        self
    }

    /// Enable or disable normals
    pub fn with_normals(mut self, use_normals: bool) -> Self {
        self.kernel.set_use_normals(use_normals);
        self
    }

    /// Enable or disable scalars
    pub fn with_scalars(mut self, use_scalars: bool) -> Self {
        self.kernel.set_use_scalars(use_scalars);
        self
    }

    /// Set the normals array name
    pub fn with_normals_array(mut self, name: impl Into<String>) -> Self {
        self.kernel.set_normals_array_name(name);
        self
    }

    /// Set the scalars array name
    pub fn with_scalars_array(mut self, name: impl Into<String>) -> Self {
        self.kernel.set_scalars_array_name(name);
        self
    }

    /// Current ellipsoidal configuration
    pub fn config(&self) -> &EllipsoidalConfig {
        self.kernel.config()
    }
}

impl Default for KernelSetup<EllipsoidalGaussianKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: InterpolationKernel> KernelSetup<K> {
    /// Create a setup around any kernel
    pub fn with_kernel(kernel: K) -> Self {
        Self { kernel }
    }

    /// Bind to a point cloud
    pub fn bind(self, cloud: PointCloud) -> Result<BoundKernel<K>> {
        self.bind_shared(Arc::new(cloud))
    }

    /// Bind to a point cloud that is shared with other owners
    pub fn bind_shared(mut self, cloud: Arc<PointCloud>) -> Result<BoundKernel<K>> {
        let locator = Arc::new(RTreeLocator::build(cloud.as_ref()));
        self.kernel
            .initialize(locator, cloud.clone(), cloud.as_ref())?;
        info!(
            "Bound {} kernel to {} points",
            self.kernel.name(),
            cloud.len()
        );
        Ok(BoundKernel {
            kernel: self.kernel,
            cloud,
        })
    }

    /// Load a point cloud from CSV and bind to it
    pub fn bind_csv<P: AsRef<Path>>(self, path: P) -> Result<BoundKernel<K>> {
        let cloud = PointCloud::from_csv_file(path)?;
        self.bind(cloud)
    }
}

/// Initialized kernel together with the point cloud it reads
pub struct BoundKernel<K: InterpolationKernel> {
    kernel: K,
    cloud: Arc<PointCloud>,
}

impl<K: InterpolationKernel> BoundKernel<K> {
    /// Weights of the neighbors of a single query point
    pub fn weights_at(&self, x: &Point3) -> Result<Neighborhood> {
        self.kernel.evaluate(x)
    }

    /// Weights for several query points, evaluated in order
    ///
    /// Each query succeeds or fails on its own; a zero weight sum at one
    /// point does not affect the others.
    pub fn weights_for(&self, queries: &[Point3]) -> Vec<Result<Neighborhood>> {
        let mut ids = Vec::new();
        let mut weights = Vec::new();
        queries
            .iter()
            .map(|x| -> Result<Neighborhood> {
                self.kernel.compute_basis(x, &mut ids)?;
                self.kernel.compute_weights(x, &mut ids, &mut weights)?;
                Ok(Neighborhood::new(ids.clone(), weights.clone()))
            })
            .collect()
    }

    /// Kernel information
    pub fn info(&self) -> KernelInfo {
        KernelInfo {
            kernel: self.kernel.name(),
            n_points: self.cloud.len(),
            arrays: self.cloud.array_names().map(String::from).collect(),
        }
    }

    /// The bound kernel
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// The point cloud the kernel reads
    pub fn cloud(&self) -> &Arc<PointCloud> {
        &self.cloud
    }

    /// Release the kernel's bindings and hand it back
    pub fn into_kernel(mut self) -> K {
        self.kernel.reset();
        self.kernel
    }
}

/// Kernel information
#[derive(Debug, Clone)]
pub struct KernelInfo {
    pub kernel: &'static str,
    pub n_points: usize,
    pub arrays: Vec<String>,
}

/// Summary over a batch of weight queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryStats {
    pub queries: usize,
    pub empty: usize,
    pub failed: usize,
    pub neighbors: usize,
}

impl QueryStats {
    /// Tally a batch of results
    pub fn from_results(results: &[Result<Neighborhood>]) -> Self {
        let mut stats = Self {
            queries: results.len(),
            ..Self::default()
        };
        for result in results {
            match result {
                Ok(hood) if hood.is_empty() => stats.empty += 1,
                Ok(hood) => stats.neighbors += hood.len(),
                Err(_) => stats.failed += 1,
            }
        }
        debug!("Query stats: {stats:?}");
        stats
    }

    /// Mean neighbor count over the queries that produced weights
    pub fn mean_neighbors(&self) -> f64 {
        let weighted = self.queries - self.empty - self.failed;
        if weighted == 0 {
            0.0
        } else {
            self.neighbors as f64 / weighted as f64
        }
    }
}

/// Convenience functions for quick operations
pub mod quick {
    use super::*;
    use crate::kernel::KernelType;

    /// Weights at each query point for a CSV point cloud and a chosen kernel
    ///
    /// Fails on the first query whose weights cannot be computed.
    pub fn weights_from_csv<P: AsRef<Path>>(
        points_csv: P,
        queries: &[Point3],
        kind: &KernelType,
    ) -> Result<Vec<Neighborhood>> {
        let bound = KernelSetup::with_kernel(kind.build()).bind_csv(points_csv)?;
        bound.weights_for(queries).into_iter().collect()
    }

    /// Weights at one point with the default ellipsoidal kernel
    pub fn ellipsoidal_weights(cloud: PointCloud, x: &Point3) -> Result<Neighborhood> {
        KernelSetup::new().bind(cloud)?.weights_at(x)
    }
}
