//! Linear (uniform average) kernel implementation

use crate::core::types::validate_radius;
use crate::core::{AttributeSource, Point3, PointLocator, PointSet, Result};
use crate::kernel::traits::{radial_weights, InterpolationKernel, KernelBinding};
use std::sync::Arc;

/// Linear kernel: every neighbor within the radius gets weight 1/n
///
/// A neighbor coinciding with the query point still takes all the weight.
#[derive(Debug, Clone)]
pub struct LinearKernel {
    radius: f64,
    binding: KernelBinding,
}

impl LinearKernel {
    /// Create a new linear kernel
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            binding: KernelBinding::default(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Default for LinearKernel {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl InterpolationKernel for LinearKernel {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn initialize(
        &mut self,
        locator: Arc<dyn PointLocator>,
        points: Arc<dyn PointSet>,
        _attributes: &dyn AttributeSource,
    ) -> Result<()> {
        self.binding.release();
        validate_radius(self.radius)?;
        self.binding.bind(locator, points);
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.binding.is_bound()
    }

    fn reset(&mut self) {
        self.binding.release();
    }

    fn compute_basis(&self, x: &Point3, ids: &mut Vec<usize>) -> Result<usize> {
        self.binding.radius_basis(self.radius, x, ids)
    }

    fn compute_weights(
        &self,
        x: &Point3,
        ids: &mut Vec<usize>,
        weights: &mut Vec<f64>,
    ) -> Result<usize> {
        radial_weights(self.binding.points()?, x, ids, weights, |_| 1.0)
    }
}
