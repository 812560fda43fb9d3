//! Shepard (inverse distance) kernel implementation

use crate::core::types::{validate_power, validate_radius};
use crate::core::{AttributeSource, Point3, PointLocator, PointSet, Result};
use crate::kernel::traits::{radial_weights, InterpolationKernel, KernelBinding};
use log::debug;
use std::sync::Arc;

/// Shepard kernel: w = 1 / r^p
///
/// The common choice p = 2 avoids the square root entirely.
#[derive(Debug, Clone)]
pub struct ShepardKernel {
    radius: f64,
    power: f64,
    binding: KernelBinding,
}

impl ShepardKernel {
    /// Create a new Shepard kernel
    pub fn new(radius: f64, power: f64) -> Self {
        Self {
            radius,
            power,
            binding: KernelBinding::default(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn power(&self) -> f64 {
        self.power
    }
}

impl Default for ShepardKernel {
    /// Radius 1.0, power 2.0
    fn default() -> Self {
        Self::new(1.0, 2.0)
    }
}

impl InterpolationKernel for ShepardKernel {
    fn name(&self) -> &'static str {
        "shepard"
    }

    fn initialize(
        &mut self,
        locator: Arc<dyn PointLocator>,
        points: Arc<dyn PointSet>,
        _attributes: &dyn AttributeSource,
    ) -> Result<()> {
        self.binding.release();
        validate_radius(self.radius)?;
        validate_power(self.power)?;
        self.binding.bind(locator, points);
        debug!(
            "Initialized shepard kernel: radius={}, power={}",
            self.radius, self.power
        );
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
        let points = self.binding.points()?;
        let power = self.power;
        if power == 2.0 {
            radial_weights(points, x, ids, weights, |r2| 1.0 / r2)
        } else {
            radial_weights(points, x, ids, weights, |r2| 1.0 / r2.sqrt().powf(power))
        }
    }
}
