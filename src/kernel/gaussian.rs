//! Isotropic Gaussian kernel implementation
//!
//! The Gaussian kernel is defined as: w = exp(-(sharpness / radius)² * r²)
//! where r is the distance from the query point to a neighbor.

use crate::core::types::{validate_radius, validate_sharpness};
use crate::core::{AttributeSource, Point3, PointLocator, PointSet, Result};
use crate::kernel::traits::{radial_weights, InterpolationKernel, KernelBinding};
use log::debug;
use std::sync::Arc;

/// Isotropic Gaussian kernel: w = exp(-f2 * r²), f2 = (sharpness / radius)²
#[derive(Debug, Clone)]
pub struct GaussianKernel {
    radius: f64,
    sharpness: f64,
    f2: f64,
    binding: KernelBinding,
}

impl GaussianKernel {
    /// Create a new Gaussian kernel
    pub fn new(radius: f64, sharpness: f64) -> Self {
        Self {
            radius,
            sharpness,
            f2: (sharpness / radius).powi(2),
            binding: KernelBinding::default(),
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn sharpness(&self) -> f64 {
        self.sharpness
    }
}

impl Default for GaussianKernel {
    /// Radius 1.0, sharpness 2.0
    fn default() -> Self {
        Self::new(1.0, 2.0)
    }
}

impl InterpolationKernel for GaussianKernel {
    fn name(&self) -> &'static str {
        "gaussian"
    }

    fn initialize(
        &mut self,
        locator: Arc<dyn PointLocator>,
        points: Arc<dyn PointSet>,
        _attributes: &dyn AttributeSource,
    ) -> Result<()> {
        self.binding.release();
        validate_radius(self.radius)?;
        validate_sharpness(self.sharpness)?;
        self.binding.bind(locator, points);
        self.f2 = (self.sharpness / self.radius).powi(2);
        debug!(
            "Initialized gaussian kernel: radius={}, sharpness={}",
            self.radius, self.sharpness
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
        let f2 = self.f2;
        radial_weights(self.binding.points()?, x, ids, weights, |r2| {
            (-f2 * r2).exp()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EllipsoidalConfig, NoAttributes};
    use crate::data::PointCloud;
    use crate::kernel::EllipsoidalGaussianKernel;
    use crate::locator::BruteForceLocator;
    use approx::assert_relative_eq;

    fn bind<K: InterpolationKernel>(kernel: &mut K, cloud: PointCloud) {
        let locator = Arc::new(BruteForceLocator::build(&cloud));
        kernel
            .initialize(locator, Arc::new(cloud), &NoAttributes)
            .unwrap();
    }

    #[test]
    fn test_gaussian_weights() {
        let mut kernel = GaussianKernel::new(1.0, 2.0);
        bind(&mut kernel, PointCloud::new(vec![[0.5, 0.0, 0.0], [0.0, 0.25, 0.0]]));

        let hood = kernel.evaluate(&[0.0, 0.0, 0.0]).unwrap();
        let a = (-4.0 * 0.25f64).exp();
        let b = (-4.0 * 0.0625f64).exp();
        assert_eq!(hood.ids, vec![0, 1]);
        assert_relative_eq!(hood.weights[0], a / (a + b), epsilon = 1e-12);
        assert_relative_eq!(hood.weights[1], b / (a + b), epsilon = 1e-12);
    }

    #[test]
    fn test_matches_spherical_ellipsoid() {
        // eccentricity 1 without normals is the same falloff
        let points = vec![[0.2, 0.1, 0.0], [0.0, 0.4, 0.3], [0.6, 0.0, 0.1]];
        let mut gaussian = GaussianKernel::new(1.5, 3.0);
        bind(&mut gaussian, PointCloud::new(points.clone()));

        let mut ellipsoidal = EllipsoidalGaussianKernel::new(
            EllipsoidalConfig::default()
                .with_radius(1.5)
                .with_sharpness(3.0)
                .with_eccentricity(1.0)
                .with_normals(false),
        );
        bind(&mut ellipsoidal, PointCloud::new(points));

        let x = [0.1, 0.1, 0.1];
        let a = gaussian.evaluate(&x).unwrap();
        let b = ellipsoidal.evaluate(&x).unwrap();
        assert_eq!(a.ids, b.ids);
        for (wa, wb) in a.weights.iter().zip(&b.weights) {
            assert_relative_eq!(wa, wb, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let cloud = PointCloud::new(vec![[0.0, 0.0, 0.0]]);
        let locator = Arc::new(BruteForceLocator::build(&cloud));
        let cloud = Arc::new(cloud);

        let mut kernel = GaussianKernel::new(-1.0, 2.0);
        assert!(kernel
            .initialize(locator.clone(), cloud.clone(), &NoAttributes)
            .is_err());

        let mut kernel = GaussianKernel::new(1.0, -2.0);
        assert!(kernel.initialize(locator, cloud, &NoAttributes).is_err());
    }

    #[test]
    fn test_reset() {
        let mut kernel = GaussianKernel::default();
        bind(&mut kernel, PointCloud::new(vec![[0.0, 0.0, 0.0]]));
        assert!(kernel.is_initialized());
        kernel.reset();
        assert!(!kernel.is_initialized());
        assert!(kernel.evaluate(&[0.0, 0.0, 0.0]).is_err());
    }
}
