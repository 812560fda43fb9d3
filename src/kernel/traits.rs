//! Kernel trait definition

use crate::core::{
    AttributeSource, KernelError, Neighborhood, Point3, PointLocator, PointSet, Result,
};
use crate::utils::{dot, normalize_weights, sub};
use log::trace;
use std::fmt;
use std::sync::Arc;

/// Interpolation kernel trait
///
/// A kernel turns a query point into a set of contributing source points
/// (`compute_basis`) and a normalized weight per contributor
/// (`compute_weights`). Kernels are read-only once initialized, so a single
/// kernel can serve concurrent callers as long as each caller owns its id
/// and weight buffers.
pub trait InterpolationKernel: Send + Sync {
    /// Short identifier of the kernel
    fn name(&self) -> &'static str;

    /// Bind the kernel to a locator, a point set and its attribute arrays
    ///
    /// Calling this again releases the previous bindings first.
    fn initialize(
        &mut self,
        locator: Arc<dyn PointLocator>,
        points: Arc<dyn PointSet>,
        attributes: &dyn AttributeSource,
    ) -> Result<()>;

    /// Check whether the kernel is bound to a point set
    fn is_initialized(&self) -> bool;

    /// Release every binding; safe to call repeatedly
    fn reset(&mut self);

    /// Fill `ids` with the candidate neighbors of `x`, returning their count
    fn compute_basis(&self, x: &Point3, ids: &mut Vec<usize>) -> Result<usize>;

    /// Compute a normalized weight for every id in `ids`
    ///
    /// On return `ids` and `weights` have the same length, which is also
    /// returned. Kernels with an exact-hit short circuit truncate `ids` to
    /// the single coincident point.
    fn compute_weights(
        &self,
        x: &Point3,
        ids: &mut Vec<usize>,
        weights: &mut Vec<f64>,
    ) -> Result<usize>;

    /// Find neighbors of `x` and weight them in one call
    fn evaluate(&self, x: &Point3) -> Result<Neighborhood> {
        let mut ids = Vec::new();
        let mut weights = Vec::new();
        self.compute_basis(x, &mut ids)?;
        self.compute_weights(x, &mut ids, &mut weights)?;
        Ok(Neighborhood { ids, weights })
    }
}

impl<K: InterpolationKernel + ?Sized> InterpolationKernel for Box<K> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn initialize(
        &mut self,
        locator: Arc<dyn PointLocator>,
        points: Arc<dyn PointSet>,
        attributes: &dyn AttributeSource,
    ) -> Result<()> {
        (**self).initialize(locator, points, attributes)
    }

    fn is_initialized(&self) -> bool {
        (**self).is_initialized()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn compute_basis(&self, x: &Point3, ids: &mut Vec<usize>) -> Result<usize> {
        (**self).compute_basis(x, ids)
    }

    fn compute_weights(
        &self,
        x: &Point3,
        ids: &mut Vec<usize>,
        weights: &mut Vec<f64>,
    ) -> Result<usize> {
        (**self).compute_weights(x, ids, weights)
    }
}

/// Locator and point set shared by every kernel
#[derive(Default, Clone)]
pub struct KernelBinding {
    locator: Option<Arc<dyn PointLocator>>,
    points: Option<Arc<dyn PointSet>>,
}

impl KernelBinding {
    /// Hold the locator and point set, dropping any previous ones
    pub fn bind(&mut self, locator: Arc<dyn PointLocator>, points: Arc<dyn PointSet>) {
        self.locator = Some(locator);
        self.points = Some(points);
    }

    /// Drop the held locator and point set
    pub fn release(&mut self) {
        self.locator = None;
        self.points = None;
    }

    pub fn is_bound(&self) -> bool {
        self.locator.is_some() && self.points.is_some()
    }

    pub fn locator(&self) -> Result<&dyn PointLocator> {
        self.locator.as_deref().ok_or(KernelError::NotInitialized)
    }

    pub fn points(&self) -> Result<&dyn PointSet> {
        self.points.as_deref().ok_or(KernelError::NotInitialized)
    }

    /// Radius query through the bound locator
    pub fn radius_basis(&self, radius: f64, x: &Point3, ids: &mut Vec<usize>) -> Result<usize> {
        self.locator()?.find_points_within_radius(radius, x, ids);
        Ok(ids.len())
    }
}

impl fmt::Debug for KernelBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelBinding")
            .field("locator", &self.locator.is_some())
            .field(
                "points",
                &self.points.as_ref().map(|p| p.number_of_points()),
            )
            .finish()
    }
}

/// Replace the neighborhood with a single point of weight 1
pub(crate) fn collapse_to_hit(ids: &mut Vec<usize>, weights: &mut Vec<f64>, id: usize) {
    trace!("Exact hit on point {id}");
    ids.clear();
    ids.push(id);
    weights.clear();
    weights.push(1.0);
}

/// Normalize in place; on failure both buffers are emptied
pub(crate) fn finish_weights(ids: &mut Vec<usize>, weights: &mut Vec<f64>, sum: f64) -> Result<usize> {
    if let Err(e) = normalize_weights(weights, sum) {
        ids.clear();
        weights.clear();
        return Err(e);
    }
    Ok(ids.len())
}

/// Weigh every neighbor with `falloff(id, offset, r2)` and normalize
///
/// `offset` is `x - point(id)` and `r2` its squared length. The first
/// neighbor at zero distance short-circuits to an exact hit.
pub(crate) fn weigh_neighbors<F>(
    points: &dyn PointSet,
    x: &Point3,
    ids: &mut Vec<usize>,
    weights: &mut Vec<f64>,
    mut falloff: F,
) -> Result<usize>
where
    F: FnMut(usize, &Point3, f64) -> f64,
{
    weights.clear();
    weights.reserve(ids.len());

    let mut sum = 0.0;
    let mut hit = None;
    for &id in ids.iter() {
        let v = sub(x, &points.point(id));
        let r2 = dot(&v, &v);
        if r2 == 0.0 {
            hit = Some(id);
            break;
        }
        let w = falloff(id, &v, r2);
        weights.push(w);
        sum += w;
    }

    if let Some(id) = hit {
        collapse_to_hit(ids, weights, id);
        return Ok(1);
    }
    finish_weights(ids, weights, sum)
}

/// Weights that depend only on the squared distance to each neighbor
pub(crate) fn radial_weights<F>(
    points: &dyn PointSet,
    x: &Point3,
    ids: &mut Vec<usize>,
    weights: &mut Vec<f64>,
    falloff: F,
) -> Result<usize>
where
    F: Fn(f64) -> f64,
{
    weigh_neighbors(points, x, ids, weights, |_, _, r2| falloff(r2))
}
