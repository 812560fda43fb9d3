//! Collaborator traits consumed by the interpolation kernels

use crate::core::Point3;
use crate::data::DataArray;
use std::sync::Arc;

/// Read-only access to source point positions
pub trait PointSet: Send + Sync {
    /// Number of points in the set
    fn number_of_points(&self) -> usize;

    /// Get the position of a point by id
    ///
    /// # Panics
    /// Panics if id >= number_of_points()
    fn point(&self, id: usize) -> Point3;

    /// Check if the set holds no points
    fn is_empty(&self) -> bool {
        self.number_of_points() == 0
    }
}

/// Spatial search over a point set
pub trait PointLocator: Send + Sync {
    /// Replace the contents of `ids` with every point within `radius` of `x`
    ///
    /// Whether a point exactly at `radius` is included is up to the
    /// implementation and must be documented by it.
    fn find_points_within_radius(&self, radius: f64, x: &Point3, ids: &mut Vec<usize>);
}

/// Named per-point attribute arrays
pub trait AttributeSource {
    /// Look up an array by name
    ///
    /// The returned handle shares ownership of the array with the source.
    fn array(&self, name: &str) -> Option<Arc<DataArray>>;
}

/// Attribute source with no arrays, for kernels that only need positions
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributes;

impl AttributeSource for NoAttributes {
    fn array(&self, _name: &str) -> Option<Arc<DataArray>> {
        None
    }
}
