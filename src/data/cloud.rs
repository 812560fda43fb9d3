//! In-memory point cloud with named attribute arrays

use crate::core::{AttributeSource, KernelError, Point3, PointSet, Result};
use crate::data::DataArray;
use std::sync::Arc;

/// Point positions plus per-point attribute arrays
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    points: Vec<Point3>,
    arrays: Vec<Arc<DataArray>>,
}

impl PointCloud {
    /// Create a point cloud without attributes
    pub fn new(points: Vec<Point3>) -> Self {
        Self {
            points,
            arrays: Vec::new(),
        }
    }

    /// Add an array, replacing any existing array of the same name
    ///
    /// The array must carry exactly one tuple per point.
    pub fn add_array(&mut self, array: DataArray) -> Result<()> {
        if array.number_of_tuples() != self.points.len() {
            return Err(KernelError::InvalidDataset(format!(
                "Array '{}' has {} tuples but the cloud has {} points",
                array.name(),
                array.number_of_tuples(),
                self.points.len()
            )));
        }

        let array = Arc::new(array);
        match self.arrays.iter_mut().find(|a| a.name() == array.name()) {
            Some(existing) => *existing = array,
            None => self.arrays.push(array),
        }
        Ok(())
    }

    /// Builder-style variant of [`PointCloud::add_array`]
    pub fn with_array(mut self, array: DataArray) -> Result<Self> {
        self.add_array(array)?;
        Ok(self)
    }

    /// Remove an array by name, returning it if present
    pub fn remove_array(&mut self, name: &str) -> Option<Arc<DataArray>> {
        let pos = self.arrays.iter().position(|a| a.name() == name)?;
        Some(self.arrays.remove(pos))
    }

    /// All point positions
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Names of the stored arrays in insertion order
    pub fn array_names(&self) -> impl Iterator<Item = &str> {
        self.arrays.iter().map(|a| a.name())
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl PointSet for PointCloud {
    fn number_of_points(&self) -> usize {
        self.points.len()
    }

    fn point(&self, id: usize) -> Point3 {
        self.points[id]
    }
}

impl AttributeSource for PointCloud {
    fn array(&self, name: &str) -> Option<Arc<DataArray>> {
        self.arrays.iter().find(|a| a.name() == name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_points() -> PointCloud {
        PointCloud::new(vec![[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]])
    }

    #[test]
    fn test_point_access() {
        let cloud = two_points();
        assert_eq!(cloud.number_of_points(), 2);
        assert_eq!(cloud.point(1), [1.0, 2.0, 3.0]);
        assert!(!PointSet::is_empty(&cloud));
    }

    #[test]
    fn test_add_and_lookup_array() {
        let cloud = two_points()
            .with_array(DataArray::from_scalars("Scalars", vec![1.0, 2.0]))
            .unwrap();

        let array = cloud.array("Scalars").unwrap();
        assert_eq!(array.tuple(1), &[2.0]);
        assert!(cloud.array("Normals").is_none());
        assert_eq!(cloud.array_names().collect::<Vec<_>>(), vec!["Scalars"]);
    }

    #[test]
    fn test_array_shares_ownership() {
        let mut cloud = two_points();
        cloud
            .add_array(DataArray::from_scalars("Scalars", vec![1.0, 2.0]))
            .unwrap();

        let held = cloud.array("Scalars").unwrap();
        assert_eq!(Arc::strong_count(&held), 2);

        // Removing from the cloud leaves the held handle valid
        cloud.remove_array("Scalars");
        assert_eq!(Arc::strong_count(&held), 1);
        assert_eq!(held.tuple(0), &[1.0]);
    }

    #[test]
    fn test_replace_array() {
        let mut cloud = two_points();
        cloud
            .add_array(DataArray::from_scalars("Scalars", vec![1.0, 2.0]))
            .unwrap();
        cloud
            .add_array(DataArray::from_scalars("Scalars", vec![5.0, 6.0]))
            .unwrap();

        assert_eq!(cloud.array_names().count(), 1);
        assert_eq!(cloud.array("Scalars").unwrap().tuple(0), &[5.0]);
    }

    #[test]
    fn test_array_length_mismatch() {
        let mut cloud = two_points();
        let result = cloud.add_array(DataArray::from_scalars("Scalars", vec![1.0]));
        assert!(matches!(result, Err(KernelError::InvalidDataset(_))));
    }
}
