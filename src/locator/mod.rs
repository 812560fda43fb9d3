//! Spatial locators answering radius queries over a point set
//!
//! Both locators include points lying exactly on the search radius and
//! return ids in ascending order.

use crate::core::{Point3, PointLocator, PointSet};
use crate::utils::distance_squared;
use log::debug;
use rstar::primitives::GeomWithData;
use rstar::RTree;

type IndexedPoint = GeomWithData<Point3, usize>;

/// R-tree backed locator
pub struct RTreeLocator {
    tree: RTree<IndexedPoint>,
}

impl RTreeLocator {
    /// Bulk-load an R-tree over every point of the set
    pub fn build<P: PointSet + ?Sized>(points: &P) -> Self {
        let entries: Vec<IndexedPoint> = (0..points.number_of_points())
            .map(|id| GeomWithData::new(points.point(id), id))
            .collect();
        debug!("Building R-tree over {} points", entries.len());
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed points
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl PointLocator for RTreeLocator {
    fn find_points_within_radius(&self, radius: f64, x: &Point3, ids: &mut Vec<usize>) {
        ids.clear();
        ids.extend(
            self.tree
                .locate_within_distance(*x, radius * radius)
                .map(|p| p.data),
        );
        ids.sort_unstable();
    }
}

/// Linear-scan locator, useful for small sets and as a reference
pub struct BruteForceLocator {
    points: Vec<Point3>,
}

impl BruteForceLocator {
    /// Copy the positions of a point set
    pub fn build<P: PointSet + ?Sized>(points: &P) -> Self {
        Self {
            points: (0..points.number_of_points())
                .map(|id| points.point(id))
                .collect(),
        }
    }
}

impl PointLocator for BruteForceLocator {
    fn find_points_within_radius(&self, radius: f64, x: &Point3, ids: &mut Vec<usize>) {
        let radius2 = radius * radius;
        ids.clear();
        ids.extend(
            self.points
                .iter()
                .enumerate()
                .filter(|(_, p)| distance_squared(x, p) <= radius2)
                .map(|(id, _)| id),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PointCloud;

    fn grid() -> PointCloud {
        let mut points = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                for k in 0..5 {
                    points.push([i as f64 * 0.5, j as f64 * 0.5, k as f64 * 0.5]);
                }
            }
        }
        PointCloud::new(points)
    }

    #[test]
    fn test_rtree_matches_brute_force() {
        let cloud = grid();
        let rtree = RTreeLocator::build(&cloud);
        let brute = BruteForceLocator::build(&cloud);
        assert_eq!(rtree.len(), 125);

        let mut a = Vec::new();
        let mut b = Vec::new();
        for (x, r) in [
            ([1.0, 1.0, 1.0], 0.6),
            ([0.1, 0.2, 0.3], 1.0),
            ([5.0, 5.0, 5.0], 0.5),
            ([1.25, 0.0, 2.0], 0.75),
        ] {
            rtree.find_points_within_radius(r, &x, &mut a);
            brute.find_points_within_radius(r, &x, &mut b);
            assert_eq!(a, b, "query {x:?} radius {r}");
        }
    }

    #[test]
    fn test_radius_boundary_inclusive() {
        let cloud = PointCloud::new(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
        let mut ids = Vec::new();

        RTreeLocator::build(&cloud).find_points_within_radius(1.0, &[0.0, 0.0, 0.0], &mut ids);
        assert_eq!(ids, vec![0, 1]);

        BruteForceLocator::build(&cloud).find_points_within_radius(
            1.0,
            &[0.0, 0.0, 0.0],
            &mut ids,
        );
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_query_replaces_previous_ids() {
        let cloud = grid();
        let locator = RTreeLocator::build(&cloud);
        let mut ids = vec![999, 1000];
        locator.find_points_within_radius(0.1, &[10.0, 10.0, 10.0], &mut ids);
        assert!(ids.is_empty());
    }

    #[test]
    fn test_empty_locator() {
        let locator = RTreeLocator::build(&PointCloud::default());
        assert!(locator.is_empty());
        let mut ids = Vec::new();
        locator.find_points_within_radius(1.0, &[0.0, 0.0, 0.0], &mut ids);
        assert!(ids.is_empty());
    }
}
