//! Core type definitions for interpolation kernels

use crate::core::{KernelError, Result};
use serde::{Deserialize, Serialize};

/// A position in 3D space
pub type Point3 = [f64; 3];

/// Default name of the per-point normals array
pub const DEFAULT_NORMALS_ARRAY: &str = "Normals";

/// Default name of the per-point scalars array
pub const DEFAULT_SCALARS_ARRAY: &str = "Scalars";

/// Weights computed for a single query point
///
/// `ids` and `weights` are aligned positionally: `weights[k]` is the
/// contribution of source point `ids[k]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Neighborhood {
    /// Source point ids that contribute to the query point
    pub ids: Vec<usize>,
    /// Normalized weight of each id
    pub weights: Vec<f64>,
}

impl Neighborhood {
    /// Create a neighborhood from aligned id and weight vectors
    pub fn new(ids: Vec<usize>, weights: Vec<f64>) -> Self {
        assert_eq!(
            ids.len(),
            weights.len(),
            "Ids and weights must have same length"
        );
        Self { ids, weights }
    }

    /// Create an empty neighborhood
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of contributing neighbors
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if no neighbor contributes
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sum of all weights (1.0 for a normalized, non-empty neighborhood)
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Iterate over `(id, weight)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.ids.iter().copied().zip(self.weights.iter().copied())
    }
}

/// Configuration of the ellipsoidal Gaussian kernel
///
/// The derived falloff coefficients are computed from this configuration when
/// the kernel is initialized. Changing a parameter afterwards has no effect on
/// weights until the kernel is initialized again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipsoidalConfig {
    /// Search radius, also the denominator of the sharpness ratio
    pub radius: f64,
    /// Falloff steepness
    pub sharpness: f64,
    /// Ratio of in-plane to normal-axis scaling, 1.0 is spherical
    pub eccentricity: f64,
    /// Use per-point normals to orient the ellipsoid
    pub use_normals: bool,
    /// Scale each weight by a per-point scalar
    pub use_scalars: bool,
    /// Name of the 3-component normals array
    pub normals_array_name: String,
    /// Name of the 1-component scalars array
    pub scalars_array_name: String,
}

impl Default for EllipsoidalConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            sharpness: 2.0,
            eccentricity: 2.0,
            use_normals: true,
            use_scalars: false,
            normals_array_name: DEFAULT_NORMALS_ARRAY.to_string(),
            scalars_array_name: DEFAULT_SCALARS_ARRAY.to_string(),
        }
    }
}

impl EllipsoidalConfig {
    /// Set search radius
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set falloff sharpness
    pub fn with_sharpness(mut self, sharpness: f64) -> Self {
        self.sharpness = sharpness;
        self
    }

    /// Set ellipsoid eccentricity
    pub fn with_eccentricity(mut self, eccentricity: f64) -> Self {
        self.eccentricity = eccentricity;
        self
    }

    /// Enable or disable normals
    pub fn with_normals(mut self, use_normals: bool) -> Self {
        self.use_normals = use_normals;
        self
    }

    /// Enable or disable scalars
    pub fn with_scalars(mut self, use_scalars: bool) -> Self {
        self.use_scalars = use_scalars;
        self
    }

    /// Set the normals array name
    pub fn with_normals_array_name(mut self, name: impl Into<String>) -> Self {
        self.normals_array_name = name.into();
        self
    }

    /// Set the scalars array name
    pub fn with_scalars_array_name(mut self, name: impl Into<String>) -> Self {
        self.scalars_array_name = name.into();
        self
    }

    /// Check that the numeric parameters describe a valid ellipsoid
    pub fn validate(&self) -> Result<()> {
        validate_radius(self.radius)?;
        validate_sharpness(self.sharpness)?;
        if !(self.eccentricity.is_finite() && self.eccentricity > 0.0) {
            return Err(KernelError::InvalidParameter(format!(
                "Eccentricity must be positive, got: {}",
                self.eccentricity
            )));
        }
        Ok(())
    }
}

/// Radius must be finite and positive
pub(crate) fn validate_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidParameter(format!(
            "Radius must be positive, got: {radius}"
        )))
    }
}

/// Sharpness must be finite and non-negative
pub(crate) fn validate_sharpness(sharpness: f64) -> Result<()> {
    if sharpness.is_finite() && sharpness >= 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidParameter(format!(
            "Sharpness must be non-negative, got: {sharpness}"
        )))
    }
}

/// Inverse distance power must be finite and positive
pub(crate) fn validate_power(power: f64) -> Result<()> {
    if power.is_finite() && power > 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidParameter(format!(
            "Power must be positive, got: {power}"
        )))
    }
}
