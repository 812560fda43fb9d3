//! Named, fixed-width attribute arrays

use crate::core::{KernelError, Result};

/// A per-point attribute stored as contiguous tuples of `f64`
///
/// Tuple `i` occupies `values[i * components..(i + 1) * components]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    name: String,
    components: usize,
    values: Vec<f64>,
}

impl DataArray {
    /// Create an array from flat values
    pub fn new(name: impl Into<String>, components: usize, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if components == 0 {
            return Err(KernelError::InvalidParameter(format!(
                "Array '{name}' must have at least one component"
            )));
        }
        if values.len() % components != 0 {
            return Err(KernelError::InvalidDataset(format!(
                "Array '{name}' has {} values, not a multiple of {components} components",
                values.len()
            )));
        }
        Ok(Self {
            name,
            components,
            values,
        })
    }

    /// Create a single-component array
    pub fn from_scalars(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            components: 1,
            values,
        }
    }

    /// Create a three-component array
    pub fn from_vectors(name: impl Into<String>, vectors: &[[f64; 3]]) -> Self {
        Self {
            name: name.into(),
            components: 3,
            values: vectors.iter().flatten().copied().collect(),
        }
    }

    /// Array name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of components per tuple
    pub fn number_of_components(&self) -> usize {
        self.components
    }

    /// Number of tuples
    pub fn number_of_tuples(&self) -> usize {
        self.values.len() / self.components
    }

    /// Get the tuple for point `id`
    ///
    /// # Panics
    /// Panics if id >= number_of_tuples()
    pub fn tuple(&self, id: usize) -> &[f64] {
        let start = id * self.components;
        &self.values[start..start + self.components]
    }

    /// Get the first component of the tuple for point `id`
    pub fn component(&self, id: usize) -> f64 {
        self.values[id * self.components]
    }
}
