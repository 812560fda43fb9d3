//! Runtime selection between the available kernels

use crate::core::types::{validate_power, validate_radius, validate_sharpness};
use crate::core::{EllipsoidalConfig, Result};
use crate::kernel::{
    EllipsoidalGaussianKernel, GaussianKernel, InterpolationKernel, LinearKernel, ShepardKernel,
};
use serde::{Deserialize, Serialize};

/// Enumerate all implemented kernels with their parameters. This is useful
/// for switching between kernels dynamically and for storing a kernel choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum KernelType {
    Ellipsoidal(EllipsoidalConfig),
    Gaussian { radius: f64, sharpness: f64 },
    Shepard { radius: f64, power: f64 },
    Linear { radius: f64 },
}

impl KernelType {
    /// Short identifier, matching `InterpolationKernel::name`
    pub fn name(&self) -> &'static str {
        match self {
            KernelType::Ellipsoidal(_) => "ellipsoidal",
            KernelType::Gaussian { .. } => "gaussian",
            KernelType::Shepard { .. } => "shepard",
            KernelType::Linear { .. } => "linear",
        }
    }

    /// Search radius of the kernel
    pub fn radius(&self) -> f64 {
        match self {
            KernelType::Ellipsoidal(config) => config.radius,
            KernelType::Gaussian { radius, .. }
            | KernelType::Shepard { radius, .. }
            | KernelType::Linear { radius } => *radius,
        }
    }

    /// Check the parameters the kernel would reject on initialization
    pub fn validate(&self) -> Result<()> {
        match self {
            KernelType::Ellipsoidal(config) => config.validate(),
            KernelType::Gaussian { radius, sharpness } => {
                validate_radius(*radius)?;
                validate_sharpness(*sharpness)
            }
            KernelType::Shepard { radius, power } => {
                validate_radius(*radius)?;
                validate_power(*power)
            }
            KernelType::Linear { radius } => validate_radius(*radius),
        }
    }

    /// Construct an unbound kernel
    pub fn build(&self) -> Box<dyn InterpolationKernel> {
        match self {
            KernelType::Ellipsoidal(config) => {
                Box::new(EllipsoidalGaussianKernel::new(config.clone()))
            }
            KernelType::Gaussian { radius, sharpness } => {
                Box::new(GaussianKernel::new(*radius, *sharpness))
            }
            KernelType::Shepard { radius, power } => Box::new(ShepardKernel::new(*radius, *power)),
            KernelType::Linear { radius } => Box::new(LinearKernel::new(*radius)),
        }
    }
}

impl Default for KernelType {
    fn default() -> Self {
        KernelType::Ellipsoidal(EllipsoidalConfig::default())
    }
}
