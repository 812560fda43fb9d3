//! Interpolation weighting kernels

pub mod ellipsoidal;
pub mod gaussian;
pub mod kind;
pub mod linear;
pub mod shepard;
pub mod traits;

pub use self::ellipsoidal::*;
pub use self::gaussian::*;
pub use self::kind::*;
pub use self::linear::*;
pub use self::shepard::*;
pub use self::traits::{InterpolationKernel, KernelBinding};
