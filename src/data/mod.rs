//! Point storage and attribute arrays
//!
//! This module provides an in-memory point cloud implementing the
//! `PointSet` and `AttributeSource` traits, and a CSV loader for it.

pub mod array;
pub mod cloud;
pub mod csv;

pub use self::array::*;
pub use self::cloud::*;
