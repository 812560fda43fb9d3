//! Kernel configuration files
//!
//! A kernel file records which kernel to use and its parameters so that the
//! same weights can be reproduced later, for example from the CLI.

use crate::core::{KernelError, Result};
use crate::kernel::KernelType;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Serializable kernel choice plus metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelFile {
    /// Kernel and its parameters
    pub kernel: KernelType,
    /// File metadata
    pub metadata: KernelMetadata,
}

/// Metadata for tracking where a kernel file came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KernelMetadata {
    /// Library version used to write the file
    pub library_version: String,
    /// Creation timestamp
    pub created_at: String,
}

impl KernelFile {
    /// Wrap a kernel choice with fresh metadata
    pub fn new(kernel: KernelType) -> Self {
        Self {
            kernel,
            metadata: KernelMetadata {
                library_version: env!("CARGO_PKG_VERSION").to_string(),
                created_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }

    /// Save to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(KernelError::IoError)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| KernelError::SerializationError(e.to_string()))?;
        Ok(())
    }

    /// Load from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(KernelError::IoError)?;
        let reader = BufReader::new(file);
        let kernel_file = serde_json::from_reader(reader)
            .map_err(|e| KernelError::SerializationError(e.to_string()))?;
        Ok(kernel_file)
    }

    /// Print a human-readable summary
    pub fn print_summary(&self) {
        println!("=== Kernel Summary ===");
        println!("Kernel Type: {}", self.kernel.name());
        println!("Radius: {}", self.kernel.radius());
        match &self.kernel {
            KernelType::Ellipsoidal(config) => {
                println!("Sharpness: {}", config.sharpness);
                println!("Eccentricity: {}", config.eccentricity);
                println!(
                    "Use Normals: {} (array '{}')",
                    if config.use_normals { "On" } else { "Off" },
                    config.normals_array_name
                );
                println!(
                    "Use Scalars: {} (array '{}')",
                    if config.use_scalars { "On" } else { "Off" },
                    config.scalars_array_name
                );
            }
            KernelType::Gaussian { sharpness, .. } => println!("Sharpness: {sharpness}"),
            KernelType::Shepard { power, .. } => println!("Power: {power}"),
            KernelType::Linear { .. } => {}
        }
        println!("Library Version: {}", self.metadata.library_version);
        println!("Created: {}", self.metadata.created_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EllipsoidalConfig;
    use tempfile::NamedTempFile;

    #[test]
    fn test_kernel_file_save_load() -> Result<()> {
        let config = EllipsoidalConfig::default()
            .with_radius(0.4)
            .with_eccentricity(3.0)
            .with_scalars(true);
        let kernel_file = KernelFile::new(KernelType::Ellipsoidal(config.clone()));

        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        kernel_file.save_to_file(temp_file.path())?;

        let loaded = KernelFile::load_from_file(temp_file.path())?;
        assert_eq!(loaded.kernel, KernelType::Ellipsoidal(config));
        assert_eq!(loaded.metadata.library_version, env!("CARGO_PKG_VERSION"));
        assert!(chrono::DateTime::parse_from_rfc3339(&loaded.metadata.created_at).is_ok());

        Ok(())
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        std::fs::write(temp_file.path(), "{ not json").expect("Failed to write");
        let result = KernelFile::load_from_file(temp_file.path());
        assert!(matches!(result, Err(KernelError::SerializationError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = KernelFile::load_from_file("/nonexistent/kernel.json");
        assert!(matches!(result, Err(KernelError::IoError(_))));
    }
}
