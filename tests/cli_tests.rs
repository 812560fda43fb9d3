//! Integration tests for the CLI application
//!
//! These tests verify that the CLI commands work correctly with real data files.

use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

/// Helper to create test data files
struct TestDataFiles {
    pub points_file: NamedTempFile,
    pub queries_file: NamedTempFile,
}

impl TestDataFiles {
    fn new() -> std::io::Result<Self> {
        // Flat 3x3 sheet with upward normals
        let mut points_file = NamedTempFile::with_suffix(".csv")?;
        writeln!(points_file, "x,y,z,nx,ny,nz,Scalars")?;
        for i in 0..3 {
            for j in 0..3 {
                writeln!(points_file, "{},{},0,0,0,1,1", i as f64 * 0.1, j as f64 * 0.1)?;
            }
        }
        points_file.flush()?;

        let mut queries_file = NamedTempFile::with_suffix(".csv")?;
        writeln!(queries_file, "x,y,z")?;
        writeln!(queries_file, "0.05,0.05,0.01")?;
        writeln!(queries_file, "0.1,0.1,0")?;
        writeln!(queries_file, "5,5,5")?;
        queries_file.flush()?;

        Ok(TestDataFiles {
            points_file,
            queries_file,
        })
    }
}

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pointkernel"))
}

/// Parse `query_index id weight` lines, skipping comments
fn parse_weights(text: &str) -> Vec<(usize, usize, f64)> {
    text.lines()
        .filter(|line| !line.starts_with('#') && !line.trim().is_empty())
        .map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            assert_eq!(fields.len(), 3, "Unexpected output line: {line}");
            (
                fields[0].parse().unwrap(),
                fields[1].parse().unwrap(),
                fields[2].parse().unwrap(),
            )
        })
        .collect()
}

#[test]
fn test_cli_weights_command_stdout() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");

    let output = cli()
        .args([
            "weights",
            "--points",
            test_data.points_file.path().to_str().unwrap(),
            "--queries",
            test_data.queries_file.path().to_str().unwrap(),
            "--radius",
            "0.2",
            "--eccentricity",
            "3.0",
        ])
        .output()
        .expect("Failed to run CLI weights command");

    assert!(
        output.status.success(),
        "Weights command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let rows = parse_weights(&String::from_utf8_lossy(&output.stdout));

    let first: Vec<_> = rows.iter().filter(|r| r.0 == 0).collect();
    assert!(first.len() >= 4);
    let sum: f64 = first.iter().map(|r| r.2).sum();
    assert!((sum - 1.0).abs() < 1e-6, "Weights sum to {sum}");

    // Query 1 sits on point 4
    let second: Vec<_> = rows.iter().filter(|r| r.0 == 1).collect();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].1, 4);
    assert!((second[0].2 - 1.0).abs() < 1e-12);

    // Query 2 has no neighbors
    assert!(rows.iter().all(|r| r.0 != 2));
}

#[test]
fn test_cli_weights_command_output_file() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output_path = temp_dir.path().join("weights.txt");

    for kernel in ["ellipsoidal", "gaussian", "shepard", "linear"] {
        let output = cli()
            .args([
                "weights",
                "--points",
                test_data.points_file.path().to_str().unwrap(),
                "--queries",
                test_data.queries_file.path().to_str().unwrap(),
                "--kernel",
                kernel,
                "--radius",
                "0.2",
                "--output",
                output_path.to_str().unwrap(),
            ])
            .output()
            .expect("Failed to run CLI weights command");

        assert!(
            output.status.success(),
            "Weights command with {kernel} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let content = std::fs::read_to_string(&output_path).expect("Failed to read output");
        assert!(content.contains("# Weights for 3 queries"));
        assert!(!parse_weights(&content).is_empty());
    }
}

#[test]
fn test_cli_config_and_info_commands() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("kernel.json");

    let output = cli()
        .args([
            "config",
            "--output",
            config_path.to_str().unwrap(),
            "--radius",
            "0.3",
            "--sharpness",
            "4",
            "--use-scalars",
        ])
        .output()
        .expect("Failed to run CLI config command");

    assert!(
        output.status.success(),
        "Config command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(config_path.exists(), "Kernel file was not created");

    let output = cli()
        .args(["info", config_path.to_str().unwrap()])
        .output()
        .expect("Failed to run CLI info command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Kernel Summary"));
    assert!(stdout.contains("Kernel Type: ellipsoidal"));
    assert!(stdout.contains("Radius: 0.3"));
    assert!(stdout.contains("Sharpness: 4"));
    assert!(stdout.contains("Use Scalars: On"));
}

#[test]
fn test_cli_weights_from_config_file() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("kernel.json");

    let output = cli()
        .args([
            "config",
            "--output",
            config_path.to_str().unwrap(),
            "--kernel",
            "linear",
            "--radius",
            "0.12",
        ])
        .output()
        .expect("Failed to run CLI config command");
    assert!(output.status.success());

    // The file wins over the default kernel arguments
    let output = cli()
        .args([
            "weights",
            "--points",
            test_data.points_file.path().to_str().unwrap(),
            "--queries",
            test_data.queries_file.path().to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run CLI weights command");
    assert!(output.status.success());

    let rows = parse_weights(&String::from_utf8_lossy(&output.stdout));
    // Query 0 sees the four corners of its grid cell, equally weighted
    let first: Vec<_> = rows.iter().filter(|r| r.0 == 0).collect();
    assert_eq!(first.len(), 4);
    assert!(first.iter().all(|r| (r.2 - 0.25).abs() < 1e-9));

    // Query 1 coincides with point 4
    let second: Vec<_> = rows.iter().filter(|r| r.0 == 1).collect();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].1, 4);
}

#[test]
fn test_cli_invalid_parameters() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("kernel.json");

    let output = cli()
        .args([
            "config",
            "--output",
            config_path.to_str().unwrap(),
            "--eccentricity",
            "0",
        ])
        .output()
        .expect("Failed to run CLI config command");

    assert!(!output.status.success());
    assert!(!config_path.exists());
}

#[test]
fn test_cli_missing_points_file() {
    let test_data = TestDataFiles::new().expect("Failed to create test data");

    let output = cli()
        .args([
            "weights",
            "--points",
            "/nonexistent/points.csv",
            "--queries",
            test_data.queries_file.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run CLI weights command");

    assert!(!output.status.success());
}

#[test]
fn test_cli_help() {
    let output = cli()
        .arg("--help")
        .output()
        .expect("Failed to run CLI help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("weights"));
    assert!(stdout.contains("config"));
    assert!(stdout.contains("info"));
}
