//! CSV loading for point clouds
//!
//! The first non-comment line is a header naming every column:
//! - `x`, `y`, `z` are required and give the point position
//! - `nx`, `ny`, `nz`, when all present, form the 3-component `Normals` array
//! - every other column becomes a 1-component array named by its header
//!
//! Blank lines and lines starting with `#` are skipped. Every value must be a
//! finite number.

use crate::core::{KernelError, Point3, Result, DEFAULT_NORMALS_ARRAY};
use crate::data::{DataArray, PointCloud};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const NORMAL_COLUMNS: [&str; 3] = ["nx", "ny", "nz"];

/// Column layout resolved from a header line
#[derive(Debug)]
struct Layout {
    width: usize,
    position: [usize; 3],
    normal: Option<[usize; 3]>,
    scalars: Vec<(String, usize)>,
}

impl Layout {
    fn from_header(line: &str) -> Result<Self> {
        let names: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
        let find = |name: &str| names.iter().position(|&n| n == name);

        let position = match (find("x"), find("y"), find("z")) {
            (Some(x), Some(y), Some(z)) => [x, y, z],
            _ => {
                return Err(KernelError::ParseError(format!(
                    "Header must name x, y and z columns: {line}"
                )))
            }
        };

        let normal = match (find("nx"), find("ny"), find("nz")) {
            (Some(x), Some(y), Some(z)) => Some([x, y, z]),
            _ => None,
        };

        let scalars = names
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                let name: &str = name;
                !["x", "y", "z"].contains(&name)
                    && !(normal.is_some() && NORMAL_COLUMNS.contains(&name))
            })
            .map(|(col, name)| (name.to_string(), col))
            .collect();

        Ok(Self {
            width: names.len(),
            position,
            normal,
            scalars,
        })
    }
}

impl PointCloud {
    /// Load a point cloud from a CSV file
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(KernelError::IoError)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Load a point cloud from any buffered reader
    pub fn from_csv_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut layout: Option<Layout> = None;
        let mut points: Vec<Point3> = Vec::new();
        let mut normals: Vec<[f64; 3]> = Vec::new();
        let mut columns: Vec<Vec<f64>> = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line.map_err(KernelError::IoError)?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some(layout) = layout.as_ref() else {
                let header = Layout::from_header(line)?;
                columns = vec![Vec::new(); header.scalars.len()];
                layout = Some(header);
                continue;
            };

            let fields = parse_fields(line, line_no + 1, layout.width)?;
            let [x, y, z] = layout.position;
            points.push([fields[x], fields[y], fields[z]]);
            if let Some([nx, ny, nz]) = layout.normal {
                normals.push([fields[nx], fields[ny], fields[nz]]);
            }
            for (column, (_, col)) in columns.iter_mut().zip(&layout.scalars) {
                column.push(fields[*col]);
            }
        }

        let layout = layout.ok_or(KernelError::EmptyDataset)?;
        if points.is_empty() {
            return Err(KernelError::EmptyDataset);
        }

        let mut cloud = PointCloud::new(points);
        if layout.normal.is_some() {
            cloud.add_array(DataArray::from_vectors(DEFAULT_NORMALS_ARRAY, &normals))?;
        }
        for ((name, _), values) in layout.scalars.into_iter().zip(columns) {
            cloud.add_array(DataArray::from_scalars(name, values))?;
        }

        debug!(
            "Loaded {} points with arrays {:?}",
            cloud.len(),
            cloud.array_names().collect::<Vec<_>>()
        );
        Ok(cloud)
    }
}

/// Parse one data line into exactly `width` finite numbers
fn parse_fields(line: &str, line_no: usize, width: usize) -> Result<Vec<f64>> {
    let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();
    if fields.len() != width {
        return Err(KernelError::ParseError(format!(
            "Line {line_no} has {} fields, expected {width}",
            fields.len()
        )));
    }

    fields
        .iter()
        .enumerate()
        .map(|(col, field)| match field.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            Ok(_) => Err(KernelError::ParseError(format!(
                "Non-finite value at line {line_no}, column {}: {field}",
                col + 1
            ))),
            Err(_) => Err(KernelError::ParseError(format!(
                "Invalid value at line {line_no}, column {}: {field}",
                col + 1
            ))),
        })
        .collect()
}
