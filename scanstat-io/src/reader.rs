//! Point-file reading.
//!
//! Input files are plain text, one point per line, two decimal fields
//! separated by a comma, optionally trailed by a newline. A row that fails
//! to parse as two finite floating-point fields stops reading at that row
//! (matching `fscanf`'s end-of-stream behavior) unless the row is clearly
//! corrupted rather than merely truncated, in which case reading fails
//! loudly.

use std::path::Path;

use scanstat_core::PointSet;

use crate::{Error, Result};

/// Reads a single-class point file into an untagged `PointSet`.
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<PointSet> {
    let (x, y) = read_coordinate_columns(path)?;
    Ok(PointSet::new(x, y))
}

/// Reads a point file and tags every point with `class`.
pub fn read_classed_points<P: AsRef<Path>>(path: P, class: u8) -> Result<PointSet> {
    let (x, y) = read_coordinate_columns(path)?;
    let n = x.len();
    Ok(PointSet::with_class(x, y, vec![class; n]))
}

fn read_coordinate_columns<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, Vec<f64>)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut x = Vec::new();
    let mut y = Vec::new();

    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(_) => break,
        };

        if record.len() < 2 {
            break;
        }

        let Some(x_field) = record.get(0) else {
            break;
        };
        let Some(y_field) = record.get(1) else {
            break;
        };

        let parsed_x: std::result::Result<f64, _> = x_field.trim().parse();
        let parsed_y: std::result::Result<f64, _> = y_field.trim().parse();

        match (parsed_x, parsed_y) {
            (Ok(px), Ok(py)) if px.is_finite() && py.is_finite() => {
                x.push(px);
                y.push(py);
            }
            (Ok(_), Ok(_)) => {
                return Err(Error::MalformedRow {
                    line: line + 1,
                    reason: "coordinate is not finite".to_string(),
                });
            }
            _ => break,
        }
    }

    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_well_formed_points() {
        let file = write_temp("0.0,0.0\n1.5,2.5\n3,4\n");
        let points = read_points(file.path()).unwrap();
        assert_eq!(points.x, vec![0.0, 1.5, 3.0]);
        assert_eq!(points.y, vec![0.0, 2.5, 4.0]);
    }

    #[test]
    fn classed_points_carry_the_given_tag() {
        let file = write_temp("1.0,1.0\n2.0,2.0\n");
        let points = read_classed_points(file.path(), 1).unwrap();
        assert_eq!(points.class.unwrap(), vec![1, 1]);
    }

    #[test]
    fn truncated_trailing_line_stops_reading_without_error() {
        let file = write_temp("1.0,1.0\n2.0,2.0\n3.0,");
        let points = read_points(file.path()).unwrap();
        assert_eq!(points.x, vec![1.0, 2.0]);
    }
}
