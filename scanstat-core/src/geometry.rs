//! Points and bounding boxes.

use crate::error::{Error, Result};

/// A single 2D point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    #[must_use]
    pub fn distance_squared(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned minimum bounding rectangle over a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoundingBox {
    /// Computes the bounding box over one or more coordinate slices combined.
    ///
    /// Accepts multiple `(x, y)` slices so a bounding box can be computed over
    /// several input files combined, matching the data model's "combined
    /// across every input file" contract.
    pub fn from_coords<'a, I>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a [f64], &'a [f64])>,
    {
        let mut x_min = f64::INFINITY;
        let mut y_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        let mut any = false;

        for (xs, ys) in sources {
            for (index, (&x, &y)) in xs.iter().zip(ys.iter()).enumerate() {
                if !x.is_finite() || !y.is_finite() {
                    return Err(Error::NonFiniteCoordinate { index, x, y });
                }
                any = true;
                x_min = x_min.min(x);
                y_min = y_min.min(y);
                x_max = x_max.max(x);
                y_max = y_max.max(y);
            }
        }

        if !any {
            return Err(Error::EmptyPointSet);
        }

        Ok(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}
