//! Structure-of-arrays point storage.

use crate::error::{Error, Result};

/// An ordered set of 2D points, stored as separate coordinate arrays.
///
/// Carries an optional per-point class tag (0 = background/control,
/// 1 = event/case) for the two-class engines; `None` for single-class
/// DBSCAN input.
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub class: Option<Vec<u8>>,
}

impl PointSet {
    #[must_use]
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self { x, y, class: None }
    }

    /// Builds a point set with an explicit per-point class tag.
    #[must_use]
    pub fn with_class(x: Vec<f64>, y: Vec<f64>, class: Vec<u8>) -> Self {
        Self {
            x,
            y,
            class: Some(class),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Concatenates a class-0 set and a class-1 set into one combined,
    /// tagged `PointSet`. Class-0 points come first, matching the control/
    /// background-then-case/event ordering the CLI interfaces read files in.
    #[must_use]
    pub fn combine_classes(class0: &PointSet, class1: &PointSet) -> PointSet {
        let mut x = Vec::with_capacity(class0.len() + class1.len());
        let mut y = Vec::with_capacity(class0.len() + class1.len());
        let mut class = Vec::with_capacity(class0.len() + class1.len());
        x.extend_from_slice(&class0.x);
        y.extend_from_slice(&class0.y);
        class.extend(std::iter::repeat(0u8).take(class0.len()));
        x.extend_from_slice(&class1.x);
        y.extend_from_slice(&class1.y);
        class.extend(std::iter::repeat(1u8).take(class1.len()));
        PointSet::with_class(x, y, class)
    }

    /// Validates that every coordinate is finite and, if tagged, that the
    /// coordinate and class arrays agree in length.
    pub fn validate(&self) -> Result<()> {
        if self.x.len() != self.y.len() {
            return Err(Error::Config(format!(
                "x and y arrays have different lengths: {} vs {}",
                self.x.len(),
                self.y.len()
            )));
        }
        if let Some(class) = &self.class {
            if class.len() != self.x.len() {
                return Err(Error::Config(format!(
                    "class array length {} does not match point count {}",
                    class.len(),
                    self.x.len()
                )));
            }
        }
        for (i, (&x, &y)) in self.x.iter().zip(self.y.iter()).enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(Error::NonFiniteCoordinate { index: i, x, y });
            }
        }
        if self.is_empty() {
            return Err(Error::EmptyPointSet);
        }
        Ok(())
    }

    /// Reorders every parallel array according to `order`, a permutation of
    /// `0..len()`. Used by the grid index's counting-sort pass.
    pub fn reorder(&mut self, order: &[usize]) {
        self.x = order.iter().map(|&i| self.x[i]).collect();
        self.y = order.iter().map(|&i| self.y[i]).collect();
        if let Some(class) = &self.class {
            self.class = Some(order.iter().map(|&i| class[i]).collect());
        }
    }
}
