//! Moving points between frames with a homogeneous transform.

use crate::homogeneous::{lift, project, Cartesian, HomogeneousMatrix};
use std::ops::Mul;

/// Maps `point` through `transform`, returning `transform · point`.
///
/// The point is lifted to `(x, y, z, 1)`, multiplied by the 4×4 matrix, and projected back by
/// dividing through by the resulting weight. For any transform built by this crate that weight is
/// exactly 1; a weight of exactly 0 (only possible with a hand-built matrix, see
/// [`HomogeneousMatrix::from_row_slice`]) is treated as 1 rather than dividing by zero.
#[doc(alias = "apply")]
#[must_use]
pub fn map_point(transform: &HomogeneousMatrix, point: Cartesian) -> Cartesian {
    project(transform.apply(lift(point)))
}

// HomogeneousMatrix * Cartesian -> Cartesian
impl Mul<Cartesian> for HomogeneousMatrix {
    type Output = Cartesian;

    fn mul(self, rhs: Cartesian) -> Self::Output {
        map_point(&self, rhs)
    }
}

impl Mul<Cartesian> for &HomogeneousMatrix {
    type Output = Cartesian;

    fn mul(self, rhs: Cartesian) -> Self::Output {
        map_point(self, rhs)
    }
}
