//! Homogeneous 4×4 matrices and the cartesian points they act on.
//!
//! A [`HomogeneousMatrix`] is the representation every builder in this crate produces: the upper
//! left 3×3 block holds a rotation, the first three entries of the fourth column hold a
//! translation, and the bottom row is `(0, 0, 0, 1)`. Products of such matrices keep that bottom
//! row, which is what makes the point mapping in [`crate::mapping`] well-defined.
//!
//! Points cross into homogeneous space only transiently, through [`to_homogeneous`] and
//! [`from_homogeneous`]; no homogeneous point is ever stored.

use crate::{Matrix4, Vector3, Vector4};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::Mul;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The bottom row every well-formed homogeneous transform carries.
const HOMOGENEOUS_BOTTOM_ROW: [f64; 4] = [0., 0., 0., 1.];

/// A 4×4 homogeneous transform.
///
/// Matrices are values: every builder returns a fresh one, and nothing in this crate mutates a
/// matrix once it has been returned. Combine them with `*`, which is the ordinary matrix product
/// (the left operand is the left factor), or with [`HomogeneousMatrix::then`].
///
/// <div class="warning">
///
/// Matrix multiplication does not commute. `a * b` applied to a point first applies `b` and then
/// `a`, so reading a product left to right lists the transforms in the reverse of the order they
/// act on the point.
///
/// </div>
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
// no need for the "inner": indirection
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HomogeneousMatrix {
    pub(crate) inner: Matrix4,
}

impl HomogeneousMatrix {
    pub(crate) fn from_nalgebra_matrix(inner: Matrix4) -> Self {
        Self { inner }
    }

    /// The transform that maps every point onto itself.
    #[must_use]
    pub fn identity() -> Self {
        Self::from_nalgebra_matrix(Matrix4::identity())
    }

    /// Constructs a matrix from its 16 entries given row by row.
    ///
    /// Unlike the builders in [`crate::elementary`], this does not guarantee a `(0, 0, 0, 1)`
    /// bottom row. Use [`HomogeneousMatrix::is_homogeneous`] if you need to check.
    #[must_use]
    pub fn from_row_slice(entries: &[f64; 16]) -> Self {
        Self::from_nalgebra_matrix(Matrix4::from_row_slice(entries))
    }

    /// Returns the entry at `row` and `col` (both 0-indexed).
    ///
    /// # Panics
    ///
    /// If either index is not in `0..4`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.inner[(row, col)]
    }

    /// Returns row `i` (0-indexed).
    ///
    /// # Panics
    ///
    /// If `i` is not in `0..4`.
    #[must_use]
    pub fn row(&self, i: usize) -> [f64; 4] {
        let row = self.inner.row(i);
        [row[0], row[1], row[2], row[3]]
    }

    /// Returns row 3, which is `(0, 0, 0, 1)` for every well-formed transform.
    #[must_use]
    pub fn bottom_row(&self) -> [f64; 4] {
        self.row(3)
    }

    /// True if the bottom row is exactly `(0, 0, 0, 1)`.
    #[must_use]
    pub fn is_homogeneous(&self) -> bool {
        self.bottom_row() == HOMOGENEOUS_BOTTOM_ROW
    }

    /// Returns the upper-left 3×3 block, row by row.
    ///
    /// For matrices built by this crate this is the rotation part of the transform.
    #[must_use]
    pub fn rotation_block(&self) -> [[f64; 3]; 3] {
        let m = &self.inner;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }

    /// Returns the first three entries of the fourth column.
    ///
    /// This is where the origin of the source frame lands in the target frame.
    #[must_use]
    pub fn translation_part(&self) -> Cartesian {
        Cartesian::from_nalgebra_vector(self.inner.fixed_view::<3, 1>(0, 3).into_owned())
    }

    /// Returns the product `self · rhs`.
    ///
    /// Equivalent to `self * rhs`; the named form reads better at the end of long chains.
    #[must_use]
    pub fn then(self, rhs: Self) -> Self {
        self * rhs
    }

    pub(crate) fn apply(&self, homogeneous: Vector4) -> Vector4 {
        self.inner * homogeneous
    }
}

impl Default for HomogeneousMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul<HomogeneousMatrix> for HomogeneousMatrix {
    type Output = HomogeneousMatrix;

    fn mul(self, rhs: HomogeneousMatrix) -> Self::Output {
        Self::from_nalgebra_matrix(self.inner * rhs.inner)
    }
}

impl Display for HomogeneousMatrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for i in 0..4 {
            if i > 0 {
                writeln!(f)?;
            }
            let [a, b, c, d] = self.row(i);
            write!(f, "[{a:>9.4}, {b:>9.4}, {c:>9.4}, {d:>9.4}]")?;
        }
        Ok(())
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for HomogeneousMatrix {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Matrix4::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for HomogeneousMatrix {
    fn default_max_relative() -> Self::Epsilon {
        Matrix4::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}

/// A cartesian 3-vector: a translation offset or a point, in whatever length unit the caller
/// uses.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Cartesian {
    pub(crate) inner: Vector3,
}

impl Cartesian {
    pub(crate) fn from_nalgebra_vector(inner: Vector3) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::from_nalgebra_vector(Vector3::new(x, y, z))
    }

    #[must_use]
    pub fn origin() -> Self {
        Self::new(0., 0., 0.)
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.inner.z
    }

    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.x(), self.y(), self.z()]
    }
}

impl From<[f64; 3]> for Cartesian {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Cartesian> for [f64; 3] {
    fn from(value: Cartesian) -> Self {
        value.to_array()
    }
}

impl Display for Cartesian {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x(), self.y(), self.z())
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Cartesian {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        Vector3::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inner.abs_diff_eq(&other.inner, epsilon)
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Cartesian {
    fn default_max_relative() -> Self::Epsilon {
        Vector3::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.inner.relative_eq(&other.inner, epsilon, max_relative)
    }
}

/// Lifts `(x, y, z)` to `(x, y, z, 1)`.
#[must_use]
pub fn to_homogeneous(point: Cartesian) -> [f64; 4] {
    let lifted = lift(point);
    [lifted.x, lifted.y, lifted.z, lifted.w]
}

/// Projects `(x, y, z, w)` back to `(x / w, y / w, z / w)`.
///
/// A weight of exactly zero is treated as one. Transforms built by this crate always leave
/// `w == 1`, so this only matters for a hand-built matrix with a broken bottom row.
#[must_use]
pub fn from_homogeneous([x, y, z, w]: [f64; 4]) -> Cartesian {
    project(Vector4::new(x, y, z, w))
}

pub(crate) fn lift(point: Cartesian) -> Vector4 {
    point.inner.push(1.)
}

pub(crate) fn project(homogeneous: Vector4) -> Cartesian {
    let w = if homogeneous.w == 0. {
        1.
    } else {
        homogeneous.w
    };
    Cartesian::from_nalgebra_vector(homogeneous.xyz() / w)
}

#[cfg(test)]
mod tests {
    use super::{from_homogeneous, to_homogeneous, Cartesian, HomogeneousMatrix};
    use approx::{assert_relative_eq, assert_relative_ne};
    use rstest::rstest;

    #[rstest]
    #[case([2., 0., 2.])]
    #[case([-1.5, 3.25, 0.])]
    #[case([0., 0., 0.])]
    fn to_homogeneous_appends_unit_weight(#[case] xyz: [f64; 3]) {
        let [x, y, z] = xyz;
        assert_eq!(to_homogeneous(Cartesian::from(xyz)), [x, y, z, 1.]);
    }

    #[rstest]
    #[case([2., 4., 6., 2.], [1., 2., 3.])]
    #[case([2., 4., 6., 1.], [2., 4., 6.])]
    #[case([3., -3., 9., -3.], [-1., 1., -3.])]
    // zero weight falls back to one instead of dividing by zero
    #[case([2., 4., 6., 0.], [2., 4., 6.])]
    fn from_homogeneous_divides_by_weight(#[case] xyzw: [f64; 4], #[case] expected: [f64; 3]) {
        assert_relative_eq!(from_homogeneous(xyzw), Cartesian::from(expected));
    }

    #[test]
    fn tiny_nonzero_weight_still_divides() {
        let p = from_homogeneous([1e-10, 0., 0., 1e-10]);
        assert_relative_eq!(p, Cartesian::new(1., 0., 0.));
    }

    #[test]
    fn identity_is_homogeneous() {
        let identity = HomogeneousMatrix::identity();
        assert!(identity.is_homogeneous());
        assert_eq!(identity.bottom_row(), [0., 0., 0., 1.]);
        assert_eq!(identity, HomogeneousMatrix::default());
    }

    #[test]
    fn from_row_slice_is_row_major() {
        let m = HomogeneousMatrix::from_row_slice(&[
            1., 2., 3., 4., //
            5., 6., 7., 8., //
            9., 10., 11., 12., //
            0., 0., 0., 1.,
        ]);
        assert_eq!(m.get(0, 3), 4.);
        assert_eq!(m.get(2, 0), 9.);
        assert_eq!(m.row(1), [5., 6., 7., 8.]);
        assert_eq!(
            m.rotation_block(),
            [[1., 2., 3.], [5., 6., 7.], [9., 10., 11.]]
        );
        assert_eq!(m.translation_part(), Cartesian::new(4., 8., 12.));
        assert!(m.is_homogeneous());
    }

    #[test]
    fn broken_bottom_row_is_detected() {
        let m = HomogeneousMatrix::from_row_slice(&[
            1., 0., 0., 0., //
            0., 1., 0., 0., //
            0., 0., 1., 0., //
            0., 0., 0., 0.,
        ]);
        assert!(!m.is_homogeneous());
    }

    #[test]
    fn product_is_ordinary_matrix_product() {
        let a = HomogeneousMatrix::from_row_slice(&[
            0., -1., 0., 0., //
            1., 0., 0., 0., //
            0., 0., 1., 0., //
            0., 0., 0., 1.,
        ]);
        let b = HomogeneousMatrix::from_row_slice(&[
            1., 0., 0., 5., //
            0., 1., 0., 0., //
            0., 0., 1., 0., //
            0., 0., 0., 1.,
        ]);
        // rotating the translation column of b
        assert_eq!((a * b).translation_part(), Cartesian::new(0., 5., 0.));
        // translating after rotating leaves the translation untouched
        assert_eq!((b * a).translation_part(), Cartesian::new(5., 0., 0.));
        assert_eq!(a.then(b), a * b);
        assert_relative_ne!(a * b, b * a);
    }

    #[test]
    fn matrix_display() {
        let m = HomogeneousMatrix::from_row_slice(&[
            1., 0., 0., 1.5, //
            0., 1., 0., -2., //
            0., 0., 1., 30., //
            0., 0., 0., 1.,
        ]);
        insta::assert_snapshot!(m, @r"
        [   1.0000,    0.0000,    0.0000,    1.5000]
        [   0.0000,    1.0000,    0.0000,   -2.0000]
        [   0.0000,    0.0000,    1.0000,   30.0000]
        [   0.0000,    0.0000,    0.0000,    1.0000]
        ");
    }

    #[test]
    fn cartesian_display() {
        insta::assert_snapshot!(Cartesian::new(1., -2.5, 0.125), @"(1.0000, -2.5000, 0.1250)");
    }

    #[test]
    #[cfg(feature = "serde")]
    fn matrix_serde() {
        let m = HomogeneousMatrix::from_row_slice(&[
            0., -1., 0., 1., //
            1., 0., 0., 2., //
            0., 0., 1., 3., //
            0., 0., 0., 1.,
        ]);
        let ser = serde_yaml::to_string(&m).unwrap();
        let de = serde_yaml::from_str::<HomogeneousMatrix>(&ser).unwrap();
        assert_eq!(m, de);
    }
}
