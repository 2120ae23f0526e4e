//! The elementary transforms every composed transform is made of.
//!
//! There are four: one rotation about each of the X, Y, and Z axes, and one translation. Each
//! builder returns a fresh [`HomogeneousMatrix`] with identity everywhere it isn't told
//! otherwise, so the bottom row is always `(0, 0, 0, 1)`.
//!
//! All rotations follow the [right-hand rule][rhrot]: with your thumb along the positive axis,
//! your fingers curl in the direction of positive rotation.
//!
//! [rhrot]: https://en.wikipedia.org/wiki/Right-hand_rule#Rotations

use crate::homogeneous::{Cartesian, HomogeneousMatrix};
use crate::Matrix4;
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::angle::radian;
use uom::si::f64::Angle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three axes an elementary rotation can be about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// Roll.
    X,
    /// Pitch.
    Y,
    /// Yaw.
    Z,
}

impl Axis {
    /// X, Y, and Z, in that order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// Constructs the homogeneous rotation by `angle` about `axis`.
///
/// Any angle is accepted, including negative ones and ones beyond a full turn. The angle is only
/// turned into radians to take its sine and cosine.
///
/// The 3×3 rotation sits in the upper-left block:
///
/// ```text
///        X                  Y                  Z
/// [ 1  0  0 ]        [  c  0  s ]        [ c -s  0 ]
/// [ 0  c -s ]        [  0  1  0 ]        [ s  c  0 ]
/// [ 0  s  c ]        [ -s  0  c ]        [ 0  0  1 ]
/// ```
///
/// <div class="warning">
///
/// Note that the Y rotation has `+s` above the diagonal and `-s` below it, the opposite of X and
/// Z. That is the right-handed rotation about Y, not a typo.
///
/// </div>
#[must_use]
pub fn rotation(axis: Axis, angle: impl Into<Angle>) -> HomogeneousMatrix {
    let (s, c) = angle.into().get::<radian>().sin_cos();

    #[rustfmt::skip]
    let matrix = match axis {
        Axis::X => Matrix4::new(
            1., 0., 0., 0.,
            0.,  c, -s, 0.,
            0.,  s,  c, 0.,
            0., 0., 0., 1.,
        ),
        Axis::Y => Matrix4::new(
             c, 0.,  s, 0.,
            0., 1., 0., 0.,
            -s, 0.,  c, 0.,
            0., 0., 0., 1.,
        ),
        Axis::Z => Matrix4::new(
             c, -s, 0., 0.,
             s,  c, 0., 0.,
            0., 0., 1., 0.,
            0., 0., 0., 1.,
        ),
    };

    HomogeneousMatrix::from_nalgebra_matrix(matrix)
}

/// Roll: rotation about X.
#[must_use]
pub fn rotation_x(alpha: impl Into<Angle>) -> HomogeneousMatrix {
    rotation(Axis::X, alpha)
}

/// Pitch: rotation about Y.
#[must_use]
pub fn rotation_y(beta: impl Into<Angle>) -> HomogeneousMatrix {
    rotation(Axis::Y, beta)
}

/// Yaw: rotation about Z.
#[must_use]
pub fn rotation_z(gamma: impl Into<Angle>) -> HomogeneousMatrix {
    rotation(Axis::Z, gamma)
}

/// Constructs the homogeneous translation by `offset`.
///
/// This is the identity with `offset` written into the first three rows of the fourth column.
#[must_use]
pub fn translation(offset: impl Into<Cartesian>) -> HomogeneousMatrix {
    let offset = offset.into();
    let mut matrix = Matrix4::identity();
    matrix
        .fixed_view_mut::<3, 1>(0, 3)
        .copy_from(&offset.inner);
    HomogeneousMatrix::from_nalgebra_matrix(matrix)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{rotation, rotation_x, rotation_y, rotation_z, translation, Axis};
    use crate::homogeneous::{Cartesian, HomogeneousMatrix};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use quickcheck::quickcheck;
    use rstest::rstest;
    use uom::si::angle::degree;
    use uom::si::f64::Angle;

    pub(crate) fn d(degrees: f64) -> Angle {
        Angle::new::<degree>(degrees)
    }

    /// An angle in degrees that quickcheck is allowed to pick.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct Degrees(pub(crate) f64);

    impl quickcheck::Arbitrary for Degrees {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            // quickcheck will give us awkward f64 values -- we ignore those
            let degrees = loop {
                match f64::arbitrary(g) {
                    0. => break 0.,
                    f if f.is_normal() => break f,
                    _ => {}
                }
            };
            // keep within a few turns either way so that tolerances stay meaningful
            Self(degrees.rem_euclid(4. * 360.) - 2. * 360.)
        }

        fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
            Box::new(self.0.shrink().map(Self))
        }
    }

    impl quickcheck::Arbitrary for Axis {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            *g.choose(&Axis::ALL).unwrap_or(&Axis::X)
        }
    }

    fn determinant_3x3(m: [[f64; 3]; 3]) -> f64 {
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    #[rstest]
    #[case(Axis::X)]
    #[case(Axis::Y)]
    #[case(Axis::Z)]
    fn zero_rotation_is_identity(#[case] axis: Axis) {
        assert_eq!(rotation(axis, d(0.)), HomogeneousMatrix::identity());
    }

    #[test]
    fn zero_translation_is_identity() {
        assert_eq!(translation([0., 0., 0.]), HomogeneousMatrix::identity());
    }

    #[test]
    fn translation_fills_fourth_column() {
        let t = translation(Cartesian::new(1.5, -2., 3.));
        assert_eq!(t.row(0), [1., 0., 0., 1.5]);
        assert_eq!(t.row(1), [0., 1., 0., -2.]);
        assert_eq!(t.row(2), [0., 0., 1., 3.]);
        assert_eq!(t.row(3), [0., 0., 0., 1.]);
    }

    #[test]
    fn rotation_x_places_sine_below_diagonal() {
        let (s, c) = 30_f64.to_radians().sin_cos();
        #[rustfmt::skip]
        let expected = HomogeneousMatrix::from_row_slice(&[
            1., 0., 0., 0.,
            0.,  c, -s, 0.,
            0.,  s,  c, 0.,
            0., 0., 0., 1.,
        ]);
        assert_relative_eq!(rotation_x(d(30.)), expected);
    }

    #[test]
    fn rotation_y_places_sine_above_diagonal() {
        let (s, c) = 30_f64.to_radians().sin_cos();
        let ry = rotation_y(d(30.));
        assert_relative_eq!(ry.get(0, 2), s);
        assert_relative_eq!(ry.get(2, 0), -s);
        assert_relative_eq!(ry.get(0, 0), c);
        assert_relative_eq!(ry.get(2, 2), c);
        assert_eq!(ry.row(1), [0., 1., 0., 0.]);
    }

    #[test]
    fn rotation_z_places_sine_below_diagonal() {
        let (s, c) = 30_f64.to_radians().sin_cos();
        #[rustfmt::skip]
        let expected = HomogeneousMatrix::from_row_slice(&[
             c, -s, 0., 0.,
             s,  c, 0., 0.,
            0., 0., 1., 0.,
            0., 0., 0., 1.,
        ]);
        assert_relative_eq!(rotation_z(d(30.)), expected);
    }

    #[test]
    fn yaw_of_minus_half_turn() {
        #[rustfmt::skip]
        let expected = HomogeneousMatrix::from_row_slice(&[
            -1., 0., 0., 0.,
            0., -1., 0., 0.,
            0., 0., 1., 0.,
            0., 0., 0., 1.,
        ]);
        assert_abs_diff_eq!(rotation_z(d(-180.)), expected, epsilon = 1e-15);
    }

    #[rstest]
    // X: Y goes to Z, Z goes to -Y
    #[case(Axis::X, Cartesian::new(0., 1., 0.), Cartesian::new(0., 0., 1.))]
    #[case(Axis::X, Cartesian::new(0., 0., 1.), Cartesian::new(0., -1., 0.))]
    // Y: Z goes to X, X goes to -Z
    #[case(Axis::Y, Cartesian::new(0., 0., 1.), Cartesian::new(1., 0., 0.))]
    #[case(Axis::Y, Cartesian::new(1., 0., 0.), Cartesian::new(0., 0., -1.))]
    // Z: X goes to Y, Y goes to -X
    #[case(Axis::Z, Cartesian::new(1., 0., 0.), Cartesian::new(0., 1., 0.))]
    #[case(Axis::Z, Cartesian::new(0., 1., 0.), Cartesian::new(-1., 0., 0.))]
    /// A quarter turn about each axis follows the right-hand rule.
    fn quarter_turns_follow_right_hand_rule(
        #[case] axis: Axis,
        #[case] point: Cartesian,
        #[case] expected: Cartesian,
    ) {
        assert_abs_diff_eq!(rotation(axis, d(90.)) * point, expected, epsilon = 1e-15);
    }

    quickcheck! {
        fn rotation_keeps_bottom_row(axis: Axis, angle: Degrees) -> bool {
            rotation(axis, d(angle.0)).bottom_row() == [0., 0., 0., 1.]
        }

        fn translation_keeps_bottom_row(x: f64, y: f64, z: f64) -> bool {
            translation([x, y, z]).is_homogeneous()
        }

        fn rotation_has_no_translation(axis: Axis, angle: Degrees) -> bool {
            rotation(axis, d(angle.0)).translation_part() == Cartesian::origin()
        }

        fn rotation_is_orthonormal(axis: Axis, angle: Degrees) -> () {
            let block = rotation(axis, d(angle.0)).rotation_block();
            assert_relative_eq!(determinant_3x3(block), 1., epsilon = 1e-12);

            // R · Rᵀ == I
            for i in 0..3 {
                for j in 0..3 {
                    let dot: f64 = (0..3).map(|k| block[i][k] * block[j][k]).sum();
                    let expected = if i == j { 1. } else { 0. };
                    assert_abs_diff_eq!(dot, expected, epsilon = 1e-12);
                }
            }
        }

        fn rotation_is_periodic(axis: Axis, angle: Degrees) -> () {
            assert_abs_diff_eq!(
                rotation(axis, d(angle.0)),
                rotation(axis, d(angle.0 + 360.)),
                epsilon = 1e-9
            );
        }
    }
}
