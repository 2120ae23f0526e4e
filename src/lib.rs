//! This library builds 4×4 homogeneous rigid-body transforms from intrinsic ZYX Euler angles and a
//! translation, and uses them to move a point from one coordinate frame into another.
//!
//! Given roll α (about X), pitch β (about Y), yaw γ (about Z), and a translation `t` of frame `U`
//! in frame `B`, the transform is always composed as
//!
//! ```text
//! T = Trans(t) · Rz(γ) · Ry(β) · Rx(α)
//! ```
//!
//! and a point `pU` in `U` maps to `pB = T · pU` in `B`. The order of that product is not
//! negotiable: reordering the factors changes which frame α, β, and γ are measured in.
//!
//! The pieces are kept separate so each can be checked by hand:
//!
//! - [`elementary`] has the single-axis [rotations](elementary::rotation) and the
//!   [translation](elementary::translation) builders;
//! - [`compose`] multiplies them together in the order above and hands back the intermediates too;
//! - [`mapping`] applies a transform to a [`Cartesian`] point through homogeneous coordinates.
//!
//! Angles are [`uom`] quantities so that degrees and radians can't be mixed up.
//!
//! # Examples
//!
//! Rotating frame `U` by -180° of yaw with no translation flips X and Y:
//!
//! ```
//! use approx::assert_relative_eq;
//! use uom::si::{angle::degree, f64::Angle};
//! use zyx_frames::{compose::compose_zyx, Cartesian};
//!
//! let composition = compose_zyx(
//!     Angle::new::<degree>(0.),    // roll
//!     Angle::new::<degree>(0.),    // pitch
//!     Angle::new::<degree>(-180.), // yaw
//!     Cartesian::origin(),
//! );
//!
//! let in_b = composition.map_point(Cartesian::new(2., 0., 2.));
//! assert_relative_eq!(in_b, Cartesian::new(-2., 0., 2.), epsilon = 1e-12);
//! ```
//!
//! The [builder](compose::zyx_builder) takes the same inputs but forces them to be named, and in
//! the order in which they are applied:
//!
//! ```
//! use approx::assert_relative_eq;
//! use uom::si::{angle::degree, f64::Angle};
//! use zyx_frames::{compose::zyx_builder, Cartesian};
//!
//! let composition = zyx_builder()
//!     .yaw(Angle::new::<degree>(0.))
//!     .pitch(Angle::new::<degree>(0.))
//!     .roll(Angle::new::<degree>(90.))
//!     .translation(Cartesian::new(1., 2., 3.))
//!     .build();
//!
//! let in_b = composition.transform * Cartesian::new(0., 0., 1.);
//! assert_relative_eq!(in_b, Cartesian::new(1., 1., 3.), epsilon = 1e-12);
//! ```

pub mod compose;
pub mod elementary;
pub mod homogeneous;
pub mod mapping;

#[cfg(feature = "cli")]
pub mod config;

pub(crate) type Matrix4 = nalgebra::Matrix4<f64>;
pub(crate) type Vector3 = nalgebra::Vector3<f64>;
pub(crate) type Vector4 = nalgebra::Vector4<f64>;

pub use compose::{Composition, Intermediates, Step, StepObserver};
pub use elementary::Axis;
pub use homogeneous::{Cartesian, HomogeneousMatrix};
