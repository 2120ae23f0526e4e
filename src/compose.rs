//! Composing elementary transforms into a single ZYX rigid-body transform.
//!
//! The composed transform from frame `U` into frame `B` is always
//!
//! ```text
//! T = Trans(t) · Rz(γ) · Ry(β) · Rx(α)
//! ```
//!
//! Read right to left, that is: roll about X, then pitch about Y, then yaw about Z (each about the
//! axes as they are after the previous rotation, ie, intrinsically in Z-Y'-X'' order when read
//! left to right), and only then translate into `B`. Every function here multiplies in exactly
//! this order and grouping.
//!
//! Be aware that rotational angles have high ambiguities in literature and are easy to use wrong,
//! especially because different fields tend to use the same term with different meanings. If you
//! find yourself confusing α and γ, use [`zyx_builder`], which makes you name each angle.

use crate::elementary::{rotation_x, rotation_y, rotation_z, translation};
use crate::homogeneous::{Cartesian, HomogeneousMatrix};
use crate::mapping::map_point;
use std::fmt;
use std::fmt::{Display, Formatter};
use uom::si::f64::Angle;

#[cfg(any(test, feature = "approx"))]
use approx::{AbsDiffEq, RelativeEq};

/// One of the four factors of a composed transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// `Trans(t)`
    Translation,
    /// `Rz(γ)`
    Yaw,
    /// `Ry(β)`
    Pitch,
    /// `Rx(α)`
    Roll,
}

impl Step {
    /// The factors in the order they appear in the product, left to right.
    pub const IN_PRODUCT_ORDER: [Step; 4] = [Step::Translation, Step::Yaw, Step::Pitch, Step::Roll];
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Step::Translation => write!(f, "Trans(t)"),
            Step::Yaw => write!(f, "Rz(gamma)"),
            Step::Pitch => write!(f, "Ry(beta)"),
            Step::Roll => write!(f, "Rx(alpha)"),
        }
    }
}

/// Gets to see each factor of a transform as it is composed.
///
/// Observers are called once per [`Step`], in [`Step::IN_PRODUCT_ORDER`], before the product is
/// formed. They cannot change the outcome of the composition.
///
/// Any `FnMut(Step, &HomogeneousMatrix)` is an observer:
///
/// ```
/// use uom::si::{angle::degree, f64::Angle};
/// use zyx_frames::{compose::compose_zyx_observed, Cartesian, HomogeneousMatrix, Step};
///
/// let mut seen = Vec::new();
/// compose_zyx_observed(
///     Angle::new::<degree>(10.),
///     Angle::new::<degree>(20.),
///     Angle::new::<degree>(30.),
///     Cartesian::new(1., 2., 3.),
///     &mut |step: Step, _: &HomogeneousMatrix| seen.push(step),
/// );
/// assert_eq!(seen, Step::IN_PRODUCT_ORDER);
/// ```
pub trait StepObserver {
    fn observe(&mut self, step: Step, matrix: &HomogeneousMatrix);
}

impl<F> StepObserver for F
where
    F: FnMut(Step, &HomogeneousMatrix),
{
    fn observe(&mut self, step: Step, matrix: &HomogeneousMatrix) {
        self(step, matrix)
    }
}

/// Ignores every step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unobserved;

impl StepObserver for Unobserved {
    fn observe(&mut self, _: Step, _: &HomogeneousMatrix) {}
}

/// Writes every step to the [`log`] facade at `debug` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl StepObserver for LogObserver {
    fn observe(&mut self, step: Step, matrix: &HomogeneousMatrix) {
        log::debug!("{step} =\n{matrix}");
    }
}

/// The four factors of a composed transform.
///
/// These are only kept around for inspection; mapping points only ever needs
/// [`Composition::transform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intermediates {
    /// `Trans(t)`
    pub translation: HomogeneousMatrix,
    /// `Rz(γ)`
    pub rz: HomogeneousMatrix,
    /// `Ry(β)`
    pub ry: HomogeneousMatrix,
    /// `Rx(α)`
    pub rx: HomogeneousMatrix,
}

impl Intermediates {
    #[must_use]
    pub fn get(&self, step: Step) -> &HomogeneousMatrix {
        match step {
            Step::Translation => &self.translation,
            Step::Yaw => &self.rz,
            Step::Pitch => &self.ry,
            Step::Roll => &self.rx,
        }
    }

    /// Iterates over the factors in [`Step::IN_PRODUCT_ORDER`].
    pub fn iter(&self) -> impl Iterator<Item = (Step, &HomogeneousMatrix)> + '_ {
        Step::IN_PRODUCT_ORDER
            .into_iter()
            .map(move |step| (step, self.get(step)))
    }

    /// Returns `Trans(t) · Rz(γ) · Ry(β) · Rx(α)`, multiplied left to right.
    #[must_use]
    pub fn product(&self) -> HomogeneousMatrix {
        self.translation * self.rz * self.ry * self.rx
    }
}

/// A composed transform together with the factors it was composed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Composition {
    /// `T`, the transform from frame `U` into frame `B`.
    pub transform: HomogeneousMatrix,
    pub intermediates: Intermediates,
}

impl Composition {
    /// Maps a point in frame `U` into frame `B`.
    ///
    /// See [`map_point`].
    #[must_use]
    pub fn map_point(&self, in_u: Cartesian) -> Cartesian {
        map_point(&self.transform, in_u)
    }
}

#[cfg(any(test, feature = "approx"))]
impl AbsDiffEq<Self> for Composition {
    type Epsilon = <HomogeneousMatrix as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        HomogeneousMatrix::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.transform.abs_diff_eq(&other.transform, epsilon)
            && Step::IN_PRODUCT_ORDER.into_iter().all(|step| {
                self.intermediates
                    .get(step)
                    .abs_diff_eq(other.intermediates.get(step), epsilon)
            })
    }
}

#[cfg(any(test, feature = "approx"))]
impl RelativeEq for Composition {
    fn default_max_relative() -> Self::Epsilon {
        HomogeneousMatrix::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.transform
            .relative_eq(&other.transform, epsilon, max_relative)
            && Step::IN_PRODUCT_ORDER.into_iter().all(|step| {
                self.intermediates.get(step).relative_eq(
                    other.intermediates.get(step),
                    epsilon,
                    max_relative,
                )
            })
    }
}

/// Composes `T = Trans(t) · Rz(γ) · Ry(β) · Rx(α)`.
///
/// `alpha` is roll (about X), `beta` is pitch (about Y), and `gamma` is yaw (about Z). Note that
/// the arguments are listed roll first, the reverse of the order in which their matrices appear in
/// the product; [`zyx_builder`] avoids mixing them up.
#[must_use]
pub fn compose_zyx(
    alpha: impl Into<Angle>,
    beta: impl Into<Angle>,
    gamma: impl Into<Angle>,
    translation: impl Into<Cartesian>,
) -> Composition {
    compose_zyx_observed(alpha, beta, gamma, translation, &mut Unobserved)
}

/// Like [`compose_zyx`], but shows each factor to `observer` before multiplying.
pub fn compose_zyx_observed<O>(
    alpha: impl Into<Angle>,
    beta: impl Into<Angle>,
    gamma: impl Into<Angle>,
    translation_offset: impl Into<Cartesian>,
    observer: &mut O,
) -> Composition
where
    O: StepObserver + ?Sized,
{
    let intermediates = Intermediates {
        translation: translation(translation_offset),
        rz: rotation_z(gamma),
        ry: rotation_y(beta),
        rx: rotation_x(alpha),
    };
    for (step, matrix) in intermediates.iter() {
        observer.observe(step, matrix);
    }

    let transform = intermediates.product();
    log::trace!("T (Trans @ Rz @ Ry @ Rx) =\n{transform}");

    Composition {
        transform,
        intermediates,
    }
}

/// Starts building a [`Composition`] with each input named, in the order its matrix appears in
/// the product.
///
/// ```
/// use uom::si::{angle::degree, f64::Angle};
/// use zyx_frames::{compose::{compose_zyx, zyx_builder}, Cartesian};
///
/// let built = zyx_builder()
///     .yaw(Angle::new::<degree>(30.))
///     .pitch(Angle::new::<degree>(20.))
///     .roll(Angle::new::<degree>(10.))
///     .translation(Cartesian::new(1., 2., 3.))
///     .build();
///
/// let direct = compose_zyx(
///     Angle::new::<degree>(10.),
///     Angle::new::<degree>(20.),
///     Angle::new::<degree>(30.),
///     Cartesian::new(1., 2., 3.),
/// );
/// assert_eq!(built, direct);
/// ```
///
/// Supplying the angles in any other order does not compile:
///
/// ```compile_fail
/// use uom::si::{angle::degree, f64::Angle};
/// use zyx_frames::compose::zyx_builder;
///
/// let _ = zyx_builder().roll(Angle::new::<degree>(10.));
/// ```
#[must_use]
pub fn zyx_builder() -> zyx_builder::ZyxBuilder<zyx_builder::NeedsYaw> {
    zyx_builder::ZyxBuilder::new()
}

/// Typestate builder for [`Composition`]s.
///
/// The builder enforces, at compile time, that yaw, pitch, roll, and translation are all given
/// and in that order.
pub mod zyx_builder {
    use super::{compose_zyx_observed, Composition, StepObserver, Unobserved};
    use crate::homogeneous::Cartesian;
    use std::marker::PhantomData;
    use uom::si::f64::Angle;
    use uom::ConstZero;

    /// State marker indicating yaw angle is needed next
    pub struct NeedsYaw;

    /// State marker indicating pitch angle is needed next
    pub struct NeedsPitch;

    /// State marker indicating roll angle is needed next
    pub struct NeedsRoll;

    /// State marker indicating the translation is needed next
    pub struct NeedsTranslation;

    /// State marker indicating all inputs are set and ready to build
    pub struct Complete;

    pub struct ZyxBuilder<State> {
        yaw: Angle,
        pitch: Angle,
        roll: Angle,
        translation: Cartesian,
        _state: PhantomData<State>,
    }

    // Manual implementations to avoid requiring derives on State
    impl<State> Clone for ZyxBuilder<State> {
        fn clone(&self) -> Self {
            *self
        }
    }

    impl<State> Copy for ZyxBuilder<State> {}

    impl std::fmt::Debug for ZyxBuilder<NeedsYaw> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ZyxBuilder<NeedsYaw>").finish()
        }
    }

    impl std::fmt::Debug for ZyxBuilder<NeedsPitch> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ZyxBuilder<NeedsPitch>")
                .field("yaw", &self.yaw)
                .finish()
        }
    }

    impl std::fmt::Debug for ZyxBuilder<NeedsRoll> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ZyxBuilder<NeedsRoll>")
                .field("yaw", &self.yaw)
                .field("pitch", &self.pitch)
                .finish()
        }
    }

    impl std::fmt::Debug for ZyxBuilder<NeedsTranslation> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ZyxBuilder<NeedsTranslation>")
                .field("yaw", &self.yaw)
                .field("pitch", &self.pitch)
                .field("roll", &self.roll)
                .finish()
        }
    }

    impl std::fmt::Debug for ZyxBuilder<Complete> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ZyxBuilder<Complete>")
                .field("yaw", &self.yaw)
                .field("pitch", &self.pitch)
                .field("roll", &self.roll)
                .field("translation", &self.translation)
                .finish()
        }
    }

    impl<State> ZyxBuilder<State> {
        fn into_state<Next>(self) -> ZyxBuilder<Next> {
            ZyxBuilder {
                yaw: self.yaw,
                pitch: self.pitch,
                roll: self.roll,
                translation: self.translation,
                _state: PhantomData,
            }
        }
    }

    impl ZyxBuilder<NeedsYaw> {
        pub(crate) fn new() -> Self {
            Self {
                yaw: Angle::ZERO,
                pitch: Angle::ZERO,
                roll: Angle::ZERO,
                translation: Cartesian::origin(),
                _state: PhantomData,
            }
        }

        /// Sets γ, the rotation about Z.
        pub fn yaw(mut self, gamma: impl Into<Angle>) -> ZyxBuilder<NeedsPitch> {
            self.yaw = gamma.into();
            self.into_state()
        }
    }

    impl ZyxBuilder<NeedsPitch> {
        /// Sets β, the rotation about Y.
        pub fn pitch(mut self, beta: impl Into<Angle>) -> ZyxBuilder<NeedsRoll> {
            self.pitch = beta.into();
            self.into_state()
        }
    }

    impl ZyxBuilder<NeedsRoll> {
        /// Sets α, the rotation about X.
        pub fn roll(mut self, alpha: impl Into<Angle>) -> ZyxBuilder<NeedsTranslation> {
            self.roll = alpha.into();
            self.into_state()
        }
    }

    impl ZyxBuilder<NeedsTranslation> {
        /// Sets `t`, where the origin of `U` lies in `B`.
        pub fn translation(mut self, offset: impl Into<Cartesian>) -> ZyxBuilder<Complete> {
            self.translation = offset.into();
            self.into_state()
        }
    }

    impl ZyxBuilder<Complete> {
        #[must_use]
        pub fn build(self) -> Composition {
            self.build_observed(&mut Unobserved)
        }

        /// Builds while showing each factor to `observer`; see [`StepObserver`].
        pub fn build_observed<O>(self, observer: &mut O) -> Composition
        where
            O: StepObserver + ?Sized,
        {
            compose_zyx_observed(
                self.roll,
                self.pitch,
                self.yaw,
                self.translation,
                observer,
            )
        }
    }
}
