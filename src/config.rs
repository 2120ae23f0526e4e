//! Run configuration for the `zyx-frames` binary.
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. the built-in defaults (see [`Configuration::default`])
//! 2. a TOML file, `zyx-frames.toml` in the working directory unless another path is given
//! 3. environment variables (`ZYX_SECTION__KEY`, eg `ZYX_ANGLES__GAMMA=-90`)

use crate::compose::{compose_zyx_observed, Composition, Step, StepObserver};
use crate::homogeneous::{Cartesian, HomogeneousMatrix};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use uom::si::angle::degree;
use uom::si::f64::Angle;

/// Where the configuration file is looked for when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "zyx-frames.toml";

/// Prefix of the environment variables that override the configuration file.
pub const ENV_PREFIX: &str = "ZYX_";

/// Everything one run needs: the point to map and the transform to map it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// `pU`, the point in frame `U`
    pub point: [f64; 3],
    /// ZYX Euler angles of `U` in `B`
    pub angles: EulerAngles,
    /// `t`, where the origin of `U` lies in `B`
    pub translation: [f64; 3],
    /// Show each factor of the transform before it is multiplied
    pub print_steps: bool,
}

/// Roll, pitch, and yaw in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EulerAngles {
    /// Roll α, about X
    pub alpha: f64,
    /// Pitch β, about Y
    pub beta: f64,
    /// Yaw γ, about Z
    pub gamma: f64,
}

impl EulerAngles {
    #[must_use]
    pub fn alpha(&self) -> Angle {
        Angle::new::<degree>(self.alpha)
    }

    #[must_use]
    pub fn beta(&self) -> Angle {
        Angle::new::<degree>(self.beta)
    }

    #[must_use]
    pub fn gamma(&self) -> Angle {
        Angle::new::<degree>(self.gamma)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            point: [2., 0., 2.],
            angles: EulerAngles {
                alpha: 0.,
                beta: 0.,
                gamma: -180.,
            },
            translation: [0., 0., 0.],
            print_steps: true,
        }
    }
}

/// The outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub composition: Composition,
    pub point_in_u: Cartesian,
    pub point_in_b: Cartesian,
}

impl Configuration {
    /// Load configuration from [`DEFAULT_CONFIG_PATH`] and the environment.
    ///
    /// The file is optional; without it only the defaults and the environment apply.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        Self::figment(path.exists().then_some(path))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load configuration from the TOML file at `path` and the environment.
    ///
    /// Unlike [`Configuration::load`], the file must exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::missing_file(path));
        }
        Self::figment(Some(path))
            .extract()
            .map_err(ConfigError::from)
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        // ZYX_ANGLES__GAMMA=-90 -> angles.gamma = -90
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Composes the configured transform and maps the configured point through it.
    ///
    /// `observer` is only shown the intermediate matrices if `print_steps` is set.
    pub fn evaluate<O>(&self, observer: &mut O) -> Evaluation
    where
        O: StepObserver + ?Sized,
    {
        let print_steps = self.print_steps;
        let mut gated = |step: Step, matrix: &HomogeneousMatrix| {
            if print_steps {
                observer.observe(step, matrix);
            }
        };

        let composition = compose_zyx_observed(
            self.angles.alpha(),
            self.angles.beta(),
            self.angles.gamma(),
            self.translation,
            &mut gated,
        );
        let point_in_u = Cartesian::from(self.point);
        let point_in_b = composition.map_point(point_in_u);
        log::debug!("mapped {point_in_u} in U to {point_in_b} in B");

        Evaluation {
            composition,
            point_in_u,
            point_in_b,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn missing_file(path: &Path) -> Self {
        ConfigError {
            message: format!("no configuration file at {}", path.display()),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
