//! Runtime configuration read from a TOML file.
//!
//! The file named by `RUBIK_CONFIG`, or `rubik.toml` in the working
//! directory, is optional. Missing keys take their defaults.
use std::{env, fs, io, path::Path, path::PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use rubik_core::constants::{
    cube_constants::{CUBE_SPIN_SECS, CUBIE_SPACING, GRAB_RADIUS},
    rotation_constants::{ALIGNMENT_TOLERANCE_DEG, FACE_ROTATION_SECS, MEMBERSHIP_TOLERANCE},
    scramble_constants::{SCRAMBLE_ROTATIONS, SEED},
};
use rubik_core::{EasedCurve, EngineSettings};

pub const CONFIG_ENV_VAR: &str = "RUBIK_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "rubik.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

#[derive(Resource, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RubikConfig {
    /// Seconds per animated face turn.
    pub face_rotation_secs: f32,
    /// Seconds per whole-cube quarter spin.
    pub cube_spin_secs: f32,
    pub scramble_rotations: u32,
    pub seed: u64,
    pub cubie_spacing: f32,
    pub membership_tolerance: f32,
    pub alignment_tolerance_deg: f32,
    pub grab_radius: f32,
}

impl Default for RubikConfig {
    fn default() -> Self {
        Self {
            face_rotation_secs: FACE_ROTATION_SECS,
            cube_spin_secs: CUBE_SPIN_SECS,
            scramble_rotations: SCRAMBLE_ROTATIONS,
            seed: SEED,
            cubie_spacing: CUBIE_SPACING,
            membership_tolerance: MEMBERSHIP_TOLERANCE,
            alignment_tolerance_deg: ALIGNMENT_TOLERANCE_DEG,
            grab_radius: GRAB_RADIUS,
        }
    }
}

impl RubikConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Never fails: problems are logged and the defaults are used instead.
    pub fn load_or_default() -> Self {
        let path = env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        match Self::load(&path) {
            Ok(Some(config)) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Ok(None) => {
                info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("{err}; using defaults");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;

        if !non_negative(self.face_rotation_secs) {
            return Err(ConfigError::Invalid("face_rotation_secs must be >= 0"));
        }
        if !non_negative(self.cube_spin_secs) {
            return Err(ConfigError::Invalid("cube_spin_secs must be >= 0"));
        }
        if !positive(self.cubie_spacing) {
            return Err(ConfigError::Invalid("cubie_spacing must be > 0"));
        }
        if !positive(self.membership_tolerance) {
            return Err(ConfigError::Invalid("membership_tolerance must be > 0"));
        }
        if !positive(self.alignment_tolerance_deg) {
            return Err(ConfigError::Invalid("alignment_tolerance_deg must be > 0"));
        }
        if !positive(self.grab_radius) {
            return Err(ConfigError::Invalid("grab_radius must be > 0"));
        }
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            membership_tolerance: self.membership_tolerance,
            alignment_tolerance_deg: self.alignment_tolerance_deg,
        }
    }

    pub fn rotation_curve(&self) -> EasedCurve {
        EasedCurve {
            duration: self.face_rotation_secs,
            ..EasedCurve::default()
        }
    }
}
