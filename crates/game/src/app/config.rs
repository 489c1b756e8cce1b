use std::env;
use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

const TUNING_FILE: &str = "tuning.json";
pub(crate) const START_LEVEL_ENV_VAR: &str = "DNP_START_LEVEL";
pub(crate) const SEED_ENV_VAR: &str = "DNP_SEED";

/// Gameplay numbers that can be overridden from `assets/tuning.json`.
///
/// Rates are per second at the fixed tick rate; every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Tuning {
    pub(crate) player_speed: f32,
    pub(crate) turn_rate_degrees: f32,
    pub(crate) scoped_turn_rate_degrees: f32,
    pub(crate) jump_speed: f32,
    pub(crate) gravity: f32,
    pub(crate) max_health: f32,
    pub(crate) base_damage: f32,
    pub(crate) checkpoint_load_uses: u32,
    pub(crate) portal_radius: f32,
    pub(crate) win_check_cooldown_ticks: u32,
    pub(crate) seed: Option<u64>,
    pub(crate) start_level: Option<u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 72.0,
            turn_rate_degrees: 48.0,
            scoped_turn_rate_degrees: 15.0,
            jump_speed: 390.0,
            gravity: 1260.0,
            max_health: 100.0,
            base_damage: 10.0,
            checkpoint_load_uses: 3,
            portal_radius: 25.0,
            win_check_cooldown_ticks: 120,
            seed: None,
            start_level: None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse tuning file at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid tuning value at {path}: {message}")]
    Invalid { path: &'static str, message: String },
    #[error("environment variable {var} has invalid value {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

impl Tuning {
    /// Missing file yields defaults; a broken file is reported to the caller.
    pub(crate) fn load_from_dir(assets_dir: &Path) -> Result<Self, TuningError> {
        let path = assets_dir.join(TUNING_FILE);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(TuningError::Read { path, source }),
        };
        let tuning = Self::parse_json(&raw)?;
        info!(path = %path.display(), "tuning_loaded");
        Ok(tuning)
    }

    pub(crate) fn parse_json(raw: &str) -> Result<Self, TuningError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let tuning: Self = serde_path_to_error::deserialize(&mut deserializer).map_err(|error| {
            let path = error.path().to_string();
            TuningError::Parse {
                path,
                source: error.into_inner(),
            }
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_speed", self.player_speed),
            ("turn_rate_degrees", self.turn_rate_degrees),
            ("scoped_turn_rate_degrees", self.scoped_turn_rate_degrees),
            ("jump_speed", self.jump_speed),
            ("gravity", self.gravity),
            ("max_health", self.max_health),
            ("base_damage", self.base_damage),
            ("portal_radius", self.portal_radius),
        ];
        for (path, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(path, "finite positive number", value));
            }
        }
        if let Some(level) = self.start_level {
            if !(1..=3).contains(&level) {
                return Err(invalid("start_level", "level in 1..=3", level));
            }
        }
        Ok(())
    }

    /// Applies `DNP_START_LEVEL` and `DNP_SEED` on top of the file values.
    pub(crate) fn apply_env_overrides(&mut self) -> Result<(), TuningError> {
        if let Some(level) = read_env_parsed::<u32>(START_LEVEL_ENV_VAR)? {
            if !(1..=3).contains(&level) {
                return Err(TuningError::InvalidEnv {
                    var: START_LEVEL_ENV_VAR,
                    value: level.to_string(),
                });
            }
            self.start_level = Some(level);
        }
        if let Some(seed) = read_env_parsed::<u64>(SEED_ENV_VAR)? {
            self.seed = Some(seed);
        }
        Ok(())
    }
}

fn invalid(path: &'static str, expected: &str, actual: impl Display) -> TuningError {
    TuningError::Invalid {
        path,
        message: format!("expected {expected}, got {actual}"),
    }
}

fn read_env_parsed<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, TuningError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| TuningError::InvalidEnv { var, value }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(raw)) => Err(TuningError::InvalidEnv {
            var,
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

/// Resolves tuning for the binary, falling back to defaults with a warning.
pub(crate) fn load_tuning(assets_dir: Option<&Path>) -> Tuning {
    let mut tuning = match assets_dir.map(Tuning::load_from_dir) {
        Some(Ok(tuning)) => tuning,
        Some(Err(error)) => {
            warn!(error = %error, "tuning_load_failed");
            Tuning::default()
        }
        None => Tuning::default(),
    };
    if let Err(error) = tuning.apply_env_overrides() {
        warn!(error = %error, "tuning_env_override_ignored");
    }
    tuning
}
