//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-balanced from a JSON
//! file without recompiling. Missing fields fall back to the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Scale `base` geometrically with the player's upgrade level: `base * mul^level`
#[inline]
pub fn level_scaled(base: f32, mul: f32, level: u32) -> f32 {
    base * mul.powi(level.min(i32::MAX as u32) as i32)
}

/// Player ship balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Uniform model scale
    pub scale: f32,
    /// Forward speed at level 0 (units/s)
    pub speed_base: f32,
    /// Forward acceleration toward the target speed (units/s²)
    pub accel: f32,
    /// Angular acceleration while steering (rad/s²)
    pub ang_accel_base: f32,
    /// Angular deceleration once the stick is released (rad/s²)
    pub ang_decel_base: f32,
    /// Angular speed cap (rad/s)
    pub ang_speed_max_base: f32,
    /// Orbs needed to leave level 0
    pub orb_target_start: u32,
    /// Extra orbs needed per level
    pub orb_target_per_level: u32,
    pub level_speed_mul: f32,
    pub level_ang_speed_mul: f32,
    /// Applies to both angular acceleration and deceleration
    pub level_ang_accel_mul: f32,
    pub level_look_mul: f32,
    pub fuel_max: f32,
    /// Fuel burned per second
    pub fuel_deplete_rate: f32,
    /// Fuel gained per orb collected
    pub fuel_per_orb: f32,
    /// Steering deflection below which the camera does not lean
    pub look_start: f32,
    /// Maximum camera lean (rad)
    pub look_angle_max_base: f32,
    /// Camera lean rate (rad/s)
    pub look_angle_speed_base: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            scale: 1.0,
            speed_base: 10.0,
            accel: 10.0,
            ang_accel_base: 1.5,
            ang_decel_base: 1.0,
            ang_speed_max_base: 0.8,
            orb_target_start: 2,
            orb_target_per_level: 2,
            level_speed_mul: 1.2,
            level_ang_speed_mul: 1.05,
            level_ang_accel_mul: 1.1,
            level_look_mul: 1.025,
            fuel_max: 100.0,
            fuel_deplete_rate: 10.0,
            fuel_per_orb: 15.0,
            look_start: 0.4,
            look_angle_max_base: 0.05,
            look_angle_speed_base: 0.3,
        }
    }
}

impl PlayerTuning {
    /// Orbs required to complete `level`
    pub fn orb_target(&self, level: u32) -> u32 {
        self.orb_target_start
            .saturating_add(level.saturating_mul(self.orb_target_per_level))
    }
}

/// Orb drift and attraction balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbTuning {
    /// Orbs are spawned at `1 / scale_divisor` of the default actor size
    pub scale_divisor: f32,
    /// Cruising speed along the travel direction
    pub speed_normal: f32,
    pub accel_normal: f32,
    /// Speed cap while being pulled toward the player
    pub attract_speed_max: f32,
    /// Distance at which the player starts pulling orbs in
    pub attract_range: f32,
    /// Pull acceleration at zero distance
    pub attract_accel_max: f32,
}

impl Default for OrbTuning {
    fn default() -> Self {
        Self {
            scale_divisor: 8.0,
            speed_normal: 2.0,
            accel_normal: 1.0,
            attract_speed_max: 1.0,
            attract_range: 1.5,
            attract_accel_max: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputTuning {
    /// Gamepad axis values at or below this magnitude read as zero
    pub controller_dead_zone: f32,
}

impl Default for InputTuning {
    fn default() -> Self {
        Self {
            controller_dead_zone: 0.30,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub orb: OrbTuning,
    pub input: InputTuning,
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json_pretty(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let p = &self.player;
        let o = &self.orb;

        let non_negative: [(&'static str, f32); 17] = [
            ("player.speed_base", p.speed_base),
            ("player.accel", p.accel),
            ("player.ang_accel_base", p.ang_accel_base),
            ("player.ang_decel_base", p.ang_decel_base),
            ("player.ang_speed_max_base", p.ang_speed_max_base),
            ("player.fuel_deplete_rate", p.fuel_deplete_rate),
            ("player.fuel_per_orb", p.fuel_per_orb),
            ("player.look_angle_max_base", p.look_angle_max_base),
            ("player.look_angle_speed_base", p.look_angle_speed_base),
            ("player.level_speed_mul", p.level_speed_mul),
            ("player.level_ang_speed_mul", p.level_ang_speed_mul),
            ("player.level_ang_accel_mul", p.level_ang_accel_mul),
            ("player.level_look_mul", p.level_look_mul),
            ("orb.speed_normal", o.speed_normal),
            ("orb.accel_normal", o.accel_normal),
            ("orb.attract_speed_max", o.attract_speed_max),
            ("orb.attract_accel_max", o.attract_accel_max),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("must be a finite, non-negative number (got {value})"),
                });
            }
        }

        let positive: [(&'static str, f32); 4] = [
            ("player.scale", p.scale),
            ("player.fuel_max", p.fuel_max),
            ("orb.scale_divisor", o.scale_divisor),
            ("orb.attract_range", o.attract_range),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("must be a finite, positive number (got {value})"),
                });
            }
        }

        if !(0.0..1.0).contains(&p.look_start) {
            return Err(TuningError::Invalid {
                field: "player.look_start",
                reason: format!("must lie in [0, 1) (got {})", p.look_start),
            });
        }
        if !(0.0..1.0).contains(&self.input.controller_dead_zone) {
            return Err(TuningError::Invalid {
                field: "input.controller_dead_zone",
                reason: format!("must lie in [0, 1) (got {})", self.input.controller_dead_zone),
            });
        }
        if p.orb_target_start == 0 {
            return Err(TuningError::Invalid {
                field: "player.orb_target_start",
                reason: "at least one orb must be required per level".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_orb_target_grows_per_level() {
        let p = PlayerTuning::default();
        assert_eq!(p.orb_target(0), 2);
        assert_eq!(p.orb_target(1), 4);
        assert_eq!(p.orb_target(5), 12);
    }

    #[test]
    fn test_level_scaled() {
        assert_eq!(level_scaled(10.0, 1.2, 0), 10.0);
        assert!((level_scaled(10.0, 1.2, 2) - 14.4).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "player": { "fuel_max": 50.0 } }"#).unwrap();
        assert_eq!(tuning.player.fuel_max, 50.0);
        assert_eq!(tuning.player.speed_base, 10.0);
        assert_eq!(tuning.orb, OrbTuning::default());
    }

    #[test]
    fn test_json_round_trip() {
        let json = Tuning::default().to_json_pretty().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "orb": { "attract_range": 0.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "orb.attract_range",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "player": { "look_start": 1.0 } }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { .. }));

        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tuning::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }
}
