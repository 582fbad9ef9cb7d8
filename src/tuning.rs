//! Data-driven game balance
//!
//! Defaults reproduce the classic game. Hosts may override any field from
//! JSON; missing fields keep their defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::consts::*;

/// Gameplay numbers the simulation reads from `GameState::tuning`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,

    pub balloon_radius: f32,
    pub balloon_y: f32,
    pub stone_radius: f32,

    pub pouch_rest: Vec2,
    pub grab_radius: f32,
    pub max_pull: f32,
    pub launch_scale: f32,
    pub gravity: f32,

    pub max_shots: u32,
    pub base_guess_chances: u32,
    pub max_carryover: u32,

    /// Seconds between the last pop and the guessing stage
    pub guess_stage_delay: f32,
    /// Seconds between the last wasted shot and the failed stage
    pub out_of_shots_delay: f32,
    /// Seconds between the last wrong guess and the failed stage
    pub out_of_chances_delay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            balloon_radius: BALLOON_RADIUS,
            balloon_y: BALLOON_Y,
            stone_radius: STONE_RADIUS,
            pouch_rest: POUCH_REST,
            grab_radius: POUCH_GRAB_RADIUS,
            max_pull: MAX_PULL,
            launch_scale: LAUNCH_SCALE,
            gravity: GRAVITY,
            max_shots: MAX_SHOTS,
            base_guess_chances: BASE_GUESS_CHANCES,
            max_carryover: MAX_CARRYOVER,
            guess_stage_delay: GUESS_STAGE_DELAY,
            out_of_shots_delay: OUT_OF_SHOTS_DELAY,
            out_of_chances_delay: OUT_OF_CHANCES_DELAY,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be >= 0, got {value}")))
    }
}

/// Upper bound for shot and guess counts
pub const MAX_BUDGET: u32 = 99;

fn budget(field: &'static str, value: u32, min: u32) -> Result<(), ConfigError> {
    if (min..=MAX_BUDGET).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be between {min} and {MAX_BUDGET}, got {value}"),
        ))
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("playfield_width", self.playfield_width)?;
        positive("playfield_height", self.playfield_height)?;
        positive("balloon_radius", self.balloon_radius)?;
        positive("stone_radius", self.stone_radius)?;
        positive("launch_scale", self.launch_scale)?;
        non_negative("balloon_y", self.balloon_y)?;
        non_negative("grab_radius", self.grab_radius)?;
        non_negative("max_pull", self.max_pull)?;
        non_negative("gravity", self.gravity)?;
        non_negative("guess_stage_delay", self.guess_stage_delay)?;
        non_negative("out_of_shots_delay", self.out_of_shots_delay)?;
        non_negative("out_of_chances_delay", self.out_of_chances_delay)?;

        if self.playfield_width < 2.0 * self.balloon_radius {
            return Err(ConfigError::invalid(
                "balloon_radius",
                "balloons do not fit across the playfield",
            ));
        }
        if !self.in_playfield(self.pouch_rest) {
            return Err(ConfigError::invalid(
                "pouch_rest",
                format!("{} lies outside the playfield", self.pouch_rest),
            ));
        }
        budget("max_shots", self.max_shots, 1)?;
        budget("base_guess_chances", self.base_guess_chances, 1)?;
        budget("max_carryover", self.max_carryover, 0)?;
        Ok(())
    }

    /// True while `pos` is inside the playfield box (edges included)
    #[inline]
    pub fn in_playfield(&self, pos: Vec2) -> bool {
        pos.x >= 0.0
            && pos.x <= self.playfield_width
            && pos.y >= 0.0
            && pos.y <= self.playfield_height
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
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_shots": 9, "gravity": 0.3 }"#).unwrap();
        assert_eq!(tuning.max_shots, 9);
        assert!((tuning.gravity - 0.3).abs() < 1e-6);
        assert_eq!(tuning.base_guess_chances, BASE_GUESS_CHANCES);
        assert_eq!(tuning.pouch_rest, POUCH_REST);
    }

    #[test]
    fn test_rejects_zero_shots() {
        let err = Tuning::from_json(r#"{ "max_shots": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidTuning {
                field: "max_shots",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_oversized_budgets() {
        for field in ["max_shots", "base_guess_chances", "max_carryover"] {
            let json = format!(r#"{{ "{field}": 4294967295 }}"#);
            let err = Tuning::from_json(&json).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidTuning { field: f, .. } if f == field),
                "{field}: {err}"
            );
        }
        let at_cap = Tuning::from_json(r#"{ "max_shots": 99, "base_guess_chances": 99 }"#);
        assert!(at_cap.is_ok());
    }

    #[test]
    fn test_rejects_pouch_outside_playfield() {
        let tuning = Tuning {
            pouch_rest: Vec2::new(10.0, 900.0),
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ max_shots: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
