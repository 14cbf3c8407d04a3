use std::fmt;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input_context::Button;
use crate::teleport::CurveSettings;

/// Errors raised while loading or validating a [`LocomotionConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: io::Error },
    Parse { path: String, source: serde_json::Error },
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config file {}: {}", path, source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config file {}: {}", path, source)
            }
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid value for {}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Invalid { .. } => None,
        }
    }
}

/// Curve teleporter tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportConfig {
    pub enabled: bool,
    pub teleport_button: Button,
    /// Downward bend applied per unit of curve length.
    pub curve_angle: f32,
    /// Length of one curve segment; smaller values give smoother curves.
    pub curve_node_distance: f32,
    pub curve_max_length: f32,
    pub blinking: bool,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        TeleportConfig {
            enabled: true,
            teleport_button: Button::Touchpad,
            curve_angle: 0.1,
            curve_node_distance: 1.0,
            curve_max_length: 15.0,
            blinking: true,
        }
    }
}

impl TeleportConfig {
    pub fn curve_settings(&self) -> Result<CurveSettings, ConfigError> {
        CurveSettings::new(self.curve_node_distance, self.curve_angle, self.curve_max_length)
    }
}

/// Gamepad movement, turning and gaze teleport tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub blinking: bool,
    pub allow_joystick_movement: bool,
    pub allow_joystick_flying: bool,
    pub free_move_speed: f32,
    pub crawl_move_speed: f32,
    pub limited_range_ground_teleport: bool,
    pub teleport_range: f32,
    /// Stick deflection needed to start a snap turn.
    pub turn_sensitivity: f32,
    pub turn_amount_degrees: f32,
    /// While the stick stays deflected, one more snap turn per this many seconds.
    pub rotation_frequency_seconds: f32,
    pub smooth_turning: bool,
    pub teleport_buttons: Vec<Button>,
}

impl Default for MovementConfig {
    fn default() -> Self {
        MovementConfig {
            blinking: true,
            allow_joystick_movement: true,
            allow_joystick_flying: true,
            free_move_speed: 3.0,
            crawl_move_speed: 5.0,
            limited_range_ground_teleport: false,
            teleport_range: 15.0,
            turn_sensitivity: 0.5,
            turn_amount_degrees: 45.0,
            rotation_frequency_seconds: 1.0,
            smooth_turning: false,
            teleport_buttons: vec![Button::LeftShoulder, Button::RightShoulder, Button::Jump],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    pub duration_seconds: f32,
    /// Height of the eyelid canvas in the host's UI units.
    pub canvas_height: f32,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        BlinkConfig {
            duration_seconds: 0.2,
            canvas_height: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub toggle_buttons: Vec<Button>,
    pub placement_distance: f32,
    pub auto_hide_distance: f32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        MenuConfig {
            toggle_buttons: vec![Button::Menu],
            placement_distance: 3.0,
            auto_hide_distance: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReticleConfig {
    pub default_distance: f32,
}

impl Default for ReticleConfig {
    fn default() -> Self {
        ReticleConfig {
            default_distance: 5.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowConfig {
    pub locked_rotation: bool,
    pub rotational_speed: f32,
    pub positional_speed: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        FollowConfig {
            locked_rotation: false,
            rotational_speed: 5.0,
            positional_speed: 1.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Longest gap between two releases that still counts as a double click.
    pub double_click_time: f32,
    pub gaze_ray_length: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            double_click_time: 0.3,
            gaze_ray_length: 500.0,
        }
    }
}

/// All designer-tunable parameters, loadable from JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub teleport: TeleportConfig,
    pub movement: MovementConfig,
    pub blink: BlinkConfig,
    pub menu: MenuConfig,
    pub reticle: ReticleConfig,
    pub follow: FollowConfig,
    pub input: InputConfig,
}

impl LocomotionConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: LocomotionConfig =
            serde_json::from_str(content).map_err(|source| ConfigError::Parse {
                path: "<inline>".to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.teleport.curve_settings()?;

        let movement = &self.movement;
        non_negative("movement.free_move_speed", movement.free_move_speed)?;
        non_negative("movement.crawl_move_speed", movement.crawl_move_speed)?;
        non_negative("movement.teleport_range", movement.teleport_range)?;
        non_negative("movement.turn_amount_degrees", movement.turn_amount_degrees)?;
        positive(
            "movement.rotation_frequency_seconds",
            movement.rotation_frequency_seconds,
        )?;
        if !(0.0..=1.0).contains(&movement.turn_sensitivity) {
            return Err(ConfigError::invalid(
                "movement.turn_sensitivity",
                format!("{} is outside [0, 1]", movement.turn_sensitivity),
            ));
        }

        non_negative("blink.duration_seconds", self.blink.duration_seconds)?;
        positive("blink.canvas_height", self.blink.canvas_height)?;
        positive("menu.placement_distance", self.menu.placement_distance)?;
        positive("menu.auto_hide_distance", self.menu.auto_hide_distance)?;
        positive("reticle.default_distance", self.reticle.default_distance)?;
        positive("follow.rotational_speed", self.follow.rotational_speed)?;
        positive("follow.positional_speed", self.follow.positional_speed)?;
        non_negative("input.double_click_time", self.input.double_click_time)?;
        positive("input.gaze_ray_length", self.input.gaze_ray_length)?;
        Ok(())
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::invalid(field, format!("{} must be finite and > 0", value)))
    }
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::invalid(field, format!("{} must be finite and >= 0", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(LocomotionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LocomotionConfig::from_json(
            r#"{ "teleport": { "curve_angle": 0.25, "teleport_button": "primary" } }"#,
        )
        .unwrap();

        assert_eq!(config.teleport.curve_angle, 0.25);
        assert_eq!(config.teleport.teleport_button, Button::Primary);
        assert_eq!(config.teleport.curve_max_length, 15.0);
        assert_eq!(config.movement, MovementConfig::default());
    }

    #[test]
    fn test_zero_node_distance_is_rejected() {
        let err = LocomotionConfig::from_json(r#"{ "teleport": { "curve_node_distance": 0.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "teleport.curve_node_distance", .. }));
    }

    #[test]
    fn test_turn_sensitivity_range() {
        let mut config = LocomotionConfig::default();
        config.movement.turn_sensitivity = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_reports_parse_error() {
        let err = LocomotionConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse config file"));
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let err = LocomotionConfig::load(Path::new("/nonexistent/locomotion.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_json_roundtrip_preserves_buttons() {
        let mut config = LocomotionConfig::default();
        config.menu.toggle_buttons = vec![Button::Menu, Button::Cancel];
        let json = config.to_json().unwrap();
        assert!(json.contains("\"cancel\""));
        assert_eq!(LocomotionConfig::from_json(&json).unwrap(), config);
    }
}
