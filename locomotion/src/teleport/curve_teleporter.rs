use cgmath::Vector3;

use super::{CurveHit, CurveNodePool, CurveOutcome, CurveSettings, CurvedRaycast, TeleportMarker};
use crate::color::Color;
use crate::comfort::Blink;
use crate::config::{ConfigError, TeleportConfig};
use crate::effect::Effect;
use crate::input_context::InputContext;
use crate::physics::CollisionQuery;
use crate::teleport_log;

pub const VALID_TARGET_COLOR: Color = Color::GREEN;
pub const INVALID_TARGET_COLOR: Color = Color::RED;

/// Hold the teleport button to aim a curve from the pointer; release over a
/// teleport area to move the camera rig there.
pub struct CurveTeleporter {
    config: TeleportConfig,
    settings: CurveSettings,
    nodes: CurveNodePool,
    marker: TeleportMarker,
    path: Vec<Vector3<f32>>,
    last_hit: Option<CurveHit>,
}

impl CurveTeleporter {
    pub fn new(config: TeleportConfig) -> Result<Self, ConfigError> {
        let settings = config.curve_settings()?;
        Ok(CurveTeleporter {
            nodes: CurveNodePool::for_settings(&settings, Color::WHITE),
            marker: TeleportMarker::default(),
            path: Vec::with_capacity(settings.max_segments()),
            last_hit: None,
            config,
            settings,
        })
    }

    /// Replaces the tuning. When the curve shape changed the node pool is
    /// rebuilt so its capacity keeps matching the segment bound.
    pub fn set_config(&mut self, config: TeleportConfig) -> Result<(), ConfigError> {
        let settings = config.curve_settings()?;
        if settings != self.settings {
            teleport_log!(
                INFO,
                "curve settings changed, rebuilding node pool ({} -> {} nodes)",
                self.nodes.capacity(),
                settings.max_segments()
            );
            self.nodes.resize(settings.max_segments());
            self.settings = settings;
        }
        if !config.enabled {
            self.reset_visuals();
        }
        self.config = config;
        Ok(())
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        if !enabled {
            self.reset_visuals();
        }
    }

    pub fn config(&self) -> &TeleportConfig {
        &self.config
    }

    pub fn settings(&self) -> &CurveSettings {
        &self.settings
    }

    pub fn nodes(&self) -> &CurveNodePool {
        &self.nodes
    }

    pub fn marker(&self) -> &TeleportMarker {
        &self.marker
    }

    /// Outcome of the latest curve while the button is held.
    pub fn last_hit(&self) -> Option<&CurveHit> {
        self.last_hit.as_ref()
    }

    pub fn update(
        &mut self,
        input: &InputContext,
        query: &dyn CollisionQuery,
        blink: &mut Blink,
    ) -> Vec<Effect> {
        if !self.config.enabled {
            return Vec::new();
        }

        let button = self.config.teleport_button;
        let mut effects = Vec::new();

        if input.gamepad.is_held(button) {
            self.aim(input, query);
        } else if input.gamepad.just_released(button) {
            if let Some(target) = self.valid_target() {
                let effect = Effect::SetPlayerPosition {
                    position: Self::camera_rig_position(target, input.head_local),
                    is_teleport: true,
                };
                teleport_log!(INFO, "teleporting to {:?}", target);
                effects.extend(blink.gate(self.config.blinking, effect));
            }
            self.reset_visuals();
        }

        effects
    }

    fn aim(&mut self, input: &InputContext, query: &dyn CollisionQuery) {
        let outcome = CurvedRaycast::sample_into(
            input.pointer.position,
            input.pointer.forward(),
            &self.settings,
            query,
            &mut self.path,
        );

        let color = match outcome {
            CurveOutcome::Hit(hit) => {
                self.marker.show_at(hit.hit.point);
                self.last_hit = Some(hit);
                if hit.hit.surface.is_teleport_area() {
                    VALID_TARGET_COLOR
                } else {
                    INVALID_TARGET_COLOR
                }
            }
            CurveOutcome::Miss => {
                self.marker.hide();
                self.last_hit = None;
                INVALID_TARGET_COLOR
            }
        };

        self.nodes.show_path(&self.path, color);
        self.marker.set_color(color);
    }

    fn valid_target(&self) -> Option<Vector3<f32>> {
        self.last_hit
            .filter(|hit| hit.hit.surface.is_teleport_area())
            .map(|hit| hit.hit.point)
    }

    fn reset_visuals(&mut self) {
        self.marker.hide();
        self.nodes.clear();
        self.last_hit = None;
    }

    /// Rig origin that puts the head above `feet`, keeping the feet height.
    pub fn camera_rig_position(feet: Vector3<f32>, head_local: Vector3<f32>) -> Vector3<f32> {
        Vector3::new(feet.x - head_local.x, feet.y, feet.z - head_local.z)
    }
}
