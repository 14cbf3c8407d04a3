use cgmath::{vec3, Deg, Quaternion, Rotation3, Vector3};

use crate::effect::Effect;

/// Minimal camera rig transform for hosts without their own scene graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerRig {
    pub position: Vector3<f32>,
    /// Heading in degrees, clockwise seen from above, kept in `[0, 360)`.
    pub yaw_degrees: f32,
}

impl PlayerRig {
    pub fn new(position: Vector3<f32>) -> Self {
        PlayerRig {
            position,
            yaw_degrees: 0.0,
        }
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        Quaternion::from_angle_y(Deg(-self.yaw_degrees))
    }

    pub fn apply(&mut self, effect: &Effect, delta: f32) {
        match *effect {
            Effect::SetPlayerPosition { position, .. } => self.position = position,
            Effect::RotatePlayer { yaw_degrees } => {
                self.yaw_degrees = (self.yaw_degrees + yaw_degrees).rem_euclid(360.0);
            }
            Effect::TranslatePlayer { delta: offset } => self.position += offset,
            Effect::WalkPlayer { velocity } => {
                self.position += vec3(velocity.x, 0.0, velocity.z) * delta;
            }
        }
    }

    pub fn apply_all<'a>(&mut self, effects: impl IntoIterator<Item = &'a Effect>, delta: f32) {
        for effect in effects {
            self.apply(effect, delta);
        }
    }
}

impl Default for PlayerRig {
    fn default() -> Self {
        PlayerRig::new(vec3(0.0, 0.0, 0.0))
    }
}
