use cgmath::{vec3, Quaternion, Vector3};

use crate::config::ReticleConfig;
use crate::input_context::Pose;
use crate::physics::RaycastHit;

/// Aiming dot that sits on whatever the gaze hits, or at a fixed distance in
/// front of the head. Scaled with distance so it keeps its apparent size.
#[derive(Clone, Debug)]
pub struct Reticle {
    default_distance: f32,
    original_scale: Vector3<f32>,
    visible: bool,
    position: Vector3<f32>,
    scale: Vector3<f32>,
    rotation: Quaternion<f32>,
}

impl Reticle {
    pub fn new(config: &ReticleConfig) -> Self {
        Reticle::with_original_scale(config, vec3(1.0, 1.0, 1.0))
    }

    pub fn with_original_scale(config: &ReticleConfig, original_scale: Vector3<f32>) -> Self {
        Reticle {
            default_distance: config.default_distance,
            original_scale,
            visible: true,
            position: vec3(0.0, 0.0, 0.0),
            scale: original_scale,
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        self.rotation
    }

    /// Nothing under the gaze.
    pub fn place_default(&mut self, head: &Pose) {
        self.position = head.position + head.forward() * self.default_distance;
        self.scale = self.original_scale * self.default_distance;
        self.rotation = head.rotation;
    }

    pub fn place_on_hit(&mut self, head: &Pose, hit: &RaycastHit) {
        self.position = hit.point;
        self.scale = self.original_scale * hit.distance;
        self.rotation = head.rotation;
    }
}

impl Default for Reticle {
    fn default() -> Self {
        Reticle::new(&ReticleConfig::default())
    }
}
