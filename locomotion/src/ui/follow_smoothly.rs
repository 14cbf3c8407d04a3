use cgmath::{vec3, InnerSpace, Quaternion, Vector3, Zero};

use crate::config::FollowConfig;

/// Damped follower for HUD canvases that trail the head.
#[derive(Clone, Debug)]
pub struct FollowSmoothly {
    config: FollowConfig,
    position: Vector3<f32>,
    rotation: Quaternion<f32>,
    velocity: Vector3<f32>,
}

impl FollowSmoothly {
    pub fn new(config: FollowConfig, position: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        FollowSmoothly {
            config,
            position,
            rotation,
            velocity: Vector3::zero(),
        }
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn rotation(&self) -> Quaternion<f32> {
        self.rotation
    }

    pub fn velocity(&self) -> Vector3<f32> {
        self.velocity
    }

    pub fn update(
        &mut self,
        target_position: Vector3<f32>,
        target_rotation: Quaternion<f32>,
        delta: f32,
    ) {
        if delta <= 0.0 {
            return;
        }

        let smooth_time = 100.0 / self.config.positional_speed * delta;
        self.position = smooth_damp(
            self.position,
            target_position,
            &mut self.velocity,
            smooth_time,
            delta,
        );

        self.rotation = if self.config.locked_rotation {
            target_rotation
        } else {
            slerp_clamped(self.rotation, target_rotation, self.config.rotational_speed * delta)
        };
    }
}

/// Critically damped spring towards `target`. Never overshoots.
pub fn smooth_damp(
    current: Vector3<f32>,
    target: Vector3<f32>,
    velocity: &mut Vector3<f32>,
    smooth_time: f32,
    delta: f32,
) -> Vector3<f32> {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * delta;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + change * omega) * delta;
    *velocity = (*velocity - temp * omega) * decay;
    let output = target + (change + temp) * decay;

    if (target - current).dot(output - target) > 0.0 {
        *velocity = vec3(0.0, 0.0, 0.0);
        return target;
    }
    output
}

/// Shortest-arc slerp with `amount` clamped to `[0, 1]`.
pub fn slerp_clamped(from: Quaternion<f32>, to: Quaternion<f32>, amount: f32) -> Quaternion<f32> {
    let amount = amount.clamp(0.0, 1.0);
    if amount >= 1.0 {
        return to;
    }
    let to = if from.dot(to) < 0.0 { -to } else { to };
    from.slerp(to, amount)
}
