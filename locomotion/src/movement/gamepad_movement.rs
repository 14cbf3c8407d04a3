use cgmath::{vec3, InnerSpace, Vector3, Zero};

use crate::comfort::Blink;
use crate::config::MovementConfig;
use crate::effect::Effect;
use crate::input_context::{Axis, InputContext};
use crate::movement_log;
use crate::physics::CollisionQuery;
use crate::teleport::TeleportMarker;
use crate::time::Time;

/// Trigger pull that switches to turbo speed.
const TURBO_TRIGGER_THRESHOLD: f32 = 0.1;
const WALK_SPEED_FACTOR: f32 = 0.7;
const TURBO_SPEED_FACTOR: f32 = 8.0;
const FLY_STEP_SCALE: f32 = 0.01;
const FLY_VERTICAL_STEP_SCALE: f32 = 0.005;
/// Degrees per frame per unit of stick deflection.
const SMOOTH_TURN_RATE: f32 = 0.5;
const TURBO_TURN_RATE: f32 = 1.0;

/// Gamepad locomotion for seated VR: snap or smooth turning, joystick
/// flying/walking relative to the gaze, and gaze-targeted teleport.
pub struct GamepadMovement {
    config: MovementConfig,
    rotating: bool,
    immediate_turn: bool,
    rotation_counter: f32,
    ground_marker: TeleportMarker,
    air_marker: TeleportMarker,
    gaze_pointer_visible: bool,
    blinders_on: bool,
}

impl GamepadMovement {
    pub fn new(config: MovementConfig) -> Self {
        GamepadMovement {
            config,
            rotating: false,
            immediate_turn: true,
            rotation_counter: 0.0,
            ground_marker: TeleportMarker::default(),
            air_marker: TeleportMarker::default(),
            gaze_pointer_visible: true,
            blinders_on: false,
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn set_smooth_turning(&mut self, smooth: bool) {
        self.config.smooth_turning = smooth;
    }

    pub fn allow_free_move(&mut self, allow: bool) {
        movement_log!(DEBUG, "free move {}", if allow { "enabled" } else { "disabled" });
        self.config.allow_joystick_flying = allow;
    }

    pub fn ground_marker(&self) -> &TeleportMarker {
        &self.ground_marker
    }

    pub fn air_marker(&self) -> &TeleportMarker {
        &self.air_marker
    }

    pub fn gaze_pointer_visible(&self) -> bool {
        self.gaze_pointer_visible
    }

    /// Peripheral vision blinders, raised during fast turbo motion.
    pub fn blinders_active(&self) -> bool {
        self.blinders_on
    }

    pub fn update(
        &mut self,
        input: &InputContext,
        time: &Time,
        query: &dyn CollisionQuery,
        blink: &mut Blink,
    ) -> Vec<Effect> {
        let pad = &input.gamepad;
        let turbo = pad.axis(Axis::LeftTrigger) > TURBO_TRIGGER_THRESHOLD
            || pad.axis(Axis::RightTrigger) > TURBO_TRIGGER_THRESHOLD;
        let mut effects = Vec::new();
        self.blinders_on = false;

        self.update_turning(input, time, turbo, blink, &mut effects);
        self.update_gaze_teleport(input, query, blink, &mut effects);
        if self.config.allow_joystick_movement {
            self.update_joystick_motion(input, turbo, &mut effects);
        }

        effects
    }

    fn update_turning(
        &mut self,
        input: &InputContext,
        time: &Time,
        turbo: bool,
        blink: &mut Blink,
        effects: &mut Vec<Effect>,
    ) {
        let stick = input.gamepad.axis(Axis::RightHorizontal);

        if turbo || self.config.smooth_turning {
            self.reset_snap_turn();
            if stick != 0.0 {
                let rate = if turbo {
                    self.blinders_on = true;
                    TURBO_TURN_RATE
                } else {
                    SMOOTH_TURN_RATE
                };
                effects.push(Effect::RotatePlayer {
                    yaw_degrees: stick * rate,
                });
            }
            return;
        }

        if stick.abs() <= self.config.turn_sensitivity {
            self.reset_snap_turn();
            return;
        }

        self.rotating = true;
        let mut turn_now = false;
        if self.immediate_turn {
            self.immediate_turn = false;
            turn_now = true;
        }
        self.rotation_counter += time.delta;
        if self.rotation_counter > self.config.rotation_frequency_seconds {
            self.rotation_counter = 0.0;
            turn_now = true;
        }

        if turn_now {
            let direction = if stick > self.config.turn_sensitivity { 1.0 } else { -1.0 };
            let turn = Effect::RotatePlayer {
                yaw_degrees: direction * self.config.turn_amount_degrees,
            };
            movement_log!(DEBUG, "snap turn {:?}", turn);
            effects.extend(blink.gate(self.config.blinking, turn));
        }
    }

    fn reset_snap_turn(&mut self) {
        self.rotating = false;
        self.rotation_counter = 0.0;
        self.immediate_turn = true;
    }

    pub fn is_snap_turning(&self) -> bool {
        self.rotating
    }

    fn update_gaze_teleport(
        &mut self,
        input: &InputContext,
        query: &dyn CollisionQuery,
        blink: &mut Blink,
        effects: &mut Vec<Effect>,
    ) {
        let buttons = &self.config.teleport_buttons;
        let head = &input.head;

        if input.gamepad.any_held(buttons) {
            self.gaze_pointer_visible = false;
            let gaze = query.raycast(head.position, head.forward(), f32::INFINITY);
            let air_point = head.position + head.forward().normalize() * self.config.teleport_range;

            if self.config.allow_joystick_flying {
                let ground_point = gaze.map(|hit| hit.point).filter(|point| {
                    !self.config.limited_range_ground_teleport
                        || (*point - head.position).magnitude() <= self.config.teleport_range
                });
                match ground_point {
                    Some(point) => {
                        self.ground_marker.show_at(point);
                        self.air_marker.hide();
                    }
                    None => {
                        self.ground_marker.hide();
                        self.air_marker.show_at(air_point);
                    }
                }
            } else {
                self.air_marker.hide();
                match gaze {
                    Some(hit) => self.ground_marker.show_at(hit.point),
                    None => self.ground_marker.hide(),
                }
            }
        } else if input.gamepad.any_just_released(buttons) {
            self.gaze_pointer_visible = true;
            let target = if self.ground_marker.active {
                Some(self.ground_marker.position)
            } else if self.air_marker.active {
                Some(self.air_marker.position)
            } else {
                None
            };

            if let Some(target) = target {
                let effect = Effect::SetPlayerPosition {
                    position: target + vec3(0.0, 1.0, 0.0),
                    is_teleport: true,
                };
                movement_log!(INFO, "gaze teleport to {:?}", target);
                effects.extend(blink.gate(self.config.blinking, effect));
            }
            self.ground_marker.hide();
            self.air_marker.hide();
        } else {
            self.ground_marker.hide();
            self.air_marker.hide();
        }
    }

    fn update_joystick_motion(
        &mut self,
        input: &InputContext,
        turbo: bool,
        effects: &mut Vec<Effect>,
    ) {
        let pad = &input.gamepad;
        let head = &input.head;
        let factor = if turbo { TURBO_SPEED_FACTOR } else { WALK_SPEED_FACTOR };
        let flying = self.config.allow_joystick_flying;

        let mut translation = Vector3::zero();
        let mut velocity = Vector3::zero();

        let planar = [
            (Axis::Vertical, head.forward()),
            (Axis::Horizontal, head.right()),
        ];
        for (axis, direction) in planar {
            let value = pad.axis(axis);
            if value == 0.0 {
                continue;
            }
            if flying {
                self.blinders_on |= turbo;
                translation +=
                    direction * FLY_STEP_SCALE * value * self.config.free_move_speed * factor;
            } else {
                velocity += direction * value * self.config.crawl_move_speed * factor;
            }
        }

        let lift = pad.axis(Axis::RightVertical);
        if lift != 0.0 && flying {
            self.blinders_on |= turbo;
            translation += -vec3(0.0, 1.0, 0.0)
                * FLY_VERTICAL_STEP_SCALE
                * lift
                * self.config.free_move_speed
                * factor;
        }

        if translation != Vector3::zero() {
            effects.push(Effect::TranslatePlayer { delta: translation });
        }
        if velocity != Vector3::zero() {
            effects.push(Effect::WalkPlayer { velocity });
        }
    }

    /// Teleports to the average of the given model part centres; ignored when
    /// there are none.
    pub fn move_to_model(
        &self,
        part_centers: &[Vector3<f32>],
        blink: &mut Blink,
    ) -> Option<Effect> {
        if part_centers.is_empty() {
            return None;
        }
        let sum = part_centers
            .iter()
            .fold(Vector3::zero(), |acc: Vector3<f32>, center| acc + *center);
        let center = sum / part_centers.len() as f32;
        if center.x.is_nan() {
            return None;
        }

        blink.gate(
            self.config.blinking,
            Effect::SetPlayerPosition {
                position: center,
                is_teleport: true,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_context::{Button, Pose};
    use crate::physics::{Plane, PlaneWorld, SurfaceTag};
    use cgmath::{Deg, Quaternion, Rotation3};

    fn config() -> MovementConfig {
        MovementConfig {
            blinking: false,
            ..MovementConfig::default()
        }
    }

    fn frame() -> (InputContext, Time) {
        let mut input = InputContext::default();
        input.head = Pose::new(vec3(0.0, 1.7, 0.0), Quaternion::from_angle_x(Deg(-30.0)));
        (input, Time::new(0.0, 0.25))
    }

    fn flat_world() -> PlaneWorld {
        PlaneWorld::new().with_plane(Plane::ground(0.0, SurfaceTag::Untagged))
    }

    fn turns(effects: &[Effect]) -> Vec<f32> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::RotatePlayer { yaw_degrees } => Some(*yaw_degrees),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_snap_turn_immediately_then_at_frequency() {
        let mut movement = GamepadMovement::new(config());
        let mut blink = Blink::default();
        let world = PlaneWorld::new();
        let (mut input, time) = frame();
        input.gamepad.right_stick.x = 0.9;

        let mut all = Vec::new();
        // 0.25s frames, 1s frequency: turn on frame 0, then once the counter passes 1s.
        for _ in 0..6 {
            all.extend(turns(&movement.update(&input, &time, &world, &mut blink)));
        }
        assert_eq!(all, vec![45.0, 45.0]);
        assert!(movement.is_snap_turning());
    }

    #[test]
    fn test_snap_turn_left_and_reset_on_release() {
        let mut movement = GamepadMovement::new(config());
        let mut blink = Blink::default();
        let world = PlaneWorld::new();
        let (mut input, time) = frame();

        input.gamepad.right_stick.x = -0.8;
        assert_eq!(turns(&movement.update(&input, &time, &world, &mut blink)), vec![-45.0]);

        input.gamepad.right_stick.x = 0.2;
        assert!(turns(&movement.update(&input, &time, &world, &mut blink)).is_empty());
        assert!(!movement.is_snap_turning());

        input.gamepad.right_stick.x = -0.8;
        assert_eq!(turns(&movement.update(&input, &time, &world, &mut blink)), vec![-45.0]);
    }

    #[test]
    fn test_snap_turn_goes_through_blink() {
        let mut movement = GamepadMovement::new(MovementConfig {
            blinking: true,
            ..config()
        });
        let mut blink = Blink::default();
        let world = PlaneWorld::new();
        let (mut input, time) = frame();
        input.gamepad.right_stick.x = 1.0;

        assert!(turns(&movement.update(&input, &time, &world, &mut blink)).is_empty());
        assert!(blink.is_active());
    }

    #[test]
    fn test_smooth_turning_scales_with_stick() {
        let mut movement = GamepadMovement::new(config());
        movement.set_smooth_turning(true);
        let mut blink = Blink::default();
        let world = PlaneWorld::new();
        let (mut input, time) = frame();
        input.gamepad.right_stick.x = 0.4;

        assert_eq!(turns(&movement.update(&input, &time, &world, &mut blink)), vec![0.2]);
        assert!(!movement.blinders_active());

        input.gamepad.right_trigger = 0.5;
        assert_eq!(turns(&movement.update(&input, &time, &world, &mut blink)), vec![0.4]);
        assert!(movement.blinders_active());
    }

    #[test]
    fn test_gaze_teleport_to_ground_marker() {
        let mut movement = GamepadMovement::new(config());
        let mut blink = Blink::default();
        let world = flat_world();
        let (mut input, time) = frame();
        input.gamepad.press(Button::Jump);

        assert!(movement.update(&input, &time, &world, &mut blink).is_empty());
        assert!(movement.ground_marker().active);
        assert!(!movement.air_marker().active);
        assert!(!movement.gaze_pointer_visible());
        let marker = movement.ground_marker().position;
        assert!(marker.y.abs() < 1e-4);

        let mut released = input.next_frame();
        released.gamepad.release(Button::Jump);
        let effects = movement.update(&released, &time, &world, &mut blink);
        assert_eq!(
            effects,
            vec![Effect::SetPlayerPosition {
                position: marker + vec3(0.0, 1.0, 0.0),
                is_teleport: true,
            }]
        );
        assert!(movement.gaze_pointer_visible());
        assert!(!movement.ground_marker().active);
    }

    #[test]
    fn test_gaze_without_ground_uses_air_marker_when_flying() {
        let mut movement = GamepadMovement::new(config());
        let mut blink = Blink::default();
        let (mut input, time) = frame();
        input.gamepad.press(Button::LeftShoulder);

        movement.update(&input, &time, &PlaneWorld::new(), &mut blink);
        assert!(movement.air_marker().active);
        let expected = input.head.position + input.head.forward() * 15.0;
        assert!((movement.air_marker().position - expected).magnitude() < 1e-4);
    }

    #[test]
    fn test_limited_range_falls_back_to_air_marker() {
        let mut movement = GamepadMovement::new(MovementConfig {
            limited_range_ground_teleport: true,
            teleport_range: 2.0,
            ..config()
        });
        let mut blink = Blink::default();
        let (mut input, time) = frame();
        input.gamepad.press(Button::RightShoulder);

        // Ground hit is ~3.4 units away along a 30 degree downward gaze.
        movement.update(&input, &time, &flat_world(), &mut blink);
        assert!(!movement.ground_marker().active);
        assert!(movement.air_marker().active);
    }

    #[test]
    fn test_no_flying_and_no_ground_shows_nothing() {
        let mut movement = GamepadMovement::new(config());
        movement.allow_free_move(false);
        let mut blink = Blink::default();
        let (mut input, time) = frame();
        input.gamepad.press(Button::Jump);

        movement.update(&input, &time, &PlaneWorld::new(), &mut blink);
        assert!(!movement.ground_marker().active);
        assert!(!movement.air_marker().active);

        let mut released = input.next_frame();
        released.gamepad.release(Button::Jump);
        assert!(movement
            .update(&released, &time, &PlaneWorld::new(), &mut blink)
            .is_empty());
    }

    #[test]
    fn test_flying_translates_along_gaze() {
        let mut movement = GamepadMovement::new(config());
        let mut blink = Blink::default();
        let (mut input, time) = frame();
        input.gamepad.left_stick.y = 1.0;

        let effects = movement.update(&input, &time, &PlaneWorld::new(), &mut blink);
        let expected = input.head.forward() * 0.01 * 3.0 * 0.7;
        match effects.as_slice() {
            [Effect::TranslatePlayer { delta }] => assert!((delta - expected).magnitude() < 1e-6),
            other => panic!("unexpected effects {:?}", other),
        }
        assert!(!movement.blinders_active());
    }

    #[test]
    fn test_turbo_flying_raises_blinders() {
        let mut movement = GamepadMovement::new(config());
        let mut blink = Blink::default();
        let (mut input, time) = frame();
        input.gamepad.right_stick.y = 1.0;
        input.gamepad.left_trigger = 1.0;

        let effects = movement.update(&input, &time, &PlaneWorld::new(), &mut blink);
        assert_eq!(
            effects,
            vec![Effect::TranslatePlayer {
                delta: vec3(0.0, -0.005 * 3.0 * 8.0, 0.0)
            }]
        );
        assert!(movement.blinders_active());
    }

    #[test]
    fn test_walking_emits_velocity() {
        let mut movement = GamepadMovement::new(config());
        movement.allow_free_move(false);
        let mut blink = Blink::default();
        let (mut input, time) = frame();
        input.gamepad.left_stick.x = -1.0;
        input.gamepad.right_stick.y = 1.0;

        let effects = movement.update(&input, &time, &PlaneWorld::new(), &mut blink);
        let expected = input.head.right() * -1.0 * 5.0 * 0.7;
        match effects.as_slice() {
            [Effect::WalkPlayer { velocity }] => assert!((velocity - expected).magnitude() < 1e-5),
            other => panic!("unexpected effects {:?}", other),
        }
    }

    #[test]
    fn test_move_to_model_averages_centers() {
        let movement = GamepadMovement::new(config());
        let mut blink = Blink::default();

        assert_eq!(movement.move_to_model(&[], &mut blink), None);
        assert_eq!(
            movement.move_to_model(&[vec3(0.0, 0.0, 0.0), vec3(2.0, 4.0, -2.0)], &mut blink),
            Some(Effect::SetPlayerPosition {
                position: vec3(1.0, 2.0, -1.0),
                is_teleport: true,
            })
        );
        assert_eq!(
            movement.move_to_model(&[vec3(f32::NAN, 0.0, 0.0)], &mut blink),
            None
        );
    }
}
