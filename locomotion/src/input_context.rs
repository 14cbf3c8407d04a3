use std::collections::HashSet;

use cgmath::{vec2, vec3, Quaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// World-space position and orientation. Forward is `-Z`, up is `+Y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Pose {
    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Pose { position, rotation }
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * vec3(0.0, 0.0, -1.0)
    }

    pub fn right(&self) -> Vector3<f32> {
        self.rotation * vec3(1.0, 0.0, 0.0)
    }

    pub fn up(&self) -> Vector3<f32> {
        self.rotation * vec3(0.0, 1.0, 0.0)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose {
            position: vec3(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }
}

/// Logical gamepad buttons. Hosts map their physical bindings onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    LeftShoulder,
    RightShoulder,
    Jump,
    Primary,
    Cancel,
    Menu,
    Touchpad,
}

/// Logical analog axes, all in `[-1, 1]` (triggers in `[0, 1]`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
    RightHorizontal,
    RightVertical,
    LeftTrigger,
    RightTrigger,
}

/// Gamepad snapshot for one frame, remembering which buttons were held on the
/// previous frame so press and release edges can be observed.
#[derive(Clone, Debug)]
pub struct GamepadState {
    pub left_stick: Vector2<f32>,
    pub right_stick: Vector2<f32>,
    pub left_trigger: f32,
    pub right_trigger: f32,
    held: HashSet<Button>,
    previous: HashSet<Button>,
}

impl GamepadState {
    pub fn new() -> Self {
        GamepadState {
            left_stick: vec2(0.0, 0.0),
            right_stick: vec2(0.0, 0.0),
            left_trigger: 0.0,
            right_trigger: 0.0,
            held: HashSet::new(),
            previous: HashSet::new(),
        }
    }

    pub fn axis(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.left_stick.x,
            Axis::Vertical => self.left_stick.y,
            Axis::RightHorizontal => self.right_stick.x,
            Axis::RightVertical => self.right_stick.y,
            Axis::LeftTrigger => self.left_trigger,
            Axis::RightTrigger => self.right_trigger,
        }
    }

    pub fn set_axis(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Horizontal => self.left_stick.x = value,
            Axis::Vertical => self.left_stick.y = value,
            Axis::RightHorizontal => self.right_stick.x = value,
            Axis::RightVertical => self.right_stick.y = value,
            Axis::LeftTrigger => self.left_trigger = value,
            Axis::RightTrigger => self.right_trigger = value,
        }
    }

    pub fn press(&mut self, button: Button) {
        self.held.insert(button);
    }

    pub fn release(&mut self, button: Button) {
        self.held.remove(&button);
    }

    /// Held this frame, including the frame it went down.
    pub fn is_held(&self, button: Button) -> bool {
        self.held.contains(&button)
    }

    pub fn just_pressed(&self, button: Button) -> bool {
        self.held.contains(&button) && !self.previous.contains(&button)
    }

    pub fn just_released(&self, button: Button) -> bool {
        !self.held.contains(&button) && self.previous.contains(&button)
    }

    pub fn any_held(&self, buttons: &[Button]) -> bool {
        buttons.iter().any(|b| self.is_held(*b))
    }

    pub fn any_just_released(&self, buttons: &[Button]) -> bool {
        buttons.iter().any(|b| self.just_released(*b))
    }

    /// Carry the held set and axes into the next frame's snapshot.
    pub fn next_frame(&self) -> Self {
        GamepadState {
            previous: self.held.clone(),
            ..self.clone()
        }
    }
}

impl Default for GamepadState {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a component reads from the host in one frame.
#[derive(Clone, Debug)]
pub struct InputContext {
    /// Headset pose in world space.
    pub head: Pose,
    /// Headset offset from the camera rig origin, in world axes.
    pub head_local: Vector3<f32>,
    /// Pose the teleport curve is aimed from (a controller or the head).
    pub pointer: Pose,
    pub gamepad: GamepadState,
}

impl Default for InputContext {
    fn default() -> Self {
        InputContext {
            head: Pose::default(),
            head_local: vec3(0.0, 0.0, 0.0),
            pointer: Pose::default(),
            gamepad: GamepadState::new(),
        }
    }
}

impl InputContext {
    pub fn next_frame(&self) -> Self {
        InputContext {
            gamepad: self.gamepad.next_frame(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Deg, InnerSpace, Rotation3};

    #[test]
    fn test_button_edges() {
        let mut frame = GamepadState::new();
        frame.press(Button::Jump);
        assert!(frame.just_pressed(Button::Jump));
        assert!(frame.is_held(Button::Jump));

        let mut frame = frame.next_frame();
        assert!(!frame.just_pressed(Button::Jump));
        assert!(frame.is_held(Button::Jump));

        frame.release(Button::Jump);
        assert!(frame.just_released(Button::Jump));

        let frame = frame.next_frame();
        assert!(!frame.just_released(Button::Jump));
    }

    #[test]
    fn test_pose_axes_follow_rotation() {
        let pose = Pose::new(vec3(0.0, 0.0, 0.0), Quaternion::from_angle_y(Deg(90.0)));
        let forward = pose.forward();
        assert!((forward - vec3(-1.0, 0.0, 0.0)).magnitude() < 1e-5);
        assert!((pose.up() - vec3(0.0, 1.0, 0.0)).magnitude() < 1e-5);
    }

    #[test]
    fn test_axis_roundtrip_through_sticks() {
        let mut pad = GamepadState::new();
        pad.set_axis(Axis::RightHorizontal, 0.75);
        pad.set_axis(Axis::LeftTrigger, 0.2);
        assert_eq!(pad.right_stick.x, 0.75);
        assert_eq!(pad.axis(Axis::LeftTrigger), 0.2);
    }
}
