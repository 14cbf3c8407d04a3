use cgmath::Vector3;

/// Change to the player rig requested by a locomotion component. The host (or
/// [`PlayerRig`](crate::movement::PlayerRig)) applies these once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    SetPlayerPosition {
        position: Vector3<f32>,
        is_teleport: bool,
    },
    /// Positive turns right (clockwise seen from above).
    RotatePlayer { yaw_degrees: f32 },
    /// Displacement applied as-is this frame.
    TranslatePlayer { delta: Vector3<f32> },
    /// Ground-bound velocity in units per second; vertical part is ignored.
    WalkPlayer { velocity: Vector3<f32> },
}
