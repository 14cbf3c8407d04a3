pub mod gamepad_movement;
pub mod player_rig;

pub use gamepad_movement::GamepadMovement;
pub use player_rig::PlayerRig;
