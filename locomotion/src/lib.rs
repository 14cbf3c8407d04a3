pub mod color;
pub mod comfort;
pub mod config;
pub mod effect;
pub mod input_context;
pub mod logging;
pub mod movement;
pub mod physics;
pub mod teleport;
pub mod time;
pub mod ui;

pub use color::Color;
pub use comfort::Blink;
pub use config::{ConfigError, LocomotionConfig};
pub use effect::Effect;
pub use input_context::{Axis, Button, GamepadState, InputContext, Pose};
pub use movement::{GamepadMovement, PlayerRig};
pub use physics::{CollisionQuery, PhysicsWorld, PlaneWorld, RaycastHit, SurfaceTag};
pub use teleport::{CurveTeleporter, CurvedRaycast};
pub use time::Time;
