pub mod collision;
pub mod planes;
pub mod util;
pub mod world;

pub use collision::{CollisionQuery, InteractiveId, RaycastHit, SurfaceTag};
pub use planes::{Plane, PlaneWorld};
pub use world::PhysicsWorld;
