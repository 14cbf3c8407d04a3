use cgmath::Vector3;
use rapier3d::prelude::*;

use super::util::{npoint_to_cgvec, nvec_to_cgmath, try_normalize, vec_to_npoint, vec_to_nvec};
use super::{CollisionQuery, InteractiveId, RaycastHit, SurfaceTag};
use crate::physics_log;

/// Static collision scene backed by rapier3d.
///
/// Only queries are needed for locomotion, so colliders are inserted without
/// rigid bodies and the simulation pipeline is never stepped.
pub struct PhysicsWorld {
    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Axis-aligned box centered at `center`.
    pub fn add_box(
        &mut self,
        center: Vector3<f32>,
        half_extents: Vector3<f32>,
        surface: SurfaceTag,
    ) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vec_to_nvec(center))
            .user_data(surface.to_user_data())
            .build();
        self.insert(collider)
    }

    /// Thin slab whose top face sits at `height`.
    pub fn add_ground(
        &mut self,
        height: f32,
        half_size: f32,
        surface: SurfaceTag,
    ) -> ColliderHandle {
        const THICKNESS: f32 = 0.5;
        self.add_box(
            Vector3::new(0.0, height - THICKNESS, 0.0),
            Vector3::new(half_size, THICKNESS, half_size),
            surface,
        )
    }

    /// Flat panel for a gaze-interactive item, sized from its rect.
    pub fn add_interactive_panel(
        &mut self,
        id: InteractiveId,
        center: Vector3<f32>,
        half_extents: Vector3<f32>,
    ) -> ColliderHandle {
        self.add_box(center, half_extents, SurfaceTag::Interactive(id))
    }

    pub fn remove(&mut self, handle: ColliderHandle) -> bool {
        let mut islands = IslandManager::new();
        let removed = self
            .collider_set
            .remove(handle, &mut islands, &mut self.rigid_body_set, false)
            .is_some();
        if removed {
            self.query_pipeline.update(&self.collider_set);
        }
        removed
    }

    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }

    pub fn collider_center(&self, handle: ColliderHandle) -> Option<Vector3<f32>> {
        self.collider_set
            .get(handle)
            .map(|collider| nvec_to_cgmath(*collider.translation()))
    }

    fn insert(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.collider_set.insert(collider);
        self.query_pipeline.update(&self.collider_set);
        physics_log!(DEBUG, "inserted collider {:?}", handle);
        handle
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionQuery for PhysicsWorld {
    fn raycast(
        &self,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<RaycastHit> {
        let direction = try_normalize(direction)?;
        let ray = Ray::new(vec_to_npoint(origin), vec_to_nvec(direction));
        let max_toi = if max_distance.is_finite() { max_distance } else { Real::MAX };

        let (handle, toi) = self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_toi,
            true,
            QueryFilter::default(),
        )?;

        let surface = self
            .collider_set
            .get(handle)
            .map(|collider| SurfaceTag::from_user_data(collider.user_data))
            .unwrap_or_default();

        Some(RaycastHit {
            point: npoint_to_cgvec(ray.point_at(toi)),
            distance: toi,
            surface,
        })
    }
}
