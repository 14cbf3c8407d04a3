use cgmath::{vec3, InnerSpace, Vector3};

use super::util::try_normalize;
use super::{CollisionQuery, RaycastHit, SurfaceTag};

/// One-sided infinite plane: points `p` with `normal · p == offset`.
/// Rays only hit it from the side the normal points to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vector3<f32>,
    pub offset: f32,
    pub surface: SurfaceTag,
}

impl Plane {
    pub fn new(normal: Vector3<f32>, point_on_plane: Vector3<f32>, surface: SurfaceTag) -> Self {
        let normal = normal.normalize();
        Plane {
            normal,
            offset: normal.dot(point_on_plane),
            surface,
        }
    }

    /// Horizontal floor facing up at `height`.
    pub fn ground(height: f32, surface: SurfaceTag) -> Self {
        Plane::new(vec3(0.0, 1.0, 0.0), vec3(0.0, height, 0.0), surface)
    }
}

/// Analytic collision world made of planes. Stands in for an engine's
/// physics scene when no meshes are involved (flat levels, tests).
#[derive(Clone, Debug, Default)]
pub struct PlaneWorld {
    planes: Vec<Plane>,
}

impl PlaneWorld {
    pub fn new() -> Self {
        PlaneWorld { planes: Vec::new() }
    }

    pub fn with_plane(mut self, plane: Plane) -> Self {
        self.planes.push(plane);
        self
    }

    pub fn add_plane(&mut self, plane: Plane) {
        self.planes.push(plane);
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }
}

impl CollisionQuery for PlaneWorld {
    fn raycast(
        &self,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<RaycastHit> {
        let direction = try_normalize(direction)?;

        self.planes
            .iter()
            .filter_map(|plane| {
                let facing = plane.normal.dot(direction);
                if facing >= -f32::EPSILON {
                    return None;
                }
                let distance = (plane.offset - plane.normal.dot(origin)) / facing;
                if distance < 0.0 || distance > max_distance {
                    return None;
                }
                Some(RaycastHit {
                    point: origin + direction * distance,
                    distance,
                    surface: plane.surface,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_hits_ground_from_above() {
        let world = PlaneWorld::new().with_plane(Plane::ground(0.0, SurfaceTag::TeleportArea));
        let hit = world
            .raycast(vec3(1.0, 2.0, 0.0), vec3(0.0, -4.0, 0.0), 10.0)
            .unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-5);
        assert!((hit.point - vec3(1.0, 0.0, 0.0)).magnitude() < 1e-5);
        assert_eq!(hit.surface, SurfaceTag::TeleportArea);
    }

    #[test]
    fn test_ray_respects_max_distance_and_back_faces() {
        let world = PlaneWorld::new().with_plane(Plane::ground(0.0, SurfaceTag::Untagged));
        assert!(world.raycast(vec3(0.0, 2.0, 0.0), vec3(0.0, -1.0, 0.0), 1.5).is_none());
        assert!(world.raycast(vec3(0.0, -2.0, 0.0), vec3(0.0, 1.0, 0.0), 10.0).is_none());
    }

    #[test]
    fn test_nearest_plane_wins() {
        let world = PlaneWorld::new()
            .with_plane(Plane::ground(0.0, SurfaceTag::TeleportArea))
            .with_plane(Plane::ground(1.0, SurfaceTag::Untagged));
        let hit = world
            .raycast(vec3(0.0, 5.0, 0.0), vec3(0.0, -1.0, 0.0), f32::INFINITY)
            .unwrap();
        assert_eq!(hit.surface, SurfaceTag::Untagged);
    }
}
