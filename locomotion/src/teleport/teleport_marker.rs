use cgmath::{vec3, Vector3};

use crate::color::Color;
use crate::physics::CollisionQuery;

/// Destination indicator: a ring plus a glow, both tinted together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TeleportMarker {
    pub active: bool,
    pub position: Vector3<f32>,
    pub ring: Color,
    pub glow: Color,
}

impl TeleportMarker {
    pub fn new(ring: Color, glow: Color) -> Self {
        TeleportMarker {
            active: false,
            position: vec3(0.0, 0.0, 0.0),
            ring,
            glow,
        }
    }

    pub fn show_at(&mut self, position: Vector3<f32>) {
        self.active = true;
        self.position = position;
    }

    pub fn hide(&mut self) {
        self.active = false;
    }

    pub fn set_color(&mut self, color: Color) {
        self.ring = self.ring.tinted(color);
        self.glow = self.glow.tinted(color);
    }
}

impl Default for TeleportMarker {
    fn default() -> Self {
        TeleportMarker::new(Color::WHITE, Color::rgba(1.0, 1.0, 1.0, 0.5))
    }
}

/// Line drawn from a marker down to the surface below it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShaftLine {
    /// Surface is too close to bother drawing.
    Collapsed,
    Grounded {
        start: Vector3<f32>,
        end: Vector3<f32>,
        texture_scale: f32,
    },
    /// Nothing below; the line runs [`MarkerShaft::UNBOUNDED_LENGTH`] down.
    Unbounded {
        start: Vector3<f32>,
        end: Vector3<f32>,
        texture_scale: f32,
    },
}

impl ShaftLine {
    /// Where the end cap sits, only when the shaft reached a surface.
    pub fn end_marker(&self) -> Option<Vector3<f32>> {
        match self {
            ShaftLine::Grounded { end, .. } => Some(*end),
            _ => None,
        }
    }
}

/// Vertical shaft under a floating teleport marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerShaft {
    pub width: f32,
    pub length_threshold: f32,
}

impl MarkerShaft {
    pub const UNBOUNDED_LENGTH: f32 = 1000.0;

    pub fn update(&self, marker_position: Vector3<f32>, query: &dyn CollisionQuery) -> ShaftLine {
        let down = vec3(0.0, -1.0, 0.0);
        match query.raycast(marker_position, down, f32::INFINITY) {
            Some(hit) if hit.distance < self.length_threshold => ShaftLine::Collapsed,
            Some(hit) => ShaftLine::Grounded {
                start: marker_position,
                end: hit.point,
                texture_scale: hit.distance / self.width,
            },
            None => ShaftLine::Unbounded {
                start: marker_position,
                end: marker_position + down * Self::UNBOUNDED_LENGTH,
                texture_scale: Self::UNBOUNDED_LENGTH / self.width,
            },
        }
    }
}

impl Default for MarkerShaft {
    fn default() -> Self {
        MarkerShaft {
            width: 0.1,
            length_threshold: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Plane, PlaneWorld, SurfaceTag};

    #[test]
    fn test_marker_tint_keeps_each_alpha() {
        let mut marker = TeleportMarker::default();
        marker.set_color(Color::GREEN);
        assert_eq!(marker.ring, Color::GREEN);
        assert_eq!(marker.glow, Color::rgba(0.0, 1.0, 0.0, 0.5));
    }

    #[test]
    fn test_shaft_reaches_ground() {
        let world = PlaneWorld::new().with_plane(Plane::ground(0.0, SurfaceTag::Untagged));
        let shaft = MarkerShaft::default().update(vec3(2.0, 3.0, 1.0), &world);

        match shaft {
            ShaftLine::Grounded { end, texture_scale, .. } => {
                assert_eq!(end, vec3(2.0, 0.0, 1.0));
                assert!((texture_scale - 30.0).abs() < 1e-3);
            }
            other => panic!("expected grounded shaft, got {:?}", other),
        }
        assert_eq!(shaft.end_marker(), Some(vec3(2.0, 0.0, 1.0)));
    }

    #[test]
    fn test_shaft_collapses_near_ground() {
        let world = PlaneWorld::new().with_plane(Plane::ground(0.0, SurfaceTag::Untagged));
        let shaft = MarkerShaft::default().update(vec3(0.0, 0.1, 0.0), &world);
        assert_eq!(shaft, ShaftLine::Collapsed);
    }

    #[test]
    fn test_shaft_without_ground_is_unbounded() {
        let shaft = MarkerShaft::default().update(vec3(0.0, 5.0, 0.0), &PlaneWorld::new());
        match shaft {
            ShaftLine::Unbounded { end, texture_scale, .. } => {
                assert_eq!(end, vec3(0.0, -995.0, 0.0));
                assert!((texture_scale - 10000.0).abs() < 1e-2);
            }
            other => panic!("expected unbounded shaft, got {:?}", other),
        }
        assert_eq!(shaft.end_marker(), None);
    }
}
