use cgmath::Vector3;

use crate::config::{non_negative, positive, ConfigError};
use crate::physics::util::try_normalize;
use crate::physics::{CollisionQuery, RaycastHit};
use crate::teleport_log;

/// Extra length added to every segment query so a surface lying exactly on a
/// segment boundary is not lost to floating point short-fall.
pub const RAYCAST_EPSILON: f32 = 0.1;

/// Most segments a curve may be split into. The node pool is sized from the
/// segment count, so `max_length / step_length` above this is rejected.
pub const MAX_CURVE_SEGMENTS: usize = 500;

/// Shape of the sampled curve. Construct through [`CurveSettings::new`], which
/// rejects values that would never terminate or need more than
/// [`MAX_CURVE_SEGMENTS`] segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSettings {
    step_length: f32,
    curvature: f32,
    max_length: f32,
}

impl CurveSettings {
    pub fn new(step_length: f32, curvature: f32, max_length: f32) -> Result<Self, ConfigError> {
        let settings = CurveSettings {
            step_length: positive("teleport.curve_node_distance", step_length)?,
            curvature: non_negative("teleport.curve_angle", curvature)?,
            max_length: positive("teleport.curve_max_length", max_length)?,
        };

        let segments = (max_length / step_length).ceil();
        if segments > MAX_CURVE_SEGMENTS as f32 {
            return Err(ConfigError::invalid(
                "teleport.curve_node_distance",
                format!(
                    "{} / {} needs {} segments, at most {} allowed",
                    max_length, step_length, segments, MAX_CURVE_SEGMENTS
                ),
            ));
        }
        Ok(settings)
    }

    pub fn step_length(&self) -> f32 {
        self.step_length
    }

    pub fn curvature(&self) -> f32 {
        self.curvature
    }

    pub fn max_length(&self) -> f32 {
        self.max_length
    }

    /// Upper bound on sampled segments; also the marker pool capacity.
    pub fn max_segments(&self) -> usize {
        ((self.max_length / self.step_length).ceil() as usize).max(1)
    }
}

/// First surface the curve ran into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveHit {
    pub hit: RaycastHit,
    /// Index of the segment whose query hit.
    pub segment: usize,
    /// Length along the curve from the origin to the hit point.
    pub arc_distance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurveOutcome {
    Hit(CurveHit),
    Miss,
}

/// Result of one curve query.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveSample {
    /// End point of every segment traversed without a hit, in order.
    pub path: Vec<Vector3<f32>>,
    pub outcome: CurveOutcome,
}

impl CurveSample {
    pub fn hit(&self) -> Option<&CurveHit> {
        match &self.outcome {
            CurveOutcome::Hit(hit) => Some(hit),
            CurveOutcome::Miss => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.hit().is_some()
    }

    /// Number of collision queries that were issued.
    pub fn segments_queried(&self) -> usize {
        match &self.outcome {
            CurveOutcome::Hit(hit) => hit.segment + 1,
            CurveOutcome::Miss => self.path.len(),
        }
    }
}

/// Gravity-bent raycast used for teleport aiming.
///
/// The probe walks `step_length` along its direction per segment, one ray query
/// per segment, and bends the direction down by `curvature * step_length`
/// after each miss.
pub struct CurvedRaycast;

impl CurvedRaycast {
    pub fn sample(
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        settings: &CurveSettings,
        query: &dyn CollisionQuery,
    ) -> CurveSample {
        let mut path = Vec::with_capacity(settings.max_segments());
        let outcome = Self::sample_into(origin, direction, settings, query, &mut path);
        CurveSample { path, outcome }
    }

    /// Same as [`CurvedRaycast::sample`] but reuses `path`, which is cleared first.
    pub fn sample_into(
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        settings: &CurveSettings,
        query: &dyn CollisionQuery,
        path: &mut Vec<Vector3<f32>>,
    ) -> CurveOutcome {
        path.clear();

        let step = settings.step_length;
        let bend = settings.curvature * step;
        let mut probe = origin;
        // Starts at unit length, then bent each step without renormalizing.
        let mut heading = try_normalize(direction).unwrap_or(DOWN);

        for segment in 0..settings.max_segments() {
            let unit = try_normalize(heading).unwrap_or(DOWN);

            if let Some(hit) = query.raycast(probe, unit, step + RAYCAST_EPSILON) {
                let arc_distance = segment as f32 * step + hit.distance;
                teleport_log!(
                    TRACE,
                    "curve hit {:?} at segment {} (arc {:.2})",
                    hit.surface,
                    segment,
                    arc_distance
                );
                return CurveOutcome::Hit(CurveHit {
                    hit,
                    segment,
                    arc_distance,
                });
            }

            probe += unit * step;
            path.push(probe);
            heading.y -= bend;
        }

        CurveOutcome::Miss
    }
}

const DOWN: Vector3<f32> = Vector3 {
    x: 0.0,
    y: -1.0,
    z: 0.0,
};
