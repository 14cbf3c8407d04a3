use cgmath::Vector3;

/// Identifies a gaze-interactive item (button, menu entry) attached to a collider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InteractiveId(pub u32);

/// What kind of surface a ray landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SurfaceTag {
    #[default]
    Untagged,
    /// Valid destination for the curve teleporter.
    TeleportArea,
    Interactive(InteractiveId),
}

const TAG_KIND_SHIFT: u32 = 32;
const TAG_TELEPORT_AREA: u128 = 1;
const TAG_INTERACTIVE: u128 = 2;

impl SurfaceTag {
    pub fn is_teleport_area(&self) -> bool {
        matches!(self, SurfaceTag::TeleportArea)
    }

    pub fn interactive_id(&self) -> Option<InteractiveId> {
        match self {
            SurfaceTag::Interactive(id) => Some(*id),
            _ => None,
        }
    }

    /// Packs the tag into a collider's `user_data`.
    pub fn to_user_data(self) -> u128 {
        match self {
            SurfaceTag::Untagged => 0,
            SurfaceTag::TeleportArea => TAG_TELEPORT_AREA << TAG_KIND_SHIFT,
            SurfaceTag::Interactive(InteractiveId(id)) => {
                (TAG_INTERACTIVE << TAG_KIND_SHIFT) | id as u128
            }
        }
    }

    pub fn from_user_data(data: u128) -> SurfaceTag {
        match data >> TAG_KIND_SHIFT {
            TAG_TELEPORT_AREA => SurfaceTag::TeleportArea,
            TAG_INTERACTIVE => SurfaceTag::Interactive(InteractiveId(data as u32)),
            _ => SurfaceTag::Untagged,
        }
    }
}

/// Result of a single ray query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastHit {
    pub point: Vector3<f32>,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
    pub surface: SurfaceTag,
}

/// World-geometry intersection test, supplied by the host.
///
/// `direction` does not need to be normalized; `max_distance` is measured
/// along the normalized direction and may be `f32::INFINITY`.
pub trait CollisionQuery {
    fn raycast(
        &self,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<RaycastHit>;
}
