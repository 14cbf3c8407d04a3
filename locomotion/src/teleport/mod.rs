// VR Teleport Movement
//
// Aim a gravity-bent curve from the pointer, preview it with pooled nodes and
// a destination marker, and move the camera rig on release when the curve
// landed on a teleport area.

pub mod curve_nodes;
pub mod curve_teleporter;
pub mod curved_raycast;
pub mod teleport_marker;

pub use curve_nodes::{CurveNode, CurveNodePool};
pub use curve_teleporter::CurveTeleporter;
pub use curved_raycast::{
    CurveHit, CurveOutcome, CurveSample, CurveSettings, CurvedRaycast, MAX_CURVE_SEGMENTS,
    RAYCAST_EPSILON,
};
pub use teleport_marker::{MarkerShaft, ShaftLine, TeleportMarker};
