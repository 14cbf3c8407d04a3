// VR UI
//
// Gaze-driven interaction: the eye raycaster tracks what the head looks at,
// button events are routed to that item, and HUD helpers (reticle, menu,
// smooth follower) keep world-space UI usable in a headset.

pub mod eye_raycaster;
pub mod follow_smoothly;
pub mod reticle;
pub mod vr_button;
pub mod vr_input;
pub mod vr_menu;

pub use eye_raycaster::{EyeRaycaster, Interaction, InteractionEvent};
pub use follow_smoothly::FollowSmoothly;
pub use reticle::Reticle;
pub use vr_button::{HighlightStyle, VrButton};
pub use vr_input::{InputEvent, VrInput};
pub use vr_menu::VrMenu;
