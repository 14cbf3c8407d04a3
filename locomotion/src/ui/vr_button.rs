use cgmath::{vec3, Vector2, Vector3};
use rapier3d::prelude::ColliderHandle;

use crate::color::Color;
use crate::physics::{InteractiveId, PhysicsWorld};
use crate::ui_log;

use super::InteractionEvent;

/// Half depth of the collider generated for a flat button rect.
const PANEL_HALF_DEPTH: f32 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightStyle {
    pub normal: Color,
    pub hover: Color,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        HighlightStyle {
            normal: Color::WHITE,
            hover: Color::rgba(0.5, 0.9, 0.5, 1.0),
        }
    }
}

/// Gaze-clickable rectangle on a world-space canvas.
#[derive(Clone, Debug)]
pub struct VrButton {
    id: InteractiveId,
    size: Vector2<f32>,
    style: HighlightStyle,
    color: Color,
    clicks: u32,
    double_clicks: u32,
}

impl VrButton {
    pub fn new(id: InteractiveId, size: Vector2<f32>) -> Self {
        VrButton::with_style(id, size, HighlightStyle::default())
    }

    pub fn with_style(id: InteractiveId, size: Vector2<f32>, style: HighlightStyle) -> Self {
        VrButton {
            id,
            size,
            style,
            color: style.normal,
            clicks: 0,
            double_clicks: 0,
        }
    }

    pub fn id(&self) -> InteractiveId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn double_clicks(&self) -> u32 {
        self.double_clicks
    }

    pub fn collider_half_extents(&self) -> Vector3<f32> {
        vec3(self.size.x / 2.0, self.size.y / 2.0, PANEL_HALF_DEPTH)
    }

    /// Adds the button's collider to `world`, centred at `center`.
    pub fn attach(&self, world: &mut PhysicsWorld, center: Vector3<f32>) -> ColliderHandle {
        world.add_interactive_panel(self.id, center, self.collider_half_extents())
    }

    pub fn handle(&mut self, event: InteractionEvent) {
        match event {
            InteractionEvent::Over => self.color = self.style.hover,
            InteractionEvent::Out => self.color = self.style.normal,
            InteractionEvent::Click => {
                ui_log!(INFO, "button {:?} clicked", self.id);
                self.clicks += 1;
                self.color = self.style.hover;
            }
            InteractionEvent::DoubleClick => {
                ui_log!(INFO, "button {:?} double clicked", self.id);
                self.double_clicks += 1;
            }
            InteractionEvent::Down | InteractionEvent::Up => {}
        }
    }
}
