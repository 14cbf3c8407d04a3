use crate::config::InputConfig;
use crate::input_context::Pose;
use crate::physics::{CollisionQuery, InteractiveId, RaycastHit};
use crate::ui_log;

use super::{InputEvent, Reticle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    Over,
    Out,
    Click,
    DoubleClick,
    Down,
    Up,
}

/// Event addressed to one interactive item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interaction {
    pub item: InteractiveId,
    pub event: InteractionEvent,
}

/// Casts the gaze ray every frame, tracks which interactive item is looked
/// at and routes button events to it.
#[derive(Clone, Debug)]
pub struct EyeRaycaster {
    ray_length: f32,
    hovered: Option<InteractiveId>,
    last_hit: Option<RaycastHit>,
}

impl EyeRaycaster {
    pub fn new(config: &InputConfig) -> Self {
        EyeRaycaster {
            ray_length: config.gaze_ray_length,
            hovered: None,
            last_hit: None,
        }
    }

    pub fn hovered(&self) -> Option<InteractiveId> {
        self.hovered
    }

    pub fn last_hit(&self) -> Option<&RaycastHit> {
        self.last_hit.as_ref()
    }

    pub fn update(
        &mut self,
        head: &Pose,
        query: &dyn CollisionQuery,
        input_events: &[InputEvent],
        reticle: Option<&mut Reticle>,
    ) -> Vec<Interaction> {
        let hit = query.raycast(head.position, head.forward(), self.ray_length);
        let current = hit.and_then(|hit| hit.surface.interactive_id());
        let mut interactions = Vec::new();

        if current != self.hovered {
            if let Some(item) = self.hovered {
                interactions.push(Interaction {
                    item,
                    event: InteractionEvent::Out,
                });
            }
            if let Some(item) = current {
                ui_log!(TRACE, "gaze over {:?}", item);
                interactions.push(Interaction {
                    item,
                    event: InteractionEvent::Over,
                });
            }
            self.hovered = current;
        }

        if let Some(reticle) = reticle {
            match &hit {
                Some(hit) => reticle.place_on_hit(head, hit),
                None => reticle.place_default(head),
            }
        }
        self.last_hit = hit;

        if let Some(item) = self.hovered {
            interactions.extend(input_events.iter().filter_map(|event| {
                let event = match event {
                    InputEvent::Click => InteractionEvent::Click,
                    InputEvent::DoubleClick => InteractionEvent::DoubleClick,
                    InputEvent::Down => InteractionEvent::Down,
                    InputEvent::Up => InteractionEvent::Up,
                    InputEvent::Cancel => return None,
                };
                Some(Interaction { item, event })
            }));
        }

        interactions
    }
}

impl Default for EyeRaycaster {
    fn default() -> Self {
        EyeRaycaster::new(&InputConfig::default())
    }
}
