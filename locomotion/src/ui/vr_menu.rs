use cgmath::{vec3, InnerSpace, Vector3};

use crate::config::MenuConfig;
use crate::input_context::{InputContext, Pose};
use crate::ui_log;

/// World-space menu panel summoned in front of the player.
#[derive(Clone, Debug)]
pub struct VrMenu {
    config: MenuConfig,
    visible: bool,
    position: Vector3<f32>,
    facing: Vector3<f32>,
}

impl VrMenu {
    pub fn new(config: MenuConfig) -> Self {
        VrMenu {
            config,
            visible: false,
            position: vec3(0.0, 0.0, 0.0),
            facing: vec3(0.0, 0.0, -1.0),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    /// Direction the panel's front looks along.
    pub fn facing(&self) -> Vector3<f32> {
        self.facing
    }

    pub fn update(&mut self, input: &InputContext) {
        let presses = self
            .config
            .toggle_buttons
            .iter()
            .filter(|button| input.gamepad.just_pressed(**button))
            .count();
        for _ in 0..presses {
            self.toggle(&input.head);
        }

        if self.visible
            && (self.position - input.head.position).magnitude() > self.config.auto_hide_distance
        {
            ui_log!(DEBUG, "menu left behind, hiding");
            self.hide();
        }
    }

    pub fn toggle(&mut self, head: &Pose) {
        if self.visible {
            self.hide();
        } else {
            self.show(head);
        }
    }

    pub fn show(&mut self, head: &Pose) {
        self.place_in_front(head);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn place_in_front(&mut self, head: &Pose) {
        let forward = head.forward();
        self.position = head.position + forward * self.config.placement_distance;
        self.facing = forward;
    }
}

impl Default for VrMenu {
    fn default() -> Self {
        VrMenu::new(MenuConfig::default())
    }
}
