use crate::config::InputConfig;
use crate::input_context::{Button, GamepadState};
use crate::time::Time;
use crate::ui_log;

/// Edge events of the primary and cancel buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Down,
    Up,
    Click,
    DoubleClick,
    Cancel,
}

/// Turns raw button state into click and double-click events.
#[derive(Clone, Debug)]
pub struct VrInput {
    double_click_time: f32,
    last_up_time: Option<f32>,
}

impl VrInput {
    pub fn new(config: &InputConfig) -> Self {
        VrInput {
            double_click_time: config.double_click_time,
            last_up_time: None,
        }
    }

    pub fn double_click_time(&self) -> f32 {
        self.double_click_time
    }

    pub fn update(&mut self, gamepad: &GamepadState, time: &Time) -> Vec<InputEvent> {
        let mut events = Vec::new();

        if gamepad.just_pressed(Button::Primary) {
            events.push(InputEvent::Down);
        }

        if gamepad.just_released(Button::Primary) {
            events.push(InputEvent::Up);
            let double = self
                .last_up_time
                .is_some_and(|last| time.total - last < self.double_click_time);
            if double {
                ui_log!(DEBUG, "double click at {:.3}s", time.total);
                events.push(InputEvent::DoubleClick);
            } else {
                events.push(InputEvent::Click);
            }
            self.last_up_time = Some(time.total);
        }

        if gamepad.just_pressed(Button::Cancel) {
            events.push(InputEvent::Cancel);
        }

        events
    }
}

impl Default for VrInput {
    fn default() -> Self {
        VrInput::new(&InputConfig::default())
    }
}
