//! Input-driven consumer of the kinematic body.
//!
//! The controller only uses the body's public movement API and reacts to its
//! vertical collision events; it never touches collision state directly.

use kcc2d::{KinematicBody, MoveSettings, StepConfig, VerticalCollision};
use serde::{Deserialize, Serialize};

/// Tuning for the player-facing controls.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    pub movement: MoveSettings,
    /// Jump apex above the take-off point (meters).
    pub jump_height: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            movement: MoveSettings::default(),
            jump_height: 2.0,
        }
    }
}

/// Visual feedback colour for the last vertical collision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Feedback {
    #[default]
    Neutral,
    /// Landed on ground.
    Red,
    /// Bumped a ceiling.
    Green,
}

#[derive(Debug)]
pub struct Controller {
    settings: ControllerSettings,
    /// Latched between input polling and the next fixed tick.
    jump_pressed: bool,
    feedback: Feedback,
}

impl Controller {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            settings,
            jump_pressed: false,
            feedback: Feedback::Neutral,
        }
    }

    /// Record a jump press from per-frame polling. Consumed by the next fixed tick.
    pub fn press_jump(&mut self) {
        self.jump_pressed = true;
    }

    /// Apply input for one fixed tick, before the body steps.
    ///
    /// Returns whether a jump was launched.
    pub fn fixed_update(
        &mut self,
        body: &mut KinematicBody,
        axis: i32,
        dt: f32,
        config: &StepConfig,
    ) -> bool {
        body.move_horizontal(axis, &self.settings.movement, dt);

        let jumped = self.jump_pressed && body.try_jump(self.settings.jump_height, config);
        self.jump_pressed = false;
        jumped
    }

    pub fn on_vertical_collision(&mut self, event: &VerticalCollision) {
        self.feedback = if event.sign == -1 {
            Feedback::Red
        } else {
            Feedback::Green
        };
    }

    #[inline]
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    #[inline]
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }
}
