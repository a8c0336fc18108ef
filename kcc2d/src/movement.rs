use crate::{
    body::KinematicBody,
    settings::{MoveSettings, StepConfig},
};

/// Move `current` toward `target` by at most `max_delta`.
#[inline]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

/// Launch speed that reaches `height` under constant deceleration `gravity`.
///
/// Returns `None` when the result would not be a finite, non-negative speed.
#[inline]
pub fn jump_speed(height: f32, gravity: f32) -> Option<f32> {
    if !(height >= 0.0) || !height.is_finite() || !(gravity >= 0.0) || !gravity.is_finite() {
        return None;
    }
    Some((2.0 * gravity * height).sqrt())
}

impl KinematicBody {
    /// Accelerate horizontal velocity toward `direction * settings.top_speed`.
    ///
    /// `direction` is reduced to its sign. The change per call is capped at
    /// `acceleration * dt`, scaled by `air_control` while airborne. A non-zero
    /// direction turns the body when `update_facing` is set.
    pub fn move_horizontal(&mut self, direction: i32, settings: &MoveSettings, dt: f32) {
        let direction = direction.signum();

        if direction != 0 && settings.update_facing {
            self.facing = direction as i8;
        }

        let factor = if self.grounded() { 1.0 } else { settings.air_control };
        // Negative tuning from config must never push away from the target.
        let delta = (settings.acceleration * dt * factor).max(0.0);
        let target_speed = direction as f32 * settings.top_speed;

        self.velocity.x = move_towards(self.velocity.x, target_speed, delta);
    }

    /// Launch upward to reach `height`, if grounded and the cooldown has elapsed.
    ///
    /// Failure is a normal outcome (airborne, cooling down, or an unusable height)
    /// and leaves the body untouched.
    pub fn try_jump(&mut self, height: f32, config: &StepConfig) -> bool {
        if self.jump_cooldown > 0.0 || !self.grounded() {
            return false;
        }

        let Some(speed) = jump_speed(height, config.gravity_acceleration()) else {
            log::warn!("rejected jump with height {height}");
            return false;
        };

        self.velocity.y = speed;
        self.jump_cooldown = self.jump_interval;
        log::debug!("jump: height={height} launch speed={speed}");
        true
    }
}
