//! Player movement with per-axis wall collision.

use std::time::Duration;

use crate::camera::Pose;
use crate::config::MovementConfig;
use crate::world::GridMap;

/// Longest step simulated in one update.
pub const MAX_STEP: Duration = Duration::from_millis(100);

/// Desired motion for one update, each axis in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intent {
    /// Positive moves along the heading
    pub forward: f32,
    /// Positive moves to the right of the heading
    pub strafe: f32,
    /// Positive turns towards increasing angle
    pub turn: f32,
}

impl Intent {
    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0 && self.turn == 0.0
    }
}

/// Advance `pose` by `intent` over `dt`.
///
/// The x and y components are applied separately against the map, so a
/// blocked diagonal move still slides along the wall.
pub fn apply(pose: &mut Pose, intent: Intent, map: &GridMap, config: &MovementConfig, dt: Duration) {
    let dt = dt.min(MAX_STEP).as_secs_f32();

    pose.rotate(intent.turn.clamp(-1.0, 1.0) * config.turn_speed * dt);

    let mut fwd = intent.forward.clamp(-1.0, 1.0);
    let mut strafe = intent.strafe.clamp(-1.0, 1.0);
    let len = (fwd * fwd + strafe * strafe).sqrt();
    if len == 0.0 {
        return;
    }
    if len > 1.0 {
        fwd /= len;
        strafe /= len;
    }

    let [cx, cy] = pose.direction();
    // Right of the heading in a y-down grid
    let (rx, ry) = (-cy, cx);
    let step = config.move_speed * dt;
    let dx = (cx * fwd + rx * strafe) * step;
    let dy = (cy * fwd + ry * strafe) * step;

    let (mut x, mut y) = (pose.x(), pose.y());
    let new_x = x + dx;
    if !map.is_blocked(new_x.floor() as i32, y.floor() as i32) {
        x = new_x;
    }
    let new_y = y + dy;
    if !map.is_blocked(x.floor() as i32, new_y.floor() as i32) {
        y = new_y;
    }
    pose.set_position(x, y);
}
