//! Distance to screen extent.

/// Smallest perpendicular distance used for projection.
pub const MIN_DISTANCE: f32 = 1e-3;

/// Vertical screen extent of a wall strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Perpendicular (fisheye corrected) distance, clamped to `MIN_DISTANCE`
    pub depth: f32,
    /// Unclamped projected height in pixels
    pub wall_height: f32,
    pub y_start: usize,
    pub y_end: usize,
}

/// Ray length projected onto the view direction. Rays at an angle to the
/// heading are longer than the perpendicular distance to the same flat wall;
/// this undoes that so flat walls stay flat.
#[inline]
pub fn corrected_distance(distance: f32, relative_angle: f32) -> f32 {
    distance * relative_angle.cos()
}

/// Project a traced distance onto a screen of `screen_height` rows.
///
/// Returns `None` when the clamped extent is empty.
pub fn project(distance: f32, relative_angle: f32, screen_height: usize) -> Option<Projection> {
    let corrected = corrected_distance(distance, relative_angle);
    // NaN fails the comparison and is clamped as well
    let depth = if corrected > MIN_DISTANCE {
        corrected
    } else {
        MIN_DISTANCE
    };

    let h = screen_height as f32;
    let wall_height = h / depth;
    let half = 0.5 * wall_height;
    let centre = 0.5 * h;

    let y_start = (centre - half).clamp(0.0, h).round() as usize;
    let y_end = (centre + half).clamp(0.0, h).round() as usize;
    if y_end <= y_start {
        return None;
    }

    Some(Projection {
        depth,
        wall_height,
        y_start,
        y_end,
    })
}
