use std::f32::consts::TAU;

use crate::config::RenderConfig;

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// Player position in grid units and heading in radians.
///
/// The heading is kept in `[0, 2π)` across every mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    x: f32,
    y: f32,
    angle: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            x,
            y,
            angle: normalize_angle(angle),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn rotate(&mut self, delta: f32) {
        self.angle = normalize_angle(self.angle + delta);
    }

    /// Unit vector of the heading.
    #[inline]
    pub fn direction(&self) -> [f32; 2] {
        [self.angle.cos(), self.angle.sin()]
    }
}

/// Direction of one column's ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub direction_x: f32,
    pub direction_y: f32,
    /// Absolute angle, in `[0, 2π)`
    pub angle: f32,
    /// Offset from the pose heading, in `[-fov/2, fov/2)`
    pub relative_angle: f32,
}

impl Ray {
    pub fn from_angle(angle: f32, relative_angle: f32) -> Self {
        let angle = normalize_angle(angle);
        Self {
            direction_x: angle.cos(),
            direction_y: angle.sin(),
            angle,
            relative_angle,
        }
    }

    /// Ray for screen column `column`. Columns sweep the field of view
    /// linearly from `angle - fov/2` (column 0) in steps of `fov / N`.
    ///
    /// The offset is computed as `fov * (i/N - 1/2)` so the centre column of
    /// an even `N` gets an offset of exactly zero.
    pub fn for_column(pose: &Pose, column: usize, config: &RenderConfig) -> Self {
        let t = column as f32 / config.columns() as f32;
        let relative_angle = config.fov() * (t - 0.5);
        Self::from_angle(pose.angle() + relative_angle, relative_angle)
    }
}
