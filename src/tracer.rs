//! DDA grid traversal.
//!
//! A ray is stepped from grid line to grid line, always advancing along the
//! axis whose next crossing is nearer, until it enters an occupied cell or
//! leaves the map. Zero direction components are encoded as an infinite
//! per-cell distance so that axis is never the nearer one.

use crate::camera::{Pose, Ray};
use crate::world::{EMPTY, GridMap, WallKind};

/// Extra steps allowed beyond `width + height` before giving up.
const STEP_MARGIN: usize = 5;

/// Which grid-line family the ray crossed to enter the hit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// A vertical grid line (constant x) was crossed.
    X,
    /// A horizontal grid line (constant y) was crossed.
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallHit {
    pub cell_x: i32,
    pub cell_y: i32,
    pub side: Side,
    /// Ray length from the pose to the crossed wall face (not fisheye
    /// corrected).
    pub distance: f32,
    pub wall_kind: WallKind,
}

/// Outcome of tracing one ray. Leaving the map, exhausting the step cap, a
/// non-finite distance and an unusable start pose are all the same miss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trace {
    Hit { hit: WallHit, steps: usize },
    Miss { steps: usize },
}

impl Trace {
    #[inline]
    pub fn hit(&self) -> Option<&WallHit> {
        match self {
            Trace::Hit { hit, .. } => Some(hit),
            Trace::Miss { .. } => None,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, Trace::Hit { .. })
    }

    /// Cells stepped through.
    #[inline]
    pub fn steps(&self) -> usize {
        match *self {
            Trace::Hit { steps, .. } | Trace::Miss { steps } => steps,
        }
    }
}

/// Hard bound on DDA iterations for `map`.
#[inline]
pub fn max_steps(map: &GridMap) -> usize {
    map.width() + map.height() + STEP_MARGIN
}

#[inline]
fn delta_dist(direction: f32) -> f32 {
    if direction == 0.0 {
        f32::INFINITY
    } else {
        (1.0 / direction).abs()
    }
}

/// Step sign and distance along the ray to the first grid line on one axis.
#[inline]
fn initial_side_dist(position: f32, cell: i32, direction: f32, delta: f32) -> (i32, f32) {
    if direction < 0.0 {
        (-1, (position - cell as f32) * delta)
    } else if direction > 0.0 {
        (1, (cell as f32 + 1.0 - position) * delta)
    } else {
        // Never reached on this axis; avoids 0 * inf when sitting on a line.
        (1, f32::INFINITY)
    }
}

/// Cell containing the pose, or `None` when the pose is not finite or lies
/// beyond the one-cell ring around the map. Rays from there cannot enter the
/// map within the step cap, and their cell index would not fit the walk.
fn start_cell(map: &GridMap, pose: &Pose) -> Option<(i32, i32)> {
    let (x, y) = (pose.x().floor(), pose.y().floor());
    let within = |v: f32, extent: usize| (-1.0..=extent as f32).contains(&v);
    (within(x, map.width()) && within(y, map.height())).then_some((x as i32, y as i32))
}

pub fn trace(map: &GridMap, pose: &Pose, ray: &Ray) -> Trace {
    let Some((mut map_x, mut map_y)) = start_cell(map, pose) else {
        return Trace::Miss { steps: 0 };
    };

    let delta_x = delta_dist(ray.direction_x);
    let delta_y = delta_dist(ray.direction_y);
    let (step_x, mut side_dist_x) = initial_side_dist(pose.x(), map_x, ray.direction_x, delta_x);
    let (step_y, mut side_dist_y) = initial_side_dist(pose.y(), map_y, ray.direction_y, delta_y);

    let cap = max_steps(map);
    for step in 1..=cap {
        let side = if side_dist_x < side_dist_y {
            side_dist_x += delta_x;
            map_x += step_x;
            Side::X
        } else {
            side_dist_y += delta_y;
            map_y += step_y;
            Side::Y
        };

        let Some(kind) = map.get(map_x, map_y) else {
            return Trace::Miss { steps: step };
        };
        if kind == EMPTY {
            continue;
        }

        // Exact distance to the crossed grid line, solved from the cell index
        // rather than taken from the accumulated side distances.
        let distance = match side {
            Side::X => {
                (map_x as f32 - pose.x() + (1 - step_x) as f32 / 2.0) / ray.direction_x
            }
            Side::Y => {
                (map_y as f32 - pose.y() + (1 - step_y) as f32 / 2.0) / ray.direction_y
            }
        };
        if !distance.is_finite() {
            return Trace::Miss { steps: step };
        }

        return Trace::Hit {
            hit: WallHit {
                cell_x: map_x,
                cell_y: map_y,
                side,
                distance: distance.max(0.0),
                wall_kind: kind,
            },
            steps: step,
        };
    }

    Trace::Miss { steps: cap }
}
