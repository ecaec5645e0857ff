//! Per-frame column sweep.
//!
//! A frame snapshots the pose and yields one result per screen column, in
//! column order. Columns are independent of each other, so the same work can
//! also be fanned out across threads with [`par_strips`].

use std::iter::FusedIterator;

use rayon::prelude::*;

use crate::camera::{Pose, Ray};
use crate::config::RenderConfig;
use crate::projector::project;
use crate::texture::map_texture;
use crate::tracer::trace;
use crate::world::{GridMap, WallKind};

/// Everything the rasterizer needs to draw one column's wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripDescriptor {
    pub column_index: usize,
    pub screen_y_start: usize,
    /// Exclusive
    pub screen_y_end: usize,
    pub texture_u: f32,
    pub shaded: bool,
    pub wall_kind: WallKind,
    /// Projected height before clamping to the screen
    pub wall_height: f32,
    /// Fisheye corrected distance
    pub depth: f32,
}

impl StripDescriptor {
    #[inline]
    pub fn height(&self) -> usize {
        self.screen_y_end - self.screen_y_start
    }
}

/// Compute column `column`. `None` means no wall: the ray left the map, ran
/// out of steps, or the wall projects to nothing.
pub fn cast_column(
    map: &GridMap,
    pose: &Pose,
    config: &RenderConfig,
    column: usize,
) -> Option<StripDescriptor> {
    let ray = Ray::for_column(pose, column, config);
    let traced = trace(map, pose, &ray);
    let hit = traced.hit()?;

    let projection = project(hit.distance, ray.relative_angle, config.screen_height())?;
    let tex = map_texture(pose, &ray, hit);

    Some(StripDescriptor {
        column_index: column,
        screen_y_start: projection.y_start,
        screen_y_end: projection.y_end,
        texture_u: tex.u,
        shaded: tex.shaded,
        wall_kind: hit.wall_kind,
        wall_height: projection.wall_height,
        depth: projection.depth,
    })
}

/// Single pass over one frame's columns.
pub struct Frame<'a> {
    map: &'a GridMap,
    pose: Pose,
    config: &'a RenderConfig,
    next: usize,
}

impl<'a> Frame<'a> {
    /// The pose is copied here and stays fixed for the whole frame.
    pub fn new(map: &'a GridMap, pose: &Pose, config: &'a RenderConfig) -> Self {
        Self {
            map,
            pose: *pose,
            config,
            next: 0,
        }
    }
}

impl Iterator for Frame<'_> {
    type Item = Option<StripDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.config.columns() {
            return None;
        }
        let column = self.next;
        self.next += 1;
        Some(cast_column(self.map, &self.pose, self.config, column))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.config.columns().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Frame<'_> {}

impl FusedIterator for Frame<'_> {}

/// All columns computed on the rayon pool, returned in column order.
pub fn par_strips(
    map: &GridMap,
    pose: &Pose,
    config: &RenderConfig,
) -> Vec<Option<StripDescriptor>> {
    let pose = *pose;
    (0..config.columns())
        .into_par_iter()
        .map(|column| cast_column(map, &pose, config, column))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub missed: usize,
}

impl FrameStats {
    pub fn from_columns<'s>(columns: impl IntoIterator<Item = &'s Option<StripDescriptor>>) -> Self {
        columns
            .into_iter()
            .fold(Self::default(), |mut stats, column| {
                match column {
                    Some(_) => stats.drawn += 1,
                    None => stats.missed += 1,
                }
                stats
            })
    }
}
