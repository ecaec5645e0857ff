use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};
use tracing::debug;

use crate::camera::Pose;
use crate::config::{RenderConfig, SHADE_FACTOR};
use crate::frame::{FrameStats, StripDescriptor, par_strips};
use crate::texture::{Texture, TextureSet, darken, pack_rgb};
use crate::world::GridMap;

/// Strip with its pixel span, texture and texel column resolved.
struct ResolvedStrip<'t> {
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
    /// Unclamped top of the wall, for vertical texture coordinates
    top: f32,
    inv_height: f32,
    texture: &'t Texture,
    tex_x: usize,
    shaded: bool,
}

/// Draws strips into a packed `u32` framebuffer of the configured size.
pub struct Renderer {
    config: RenderConfig,
    textures: TextureSet,
    ceiling: u32,
    floor: u32,
}

impl Renderer {
    pub fn new(config: RenderConfig, textures: TextureSet) -> Self {
        Self {
            config,
            textures,
            ceiling: pack_rgb(30, 30, 70),
            floor: pack_rgb(70, 70, 70),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Cast and draw a whole frame.
    pub fn render_frame(&self, buf: &mut [u32], map: &GridMap, pose: &Pose) -> FrameStats {
        let columns = par_strips(map, pose, &self.config);
        let stats = FrameStats::from_columns(&columns);
        self.rasterize(buf, columns.iter().flatten());
        debug!(drawn = stats.drawn, missed = stats.missed, "frame rendered");
        stats
    }

    /// Clear to ceiling/floor and draw `strips`. Columns without a strip keep
    /// the background.
    pub fn rasterize<'s>(&self, buf: &mut [u32], strips: impl IntoIterator<Item = &'s StripDescriptor>) {
        let width = self.config.screen_width();
        let height = self.config.screen_height();
        debug_assert_eq!(buf.len(), width * height);

        let resolved: Vec<ResolvedStrip<'_>> = strips
            .into_iter()
            .map(|s| {
                let span = self.config.strip_span(s.column_index);
                let texture = self.textures.get(s.wall_kind);
                ResolvedStrip {
                    x0: span.start,
                    x1: span.end,
                    y0: s.screen_y_start,
                    y1: s.screen_y_end,
                    top: 0.5 * (height as f32 - s.wall_height),
                    inv_height: 1.0 / s.wall_height,
                    tex_x: texture.column_index(s.texture_u),
                    texture,
                    shaded: s.shaded,
                }
            })
            .collect();

        let mid = height / 2;
        let (ceiling, floor) = (self.ceiling, self.floor);

        // Rows in parallel; each row walks every strip that covers it
        buf.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
            row.fill(if y < mid { ceiling } else { floor });

            let yf = y as f32 + 0.5;
            for strip in &resolved {
                if y < strip.y0 || y >= strip.y1 {
                    continue;
                }
                let v = (yf - strip.top) * strip.inv_height;
                let texel = strip.texture.sample(strip.tex_x, v);
                let color = if strip.shaded {
                    darken(texel, SHADE_FACTOR)
                } else {
                    texel
                };
                row[strip.x0..strip.x1].fill(color);
            }
        });
    }
}
