//! Wall texture coordinates and the procedural textures sampled with them.

use crate::camera::{Pose, Ray};
use crate::tracer::{Side, WallHit};
use crate::world::WallKind;

/// Where along the struck face the ray landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureCoord {
    /// Horizontal texture coordinate in `[0, 1)`
    pub u: f32,
    /// Y side faces are drawn darker
    pub shaded: bool,
}

/// Fractional part, forced into `[0, 1)`.
#[inline]
fn fract01(v: f32) -> f32 {
    let f = v - v.floor();
    // f32 rounding turns tiny negative inputs into exactly 1.0
    if f >= 1.0 || !f.is_finite() { 0.0 } else { f }
}

/// Texture coordinate for `hit`.
///
/// Faces seen while travelling +x (X side) or -y (Y side) are mirrored so a
/// texture reads the same way round from every direction.
pub fn map_texture(pose: &Pose, ray: &Ray, hit: &WallHit) -> TextureCoord {
    let wall_coord = match hit.side {
        Side::X => pose.y() + hit.distance * ray.direction_y,
        Side::Y => pose.x() + hit.distance * ray.direction_x,
    };

    let u = fract01(wall_coord);
    let mirrored = match hit.side {
        Side::X => ray.direction_x > 0.0,
        Side::Y => ray.direction_y < 0.0,
    };
    let u = if mirrored { fract01(1.0 - u) } else { u };

    TextureCoord {
        u,
        shaded: hit.side == Side::Y,
    }
}

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

/// Scale each channel of a packed colour by `factor` in `[0, 1]`.
#[inline]
pub fn darken(color: u32, factor: f32) -> u32 {
    let f = (factor.clamp(0.0, 1.0) * 256.0) as u32;
    let rb = (((color & 0x00FF00FF) * f) >> 8) & 0x00FF00FF;
    let g = (((color & 0x0000FF00) * f) >> 8) & 0x0000FF00;
    rb | g
}

/// Row-major packed texels.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: usize,
    height: usize,
    texels: Vec<u32>,
}

impl Texture {
    /// Build a texture by evaluating `f(x, y)` for every texel.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let mut texels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                texels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            texels,
        }
    }

    /// Texel column for `u`, clamped into the texture.
    #[inline]
    pub fn column_index(&self, u: f32) -> usize {
        let x = (u * self.width as f32).floor();
        // NaN and negatives land on column 0
        if x > 0.0 {
            (x as usize).min(self.width - 1)
        } else {
            0
        }
    }

    /// Texel at column `tex_x` and vertical coordinate `v` in `[0, 1)`.
    #[inline]
    pub fn sample(&self, tex_x: usize, v: f32) -> u32 {
        let y = (v * self.height as f32) as usize;
        let y = y.min(self.height - 1);
        self.texels[y * self.width + tex_x.min(self.width - 1)]
    }
}

fn brick(width: usize, height: usize) -> Texture {
    let brick_h = height / 4;
    let brick_w = width / 2;
    Texture::from_fn(width, height, |x, y| {
        let row = y / brick_h.max(1);
        let offset = if row % 2 == 0 { 0 } else { brick_w / 2 };
        let mortar = y % brick_h.max(1) == 0 || (x + offset) % brick_w.max(1) == 0;
        if mortar {
            pack_rgb(170, 170, 160)
        } else {
            let grain = ((x * 7 + y * 13) % 5) as u8 * 6;
            pack_rgb(139 + grain, 69, 19 + grain)
        }
    })
}

fn stone(width: usize, height: usize) -> Texture {
    Texture::from_fn(width, height, |x, y| {
        let n = (x * 31 + y * 17 + (x * y) % 7) % 23;
        let v = 100 + (n as u8) * 3;
        pack_rgb(v, v, v + 10)
    })
}

fn checker(width: usize, height: usize) -> Texture {
    let cell = (width / 8).max(1);
    Texture::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            pack_rgb(30, 90, 160)
        } else {
            pack_rgb(200, 200, 60)
        }
    })
}

/// Textures indexed by wall kind. Never empty: kind 1 always has a texture.
#[derive(Debug, Clone)]
pub struct TextureSet {
    first: Texture,
    rest: Vec<Texture>,
}

impl TextureSet {
    /// `first` is used for wall kind 1 and for any kind without a texture of
    /// its own; `rest` covers kinds 2, 3 and so on.
    pub fn new(first: Texture, rest: Vec<Texture>) -> Self {
        Self { first, rest }
    }

    /// Brick, stone and checker textures of `size × size` texels for wall
    /// kinds 1, 2 and 3.
    pub fn procedural(size: usize) -> Self {
        Self::new(brick(size, size), vec![stone(size, size), checker(size, size)])
    }

    /// Texture for `kind`; unknown kinds use the first texture.
    #[inline]
    pub fn get(&self, kind: WallKind) -> &Texture {
        match (kind as usize).checked_sub(2) {
            Some(index) => self.rest.get(index).unwrap_or(&self.first),
            None => &self.first,
        }
    }
}
