use std::f32::consts::PI;
use std::ops::Range;

use crate::error::ConfigError;

/// Darkening applied to shaded (Y side) strips.
pub const SHADE_FACTOR: f32 = 0.7;

/// Screen and projection settings, fixed for the life of a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    screen_width: usize,
    screen_height: usize,
    columns: usize,
    fov: f32,
}

impl RenderConfig {
    pub fn new(
        screen_width: usize,
        screen_height: usize,
        columns: usize,
        fov: f32,
    ) -> Result<Self, ConfigError> {
        if screen_width == 0 || screen_height == 0 {
            return Err(ConfigError::ZeroScreen {
                width: screen_width,
                height: screen_height,
            });
        }
        if columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if columns > screen_width {
            return Err(ConfigError::TooManyColumns {
                columns,
                width: screen_width,
            });
        }
        if !fov.is_finite() || fov <= 0.0 || fov >= PI {
            return Err(ConfigError::InvalidFov(fov));
        }

        Ok(Self {
            screen_width,
            screen_height,
            columns,
            fov,
        })
    }

    #[inline]
    pub fn screen_width(&self) -> usize {
        self.screen_width
    }

    #[inline]
    pub fn screen_height(&self) -> usize {
        self.screen_height
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Pixel columns covered by strip `column`.
    ///
    /// Strip boundaries sit at `i * W / N`, so when `N` does not divide `W`
    /// the remainder is spread over the strips: widths differ by at most one
    /// pixel and the spans tile `[0, W)` exactly.
    pub fn strip_span(&self, column: usize) -> Range<usize> {
        let start = column * self.screen_width / self.columns;
        let end = (column + 1) * self.screen_width / self.columns;
        start..end.min(self.screen_width)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            columns: 800,
            fov: PI / 3.0,
        }
    }
}

/// Player speeds, per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    /// Grid units per second
    pub move_speed: f32,
    /// Radians per second
    pub turn_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            turn_speed: 1.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let d = RenderConfig::default();
        assert_eq!(
            RenderConfig::new(d.screen_width(), d.screen_height(), d.columns(), d.fov()).unwrap(),
            d
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            RenderConfig::new(0, 600, 10, 1.0),
            Err(ConfigError::ZeroScreen { .. })
        ));
        assert!(matches!(
            RenderConfig::new(800, 600, 0, 1.0),
            Err(ConfigError::ZeroColumns)
        ));
        assert!(matches!(
            RenderConfig::new(10, 600, 11, 1.0),
            Err(ConfigError::TooManyColumns { .. })
        ));
        for fov in [0.0, -1.0, PI, 4.0, f32::NAN] {
            assert!(matches!(
                RenderConfig::new(800, 600, 400, fov),
                Err(ConfigError::InvalidFov(_))
            ));
        }
    }

    #[test]
    fn even_division_gives_equal_strips() {
        let cfg = RenderConfig::new(800, 600, 400, 1.0).unwrap();
        for i in 0..400 {
            assert_eq!(cfg.strip_span(i), 2 * i..2 * i + 2);
        }
    }

    #[test]
    fn remainder_is_spread_without_gaps() {
        let cfg = RenderConfig::new(10, 4, 3, 1.0).unwrap();
        let spans: Vec<_> = (0..3).map(|i| cfg.strip_span(i)).collect();
        assert_eq!(spans, vec![0..3, 3..6, 6..10]);

        let cfg = RenderConfig::new(803, 600, 400, 1.0).unwrap();
        let mut next = 0;
        for i in 0..400 {
            let span = cfg.strip_span(i);
            assert_eq!(span.start, next, "gap before strip {i}");
            assert!(span.len() == 2 || span.len() == 3);
            next = span.end;
        }
        assert_eq!(next, 803);
    }
}
