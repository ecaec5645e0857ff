//! Column raycaster for grid maps.
//!
//! Each frame casts one ray per screen column through a [`GridMap`] with a
//! DDA walk, corrects the hit distance for fisheye, projects it to a vertical
//! extent and derives the texture column. The result is a sequence of
//! [`StripDescriptor`]s that a rasterizer turns into pixels.

pub mod camera;
pub mod config;
pub mod error;
pub mod frame;
pub mod movement;
pub mod projector;
pub mod renderer;
pub mod scaler;
pub mod texture;
pub mod tracer;
pub mod world;

pub use camera::{Pose, Ray};
pub use config::{MovementConfig, RenderConfig};
pub use error::ConfigError;
pub use frame::{Frame, FrameStats, StripDescriptor, cast_column, par_strips};
pub use renderer::Renderer;
pub use tracer::{Side, Trace, WallHit, trace};
pub use world::GridMap;

/// Map used when none is given on the command line.
pub const DEFAULT_MAP: &str = include_str!("../maps/default.map");
