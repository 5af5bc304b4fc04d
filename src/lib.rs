//! Day/night sky simulation for voxel worlds.
//!
//! The crate animates a skybox, ambient and sun lighting, and
//! procedural face textures (sun, moon, stars) from an advancing
//! in-game clock. The host engine stays on the other side of two
//! narrow traits ([`SceneGraph`] and [`TickSource`]); everything else
//! — the cyclic clock, color transitions, threshold effects, and the
//! painting surfaces — lives here and runs synchronously inside the
//! host's per-frame tick.

pub mod canvas;
pub mod color;
pub mod config;
pub mod effects;
pub mod orbit;
pub mod painters;
pub mod scene;
pub mod sky;
pub mod time;

pub use canvas::{Face, FaceCanvas, FaceSelector, CANVAS_SIZE, FACE_COUNT};
pub use color::{ColorFade, Hsl};
pub use config::{ConfigError, SkyConfig};
pub use effects::{EffectRegistry, JobStatus, RepeatingJob, Scheduler, TimeEffect};
pub use scene::{
    LightDesc, LightHandle, MeshDesc, MeshHandle, SceneGraph, TickHandle, TickSource,
};
pub use sky::{DayNightState, DiscoState, InitState, Sky, SkyMode, STAR_FACES};
pub use time::{phase_fraction, Clock, MoonPhase};
