//! The sky controller: owns the clock, the shared color, the effect
//! registry and the face canvases, and drives them all from the host's
//! per-frame tick.

pub mod mode;

pub use mode::{DayNightState, DiscoState, InitState, SkyMode, STAR_FACES};

use std::f32::consts::PI;

use glam::Vec3;

use crate::canvas::{Face, FaceCanvas, FaceSelector, CANVAS_SIZE, FACE_COUNT};
use crate::color::{ColorFade, Hsl};
use crate::config::{ConfigError, SkyConfig};
use crate::effects::{EffectRegistry, JobStatus, RepeatingJob, Scheduler};
use crate::orbit;
use crate::scene::{LightDesc, LightHandle, MeshDesc, MeshHandle, SceneGraph, TickHandle, TickSource};
use crate::time::{phase_fraction, Clock};

// Hemisphere fill: pale blue from above, warm sand from below.
const AMBIENT_SKY: [f32; 3] = [0.25, 0.55, 1.0];
const AMBIENT_GROUND: [f32; 3] = [1.0, 0.78, 0.5];

/// Gap between the outer color box and the inner canvas box.
const INNER_INSET: f32 = 10.0;

/// Scene resources held while the sky is enabled.
#[derive(Debug, Clone, Copy)]
struct Rig {
    outer: MeshHandle,
    inner: MeshHandle,
    ambient: LightHandle,
    sunlight: LightHandle,
}

/// Day/night sky simulation for a voxel world.
///
/// Starts disabled; `enable` builds the skybox and lighting rig
/// through the host's [`SceneGraph`] and registers with its
/// [`TickSource`], after which the host drives everything by calling
/// [`Sky::tick`] once per frame.
pub struct Sky {
    clock: Clock,
    speed: f32,
    size: f32,
    moon_cycle: f32,

    color: Hsl,
    fade: Option<ColorFade>,

    effects: EffectRegistry,
    scheduler: Scheduler,
    modes: Vec<SkyMode>,

    canvases: [FaceCanvas; FACE_COUNT],
    current_face: Option<Face>,

    sunlight_intensity: f32,
    spin: f32,

    rig: Option<Rig>,
    tick_sub: Option<TickHandle>,
    tics: u64,
}

impl Sky {
    pub fn new(config: SkyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            clock: Clock::new(config.time, config.day_length, config.day),
            speed: config.speed,
            size: config.size,
            moon_cycle: config.moon_cycle,
            color: config.color,
            fade: None,
            effects: mode::default_effects(),
            scheduler: Scheduler::default(),
            modes: vec![SkyMode::day_night()],
            canvases: std::array::from_fn(|_| FaceCanvas::new(CANVAS_SIZE)),
            current_face: None,
            sunlight_intensity: 0.5,
            spin: 0.0,
            rig: None,
            tick_sub: None,
            tics: 0,
        })
    }

    /// Build the skybox and lighting rig and start receiving ticks.
    /// No-op while already enabled, so the rig is never built twice.
    pub fn enable(&mut self, scene: &mut dyn SceneGraph, ticks: &mut dyn TickSource) {
        if self.rig.is_some() {
            return;
        }
        let outer = scene.add_mesh(MeshDesc::SkyboxOuter { size: self.size });
        let inner = scene.add_mesh(MeshDesc::SkyboxInner {
            size: self.size - INNER_INSET,
        });
        let ambient = scene.add_light(LightDesc::Hemisphere {
            sky_color: AMBIENT_SKY,
            ground_color: AMBIENT_GROUND,
            intensity: 0.6,
        });
        let sunlight = scene.add_light(LightDesc::Directional {
            color: [1.0, 1.0, 1.0],
            intensity: self.sunlight_intensity,
        });
        self.rig = Some(Rig {
            outer,
            inner,
            ambient,
            sunlight,
        });
        self.tick_sub = Some(ticks.subscribe("sky"));
        log::info!(
            "sky enabled at time {:.0}, day {}",
            self.clock.time(),
            self.clock.day()
        );
    }

    /// Tear the rig down and stop receiving ticks. No-op while already
    /// disabled, so nothing is released twice.
    pub fn disable(&mut self, scene: &mut dyn SceneGraph, ticks: &mut dyn TickSource) {
        let Some(rig) = self.rig.take() else {
            return;
        };
        if let Some(sub) = self.tick_sub.take() {
            ticks.unsubscribe(sub);
        }
        scene.remove_mesh(rig.outer);
        scene.remove_mesh(rig.inner);
        scene.remove_light(rig.ambient);
        scene.remove_light(rig.sunlight);
        log::info!("sky disabled");
    }

    pub fn enabled(&self) -> bool {
        self.rig.is_some()
    }

    /// Per-frame update. `dt` is the host's elapsed wall time and only
    /// feeds the repeating-job scheduler; model time advances by the
    /// current speed. Does nothing while disabled.
    pub fn tick(&mut self, scene: &mut dyn SceneGraph, dt: f32) {
        if self.rig.is_none() {
            return;
        }
        self.tics += 1;
        self.run_scheduled(dt);

        let time = self.clock.time();
        self.run_mode(time);

        if let Some(fade) = self.fade.as_mut() {
            if let Some(color) = fade.step(self.speed) {
                self.color = color;
            }
        }

        let day_before = self.clock.day();
        self.clock.advance(self.speed);
        if self.clock.day() != day_before {
            log::debug!("day {} begins", self.clock.day());
        }

        self.flush(scene);
    }

    /// Tick through one full day synchronously. Useful for warming the
    /// sky up to a given state without waiting on the host loop.
    pub fn fast_forward(&mut self, scene: &mut dyn SceneGraph) {
        if self.rig.is_none() || self.speed == 0.0 {
            return;
        }
        let steps = (self.clock.day_length() / self.speed.abs()).floor() as u64 + 1;
        for _ in 0..steps {
            self.tick(scene, 0.0);
        }
    }

    /// Start a transition of the shared color toward `target` over the
    /// given number of steps, cancelling any transition in flight. A
    /// zero duration jumps immediately on the next tick.
    pub fn transition_to(&mut self, target: Hsl, duration_steps: f32) {
        if self.fade.as_ref().map_or(false, |f| !f.is_done()) {
            log::debug!("replacing in-flight color fade");
        }
        self.fade = Some(ColorFade::new(self.color, target, duration_steps));
    }

    /// Fire every registered effect whose trigger time lies within
    /// `[start, end]`, in registry order.
    pub fn apply_effects_within(&mut self, start: f32, end: f32) {
        let mut effects = std::mem::take(&mut self.effects);
        for effect in effects.iter_mut() {
            if effect.at >= start && effect.at <= end {
                log::debug!("effect {} firing at {}", effect.name, effect.at);
                (effect.run)(self);
            }
        }
        // The registry is static configuration; nothing mutates it
        // while its own effects run.
        self.effects = effects;
    }

    /// Replace the effect registry wholesale.
    pub fn set_effects(&mut self, effects: EffectRegistry) {
        self.effects = effects;
    }

    /// Register a repeating job on the wall-time scheduler.
    pub fn schedule(
        &mut self,
        name: &'static str,
        every: f32,
        run: impl FnMut(&mut Sky) -> JobStatus + 'static,
    ) {
        self.scheduler.push(RepeatingJob::new(name, every, run));
    }

    /// Paint the selected faces with the supplied painter and mark
    /// them for re-upload. Unknown face names resolve to nothing and
    /// are skipped without error.
    pub fn paint<S, F>(&mut self, selector: S, mut painter: F)
    where
        S: Into<FaceSelector>,
        F: FnMut(&mut FaceCanvas),
    {
        for face in selector.into().resolve() {
            self.current_face = Some(face);
            let canvas = &mut self.canvases[face.index()];
            painter(canvas);
            canvas.mark_dirty();
        }
        self.current_face = None;
    }

    /// Erase the surface a paint pass is currently exposing. Painting
    /// surfaces only exist inside `paint` (whose closures can also use
    /// [`FaceCanvas::clear`] directly); with no active surface this is
    /// a no-op reporting false.
    pub fn clear(&mut self) -> bool {
        match self.current_face {
            Some(face) => {
                self.canvases[face.index()].clear();
                true
            }
            None => false,
        }
    }

    /// Set the sky rig rotation; applied to the scene on the next
    /// flush.
    pub fn spin(&mut self, angle: f32) {
        self.spin = angle;
    }

    pub fn spin_angle(&self) -> f32 {
        self.spin
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    /// Replace the active mode. The previous active mode is dropped.
    pub fn set_mode(&mut self, mode: SkyMode) {
        self.modes.pop();
        self.modes.push(mode);
    }

    /// Push a temporary mode override; the previous mode resumes when
    /// it is popped.
    pub fn push_mode(&mut self, mode: SkyMode) {
        self.modes.push(mode);
    }

    /// Remove the topmost mode override. The base mode is never
    /// popped. Intended for the host between ticks; a mode cannot pop
    /// itself while running.
    pub fn pop_mode(&mut self) -> Option<SkyMode> {
        if self.modes.len() > 1 {
            self.modes.pop()
        } else {
            None
        }
    }

    pub fn color(&self) -> Hsl {
        self.color
    }

    pub fn time(&self) -> f32 {
        self.clock.time()
    }

    pub fn day(&self) -> u32 {
        self.clock.day()
    }

    pub fn day_length(&self) -> f32 {
        self.clock.day_length()
    }

    /// Diagnostic tick counter.
    pub fn tics(&self) -> u64 {
        self.tics
    }

    pub fn sunlight_intensity(&self) -> f32 {
        self.sunlight_intensity
    }

    pub fn set_sunlight_intensity(&mut self, intensity: f32) {
        self.sunlight_intensity = intensity;
    }

    /// Number of repeating jobs currently scheduled.
    pub fn scheduled_jobs(&self) -> usize {
        self.scheduler.len()
    }

    /// Fraction through the lunar cycle for the current day.
    pub fn moon_phase_fraction(&self) -> f32 {
        phase_fraction(self.clock.day(), self.moon_cycle)
    }

    /// Read-only view of a face canvas, mainly for hosts and tests.
    pub fn face_canvas(&self, face: Face) -> &FaceCanvas {
        &self.canvases[face.index()]
    }

    fn run_mode(&mut self, time: f32) {
        let Some(mut mode) = self.modes.pop() else {
            return;
        };
        let depth = self.modes.len();
        mode.run(self, time);
        // anything pushed while running stays stacked above
        self.modes.insert(depth, mode);
    }

    fn run_scheduled(&mut self, dt: f32) {
        if self.scheduler.is_empty() {
            return;
        }
        let mut jobs = std::mem::take(&mut self.scheduler.jobs);
        for job in &mut jobs {
            if job.every <= 0.0 {
                // degenerate period: once per tick
                if (job.run)(self) == JobStatus::Done {
                    job.done = true;
                }
                continue;
            }
            job.elapsed += dt;
            while job.elapsed >= job.every && !job.done {
                job.elapsed -= job.every;
                if (job.run)(self) == JobStatus::Done {
                    job.done = true;
                    log::debug!("scheduled job {} finished", job.name);
                }
            }
        }
        jobs.retain(|job| !job.done);
        // jobs scheduled from inside a job land behind the survivors
        jobs.append(&mut self.scheduler.jobs);
        self.scheduler.jobs = jobs;
    }

    /// Push the tick's results out to the scene: recenter on the
    /// camera, apply spin and colors, place the sun, upload repainted
    /// faces.
    fn flush(&mut self, scene: &mut dyn SceneGraph) {
        let Some(rig) = self.rig else {
            return;
        };
        let camera = scene.camera_position();
        scene.set_mesh_transform(rig.outer, camera, self.spin);
        scene.set_mesh_transform(rig.inner, camera, self.spin);

        let rgb = self.color.to_rgb();
        scene.set_mesh_color(rig.outer, rgb);
        scene.set_light_color(rig.ambient, rgb);
        let _ = scene.set_fog_color(rgb);

        scene.set_light_transform(rig.ambient, camera, Vec3::ZERO);
        scene.set_light_intensity(rig.sunlight, self.sunlight_intensity);
        let sun_pos = orbit::project(self.size / 2.0, self.spin + PI);
        scene.set_light_transform(rig.sunlight, sun_pos, Vec3::ZERO);

        for face in Face::ALL {
            let canvas = &mut self.canvases[face.index()];
            if canvas.take_dirty() {
                scene.upload_face(rig.inner, face, canvas);
            }
        }
    }
}
