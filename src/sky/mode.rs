//! Per-tick strategies driving color, spin, and effects.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use rand::Rng;

use crate::canvas::Face;
use crate::color::Hsl;
use crate::effects::{EffectRegistry, JobStatus, TimeEffect};
use crate::painters;
use crate::sky::Sky;

/// Faces that carry the star field: everything but the bottom cap.
pub const STAR_FACES: [Face; 5] = [Face::Top, Face::Left, Face::Right, Face::Front, Face::Back];

/// The active per-tick strategy. Exactly one runs per tick; switching
/// strategies never resets clock or color state.
pub enum SkyMode {
    /// The standard day/night schedule.
    DayNight(DayNightState),
    /// Random hue every tick, ignoring the schedule entirely.
    Disco(DiscoState),
    /// Host-supplied strategy, called with the controller and the
    /// current clock time.
    Custom(Box<dyn FnMut(&mut Sky, f32)>),
}

impl SkyMode {
    pub fn day_night() -> Self {
        SkyMode::DayNight(DayNightState::new())
    }

    pub fn disco() -> Self {
        SkyMode::Disco(DiscoState)
    }

    pub fn custom(f: impl FnMut(&mut Sky, f32) + 'static) -> Self {
        SkyMode::Custom(Box::new(f))
    }

    pub(crate) fn run(&mut self, sky: &mut Sky, time: f32) {
        match self {
            SkyMode::DayNight(state) => run_day_night(sky, state, time),
            SkyMode::Disco(state) => run_disco(sky, state, time),
            SkyMode::Custom(f) => f(sky, time),
        }
    }
}

/// One-time setup tracking for the day/night mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    NotInitialized,
    Initialized,
}

/// Persistent state of the day/night strategy.
///
/// `until` is the suppression window: once an hour's transition has
/// started, no new transition begins until the clock passes that hour.
pub struct DayNightState {
    hours: BTreeMap<u32, Hsl>,
    until: Option<f32>,
    last: f32,
    init: InitState,
}

impl DayNightState {
    pub fn new() -> Self {
        Self::with_palette(default_palette())
    }

    /// A day/night schedule over a custom hour palette. Keys are clock
    /// times rounded to hundreds.
    pub fn with_palette(hours: BTreeMap<u32, Hsl>) -> Self {
        Self {
            hours,
            until: None,
            last: 0.0,
            init: InitState::NotInitialized,
        }
    }
}

impl Default for DayNightState {
    fn default() -> Self {
        Self::new()
    }
}

/// Designer palette for the default day: deep blue night, warm dawn
/// and dusk, washed-out midday.
fn default_palette() -> BTreeMap<u32, Hsl> {
    BTreeMap::from([
        (0, Hsl::new(230.0 / 360.0, 0.3, 0.0)),
        (200, Hsl::new(26.0 / 360.0, 0.3, 0.5)),
        (1100, Hsl::new(230.0 / 360.0, 0.3, 0.7)),
        (1300, Hsl::new(26.0 / 360.0, 0.3, 0.5)),
        (1600, Hsl::new(230.0 / 360.0, 0.3, 0.0)),
    ])
}

fn run_day_night(sky: &mut Sky, state: &mut DayNightState, time: f32) {
    let hour = (time / 100.0).round() * 100.0;
    let step_seen = (state.last - time).abs();
    state.last = time;

    if state.init == InitState::NotInitialized {
        init_default_sky(sky);
        state.init = InitState::Initialized;
    }

    // Switch color on the hour, then hold off until the next one so a
    // slow transition is not restarted every tick.
    if let Some(&target) = state.hours.get(&(hour as u32)) {
        if state.until.is_none() {
            // fast playback gets the snappier transition
            let duration = if step_seen > 9.0 { 100.0 } else { 1000.0 };
            sky.transition_to(target, duration);
            state.until = Some(hour + 100.0);
        }
    }
    if state.until == Some(hour) {
        state.until = None;
    }

    sky.apply_effects_within(time, time);

    // one sky revolution per day
    sky.spin(TAU * (time / sky.day_length()));
}

/// First-tick setup: sun up top, stars everywhere but below, a full
/// moon underneath, full sunlight.
fn init_default_sky(sky: &mut Sky) {
    sky.paint(Face::Top, painters::sun);
    sky.paint(&STAR_FACES[..], |canvas| {
        painters::stars(canvas, 500);
        canvas.transparent = true;
        canvas.opacity = 1.0;
    });
    sky.paint(Face::Bottom, |canvas| painters::moon(canvas, 0.0));
    sky.set_sunlight_intensity(1.0);
}

/// Disco carries no state between ticks; every tick rolls fresh.
pub struct DiscoState;

fn run_disco(sky: &mut Sky, _state: &mut DiscoState, time: f32) {
    let mut rng = rand::thread_rng();
    let target = Hsl::new(rng.gen(), rng.gen(), rng.gen());
    sky.transition_to(target, 1.0);
    sky.spin(TAU * (time / sky.day_length()));
}

/// The stock effect registry: sunlight ramps at dawn and dusk, stars
/// fading against them, and the daily moon repaint.
pub(crate) fn default_effects() -> EffectRegistry {
    EffectRegistry::new(vec![
        TimeEffect::new(400.0, "sunlight-on", |sky| {
            let v = (sky.sunlight_intensity() + 0.1).min(1.0);
            sky.set_sunlight_intensity(v);
        }),
        TimeEffect::new(500.0, "stars-fade", |sky| {
            sky.paint(&STAR_FACES[..], |canvas| {
                canvas.transparent = true;
                canvas.opacity = (canvas.opacity - 0.1).max(0.0);
            });
        }),
        TimeEffect::new(1200.0, "moon-phase", |sky| {
            let phase = sky.moon_phase_fraction();
            sky.paint(Face::Top, |canvas| {
                canvas.clear();
            });
            sky.paint(Face::Top, move |canvas| painters::moon(canvas, phase));
            sky.paint(Face::Top, |canvas| painters::stars(canvas, 500));
        }),
        TimeEffect::new(1800.0, "stars-reveal", |sky| {
            sky.schedule("stars-reveal", 100.0, |sky| {
                let mut finished = true;
                sky.paint(&STAR_FACES[..], |canvas| {
                    canvas.transparent = true;
                    canvas.opacity = (canvas.opacity + 0.1).min(1.0);
                    if canvas.opacity < 1.0 {
                        finished = false;
                    }
                });
                if finished {
                    JobStatus::Done
                } else {
                    JobStatus::Continue
                }
            });
        }),
        TimeEffect::new(1800.0, "sunlight-off", |sky| {
            let v = (sky.sunlight_intensity() - 0.1).max(0.0);
            sky.set_sunlight_intensity(v);
        }),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_hours() {
        let palette = default_palette();
        assert_eq!(palette.len(), 5);
        assert!(palette.contains_key(&0));
        assert!(palette.contains_key(&1600));
        // midnight and late evening share the dark blue
        assert_eq!(palette[&0], palette[&1600]);
    }

    #[test]
    fn test_default_effects_order() {
        let mut reg = default_effects();
        let names: Vec<_> = reg.iter_mut().map(|e| e.name).collect();
        assert_eq!(
            names,
            vec![
                "sunlight-on",
                "stars-fade",
                "moon-phase",
                "stars-reveal",
                "sunlight-off"
            ]
        );
        // both dusk effects share a trigger; declaration order decides
        assert_eq!(reg.matching(1800.0, 1800.0), vec!["stars-reveal", "sunlight-off"]);
    }
}
