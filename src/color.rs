use serde::{Serialize, Deserialize};

/// Sky color in HSL space, all channels in [0, 1].
///
/// A single `Hsl` value is owned by the controller and propagated to
/// every consumer (outer skybox faces, ambient light, fog) once per
/// tick, so all surfaces stay in lockstep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const BLACK: Hsl = Hsl { h: 0.0, s: 0.0, l: 0.0 };

    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Componentwise interpolation toward `other`.
    pub fn lerp(self, other: Hsl, t: f32) -> Hsl {
        Hsl {
            h: self.h + (other.h - self.h) * t,
            s: self.s + (other.s - self.s) * t,
            l: self.l + (other.l - self.l) * t,
        }
    }

    /// Convert to linear RGB in [0, 1].
    pub fn to_rgb(self) -> [f32; 3] {
        let h = self.h.rem_euclid(1.0);
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        if s == 0.0 {
            return [l, l, l];
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        [
            hue_channel(p, q, h + 1.0 / 3.0),
            hue_channel(p, q, h),
            hue_channel(p, q, h - 1.0 / 3.0),
        ]
    }
}

impl Default for Hsl {
    fn default() -> Self {
        Hsl::BLACK
    }
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// An in-flight transition of the shared sky color.
///
/// At most one fade exists per controller; starting a new one discards
/// whatever was in flight. Once the ratio reaches 1 the fade is done
/// and every later `step` is a no-op until it is replaced.
#[derive(Debug, Clone)]
pub struct ColorFade {
    start: Hsl,
    end: Hsl,
    elapsed: f32,
    duration: f32,
    done: bool,
}

impl ColorFade {
    pub fn new(start: Hsl, end: Hsl, duration: f32) -> Self {
        Self {
            start,
            end,
            elapsed: 0.0,
            duration,
            done: false,
        }
    }

    /// Advance by `step` and return the color to apply, or `None` once
    /// the fade has completed. A non-positive duration jumps straight
    /// to the target.
    pub fn step(&mut self, step: f32) -> Option<Hsl> {
        if self.done {
            return None;
        }
        self.elapsed += step;
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };
        if t >= 1.0 {
            self.done = true;
        }
        Some(self.start.lerp(self.end, t))
    }

    pub fn target(&self) -> Hsl {
        self.end
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
