use serde::{Serialize, Deserialize};

/// Named moon phases, one per eighth of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoonPhase {
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
}

impl MoonPhase {
    /// Phase for a cycle fraction, where 0 is full and 0.5 is new.
    ///
    /// The zero-is-full convention follows the painted moon: a fresh
    /// sky starts with a full moon at phase fraction 0.
    pub fn from_fraction(fraction: f32) -> Self {
        match (fraction.rem_euclid(1.0) * 8.0).round() as u32 % 8 {
            0 => MoonPhase::FullMoon,
            1 => MoonPhase::WaningGibbous,
            2 => MoonPhase::LastQuarter,
            3 => MoonPhase::WaningCrescent,
            4 => MoonPhase::NewMoon,
            5 => MoonPhase::WaxingCrescent,
            6 => MoonPhase::FirstQuarter,
            _ => MoonPhase::WaxingGibbous,
        }
    }

    /// Relative brightness of the lit disc, 1 at full, 0 at new.
    pub fn brightness(self) -> f32 {
        match self {
            MoonPhase::FullMoon => 1.0,
            MoonPhase::WaningGibbous | MoonPhase::WaxingGibbous => 0.75,
            MoonPhase::LastQuarter | MoonPhase::FirstQuarter => 0.5,
            MoonPhase::WaningCrescent | MoonPhase::WaxingCrescent => 0.25,
            MoonPhase::NewMoon => 0.0,
        }
    }
}

/// Fraction through the lunar cycle for a given day counter.
///
/// Whole days only: the fraction advances in steps of `1 / cycle`, so
/// the painted moon changes once per day, not continuously.
pub fn phase_fraction(day: u32, cycle: f32) -> f32 {
    if cycle <= 0.0 {
        return 0.0;
    }
    (day as f32 % cycle).floor() / cycle
}
