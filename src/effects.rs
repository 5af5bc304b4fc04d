//! One-shot threshold effects and repeating scheduled jobs.
//!
//! The registry is static configuration: an ordered list of trigger
//! times with named actions, fired by the controller when a checked
//! interval contains them. The scheduler carries the repeating jobs
//! some effects spawn (fade ramps), each job reporting done instead of
//! cancelling itself.

use crate::sky::Sky;

/// Action run when an effect fires. Actions may mutate any controller
/// state and are free to apply cumulative deltas.
pub type EffectAction = Box<dyn FnMut(&mut Sky)>;

/// A one-shot action bound to a fixed point in the day.
pub struct TimeEffect {
    pub at: f32,
    pub name: &'static str,
    pub run: EffectAction,
}

impl TimeEffect {
    pub fn new(at: f32, name: &'static str, run: impl FnMut(&mut Sky) + 'static) -> Self {
        Self {
            at,
            name,
            run: Box::new(run),
        }
    }
}

/// Ordered effect list; order is authoring order, never trigger-time
/// order, so ties fire in the sequence they were declared.
#[derive(Default)]
pub struct EffectRegistry {
    effects: Vec<TimeEffect>,
}

impl EffectRegistry {
    pub fn new(effects: Vec<TimeEffect>) -> Self {
        Self { effects }
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TimeEffect> {
        self.effects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Trigger times inside `[start, end]`, in registry order.
    pub fn matching(&self, start: f32, end: f32) -> Vec<&'static str> {
        self.effects
            .iter()
            .filter(|e| e.at >= start && e.at <= end)
            .map(|e| e.name)
            .collect()
    }
}

/// Outcome of one scheduled job run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Continue,
    Done,
}

/// A repeating job driven by host frame time.
pub struct RepeatingJob {
    pub(crate) name: &'static str,
    pub(crate) every: f32,
    pub(crate) elapsed: f32,
    pub(crate) done: bool,
    pub(crate) run: Box<dyn FnMut(&mut Sky) -> JobStatus>,
}

impl RepeatingJob {
    pub fn new(
        name: &'static str,
        every: f32,
        run: impl FnMut(&mut Sky) -> JobStatus + 'static,
    ) -> Self {
        Self {
            name,
            every,
            elapsed: 0.0,
            done: false,
            run: Box::new(run),
        }
    }
}

/// Active repeating jobs, advanced once per controller tick with the
/// host's elapsed wall time. Finished jobs are removed by the
/// scheduler rather than unregistering themselves.
#[derive(Default)]
pub struct Scheduler {
    pub(crate) jobs: Vec<RepeatingJob>,
}

impl Scheduler {
    pub fn push(&mut self, job: RepeatingJob) {
        self.jobs.push(job);
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
