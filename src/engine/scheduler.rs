use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::canvas::{Canvas, PrintStats};
use crate::engine::effect::{Effect, GroupOrder};
use crate::foundation::error::{TermfxError, TermfxResult};
use crate::foundation::ids::CharId;
use crate::render::backend::RenderBackend;

/// Options for [`Scheduler::run`].
#[derive(Clone, Copy, Debug)]
pub struct RunOpts {
    /// Target frames per second. `0` runs unthrottled.
    pub frame_rate: u32,
}

impl Default for RunOpts {
    fn default() -> Self {
        Self { frame_rate: 100 }
    }
}

impl RunOpts {
    fn frame_budget(self) -> Option<Duration> {
        (self.frame_rate > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(self.frame_rate)))
    }
}

/// Totals for one completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Frames stepped, excluding the initial print.
    pub frames: u64,
    /// Cells written, initial print included.
    pub writes: u64,
    /// Cells cleared.
    pub clears: u64,
}

/// Frame-stepped reveal/tick/render loop shared by every effect.
///
/// Characters flow `staged -> pending -> active`. Staged groups are keyed by
/// [`Effect::group_key`]; a new group is pulled only once pending is empty. Active characters are
/// ticked in reveal order, and dropped once they report inactive (they stay visible).
///
/// Determinism rule: for a fixed input, effect configuration and seed, every run issues the same
/// backend calls in the same order.
pub struct Scheduler {
    effect: Box<dyn Effect>,
    rng: StdRng,
    seed: u64,

    staged: BTreeMap<i64, Vec<CharId>>,
    pending: Vec<CharId>,
    active: Vec<CharId>,
    frame: u64,
}

impl Scheduler {
    /// Prepare `canvas` with `effect` and stage every character.
    ///
    /// `seed = None` draws a fresh seed; it is logged and available from [`Scheduler::seed`].
    pub fn new(
        mut effect: Box<dyn Effect>,
        canvas: &mut Canvas,
        seed: Option<u64>,
    ) -> TermfxResult<Self> {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        effect.prepare(canvas, &mut rng)?;

        let mut staged: BTreeMap<i64, Vec<CharId>> = BTreeMap::new();
        for c in canvas.characters() {
            staged.entry(effect.group_key(c)).or_default().push(c.id());
        }
        tracing::debug!(
            effect = effect.name(),
            seed,
            groups = staged.len(),
            characters = canvas.len(),
            "scheduler prepared"
        );

        Ok(Self {
            effect,
            rng,
            seed,
            staged,
            pending: Vec::new(),
            active: Vec::new(),
            frame: 0,
        })
    }

    /// Seed the run's generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Groups not yet pulled into pending.
    pub fn staged_groups(&self) -> usize {
        self.staged.len()
    }

    /// Characters of the current group awaiting reveal.
    pub fn pending(&self) -> &[CharId] {
        &self.pending
    }

    /// Revealed characters still ticking, in reveal order.
    pub fn active(&self) -> &[CharId] {
        &self.active
    }

    /// `true` once staged, pending and active are all empty.
    pub fn is_done(&self) -> bool {
        self.staged.is_empty() && self.pending.is_empty() && self.active.is_empty()
    }

    /// Run one frame: stage, reveal, tick, prune, render.
    ///
    /// Returns whether more frames are needed, plus this frame's render counts.
    pub fn step(
        &mut self,
        canvas: &mut Canvas,
        backend: &mut dyn RenderBackend,
    ) -> TermfxResult<(bool, PrintStats)> {
        if self.pending.is_empty() {
            let next = match self.effect.group_order() {
                GroupOrder::Ascending => self.staged.pop_first(),
                GroupOrder::Descending => self.staged.pop_last(),
            };
            if let Some((key, group)) = next {
                tracing::debug!(key, size = group.len(), frame = self.frame, "group staged");
                self.pending = group;
            }
        }

        if !self.pending.is_empty() {
            let batch = self.effect.batch_size(self.pending.len(), &mut self.rng);
            for _ in 0..batch {
                if self.pending.is_empty() {
                    break;
                }
                let len = self.pending.len();
                let idx = self.effect.pick(len, &mut self.rng);
                if idx >= len {
                    return Err(TermfxError::invariant(format!(
                        "effect {} picked index {idx} from {len} pending characters",
                        self.effect.name()
                    )));
                }
                let id = self.pending.remove(idx);
                canvas.set_visibility(id, true)?;
                self.active.push(id);
            }
        }

        tracing::trace!(frame = self.frame, active = self.active.len(), "tick");
        for id in &self.active {
            canvas.character_mut(*id)?.tick()?;
        }
        self.active
            .retain(|id| canvas.get(*id).is_some_and(|c| c.is_active()));

        let stats = canvas.print(backend)?;
        self.frame += 1;
        Ok((!self.is_done(), stats))
    }

    /// Drive the loop to completion, pacing frames to `opts.frame_rate`.
    ///
    /// `backend.end` runs even when a frame fails, so the terminal is restored before the
    /// frame error is returned.
    #[tracing::instrument(skip_all, fields(effect = self.effect.name(), seed = self.seed))]
    pub fn run(
        &mut self,
        canvas: &mut Canvas,
        backend: &mut dyn RenderBackend,
        opts: RunOpts,
    ) -> TermfxResult<RunStats> {
        backend.begin(canvas.output_area())?;
        let frames = self.run_frames(canvas, backend, opts);
        let ended = backend.end(canvas.output_area());
        let totals = match frames {
            Ok(totals) => {
                ended?;
                totals
            }
            Err(err) => {
                if let Err(end_err) = ended {
                    tracing::warn!(error = %end_err, "backend end failed after frame error");
                }
                tracing::warn!(error = %err, frame = self.frame, "effect aborted");
                return Err(err);
            }
        };

        tracing::info!(
            frames = totals.frames,
            writes = totals.writes,
            clears = totals.clears,
            characters = canvas.len(),
            "effect finished"
        );
        Ok(totals)
    }

    fn run_frames(
        &mut self,
        canvas: &mut Canvas,
        backend: &mut dyn RenderBackend,
        opts: RunOpts,
    ) -> TermfxResult<RunStats> {
        let budget = opts.frame_budget();
        let mut totals = RunStats::default();

        canvas.print(backend)?;
        loop {
            let started = Instant::now();
            let (more, stats) = self.step(canvas, backend)?;
            totals.frames += 1;
            totals.writes += stats.writes as u64;
            totals.clears += stats.clears as u64;
            if !more {
                return Ok(totals);
            }
            if let Some(budget) = budget {
                std::thread::sleep(budget.saturating_sub(started.elapsed()));
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/scheduler.rs"]
mod tests;
