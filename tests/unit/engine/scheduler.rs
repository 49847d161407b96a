use super::*;
use crate::animation::ease::Ease;
use crate::animation::events::{Action, Event};
use crate::engine::character::EffectCharacter;
use crate::foundation::ids::SceneId;
use crate::render::backend::{RecordingBackend, RenderOp};
use rand::Rng;

/// Reveals `batch` characters per frame in pending order; each one flashes a single frame.
struct Flash {
    batch: usize,
    order: GroupOrder,
}

impl Effect for Flash {
    fn name(&self) -> &'static str {
        "flash"
    }

    fn prepare(&mut self, canvas: &mut Canvas, _rng: &mut StdRng) -> TermfxResult<()> {
        for c in canvas.characters_mut() {
            let symbol = c.input_symbol().to_owned();
            let scene = c.animation.new_scene(false);
            scene.add_frame(symbol, 1, None)?;
            let id = scene.id();
            c.activate_scene(id)?;
        }
        Ok(())
    }

    fn group_order(&self) -> GroupOrder {
        self.order
    }

    fn batch_size(&mut self, _pending: usize, _rng: &mut StdRng) -> usize {
        self.batch
    }
}

/// Random batch sizes and picks, to exercise seeding.
struct Scatter;

impl Effect for Scatter {
    fn name(&self) -> &'static str {
        "scatter"
    }

    fn prepare(&mut self, canvas: &mut Canvas, rng: &mut StdRng) -> TermfxResult<()> {
        for c in canvas.characters_mut() {
            let target = c.input_coord();
            let start = target.offset(rng.gen_range(1..=4), 0);
            c.motion.set_coordinate(start);
            let path = c.motion.new_path(rng.gen_range(0.3..=1.0), Ease::OutQuad)?;
            path.new_waypoint(target);
            let id = path.id();
            c.activate_path(id)?;
        }
        Ok(())
    }

    fn batch_size(&mut self, _pending: usize, rng: &mut StdRng) -> usize {
        rng.gen_range(1..=3)
    }

    fn pick(&mut self, pending: usize, rng: &mut StdRng) -> usize {
        rng.gen_range(0..pending)
    }
}

struct BadPick;

impl Effect for BadPick {
    fn name(&self) -> &'static str {
        "bad-pick"
    }

    fn prepare(&mut self, _canvas: &mut Canvas, _rng: &mut StdRng) -> TermfxResult<()> {
        Ok(())
    }

    fn batch_size(&mut self, _pending: usize, _rng: &mut StdRng) -> usize {
        1
    }

    fn pick(&mut self, pending: usize, _rng: &mut StdRng) -> usize {
        pending
    }
}

fn revealed_per_frame(backend: &RecordingBackend) -> Vec<Vec<String>> {
    backend
        .frames
        .iter()
        .map(|ops| {
            ops.iter()
                .filter_map(|op| match op {
                    RenderOp::Write { symbol, .. } => Some(symbol.clone()),
                    RenderOp::Clear { .. } => None,
                })
                .collect()
        })
        .collect()
}

#[test]
fn groups_are_consumed_lowest_key_first_one_group_at_a_time() {
    let mut canvas = Canvas::from_text("abc\nde");
    let effect = Flash {
        batch: 2,
        order: GroupOrder::Ascending,
    };
    let mut sched = Scheduler::new(Box::new(effect), &mut canvas, Some(1)).unwrap();
    assert_eq!(sched.staged_groups(), 2);

    let mut backend = RecordingBackend::new();
    let mut frames = 0;
    loop {
        let (more, _) = sched.step(&mut canvas, &mut backend).unwrap();
        frames += 1;
        if !more {
            break;
        }
    }

    assert_eq!(frames, 3);
    assert_eq!(
        revealed_per_frame(&backend),
        [vec!["d", "e"], vec!["a", "b"], vec!["c"]]
    );
    assert!(sched.is_done());
    assert!(canvas.characters().iter().all(EffectCharacter::is_visible));
}

#[test]
fn descending_order_starts_from_the_top_row() {
    let mut canvas = Canvas::from_text("ab\nc");
    let effect = Flash {
        batch: 10,
        order: GroupOrder::Descending,
    };
    let mut sched = Scheduler::new(Box::new(effect), &mut canvas, Some(1)).unwrap();
    let mut backend = RecordingBackend::new();
    sched.step(&mut canvas, &mut backend).unwrap();
    assert_eq!(revealed_per_frame(&backend), [vec!["a", "b"]]);
}

#[test]
fn inactive_characters_leave_the_active_set_but_stay_visible() {
    let mut canvas = Canvas::from_text("a");
    canvas.characters_mut()[0].register_event(Event::SceneComplete(SceneId(0)), Action::SetComplete);
    let effect = Flash {
        batch: 1,
        order: GroupOrder::Ascending,
    };
    let mut sched = Scheduler::new(Box::new(effect), &mut canvas, Some(1)).unwrap();
    let mut backend = RecordingBackend::new();
    let (more, stats) = sched.step(&mut canvas, &mut backend).unwrap();
    assert!(!more);
    assert_eq!(stats.writes, 1);
    assert!(sched.active().is_empty());
    assert!(canvas.get(CharId(0)).unwrap().is_visible());
}

#[test]
fn same_seed_reproduces_the_same_render_stream() {
    let text = "rain falls\nfrom the top\nof the sky";
    let record = |seed| {
        let mut canvas = Canvas::from_text(text);
        let mut sched = Scheduler::new(Box::new(Scatter), &mut canvas, Some(seed)).unwrap();
        let mut backend = RecordingBackend::new();
        let stats = sched
            .run(&mut canvas, &mut backend, RunOpts { frame_rate: 0 })
            .unwrap();
        (stats, backend.frames)
    };

    let (stats_a, frames_a) = record(7);
    let (stats_b, frames_b) = record(7);
    assert_eq!(stats_a, stats_b);
    assert_eq!(frames_a, frames_b);

    let (_, frames_c) = record(8);
    assert_ne!(frames_a, frames_c);
}

#[test]
fn run_brackets_frames_with_begin_and_end() {
    let mut canvas = Canvas::from_text("xy");
    let mut sched = Scheduler::new(Box::new(Scatter), &mut canvas, Some(3)).unwrap();
    let mut backend = RecordingBackend::new();
    let stats = sched
        .run(&mut canvas, &mut backend, RunOpts { frame_rate: 0 })
        .unwrap();

    assert_eq!(backend.area(), Some(canvas.output_area()));
    assert!(backend.ended);
    // The initial empty print is a frame in the backend but not a stepped frame.
    assert_eq!(backend.frames.len() as u64, stats.frames + 1);
    assert_eq!(stats.frames, sched.frame());
    for c in canvas.characters() {
        assert_eq!(c.current_coord(), c.input_coord());
        assert!(!c.is_active());
    }
}

#[test]
fn out_of_range_pick_is_an_invariant_error() {
    let mut canvas = Canvas::from_text("a");
    let mut sched = Scheduler::new(Box::new(BadPick), &mut canvas, Some(0)).unwrap();
    let mut backend = RecordingBackend::new();
    assert!(matches!(
        sched.step(&mut canvas, &mut backend),
        Err(TermfxError::Invariant(_))
    ));
}

#[test]
fn failed_run_still_ends_the_backend() {
    let mut canvas = Canvas::from_text("a");
    let mut sched = Scheduler::new(Box::new(BadPick), &mut canvas, Some(0)).unwrap();
    let mut backend = RecordingBackend::new();

    let res = sched.run(&mut canvas, &mut backend, RunOpts { frame_rate: 0 });

    assert!(matches!(res, Err(TermfxError::Invariant(_))));
    assert!(backend.ended);
}

#[test]
fn empty_canvas_finishes_immediately() {
    let mut canvas = Canvas::from_text("");
    let mut sched = Scheduler::new(Box::new(Scatter), &mut canvas, None).unwrap();
    assert!(sched.is_done());
    let mut backend = RecordingBackend::new();
    let stats = sched
        .run(&mut canvas, &mut backend, RunOpts::default())
        .unwrap();
    assert_eq!(stats.frames, 1);
    assert_eq!(stats.writes, 0);
}
