use rand::rngs::StdRng;

use crate::engine::canvas::Canvas;
use crate::engine::character::EffectCharacter;
use crate::foundation::error::TermfxResult;

/// Which staged group the scheduler pulls next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GroupOrder {
    /// Lowest key first.
    #[default]
    Ascending,
    /// Highest key first.
    Descending,
}

/// Effect-specific policy plugged into the [`crate::Scheduler`] loop.
///
/// An effect configures every character once in [`Effect::prepare`] and then only answers
/// reveal questions; it never ticks or renders characters itself. All randomness goes through
/// the scheduler's seeded generator.
pub trait Effect {
    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Give each character its paths, scenes and event bindings.
    fn prepare(&mut self, canvas: &mut Canvas, rng: &mut StdRng) -> TermfxResult<()>;

    /// Key used to stage characters into reveal groups. Defaults to the input row.
    fn group_key(&self, character: &EffectCharacter) -> i64 {
        i64::from(character.input_coord().row)
    }

    /// Order in which staged groups are consumed.
    fn group_order(&self) -> GroupOrder {
        GroupOrder::Ascending
    }

    /// Number of pending characters to reveal this frame. `pending` is never zero.
    fn batch_size(&mut self, pending: usize, rng: &mut StdRng) -> usize;

    /// Index into the pending list of the next character to reveal; must be `< pending`.
    fn pick(&mut self, pending: usize, rng: &mut StdRng) -> usize {
        let _ = (pending, rng);
        0
    }
}
