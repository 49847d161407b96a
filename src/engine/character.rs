use crate::animation::events::{Action, Event, EventHandler};
use crate::animation::motion::Motion;
use crate::animation::scene::{Animation, Frame};
use crate::color::color::Color;
use crate::foundation::core::Coord;
use crate::foundation::error::TermfxResult;
use crate::foundation::ids::{CharId, PathId, SceneId};

/// One input grapheme with its own motion, animation and event bindings.
#[derive(Clone, Debug)]
pub struct EffectCharacter {
    id: CharId,
    input_symbol: String,
    input_coord: Coord,

    symbol: String,
    color: Option<Color>,
    last_coord: Coord,

    /// Position state and owned paths.
    pub motion: Motion,
    /// Appearance state and owned scenes.
    pub animation: Animation,
    /// Event bindings consulted on completion.
    pub events: EventHandler,

    visible: bool,
    complete: bool,
    /// Color the character settles on, chosen by the effect during setup.
    pub final_color: Option<Color>,
}

impl EffectCharacter {
    /// Hidden, idle character showing `symbol` at `input_coord`.
    pub fn new(id: CharId, symbol: impl Into<String>, input_coord: Coord) -> Self {
        let symbol = symbol.into();
        Self {
            id,
            input_symbol: symbol.clone(),
            input_coord,
            symbol,
            color: None,
            last_coord: input_coord,
            motion: Motion::new(input_coord),
            animation: Animation::new(),
            events: EventHandler::new(),
            visible: false,
            complete: false,
            final_color: None,
        }
    }

    /// Arena index in the owning canvas.
    pub fn id(&self) -> CharId {
        self.id
    }

    /// Grapheme from the input text.
    pub fn input_symbol(&self) -> &str {
        &self.input_symbol
    }

    /// Position in the input text. Never changes.
    pub fn input_coord(&self) -> Coord {
        self.input_coord
    }

    /// Position this tick.
    pub fn current_coord(&self) -> Coord {
        self.motion.current_coord()
    }

    /// Position at the previous render pass.
    pub fn last_coord(&self) -> Coord {
        self.last_coord
    }

    pub(crate) fn mark_rendered(&mut self) {
        self.last_coord = self.motion.current_coord();
    }

    /// Symbol currently shown.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Color currently shown; `None` is the terminal default.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// `true` when the canvas should draw the character.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// `true` while motion or animation still has scheduled work.
    ///
    /// A parked character (finished path, finished non-looping scene) is inactive; a looping
    /// scene keeps the character active until a `SetComplete` action fires.
    pub fn is_active(&self) -> bool {
        !self.complete && (self.motion.is_moving() || self.animation.is_playing())
    }

    /// Bind `action` to `event`, returning the binding it replaced.
    pub fn register_event(&mut self, event: Event, action: Action) -> Option<Action> {
        self.events.register_event(event, action)
    }

    /// Activate a scene and show its first frame immediately.
    pub fn activate_scene(&mut self, id: SceneId) -> TermfxResult<()> {
        let frame = self.animation.activate_scene(id)?;
        let (symbol, color) = (frame.symbol.clone(), frame.color);
        self.symbol = symbol;
        self.color = color;
        Ok(())
    }

    /// Start following a path from the current position.
    pub fn activate_path(&mut self, id: PathId) -> TermfxResult<()> {
        self.motion.activate_path(id)
    }

    /// Advance one tick: motion first, then animation. Completion events dispatch their bound
    /// action before the next stage runs.
    pub fn tick(&mut self) -> TermfxResult<()> {
        if let Some(done) = self.motion.step() {
            self.dispatch(Event::PathComplete(done))?;
        }
        if let Some(step) = self.animation.step() {
            self.show(step.frame);
            if let Some(done) = step.completed {
                self.dispatch(Event::SceneComplete(done))?;
            }
        }
        Ok(())
    }

    fn show(&mut self, frame: Frame) {
        self.symbol = frame.symbol;
        self.color = frame.color;
    }

    fn dispatch(&mut self, event: Event) -> TermfxResult<()> {
        let Some(action) = self.events.action_for(event) else {
            return Ok(());
        };
        tracing::trace!(char = self.id.0, ?event, ?action, "dispatch");
        match action {
            Action::ActivatePath(id) => self.activate_path(id)?,
            Action::ActivateScene(id) => self.activate_scene(id)?,
            Action::DeactivatePath(id) => self.motion.deactivate_path(id),
            Action::DeactivateScene(id) => self.animation.deactivate_scene(id),
            Action::SetCoordinate(coord) => self.motion.set_coordinate(coord),
            Action::SetVisibility(visible) => self.visible = visible,
            Action::SetComplete => self.complete = true,
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/character.rs"]
mod tests;
