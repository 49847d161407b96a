use unicode_segmentation::UnicodeSegmentation;

use crate::color::color::Color;
use crate::color::gradient::Gradient;
use crate::foundation::error::{TermfxError, TermfxResult};
use crate::foundation::ids::SceneId;

/// One timed appearance.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Exactly one grapheme.
    pub symbol: String,
    /// `None` leaves the terminal's default foreground.
    pub color: Option<Color>,
    /// Ticks this frame is shown, at least 1.
    pub duration: u32,
}

/// Ordered frame sequence with playback state.
#[derive(Clone, Debug)]
pub struct Scene {
    id: SceneId,
    frames: Vec<Frame>,
    looping: bool,

    index: usize,
    played: u32, // ticks shown of frames[index]
    complete: bool,
}

impl Scene {
    fn new(id: SceneId, looping: bool) -> Self {
        Self {
            id,
            frames: Vec::new(),
            looping,
            index: 0,
            played: 0,
            complete: false,
        }
    }

    /// Handle issued by the owning [`Animation`].
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// `true` when playback wraps to the first frame.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Frames in playback order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// `true` once a non-looping scene has shown its last frame.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Append a frame. `symbol` must be one grapheme and `duration` at least one tick.
    pub fn add_frame(
        &mut self,
        symbol: impl Into<String>,
        duration: u32,
        color: Option<Color>,
    ) -> TermfxResult<&mut Self> {
        let symbol = symbol.into();
        if symbol.graphemes(true).count() != 1 {
            return Err(TermfxError::config(format!(
                "frame symbol must be a single grapheme, got \"{symbol}\""
            )));
        }
        if duration == 0 {
            return Err(TermfxError::config("frame duration must be >= 1 tick"));
        }
        self.frames.push(Frame {
            symbol,
            color,
            duration,
        });
        Ok(self)
    }

    /// Append one frame per gradient color, all showing `symbol`.
    pub fn apply_gradient_to_symbol(
        &mut self,
        gradient: &Gradient,
        symbol: &str,
        duration: u32,
    ) -> TermfxResult<&mut Self> {
        for color in gradient.spectrum() {
            self.add_frame(symbol, duration, Some(*color))?;
        }
        Ok(self)
    }

    /// The frame currently on screen.
    pub fn current_frame(&self) -> Option<&Frame> {
        self.frames.get(self.index)
    }

    fn reset(&mut self) {
        self.index = 0;
        self.played = 0;
        self.complete = false;
    }

    /// Show the current frame for one tick. Returns the frame shown and whether this tick
    /// finished the last frame of a non-looping scene.
    fn step(&mut self) -> Option<(Frame, bool)> {
        if self.complete {
            return None;
        }
        let frame = self.frames.get(self.index)?.clone();
        self.played += 1;
        if self.played < frame.duration {
            return Some((frame, false));
        }

        self.played = 0;
        if self.index + 1 < self.frames.len() {
            self.index += 1;
        } else if self.looping {
            self.index = 0;
        } else {
            self.complete = true;
            return Some((frame, true));
        }
        Some((frame, false))
    }
}

/// Result of one animation tick.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SceneStep {
    pub(crate) frame: Frame,
    pub(crate) completed: Option<SceneId>,
}

/// Appearance state of one character plus the scenes it owns.
#[derive(Clone, Debug, Default)]
pub struct Animation {
    scenes: Vec<Scene>,
    active: Option<SceneId>,
}

impl Animation {
    /// Animation with no scenes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene owned by this animation.
    pub fn new_scene(&mut self, looping: bool) -> &mut Scene {
        let id = SceneId(self.scenes.len() as u32);
        self.scenes.push(Scene::new(id, looping));
        let idx = self.scenes.len() - 1;
        &mut self.scenes[idx]
    }

    /// Look up a scene by handle.
    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(id.0 as usize)
    }

    /// Mutable access to a scene.
    pub fn scene_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.get_mut(id.0 as usize)
    }

    /// Currently playing scene, if any.
    pub fn active_scene(&self) -> Option<SceneId> {
        self.active
    }

    /// Make `id` the single active scene, restarting playback at its first frame.
    pub fn activate_scene(&mut self, id: SceneId) -> TermfxResult<&Frame> {
        let scene = self
            .scenes
            .get_mut(id.0 as usize)
            .ok_or_else(|| TermfxError::invariant(format!("unknown scene {id:?}")))?;
        if scene.frames.is_empty() {
            return Err(TermfxError::invariant(format!("scene {id:?} has no frames")));
        }
        scene.reset();
        self.active = Some(id);
        Ok(&scene.frames[0])
    }

    /// Stop playing `id` if it is the active scene.
    pub fn deactivate_scene(&mut self, id: SceneId) {
        if self.active == Some(id) {
            self.active = None;
        }
    }

    /// `true` while the active scene loops or still has frames to show.
    pub fn is_playing(&self) -> bool {
        self.active
            .and_then(|id| self.scene(id))
            .is_some_and(|s| s.looping || !s.complete)
    }

    pub(crate) fn step(&mut self) -> Option<SceneStep> {
        let id = self.active?;
        let (frame, finished) = self.scenes.get_mut(id.0 as usize)?.step()?;
        Some(SceneStep {
            frame,
            completed: finished.then_some(id),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scene.rs"]
mod tests;
