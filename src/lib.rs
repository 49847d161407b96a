//! termfx animates text piped into a terminal.
//!
//! Every input grapheme becomes an [`EffectCharacter`] with its own motion (eased waypoint
//! paths), animation (timed symbol/color frames) and event bindings that chain the two. A
//! [`Canvas`] owns the characters and renders diffs to a [`RenderBackend`]; a [`Scheduler`]
//! reveals, ticks and retires characters according to an [`Effect`]'s policy.
//!
//! - Build a [`Canvas`] from text
//! - Pick an effect from [`effects::registry`] (or implement [`Effect`])
//! - Create a [`Scheduler`] and [`Scheduler::run`] it against a backend
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Per-character time model: easing, motion paths, scenes and event bindings.
pub mod animation;
/// Terminal colors and precomputed gradients.
pub mod color;
pub mod config;
pub mod effects;
/// Characters, canvas and the frame scheduler.
pub mod engine;
mod foundation;
/// Render backends the canvas draws through.
pub mod render;

pub use crate::animation::ease::Ease;
pub use crate::animation::events::{Action, Event, EventHandler};
pub use crate::animation::motion::{Motion, Path};
pub use crate::animation::scene::{Animation, Frame, Scene};
pub use crate::color::color::{Color, Rgb};
pub use crate::color::gradient::Gradient;
pub use crate::engine::canvas::{Canvas, PrintStats};
pub use crate::engine::character::EffectCharacter;
pub use crate::engine::effect::{Effect, GroupOrder};
pub use crate::engine::scheduler::{RunOpts, RunStats, Scheduler};
pub use crate::foundation::core::{Coord, OutputArea};
pub use crate::foundation::error::{TermfxError, TermfxResult};
pub use crate::foundation::ids::{CharId, PathId, SceneId};
pub use crate::render::ansi::AnsiBackend;
pub use crate::render::backend::{RecordingBackend, RenderBackend, RenderOp};
