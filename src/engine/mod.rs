/// Character arena and diffed rendering.
pub mod canvas;
/// The tickable per-grapheme entity.
pub mod character;
/// Effect policy trait.
pub mod effect;
/// Splitting input text into cells.
pub mod input;
/// Reveal, tick and render loop.
pub mod scheduler;
