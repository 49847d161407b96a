/// Easing catalog.
pub mod ease;
/// Completion events and the actions bound to them.
pub mod events;
/// Waypoint paths and per-character motion.
pub mod motion;
/// Timed frames, scenes and per-character animation.
pub mod scene;
