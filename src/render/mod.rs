/// Terminal backend.
pub mod ansi;
/// Backend trait and the recording backend.
pub mod backend;
