/// True-color and xterm-256 values.
#[allow(clippy::module_inception)]
pub mod color;
/// Multi-stop color gradients.
pub mod gradient;
