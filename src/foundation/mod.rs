/// Grid coordinates and output bounds.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Handle newtypes.
pub mod ids;
