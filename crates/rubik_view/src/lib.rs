//! Cube state manager, to ensure consistent behavior across frontends.
//!
//! A [`CubeController`] owns the logical cube, the move history, and the
//! in-flight twist animation. Frontends drive it by calling
//! [`CubeController::step()`] once per frame and read piece transforms back
//! from [`CubeController::render_data()`].

mod animation;
mod controller;
mod input;

pub use animation::{PieceTransform, TwistAnimation};
pub use controller::{CubeController, RotateError, ScriptKind};
pub use input::{CubeInput, FaceButtons, HoldToSolve};
