use std::time::Duration;

use cgmath::{One, Quaternion, Rotation, Vector3};
use rubik_core::{Layer, Move, PieceState, rotation};

/// Visual transform of a single piece.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PieceTransform {
    /// Center of the piece in world space.
    pub position: Vector3<f32>,
    /// Rotation of the piece relative to its solved orientation.
    pub rotation: Quaternion<f32>,
}

impl PieceTransform {
    /// Returns the transform of a piece at rest.
    pub fn at_rest(piece: &PieceState, spacing: f32) -> Self {
        Self {
            position: piece.pos().to_world(spacing),
            rotation: piece.orientation().to_quaternion(),
        }
    }

    /// Returns the transform rotated by `q` around `pivot`.
    #[must_use]
    pub fn rotated_about(self, pivot: Vector3<f32>, q: Quaternion<f32>) -> Self {
        Self {
            position: pivot + q.rotate_vector(self.position - pivot),
            rotation: q * self.rotation,
        }
    }
}

/// Quarter turn of a layer that has not yet been committed to the grid.
#[derive(Debug, Clone)]
pub struct TwistAnimation {
    /// Move being animated.
    pub m: Move,
    /// Pieces on the turning layer.
    pub pieces: Layer,
    /// Center of the turning layer.
    pub pivot: Vector3<f32>,
    /// Rotation at the end of the animation.
    pub end_rotation: Quaternion<f32>,
    /// Whether the move undoes the latest move in the history instead of
    /// adding a new one.
    pub replay: bool,
}

impl TwistAnimation {
    pub(crate) fn new(m: Move, pieces: Layer, spacing: f32, replay: bool) -> Self {
        Self {
            m,
            pieces,
            pivot: rotation::pivot_position(m.axis, m.layer, spacing),
            end_rotation: rotation::move_quaternion(m),
            replay,
        }
    }

    /// Returns the rotation of the layer after `t` of the animation has
    /// elapsed, where `t` ranges from `0.0` to `1.0`.
    pub fn rotation_at(&self, t: f32) -> Quaternion<f32> {
        Quaternion::one().slerp(self.end_rotation, t.clamp(0.0, 1.0))
    }
}

/// State of the twist animation. At most one twist animates at a time.
#[derive(Debug, Default, Clone)]
pub(crate) struct TwistAnimationState {
    current: Option<TwistAnimation>,
    /// Progress of the current animation, from `0.0` to `1.0`.
    progress: f32,
}

impl TwistAnimationState {
    /// Steps the animation forward. Returns whether a twist is animating.
    pub fn proceed(&mut self, delta: Duration, twist_speed: f32) -> bool {
        if self.current.is_none() {
            return false;
        }
        self.progress = (self.progress + delta.as_secs_f32() * twist_speed).min(1.0);
        true
    }

    pub fn start(&mut self, anim: TwistAnimation) {
        self.current = Some(anim);
        self.progress = 0.0;
    }

    pub fn current(&self) -> Option<(&TwistAnimation, f32)> {
        Some((self.current.as_ref()?, self.progress))
    }

    pub fn is_animating(&self) -> bool {
        self.current.is_some()
    }

    /// Removes and returns the current animation if it has completed.
    pub fn take_finished(&mut self) -> Option<TwistAnimation> {
        if self.progress >= 1.0 {
            self.take()
        } else {
            None
        }
    }

    /// Removes and returns the current animation, regardless of progress.
    pub fn take(&mut self) -> Option<TwistAnimation> {
        self.progress = 0.0;
        self.current.take()
    }
}
