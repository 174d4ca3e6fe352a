use std::collections::VecDeque;
use std::time::Duration;

use rubik_core::{
    Direction, Face, FaceTwist, Grid, GridError, Move, MoveHistory, ScrambleParams,
    format_twists, rotation,
};
use rubik_prefs::{AnimationPreferences, GeometryPreferences, Preferences, ScramblePreferences};
use thiserror::Error;

use crate::animation::{PieceTransform, TwistAnimation, TwistAnimationState};

/// Error produced when a rotation is requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RotateError {
    /// Another rotation is still in progress. The request was dropped.
    #[error("a rotation is already in progress")]
    Busy,
    /// The grid rejected the rotation. Nothing was modified.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Kind of move sequence run by the controller without user input.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScriptKind {
    /// Random twists that scramble the cube.
    Scramble,
    /// Twists requested together, such as from notation.
    Sequence,
    /// Reversal of the move history.
    Solve,
}

#[derive(Debug, Clone)]
struct Script {
    kind: ScriptKind,
    /// Moves not yet started. Always empty for [`ScriptKind::Solve`], which
    /// reads from the history instead.
    queue: VecDeque<Move>,
}

/// Cube simulation, which manages the grid, move history, and twist
/// animation.
///
/// Only one rotation can be in progress at a time. While the controller is
/// busy, new requests are rejected with [`RotateError::Busy`] rather than
/// queued.
#[derive(Debug, Clone)]
pub struct CubeController {
    /// Latest grid state, not including any in-progress twist.
    grid: Grid,
    /// Moves that have completed, oldest first.
    history: MoveHistory,
    /// Whether the cube has been scrambled and not yet solved.
    is_scrambled: bool,

    animation_prefs: AnimationPreferences,
    geometry_prefs: GeometryPreferences,
    scramble_prefs: ScramblePreferences,

    twist_anim: TwistAnimationState,
    script: Option<Script>,

    /// Latest visual piece transforms, indexed by piece ID.
    cached_render_data: Vec<PieceTransform>,
}

impl CubeController {
    /// Constructs a controller with a solved cube.
    pub fn new(prefs: &Preferences) -> Self {
        let mut ret = Self {
            grid: Grid::new_solved(),
            history: MoveHistory::new(),
            is_scrambled: false,

            animation_prefs: prefs.animation.clone(),
            geometry_prefs: prefs.geometry.clone(),
            scramble_prefs: prefs.scramble.clone(),

            twist_anim: TwistAnimationState::default(),
            script: None,

            cached_render_data: vec![],
        };
        ret.update_render_data();
        ret
    }

    /// Scrambles the cube if the preferences ask for a scramble when the
    /// cube is created. Returns the scramble twists.
    pub fn start(&mut self) -> Result<Vec<FaceTwist>, RotateError> {
        self.start_with(ScrambleParams::new(self.scramble_prefs.length))
    }
    /// Same as [`Self::start()`], but scrambles using `params` instead of
    /// generating new ones.
    pub fn start_with(&mut self, params: ScrambleParams) -> Result<Vec<FaceTwist>, RotateError> {
        if !self.scramble_prefs.on_start {
            log::info!("Not scrambling on start");
            return Ok(vec![]);
        }
        self.scramble(params)
    }

    /// Returns the latest grid state, after all completed twists.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    /// Returns the moves that have completed, oldest first.
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }
    /// Returns whether the cube has been scrambled and not yet solved.
    pub fn is_scrambled(&self) -> bool {
        self.is_scrambled
    }
    /// Returns whether the cube is solved. Any in-progress twist is ignored.
    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    /// Returns whether a rotation or script is in progress.
    pub fn is_busy(&self) -> bool {
        self.twist_anim.is_animating() || self.script.is_some()
    }
    /// Returns the kind of script that is running, if any.
    pub fn current_script(&self) -> Option<ScriptKind> {
        Some(self.script.as_ref()?.kind)
    }
    /// Returns the in-progress twist and its progress from `0.0` to `1.0`.
    pub fn current_animation(&self) -> Option<(&TwistAnimation, f32)> {
        self.twist_anim.current()
    }

    /// Returns the transform of every piece, indexed by piece ID, including
    /// any in-progress twist.
    pub fn render_data(&self) -> &[PieceTransform] {
        &self.cached_render_data
    }

    /// Turns a face.
    pub fn rotate(&mut self, face: Face, direction: Direction) -> Result<(), RotateError> {
        self.apply_move(FaceTwist::new(face, direction).to_move())
    }

    /// Turns a layer. If animations are disabled, the move is completed
    /// before returning. Otherwise it is completed by [`Self::step()`].
    pub fn apply_move(&mut self, m: Move) -> Result<(), RotateError> {
        if self.is_busy() {
            log::warn!("Ignoring {m} because a rotation is already in progress");
            return Err(RotateError::Busy);
        }
        self.begin_move(m, false)
            .inspect_err(|e| log::error!("Error applying {m}: {e}"))
    }

    /// Applies a sequence of face twists, one after another.
    ///
    /// If a twist fails, then the remaining twists are skipped; twists that
    /// already completed are kept.
    pub fn apply_twists(&mut self, twists: &[FaceTwist]) -> Result<(), RotateError> {
        if self.is_busy() {
            log::warn!("Ignoring twist sequence because a rotation is already in progress");
            return Err(RotateError::Busy);
        }
        log::debug!("Applying {}", format_twists(twists.iter().copied()));
        let queue = twists.iter().map(|t| t.to_move()).collect();
        self.start_script(ScriptKind::Sequence, queue)
    }

    /// Scrambles the cube by applying random twists as if they were user
    /// moves. Returns the twists.
    pub fn scramble(&mut self, params: ScrambleParams) -> Result<Vec<FaceTwist>, RotateError> {
        if self.is_busy() {
            log::warn!("Ignoring scramble because a rotation is already in progress");
            return Err(RotateError::Busy);
        }
        let twists = params.generate();
        if twists.is_empty() {
            return Ok(twists);
        }
        log::info!("Scrambling: {}", format_twists(twists.iter().copied()));
        let queue = twists.iter().map(|t| t.to_move()).collect();
        self.start_script(ScriptKind::Scramble, queue)?;
        Ok(twists)
    }

    /// Undoes every move in the history, newest first.
    ///
    /// Does nothing if the history is empty.
    pub fn solve(&mut self) -> Result<(), RotateError> {
        if self.is_busy() {
            log::warn!("Ignoring solve because a rotation is already in progress");
            return Err(RotateError::Busy);
        }
        if self.history.is_empty() {
            log::info!("Nothing to solve");
            return Ok(());
        }
        log::info!("Solving by undoing {} moves", self.history.len());
        self.start_script(ScriptKind::Solve, VecDeque::new())
    }

    /// Advances the twist animation using the time elapsed since the last
    /// frame. Returns whether the cube must be redrawn.
    pub fn step(&mut self, delta: Duration) -> Result<bool, RotateError> {
        if !self.twist_anim.proceed(delta, self.animation_prefs.twist_speed) {
            return Ok(false);
        }
        let result = match self.twist_anim.take_finished() {
            Some(anim) => self.finish_twist(anim).and_then(|()| self.advance_script()),
            None => Ok(()),
        };
        self.update_render_data();
        result.map(|()| true)
    }

    /// Completes every in-progress twist and script immediately.
    pub fn finish_animations(&mut self) -> Result<(), RotateError> {
        let mut result = Ok(());
        while let Some(anim) = self.twist_anim.take() {
            result = self.finish_twist(anim).and_then(|()| self.advance_script());
            if result.is_err() {
                break;
            }
        }
        self.update_render_data();
        result
    }

    fn start_script(&mut self, kind: ScriptKind, queue: VecDeque<Move>) -> Result<(), RotateError> {
        self.script = Some(Script { kind, queue });
        self.advance_script()
    }

    /// Starts the next move of the script, unless a twist is already in
    /// progress. With animations disabled, this runs the whole script.
    fn advance_script(&mut self) -> Result<(), RotateError> {
        while !self.twist_anim.is_animating() {
            let Some(script) = &mut self.script else {
                return Ok(());
            };
            let kind = script.kind;
            let next = match kind {
                ScriptKind::Solve => self.history.as_slice().last().map(|m| m.rev()),
                ScriptKind::Scramble | ScriptKind::Sequence => script.queue.pop_front(),
            };

            let Some(m) = next else {
                self.finish_script();
                return Ok(());
            };
            if let Err(e) = self.begin_move(m, kind == ScriptKind::Solve) {
                log::error!("Aborting {kind:?} script at {m}: {e}");
                self.script = None;
                return Err(e);
            }
        }
        Ok(())
    }

    fn finish_script(&mut self) {
        let Some(script) = self.script.take() else {
            return;
        };
        match script.kind {
            ScriptKind::Scramble => {
                self.is_scrambled = true;
                log::info!("Scrambled");
            }
            ScriptKind::Sequence => (),
            ScriptKind::Solve => {
                self.history.clear();
                self.is_scrambled = false;
                log::info!("Solved");
            }
        }
    }

    /// Starts a move. If animations are disabled, the move is completed
    /// immediately.
    fn begin_move(&mut self, m: Move, replay: bool) -> Result<(), RotateError> {
        if self.animation_prefs.is_instant() {
            rotation::apply_move(&mut self.grid, m)?;
            self.complete_move(m, replay);
        } else {
            let pieces = self.grid.select_layer(m.axis, m.layer)?;
            let spacing = self.geometry_prefs.spacing;
            self.twist_anim
                .start(TwistAnimation::new(m, pieces, spacing, replay));
            log::trace!("Started animating {m}");
        }
        self.update_render_data();
        Ok(())
    }

    /// Commits an animated twist to the grid.
    fn finish_twist(&mut self, anim: TwistAnimation) -> Result<(), RotateError> {
        if let Err(e) = rotation::apply_move(&mut self.grid, anim.m) {
            log::error!("Error completing {}: {e}", anim.m);
            self.script = None;
            return Err(e.into());
        }
        self.complete_move(anim.m, anim.replay);
        Ok(())
    }

    fn complete_move(&mut self, m: Move, replay: bool) {
        if replay {
            self.history.pop();
        } else {
            self.history.record(m);
        }
        log::debug!("Completed {m}");
    }

    fn update_render_data(&mut self) {
        let spacing = self.geometry_prefs.spacing;
        let anim = self.twist_anim.current();
        self.cached_render_data = self
            .grid
            .pieces()
            .iter()
            .map(|piece| {
                let transform = PieceTransform::at_rest(piece, spacing);
                match anim {
                    Some((anim, t)) if anim.pieces.contains(&piece.id()) => {
                        transform.rotated_about(anim.pivot, anim.rotation_at(t))
                    }
                    _ => transform,
                }
            })
            .collect();
    }
}
