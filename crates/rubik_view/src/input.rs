//! Mapping from user input to cube commands.
//!
//! Time is passed in explicitly as the duration since some fixed starting
//! point, so that input handling does not depend on the system clock.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rubik_core::{Direction, Face, FaceTwist};
use rubik_prefs::InteractionPreferences;

use crate::CubeController;

/// Six face buttons. A single click turns the face clockwise; a double click
/// turns it counterclockwise.
///
/// A click is held back until the double-click window has passed, so a
/// double click issues only the counterclockwise twist.
#[derive(Debug)]
pub struct FaceButtons {
    controller: Arc<Mutex<CubeController>>,
    double_click: Duration,
    /// Face clicked once and the time of the click.
    pending: Option<(Face, Duration)>,
}

impl FaceButtons {
    /// Constructs face buttons that turn the faces of `controller`.
    pub fn new(controller: Arc<Mutex<CubeController>>, prefs: &InteractionPreferences) -> Self {
        Self {
            controller,
            double_click: prefs.double_click(),
            pending: None,
        }
    }

    /// Handles a click on a face button. Returns the twist that was issued
    /// and accepted by the cube, if any.
    pub fn click(&mut self, face: Face, now: Duration) -> Option<FaceTwist> {
        match self.pending.take() {
            Some((f, t)) if f == face && now.saturating_sub(t) <= self.double_click => {
                self.issue(FaceTwist::new(face, Direction::CounterClockwise))
            }
            previous => {
                // A click on a different face confirms the previous click.
                let issued = previous.and_then(|(f, _)| {
                    self.issue(FaceTwist::new(f, Direction::Clockwise))
                });
                self.pending = Some((face, now));
                issued
            }
        }
    }

    /// Issues a pending single click once the double-click window has
    /// passed. Returns the twist that was issued and accepted by the cube,
    /// if any.
    pub fn update(&mut self, now: Duration) -> Option<FaceTwist> {
        let (face, t) = self.pending?;
        if now.saturating_sub(t) <= self.double_click {
            return None;
        }
        self.pending = None;
        self.issue(FaceTwist::new(face, Direction::Clockwise))
    }

    /// Returns whether a click is waiting to see if it becomes a double
    /// click.
    pub fn has_pending_click(&self) -> bool {
        self.pending.is_some()
    }

    fn issue(&self, twist: FaceTwist) -> Option<FaceTwist> {
        // Rejections are logged by the controller.
        let mut controller = self.controller.lock();
        controller.rotate(twist.face, twist.direction).ok()?;
        Some(twist)
    }
}

/// Press-and-hold gesture that solves the cube.
#[derive(Debug)]
pub struct HoldToSolve {
    controller: Arc<Mutex<CubeController>>,
    threshold: Duration,
    /// Time that the current press started.
    pressed_at: Option<Duration>,
    /// Whether the current press has already triggered a solve.
    fired: bool,
}

impl HoldToSolve {
    /// Constructs a hold-to-solve gesture for `controller`.
    pub fn new(controller: Arc<Mutex<CubeController>>, prefs: &InteractionPreferences) -> Self {
        Self {
            controller,
            threshold: prefs.hold_to_solve(),
            pressed_at: None,
            fired: false,
        }
    }

    /// Starts a press. Ignored while the cube is busy.
    pub fn press(&mut self, now: Duration) {
        if self.controller.lock().is_busy() {
            log::debug!("Ignoring press because the cube is busy");
            return;
        }
        self.pressed_at = Some(now);
        self.fired = false;
    }

    /// Ends the current press.
    pub fn release(&mut self) {
        self.pressed_at = None;
    }

    /// Returns whether a press is in progress.
    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Solves the cube if the current press has lasted long enough and the
    /// cube is idle. Returns whether a solve was started.
    pub fn update(&mut self, now: Duration) -> bool {
        let Some(pressed_at) = self.pressed_at else {
            return false;
        };
        if self.fired || now.saturating_sub(pressed_at) < self.threshold {
            return false;
        }
        let mut controller = self.controller.lock();
        // Keep waiting until the cube is idle, as long as the press lasts.
        if controller.is_busy() {
            return false;
        }
        self.fired = true;
        log::info!("Held for {:?}; solving", self.threshold);
        controller.solve().is_ok()
    }
}

/// All input handlers for a cube.
#[derive(Debug)]
pub struct CubeInput {
    /// Buttons that turn faces.
    pub face_buttons: FaceButtons,
    /// Gesture that solves the cube.
    pub hold_to_solve: HoldToSolve,
}

impl CubeInput {
    /// Constructs input handlers that share `controller`.
    pub fn new(controller: &Arc<Mutex<CubeController>>, prefs: &InteractionPreferences) -> Self {
        Self {
            face_buttons: FaceButtons::new(Arc::clone(controller), prefs),
            hold_to_solve: HoldToSolve::new(Arc::clone(controller), prefs),
        }
    }

    /// Handles the passage of time. This should be called every frame.
    pub fn update(&mut self, now: Duration) {
        self.face_buttons.update(now);
        self.hold_to_solve.update(now);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rubik_prefs::Preferences;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn setup(animated: bool) -> (Arc<Mutex<CubeController>>, CubeInput) {
        let mut prefs = Preferences::default();
        prefs.animation.enabled = animated;
        let controller = Arc::new(Mutex::new(CubeController::new(&prefs)));
        let input = CubeInput::new(&controller, &prefs.interaction);
        (controller, input)
    }

    #[test]
    fn test_single_click() {
        let (controller, mut input) = setup(false);
        let buttons = &mut input.face_buttons;
        assert_eq!(None, buttons.click(Face::Up, ms(1000)));
        assert!(buttons.has_pending_click());
        assert_eq!(None, buttons.update(ms(1200)));
        assert_eq!(
            Some(FaceTwist::new(Face::Up, Direction::Clockwise)),
            buttons.update(ms(1400)),
        );
        assert!(!buttons.has_pending_click());
        assert_eq!("U", controller.lock().history().to_string());
    }

    #[test]
    fn test_double_click() {
        let (controller, mut input) = setup(false);
        let buttons = &mut input.face_buttons;
        assert_eq!(None, buttons.click(Face::Right, ms(1000)));
        assert_eq!(
            Some(FaceTwist::new(Face::Right, Direction::CounterClockwise)),
            buttons.click(Face::Right, ms(1250)),
        );
        assert_eq!(None, buttons.update(ms(5000)));
        assert_eq!("R'", controller.lock().history().to_string());
    }

    #[test]
    fn test_slow_clicks_and_different_faces() {
        let (controller, mut input) = setup(false);
        let buttons = &mut input.face_buttons;
        buttons.click(Face::Front, ms(0));
        // Too slow for a double click.
        assert_eq!(
            Some(FaceTwist::new(Face::Front, Direction::Clockwise)),
            buttons.click(Face::Front, ms(500)),
        );
        // A different face confirms the pending click.
        assert_eq!(
            Some(FaceTwist::new(Face::Front, Direction::Clockwise)),
            buttons.click(Face::Left, ms(600)),
        );
        buttons.update(ms(1000));
        assert_eq!("F F L", controller.lock().history().to_string());
    }

    #[test]
    fn test_click_while_busy_is_ignored() {
        let (controller, mut input) = setup(true);
        controller
            .lock()
            .rotate(Face::Down, Direction::Clockwise)
            .unwrap();
        let buttons = &mut input.face_buttons;
        buttons.click(Face::Up, ms(0));
        assert_eq!(None, buttons.update(ms(400)));
        assert!(!buttons.has_pending_click());

        let mut controller = controller.lock();
        controller.finish_animations().unwrap();
        assert_eq!("D", controller.history().to_string());
    }

    #[test]
    fn test_hold_to_solve() {
        let (controller, mut input) = setup(false);
        controller
            .lock()
            .apply_twists(&rubik_core::parse_twists("U R U' R'").unwrap())
            .unwrap();

        let hold = &mut input.hold_to_solve;
        hold.press(ms(0));
        assert!(!hold.update(ms(2999)));
        hold.release();
        assert!(!hold.update(ms(4000)));
        assert!(!controller.lock().is_solved());

        hold.press(ms(5000));
        assert!(hold.update(ms(8000)));
        assert!(controller.lock().is_solved());
        // Only once per press.
        assert!(!hold.update(ms(9000)));
    }

    #[test]
    fn test_hold_ignored_while_busy() {
        let (controller, mut input) = setup(true);
        controller
            .lock()
            .rotate(Face::Back, Direction::CounterClockwise)
            .unwrap();
        input.hold_to_solve.press(ms(0));
        assert!(!input.hold_to_solve.is_pressed());
        input.update(ms(10_000));
        assert!(controller.lock().is_busy());
    }

    #[test]
    fn test_hold_waits_for_cube_to_become_idle() {
        let (controller, mut input) = setup(true);
        {
            let mut controller = controller.lock();
            controller.rotate(Face::Up, Direction::Clockwise).unwrap();
            controller.finish_animations().unwrap();
        }

        let hold = &mut input.hold_to_solve;
        hold.press(ms(0));
        assert!(hold.is_pressed());
        controller
            .lock()
            .rotate(Face::Left, Direction::Clockwise)
            .unwrap();
        // Held long enough, but the twist is still animating.
        assert!(!hold.update(ms(3000)));

        controller.lock().finish_animations().unwrap();
        assert!(hold.update(ms(3100)));
        assert!(!hold.update(ms(3200)));

        let mut controller = controller.lock();
        controller.finish_animations().unwrap();
        assert!(controller.is_solved());
        assert!(controller.history().is_empty());
    }
}
