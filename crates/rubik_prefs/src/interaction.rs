use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InteractionPreferences {
    /// How long a piece must be held before the cube solves itself.
    pub hold_to_solve_secs: f32,
    /// Maximum time between two clicks on the same face button for them to
    /// count as a double click.
    pub double_click_secs: f32,
}

impl InteractionPreferences {
    pub fn hold_to_solve(&self) -> Duration {
        secs_to_duration(self.hold_to_solve_secs)
    }
    pub fn double_click(&self) -> Duration {
        secs_to_duration(self.double_click_secs)
    }
}

/// Converts a number of seconds to a duration, rounded to the nearest
/// millisecond. Negative and NaN values become zero.
fn secs_to_duration(secs: f32) -> Duration {
    // `as` saturates, and maps NaN to zero.
    Duration::from_millis((f64::from(secs) * 1000.0).round() as u64)
}
