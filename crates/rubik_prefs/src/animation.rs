use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnimationPreferences {
    /// Whether to animate twists. If `false`, every twist is applied
    /// instantly.
    pub enabled: bool,
    /// Quarter turns per second.
    pub twist_speed: f32,
}

impl AnimationPreferences {
    /// Returns whether twists should be applied without any animation.
    pub fn is_instant(&self) -> bool {
        !self.enabled
    }
}
