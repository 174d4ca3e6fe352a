use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeometryPreferences {
    /// Distance between the centers of adjacent pieces.
    pub spacing: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScramblePreferences {
    /// Number of twists in a scramble.
    pub length: u32,
    /// Whether a new cube is scrambled as soon as it is created.
    pub on_start: bool,
}
