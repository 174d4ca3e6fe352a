//! User preferences.
//!
//! Preferences are stored as YAML. The built-in defaults in `default.yaml`
//! are layered underneath the user's file, so the user's file only needs to
//! contain the values they want to change.

#![allow(missing_docs)] // field names are self-explanatory

#[macro_use]
extern crate lazy_static;

use std::path::Path;

use eyre::{Result, ensure};
use serde::{Deserialize, Serialize};

mod animation;
mod interaction;
mod puzzle;

pub use animation::*;
pub use interaction::*;
pub use puzzle::*;

const PREFS_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_PREFS_STR: &str = include_str!("default.yaml");

lazy_static! {
    pub static ref DEFAULT_PREFS: Preferences =
        serde_norway::from_str(DEFAULT_PREFS_STR).expect("error loading default preferences");
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Preferences {
    pub animation: AnimationPreferences,
    pub geometry: GeometryPreferences,
    pub scramble: ScramblePreferences,
    pub interaction: InteractionPreferences,
}

impl Default for Preferences {
    fn default() -> Self {
        DEFAULT_PREFS.clone()
    }
}

impl Preferences {
    /// Loads preferences, layering the file at `user_path` (if any) over the
    /// defaults. If loading fails, then the default preferences are returned.
    pub fn load(user_path: Option<&Path>) -> Self {
        Self::try_load(user_path).unwrap_or_else(|e| {
            log::warn!("Error loading preferences: {e}");
            Self::default()
        })
    }

    /// Loads preferences, layering the file at `user_path` (if any) over the
    /// defaults.
    pub fn try_load(user_path: Option<&Path>) -> Result<Self> {
        let mut config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_PREFS_STR, PREFS_FILE_FORMAT));

        if let Some(path) = user_path {
            if path.exists() {
                log::info!("Loading preferences from {}", path.display());
            } else {
                log::info!("No preferences file at {}; using defaults", path.display());
            }
            config = config.add_source(
                config::File::from(path)
                    .format(PREFS_FILE_FORMAT)
                    .required(false),
            );
        }

        let prefs: Self = config.build()?.try_deserialize()?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Writes preferences to a file, creating its parent directories if
    /// needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(p) = path.parent() {
            std::fs::create_dir_all(p)?;
        }
        serde_norway::to_writer(std::fs::File::create(path)?, self)?;
        log::debug!("Saved preferences to {}", path.display());
        Ok(())
    }

    /// Returns an error if any value is out of range.
    pub fn validate(&self) -> Result<()> {
        let Self {
            animation,
            geometry,
            scramble: _,
            interaction,
        } = self;

        ensure!(
            animation.twist_speed > 0.0,
            "twist speed must be positive, got {}",
            animation.twist_speed,
        );
        ensure!(
            geometry.spacing > 0.0,
            "piece spacing must be positive, got {}",
            geometry.spacing,
        );
        ensure!(
            interaction.hold_to_solve_secs > 0.0,
            "hold-to-solve time must be positive, got {}",
            interaction.hold_to_solve_secs,
        );
        ensure!(
            interaction.double_click_secs > 0.0,
            "double-click time must be positive, got {}",
            interaction.double_click_secs,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_prefs() {
        let prefs = Preferences::default();
        prefs.validate().unwrap();
        assert!(prefs.animation.enabled);
        assert_eq!(2.0, prefs.animation.twist_speed);
        assert_eq!(1.1, prefs.geometry.spacing);
        assert_eq!(20, prefs.scramble.length);
        assert!(prefs.scramble.on_start);
        assert_eq!(Duration::from_secs(3), prefs.interaction.hold_to_solve());
        assert_eq!(Duration::from_millis(300), prefs.interaction.double_click());
        assert_eq!(prefs, Preferences::load(None));
    }

    #[test]
    fn test_user_prefs_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");
        std::fs::write(&path, "animation:\n  enabled: false\nscramble:\n  length: 5\n").unwrap();

        let prefs = Preferences::try_load(Some(&path)).unwrap();
        assert!(prefs.animation.is_instant());
        assert_eq!(5, prefs.scramble.length);
        // Unspecified values come from the defaults.
        assert_eq!(2.0, prefs.animation.twist_speed);
        assert_eq!(1.1, prefs.geometry.spacing);
    }

    #[test]
    fn test_missing_user_prefs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does_not_exist.yaml");
        assert_eq!(Preferences::default(), Preferences::try_load(Some(&path)).unwrap());
    }

    #[test]
    fn test_invalid_user_prefs_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.yaml");

        std::fs::write(&path, "animation:\n  twist_speed: -1.0\n").unwrap();
        assert!(Preferences::try_load(Some(&path)).is_err());
        assert_eq!(Preferences::default(), Preferences::load(Some(&path)));

        std::fs::write(&path, "scramble:\n  length: lots\n").unwrap();
        assert!(Preferences::try_load(Some(&path)).is_err());
        assert_eq!(Preferences::default(), Preferences::load(Some(&path)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.yaml");

        let mut prefs = Preferences::default();
        prefs.geometry.spacing = 1.25;
        prefs.interaction.double_click_secs = 0.5;
        prefs.save(&path).unwrap();

        assert_eq!(prefs, Preferences::try_load(Some(&path)).unwrap());
    }
}
