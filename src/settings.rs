//! Tunables, loaded from an optional RON file.
//!
//! ```ron
//! (
//!     fov_degrees: 75.0,
//!     collision: true,
//! )
//! ```
//!
//! Omitted fields keep their defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::input::DEFAULT_TOUCH_MOMENTUM;
use crate::player::Motion;
use crate::ray::MAX_RAY_DISTANCE;

pub const DEFAULT_PATH: &str = "raycaster.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fov_degrees: f32,
    /// Logical pixels per ray; the ray count is `width / column_width`.
    pub column_width: f32,
    /// Ray budget in cells.
    pub max_ray_distance: f32,
    pub target_fps: u32,
    /// Height of the logical framebuffer. Width follows the window aspect.
    pub logical_height: u32,
    /// Minimap edge as a fraction of the smaller window dimension.
    pub minimap_fraction: f32,
    pub movement_speed: f32,
    pub angular_velocity: f32,
    pub sprint_multiplier: f32,
    pub collision: bool,
    pub touch_momentum: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let motion = Motion::default();
        Self {
            fov_degrees: 60.0,
            column_width: 6.0,
            max_ray_distance: 20.0,
            target_fps: 60,
            logical_height: 380,
            minimap_fraction: 0.25,
            movement_speed: motion.movement_speed,
            angular_velocity: motion.angular_velocity,
            sprint_multiplier: motion.sprint_multiplier,
            collision: motion.collision,
            touch_momentum: DEFAULT_TOUCH_MOMENTUM,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(ron::error::SpannedError),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {e}"),
            SettingsError::Parse(e) => write!(f, "RON error: {e}"),
            SettingsError::Invalid(msg) => write!(f, "invalid setting: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    pub fn from_ron(contents: &str) -> Result<Self, SettingsError> {
        let settings: Settings = ron::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads `path`. A missing file falls back to defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let settings = Self::from_ron(&contents)?;
                info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("{} not found, using default settings", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("column_width", self.column_width),
            ("max_ray_distance", self.max_ray_distance),
            ("minimap_fraction", self.minimap_fraction),
            ("movement_speed", self.movement_speed),
            ("angular_velocity", self.angular_velocity),
            ("sprint_multiplier", self.sprint_multiplier),
            ("touch_momentum", self.touch_momentum),
        ];
        if let Some((name, value)) = positive
            .iter()
            .find(|(_, v)| !(v.is_finite() && *v > 0.0))
        {
            return Err(SettingsError::Invalid(format!(
                "{name} must be a positive number, got {value}"
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(SettingsError::Invalid(format!(
                "fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if self.target_fps == 0 || self.logical_height == 0 {
            return Err(SettingsError::Invalid(
                "target_fps and logical_height must be non-zero".to_string(),
            ));
        }
        if self.max_ray_distance > MAX_RAY_DISTANCE {
            return Err(SettingsError::Invalid(format!(
                "max_ray_distance must not exceed {MAX_RAY_DISTANCE}, got {}",
                self.max_ray_distance
            )));
        }
        if self.minimap_fraction > 1.0 || self.touch_momentum > 1.0 {
            return Err(SettingsError::Invalid(
                "minimap_fraction and touch_momentum must not exceed 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn fov(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    pub fn motion(&self) -> Motion {
        Motion {
            movement_speed: self.movement_speed,
            angular_velocity: self.angular_velocity,
            sprint_multiplier: self.sprint_multiplier,
            collision: self.collision,
        }
    }
}
