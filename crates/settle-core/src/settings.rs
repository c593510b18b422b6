use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Duration;

use crate::host::SettingsStore;

/// Key the settings snapshot is stored under in the host's key-value store.
pub const SETTINGS_KEY: &str = "settle.settings";

/// Range and step of one user-facing slider.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderSpec {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderSpec {
    pub fn contains(&self, v: f32) -> bool {
        v.is_finite() && v >= self.min && v <= self.max
    }

    /// Clamp into range and snap to the nearest step.
    pub fn snap(&self, v: f32) -> f32 {
        let v = if v.is_finite() { v } else { self.min };
        let steps = ((v.clamp(self.min, self.max) - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

pub const TRANSITION_DURATION_SLIDER: SliderSpec = SliderSpec {
    min: 0.5,
    max: 10.0,
    step: 0.1,
};

pub const INTENSITY_SLIDER: SliderSpec = SliderSpec {
    min: 0.0,
    max: 1.0,
    step: 0.05,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("transition duration {0}s is outside [0.5, 10]")]
    TransitionDuration(f32),
    #[error("intensity {0} is outside [0, 1]")]
    Intensity(f32),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable settings snapshot read once per render pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Seconds a fresh span takes to fully settle.
    pub transition_duration: f32,
    /// Maximum de-emphasis applied at the moment of insertion.
    pub intensity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transition_duration: 1.5,
            intensity: 0.4,
        }
    }
}

impl Settings {
    pub fn new(transition_duration: f32, intensity: f32) -> Result<Self, SettingsError> {
        Self {
            transition_duration,
            intensity,
        }
        .validated()
    }

    pub fn validated(self) -> Result<Self, SettingsError> {
        if !TRANSITION_DURATION_SLIDER.contains(self.transition_duration) {
            return Err(SettingsError::TransitionDuration(self.transition_duration));
        }
        if !INTENSITY_SLIDER.contains(self.intensity) {
            return Err(SettingsError::Intensity(self.intensity));
        }
        Ok(self)
    }

    /// Snap both values onto their sliders.
    pub fn clamped(self) -> Self {
        Self {
            transition_duration: TRANSITION_DURATION_SLIDER.snap(self.transition_duration),
            intensity: INTENSITY_SLIDER.snap(self.intensity),
        }
    }

    pub fn duration(&self) -> Duration {
        // Whole milliseconds, so slider values like 1.3 land exactly on 1300ms.
        if self.transition_duration.is_finite() {
            let ms = (self.transition_duration.max(0.0) as f64 * 1000.0).round();
            Duration::from_millis(ms as u64)
        } else {
            Duration::ZERO
        }
    }

    pub fn from_json(s: &str) -> Result<Self, SettingsError> {
        serde_json::from_str::<Settings>(s)?.validated()
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load from the host store, falling back to defaults on absent or bad
    /// data.
    pub fn load(store: &impl SettingsStore) -> Self {
        let Some(raw) = store.load(SETTINGS_KEY) else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("settle: ignoring stored settings: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl SettingsStore) -> Result<(), SettingsError> {
        store.save(SETTINGS_KEY, &self.to_json()?);
        Ok(())
    }
}
