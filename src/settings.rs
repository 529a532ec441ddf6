use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use thiserror::Error;

pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;
pub const DEFAULT_NUMBER_OF_IMAGES: u32 = 1;
pub const DEFAULT_GUIDANCE_SCALE: f32 = 7.5;
pub const DEFAULT_STEPS: u32 = 30;

pub const NUMBER_OF_IMAGES_RANGE: RangeInclusive<u32> = 1..=4;
pub const GUIDANCE_SCALE_RANGE: RangeInclusive<f32> = 1.0..=20.0;
pub const GUIDANCE_SCALE_STEP: f32 = 0.5;
pub const STEPS_RANGE: RangeInclusive<u32> = 10..=100;
pub const STEPS_STEP: u32 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("dimensions must be positive, got {width}x{height}")] Dimensions { width: u32, height: u32 },
    #[error("number of images must be between 1 and 4, got {0}")] NumberOfImages(u32),
    #[error("guidance scale must be between 1 and 20, got {0}")] GuidanceScale(f32),
    #[error("steps must be between 10 and 100, got {0}")] Steps(u32),
}

/// Parameters sent with every generation request.
///
/// `guidance_scale` and `steps` stay optional to mirror the wire-facing shape,
/// but every constructor fills them so a fresh value is always fully populated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub number_of_images: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default = "default_guidance_scale")]
    pub guidance_scale: Option<f32>,
    #[serde(default = "default_steps")]
    pub steps: Option<u32>,
}

fn default_guidance_scale() -> Option<f32> { Some(DEFAULT_GUIDANCE_SCALE) }
fn default_steps() -> Option<u32> { Some(DEFAULT_STEPS) }

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            number_of_images: DEFAULT_NUMBER_OF_IMAGES,
            seed: None,
            style: None,
            guidance_scale: default_guidance_scale(),
            steps: default_steps(),
        }
    }
}

impl Settings {
    /// Overwrites exactly the fields named in `patch`. No range checks happen here.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(width) = patch.width { self.width = width; }
        if let Some(height) = patch.height { self.height = height; }
        if let Some(n) = patch.number_of_images { self.number_of_images = n; }
        if let Some(seed) = patch.seed { self.seed = seed; }
        if let Some(style) = &patch.style { self.style = style.clone(); }
        if let Some(scale) = patch.guidance_scale { self.guidance_scale = scale; }
        if let Some(steps) = patch.steps { self.steps = steps; }
    }

    pub fn merged(&self, patch: &SettingsPatch) -> Settings {
        let mut merged = self.clone();
        merged.apply(patch);
        merged
    }

    pub fn matches_preset(&self, preset: &SizePreset) -> bool {
        self.width == preset.width && self.height == preset.height
    }
}

/// A partial update. `None` leaves a field alone; on the optional fields
/// `Some(None)` clears the value.
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub number_of_images: Option<u32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub seed: Option<Option<u64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub style: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub guidance_scale: Option<Option<f32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub steps: Option<Option<u32>>,
}

impl SettingsPatch {
    pub fn seed(seed: u64) -> Self {
        Self { seed: Some(Some(seed)), ..Default::default() }
    }

    pub fn size(width: u32, height: u32) -> Self {
        Self { width: Some(width), height: Some(height), ..Default::default() }
    }

    pub fn from_preset(preset: &SizePreset) -> Self {
        Self::size(preset.width, preset.height)
    }

    /// Range check for callers that validate before handing a patch to the controller.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let width = self.width.unwrap_or(DEFAULT_WIDTH);
        let height = self.height.unwrap_or(DEFAULT_HEIGHT);
        if width == 0 || height == 0 {
            return Err(SettingsError::Dimensions { width, height });
        }
        if let Some(n) = self.number_of_images {
            if !NUMBER_OF_IMAGES_RANGE.contains(&n) {
                return Err(SettingsError::NumberOfImages(n));
            }
        }
        if let Some(Some(scale)) = self.guidance_scale {
            if !GUIDANCE_SCALE_RANGE.contains(&scale) {
                return Err(SettingsError::GuidanceScale(scale));
            }
        }
        if let Some(Some(steps)) = self.steps {
            if !STEPS_RANGE.contains(&steps) {
                return Err(SettingsError::Steps(steps));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct SizePreset {
    pub width: u32,
    pub height: u32,
    pub label: &'static str,
}

pub const SIZE_PRESETS: [SizePreset; 4] = [
    SizePreset { width: 512, height: 512, label: "Square (1:1)" },
    SizePreset { width: 768, height: 512, label: "Landscape (3:2)" },
    SizePreset { width: 512, height: 768, label: "Portrait (2:3)" },
    SizePreset { width: 1024, height: 576, label: "Widescreen (16:9)" },
];
