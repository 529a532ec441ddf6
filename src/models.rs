use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

use crate::settings::Settings;

pub const EXAMPLE_PROMPTS: [&str; 4] = [
    "A young girl discovering a magical forest spirit",
    "A flying castle in the clouds at sunset",
    "A cat bus traveling through a rainy night",
    "A witch delivering packages on her broom",
];

/// One completed generation. Never mutated after it is created.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArtifact {
    pub id: String,
    pub url: String,
    pub prompt: String,
    pub seed: u64,
    pub created_at: DateTime<Utc>,
}

impl GeneratedArtifact {
    pub fn download_file_name(&self) -> String {
        format!("image-{}.jpg", self.id)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationState {
    pub is_generating: bool,
    /// Newest first.
    pub artifacts: Vec<GeneratedArtifact>,
    pub settings: Settings,
}

// --- Wire types for the generation backend ---

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub text: String,
    pub width: u32,
    pub height: u32,
    pub number_of_images: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl GenerateRequest {
    /// Projects the settings onto the fields the backend accepts.
    pub fn new(text: impl Into<String>, settings: &Settings) -> Self {
        Self {
            text: text.into(),
            width: settings.width,
            height: settings.height,
            number_of_images: settings.number_of_images,
            seed: settings.seed,
            style: settings.style.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub image_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub details: Option<String>,
}
