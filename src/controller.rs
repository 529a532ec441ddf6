use std::sync::{atomic::{AtomicU64, Ordering}, Arc};

use chrono::Utc;
use parking_lot::RwLock;
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn, error};

use crate::{
    models::{GenerateRequest, GeneratedArtifact, GenerationState},
    notifier::Notifier,
    settings::{Settings, SettingsPatch},
    transport::{Transport, TransportError},
};

pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to generate images. Please try again.";

/// Upper bound (exclusive) for seeds drawn when the caller supplies none.
pub const MAX_RANDOM_SEED: u64 = 1_000_000;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Please enter a prompt")] EmptyPrompt,
    #[error(transparent)] Transport(#[from] TransportError),
}

impl GenerationError {
    /// Text shown to the user through the notifier.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::EmptyPrompt => self.to_string(),
            GenerationError::Transport(e) => e.details().unwrap_or(FALLBACK_ERROR_MESSAGE).to_string(),
        }
    }
}

struct Inner {
    state: GenerationState,
    /// Effective `number_of_images` of the most recently started call.
    pending_images: u32,
}

/// Owns settings, the artifact gallery and the in-flight flag for one session.
///
/// Overlapping `generate` calls are not serialised: each call clears
/// `is_generating` when it settles, even if another call is still outstanding,
/// and artifacts land in the order their transport calls resolve.
pub struct GenerationController {
    inner: RwLock<Inner>,
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    next_ordinal: AtomicU64,
}

/// Clears `is_generating` on every exit path of a generation call, unwinding included.
struct PendingGuard<'a> {
    inner: &'a RwLock<Inner>,
}

impl<'a> PendingGuard<'a> {
    fn start(inner: &'a RwLock<Inner>, pending_images: u32) -> Self {
        let mut guard = inner.write();
        guard.state.is_generating = true;
        guard.pending_images = pending_images;
        drop(guard);
        Self { inner }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.inner.write().state.is_generating = false;
    }
}

impl GenerationController {
    pub fn new(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_settings(transport, notifier, Settings::default())
    }

    pub fn with_settings(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>, settings: Settings) -> Self {
        let state = GenerationState { settings, ..GenerationState::default() };
        Self {
            inner: RwLock::new(Inner { state, pending_images: 0 }),
            transport,
            notifier,
            next_ordinal: AtomicU64::new(0),
        }
    }

    pub fn is_generating(&self) -> bool {
        self.inner.read().state.is_generating
    }

    pub fn artifacts(&self) -> Vec<GeneratedArtifact> {
        self.inner.read().state.artifacts.clone()
    }

    pub fn settings(&self) -> Settings {
        self.inner.read().state.settings.clone()
    }

    pub fn snapshot(&self) -> GenerationState {
        self.inner.read().state.clone()
    }

    /// Number of skeleton tiles to render while a call is pending.
    pub fn pending_placeholders(&self) -> u32 {
        let guard = self.inner.read();
        if guard.state.is_generating { guard.pending_images } else { 0 }
    }

    /// Field-by-field overwrite. Values are stored as given; range checks belong to the caller.
    pub fn update_settings(&self, patch: SettingsPatch) {
        self.inner.write().state.settings.apply(&patch);
    }

    pub fn reset_settings(&self) {
        self.inner.write().state.settings = Settings::default();
    }

    pub fn remove_artifact(&self, id: &str) {
        let mut guard = self.inner.write();
        let before = guard.state.artifacts.len();
        guard.state.artifacts.retain(|a| a.id != id);
        if guard.state.artifacts.len() == before {
            info!("🗑️ No artifact with id {} to remove", id);
        }
    }

    /// Runs one generation call. Every outcome is reported through the notifier;
    /// nothing is returned to the caller.
    pub async fn generate(&self, prompt: &str, overrides: Option<SettingsPatch>) {
        let text = prompt.trim();
        if text.is_empty() {
            let err = GenerationError::EmptyPrompt;
            warn!("⚠️ Rejected generation: {}", err);
            self.notifier.notify_error(&err.user_message());
            return;
        }

        let overrides = overrides.unwrap_or_default();
        let effective = self.settings().merged(&overrides);
        let _pending = PendingGuard::start(&self.inner, effective.number_of_images);

        info!("🚀 Generating {} image(s) for prompt: {}", effective.number_of_images, text);

        match self.request_artifact(text, &effective, overrides.seed.flatten()).await {
            Ok(artifact) => {
                info!("✅ Generated artifact {} (seed {})", artifact.id, artifact.seed);
                self.inner.write().state.artifacts.insert(0, artifact);
                self.notifier.notify_success(&success_message(effective.number_of_images));
            }
            Err(e) => {
                error!("❌ Error generating images: {}", e);
                self.notifier.notify_error(&e.user_message());
            }
        }
    }

    async fn request_artifact(&self, text: &str, effective: &Settings, override_seed: Option<u64>) -> Result<GeneratedArtifact, GenerationError> {
        let request = GenerateRequest::new(text, effective);
        let response = self.transport.generate(request).await?;

        // one artifact per call, whatever number_of_images asked for
        let seed = override_seed.unwrap_or_else(random_seed);
        let created_at = Utc::now();
        let ordinal = self.next_ordinal.fetch_add(1, Ordering::Relaxed);
        Ok(GeneratedArtifact {
            id: format!("img-{}-{}", created_at.timestamp_millis(), ordinal),
            url: response.image_url,
            prompt: text.to_string(),
            seed,
            created_at,
        })
    }
}

fn random_seed() -> u64 {
    rand::thread_rng().gen_range(0..MAX_RANDOM_SEED)
}

fn success_message(number_of_images: u32) -> String {
    format!("Generated {} image{}", number_of_images, if number_of_images > 1 { "s" } else { "" })
}
