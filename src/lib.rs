pub mod config;
pub mod controller;
pub mod models;
pub mod notifier;
pub mod settings;
pub mod transport;

pub use config::ClientConfig;
pub use controller::{GenerationController, GenerationError};
pub use models::{GeneratedArtifact, GenerationState, EXAMPLE_PROMPTS};
pub use notifier::{ChannelNotifier, Notification, Notifier, TracingNotifier};
pub use settings::{Settings, SettingsPatch, SIZE_PRESETS};
pub use transport::{HttpTransport, Transport, TransportError};
