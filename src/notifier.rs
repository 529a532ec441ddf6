use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// User feedback sink. Fire-and-forget: nothing the notifier does is observed by the caller.
pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str);
    fn notify_error(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_success(&self, message: &str) {
        info!("✅ {}", message);
    }

    fn notify_error(&self, message: &str) {
        warn!("⚠️ {}", message);
    }
}

/// Forwards notifications to a rendering layer (toasts) over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, UnboundedReceiver<Notification>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, notification: Notification) {
        // receiver gone means nobody is rendering toasts any more
        let _ = self.tx.send(notification);
    }
}

impl Notifier for ChannelNotifier {
    fn notify_success(&self, message: &str) {
        self.send(Notification::Success(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        self.send(Notification::Error(message.to_string()));
    }
}
