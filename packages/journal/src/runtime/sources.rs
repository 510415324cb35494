// packages/journal/src/runtime/sources.rs
//! Event source adapters
//!
//! Adapters sit between a host's native callbacks and the journal. They
//! translate typed notifications into labels and forward them to whatever
//! [`EventNotifier`] they are attached to. A detached adapter drops
//! notifications silently.

use crate::recording::recorder::EventNotifier;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::trace;

pub const BUTTON_CLICKED: &str = "Button Clicked";
pub const SCREEN_TOUCHED: &str = "Screen Touched";
pub const NETWORK_CONNECTED: &str = "Network connectivity changed. Connected.";
pub const NETWORK_DISCONNECTED: &str = "Network connectivity changed. Disconnected.";

/// Something that produces events once attached to a notifier
pub trait EventSource: Send + Sync {
    /// Short name for diagnostics
    fn name(&self) -> &'static str;

    /// Start forwarding notifications
    fn attach(&self, notifier: Arc<dyn EventNotifier>);

    /// Stop forwarding notifications
    fn detach(&self);

    /// Whether a notifier is currently attached
    fn is_attached(&self) -> bool;
}

/// Shared attach/detach slot used by the adapters
#[derive(Default)]
struct Attachment {
    notifier: RwLock<Option<Arc<dyn EventNotifier>>>,
}

impl Attachment {
    fn attach(&self, notifier: Arc<dyn EventNotifier>) {
        *self.notifier.write() = Some(notifier);
    }

    fn detach(&self) {
        self.notifier.write().take();
    }

    fn is_attached(&self) -> bool {
        self.notifier.read().is_some()
    }

    fn emit(&self, source: &'static str, label: &str) {
        match self.notifier.read().as_ref() {
            Some(notifier) => notifier.notify(label),
            None => trace!("{} detached, dropping {:?}", source, label),
        }
    }
}

/// Button click handler
#[derive(Default)]
pub struct ClickSource {
    slot: Attachment,
}

impl ClickSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clicked(&self) {
        self.slot.emit(self.name(), BUTTON_CLICKED);
    }
}

impl EventSource for ClickSource {
    fn name(&self) -> &'static str {
        "click"
    }

    fn attach(&self, notifier: Arc<dyn EventNotifier>) {
        self.slot.attach(notifier);
    }

    fn detach(&self) {
        self.slot.detach();
    }

    fn is_attached(&self) -> bool {
        self.slot.is_attached()
    }
}

/// Phase of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// Touch interception handler. Only the initial contact counts.
#[derive(Default)]
pub struct TouchSource {
    slot: Attachment,
}

impl TouchSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_touch(&self, action: TouchAction) {
        if action == TouchAction::Down {
            self.slot.emit(self.name(), SCREEN_TOUCHED);
        }
    }
}

impl EventSource for TouchSource {
    fn name(&self) -> &'static str {
        "touch"
    }

    fn attach(&self, notifier: Arc<dyn EventNotifier>) {
        self.slot.attach(notifier);
    }

    fn detach(&self) {
        self.slot.detach();
    }

    fn is_attached(&self) -> bool {
        self.slot.is_attached()
    }
}

/// Default-network connectivity listener
#[derive(Default)]
pub struct ConnectivitySource {
    slot: Attachment,
}

impl ConnectivitySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_available(&self) {
        self.slot.emit(self.name(), NETWORK_CONNECTED);
    }

    pub fn on_lost(&self) {
        self.slot.emit(self.name(), NETWORK_DISCONNECTED);
    }
}

impl EventSource for ConnectivitySource {
    fn name(&self) -> &'static str {
        "connectivity"
    }

    fn attach(&self, notifier: Arc<dyn EventNotifier>) {
        self.slot.attach(notifier);
    }

    fn detach(&self) {
        self.slot.detach();
    }

    fn is_attached(&self) -> bool {
        self.slot.is_attached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Captured(Mutex<Vec<String>>);

    impl EventNotifier for Captured {
        fn notify(&self, label: &str) {
            self.0.lock().push(label.to_string());
        }
    }

    #[test]
    fn test_adapters_emit_labels() {
        let captured = Arc::new(Captured::default());
        let click = ClickSource::new();
        let touch = TouchSource::new();
        let net = ConnectivitySource::new();
        for source in [&click as &dyn EventSource, &touch, &net] {
            source.attach(captured.clone());
        }

        click.clicked();
        touch.on_touch(TouchAction::Down);
        net.on_available();
        net.on_lost();

        assert_eq!(
            *captured.0.lock(),
            [BUTTON_CLICKED, SCREEN_TOUCHED, NETWORK_CONNECTED, NETWORK_DISCONNECTED]
        );
    }

    #[test]
    fn test_touch_ignores_non_down_actions() {
        let captured = Arc::new(Captured::default());
        let touch = TouchSource::new();
        touch.attach(captured.clone());

        touch.on_touch(TouchAction::Move);
        touch.on_touch(TouchAction::Up);
        touch.on_touch(TouchAction::Cancel);
        assert!(captured.0.lock().is_empty());

        touch.on_touch(TouchAction::Down);
        assert_eq!(captured.0.lock().len(), 1);
    }

    #[test]
    fn test_detached_source_drops_events() {
        let captured = Arc::new(Captured::default());
        let click = ClickSource::new();

        click.clicked();
        click.attach(captured.clone());
        assert!(click.is_attached());
        click.clicked();
        click.detach();
        click.clicked();

        assert!(!click.is_attached());
        assert_eq!(captured.0.lock().len(), 1);
    }
}
