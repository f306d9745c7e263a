// catalog/src/notify/memory.rs

use super::{AuthorizationStatus, MessageHandler, PushMessaging, RemoteMessage};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A scriptable `PushMessaging`: the granted status and the launch
/// notification are set up front, messages are pushed in with `deliver` and
/// `open`.
pub struct InMemoryPushMessaging {
  status: AuthorizationStatus,
  initial: Mutex<Option<RemoteMessage>>,
  message_handlers: Mutex<Vec<MessageHandler>>,
  opened_handlers: Mutex<Vec<MessageHandler>>,
  permission_requests: AtomicUsize,
}

impl InMemoryPushMessaging {
  pub fn new(status: AuthorizationStatus) -> Self {
    Self {
      status,
      initial: Mutex::new(None),
      message_handlers: Mutex::new(Vec::new()),
      opened_handlers: Mutex::new(Vec::new()),
      permission_requests: AtomicUsize::new(0),
    }
  }

  pub fn with_initial_notification(self, message: RemoteMessage) -> Self {
    *self.initial.lock() = Some(message);
    self
  }

  pub fn permission_requests(&self) -> usize {
    self.permission_requests.load(Ordering::SeqCst)
  }

  pub fn handler_counts(&self) -> (usize, usize) {
    (self.message_handlers.lock().len(), self.opened_handlers.lock().len())
  }

  /// Runs every foreground handler with `message`, in registration order.
  pub async fn deliver(&self, message: RemoteMessage) {
    let handlers: Vec<MessageHandler> = self.message_handlers.lock().clone();
    for handler in handlers {
      handler(message.clone()).await;
    }
  }

  /// Runs every notification-opened handler with `message`.
  pub async fn open(&self, message: RemoteMessage) {
    let handlers: Vec<MessageHandler> = self.opened_handlers.lock().clone();
    for handler in handlers {
      handler(message.clone()).await;
    }
  }
}

impl Default for InMemoryPushMessaging {
  fn default() -> Self {
    Self::new(AuthorizationStatus::Authorized)
  }
}

#[async_trait]
impl PushMessaging for InMemoryPushMessaging {
  async fn request_permission(&self) -> anyhow::Result<AuthorizationStatus> {
    self.permission_requests.fetch_add(1, Ordering::SeqCst);
    Ok(self.status)
  }

  fn on_message(&self, handler: MessageHandler) {
    self.message_handlers.lock().push(handler);
  }

  fn on_notification_opened(&self, handler: MessageHandler) {
    self.opened_handlers.lock().push(handler);
  }

  async fn initial_notification(&self) -> anyhow::Result<Option<RemoteMessage>> {
    // Reported once, like a launch intent.
    Ok(self.initial.lock().take())
  }
}
