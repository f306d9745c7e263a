// catalog/src/notify/mod.rs

//! Push messaging: the permission prompt and message logging that run when
//! the application starts. Nothing here touches the product list.

pub mod memory;

use crate::error::{CatalogError, CatalogResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationStatus {
  NotDetermined,
  Denied,
  Authorized,
  /// Quiet delivery granted without an explicit prompt.
  Provisional,
}

impl AuthorizationStatus {
  pub fn is_enabled(self) -> bool {
    matches!(self, AuthorizationStatus::Authorized | AuthorizationStatus::Provisional)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub title: Option<String>,
  pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMessage {
  pub message_id: Option<String>,
  #[serde(default)]
  pub data: BTreeMap<String, String>,
  pub notification: Option<Notification>,
}

pub type HandlerFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// An asynchronous callback invoked for each delivered message.
pub type MessageHandler = Arc<dyn Fn(RemoteMessage) -> HandlerFuture + Send + Sync>;

#[async_trait]
pub trait PushMessaging: Send + Sync + 'static {
  async fn request_permission(&self) -> anyhow::Result<AuthorizationStatus>;

  /// Called for messages that arrive while the app is in the foreground.
  fn on_message(&self, handler: MessageHandler);

  /// Called when the user opens the app from a notification while it runs in the background.
  fn on_notification_opened(&self, handler: MessageHandler);

  /// The notification that launched the app from a quit state, if any.
  async fn initial_notification(&self) -> anyhow::Result<Option<RemoteMessage>>;
}

fn as_json(message: &RemoteMessage) -> String {
  serde_json::to_string(message).unwrap_or_else(|_| format!("{:?}", message))
}

/// Requests notification permission and installs handlers that log every
/// incoming and opened message. Returns the granted status.
#[instrument(name = "notify::register_message_logging", skip_all, err(Display))]
pub async fn register_message_logging(messaging: &dyn PushMessaging) -> CatalogResult<AuthorizationStatus> {
  messaging.on_message(Arc::new(|message: RemoteMessage| -> HandlerFuture {
    Box::pin(async move {
      info!(message = %as_json(&message), "A new push message arrived.");
    })
  }));

  messaging.on_notification_opened(Arc::new(|message: RemoteMessage| -> HandlerFuture {
    Box::pin(async move {
      info!(message = %as_json(&message), "App opened from a notification.");
    })
  }));

  let status = messaging
    .request_permission()
    .await
    .map_err(|source| CatalogError::Messaging { source })?;
  if status.is_enabled() {
    info!(?status, "Push notification authorization granted.");
  }

  if let Some(initial) = messaging
    .initial_notification()
    .await
    .map_err(|source| CatalogError::Messaging { source })?
  {
    info!(notification = ?initial.notification, "Notification caused app to open from quit state.");
  }

  Ok(status)
}
