// tests/notification_tests.rs
mod common;

use async_trait::async_trait;
use catalog::notify::{MessageHandler, Notification};
use catalog::{register_message_logging, AuthorizationStatus, CatalogError, InMemoryPushMessaging, PushMessaging, RemoteMessage};
use common::setup_tracing;
use std::collections::BTreeMap;

fn sample_message(id: &str) -> RemoteMessage {
  let mut data = BTreeMap::new();
  data.insert("type".to_string(), "ProductoScreen".to_string());
  RemoteMessage {
    message_id: Some(id.to_string()),
    data,
    notification: Some(Notification {
      title: Some("Nuevo producto".to_string()),
      body: Some("Pen Deluxe".to_string()),
    }),
  }
}

#[tokio::test]
async fn test_bootstrap_requests_permission_and_installs_handlers() {
  setup_tracing();
  let messaging = InMemoryPushMessaging::new(AuthorizationStatus::Authorized);

  let status = register_message_logging(&messaging).await.unwrap();
  assert_eq!(status, AuthorizationStatus::Authorized);
  assert_eq!(messaging.permission_requests(), 1);
  assert_eq!(messaging.handler_counts(), (1, 1));

  // Installed handlers only log; delivering must simply complete.
  messaging.deliver(sample_message("m-1")).await;
  messaging.open(sample_message("m-2")).await;
}

#[tokio::test]
async fn test_bootstrap_reports_denied_status() {
  setup_tracing();
  let messaging = InMemoryPushMessaging::new(AuthorizationStatus::Denied);
  let status = register_message_logging(&messaging).await.unwrap();
  assert_eq!(status, AuthorizationStatus::Denied);
  assert!(!status.is_enabled());
  assert!(AuthorizationStatus::Provisional.is_enabled());
}

#[tokio::test]
async fn test_initial_notification_is_consumed_once() {
  setup_tracing();
  let messaging =
    InMemoryPushMessaging::new(AuthorizationStatus::Provisional).with_initial_notification(sample_message("launch"));

  register_message_logging(&messaging).await.unwrap();
  assert!(messaging.initial_notification().await.unwrap().is_none());
}

struct BrokenMessaging;

#[async_trait]
impl PushMessaging for BrokenMessaging {
  async fn request_permission(&self) -> anyhow::Result<AuthorizationStatus> {
    anyhow::bail!("messaging service unavailable")
  }

  fn on_message(&self, _handler: MessageHandler) {}

  fn on_notification_opened(&self, _handler: MessageHandler) {}

  async fn initial_notification(&self) -> anyhow::Result<Option<RemoteMessage>> {
    Ok(None)
  }
}

#[tokio::test]
async fn test_bootstrap_surfaces_messaging_failure() {
  setup_tracing();
  let err = register_message_logging(&BrokenMessaging).await.unwrap_err();
  assert!(matches!(err, CatalogError::Messaging { .. }));
  assert!(err.to_string().contains("Push messaging failed"));
}
