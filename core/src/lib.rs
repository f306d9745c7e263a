// src/lib.rs

//! Catalog: an ASYNC coordinator for a remotely stored product catalog.
//!
//! The crate keeps an in-memory product list consistent with a remote
//! document store and a blob store, with:
//!  - CRUD operations that mutate the local list only after the remote call succeeds.
//!  - Photo upload/delete with a shared "upload in progress" state.
//!  - A staged selection for delete confirmations.
//!  - A form-state editor for the create/edit screen.
//!  - A push-messaging bootstrap that requests permission and logs messages.
//!
//! The remote collaborators are traits (`DocumentStore`, `BlobStore`,
//! `PushMessaging`); in-memory implementations are included for tests, demos
//! and local development.

pub mod blob;
pub mod catalog;
pub mod core;
pub mod error;
pub mod notify;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::core::config::CatalogConfig;
pub use crate::core::product::{parse_price, Product};
pub use crate::core::shared_state::SharedState;

pub use crate::catalog::coordinator::{CatalogState, ProductCatalog};
pub use crate::catalog::editor::ProductEditor;

pub use crate::store::memory::InMemoryDocumentStore;
pub use crate::store::{Document, DocumentStore, SortDirection};

pub use crate::blob::memory::InMemoryBlobStore;
pub use crate::blob::{object_name_from_path, BlobHandle, BlobStore};

pub use crate::notify::memory::InMemoryPushMessaging;
pub use crate::notify::{register_message_logging, AuthorizationStatus, PushMessaging, RemoteMessage};

pub use crate::error::{CatalogError, CatalogResult};

/*
    Typical wiring:
    1. Build the collaborators (a real backend client, or the in-memory ones).
    2. `let catalog = ProductCatalog::new(store, blobs, CatalogConfig::default());`
    3. `catalog.start().await` once at startup to load the list.
    4. Hand clones of `catalog` to whatever renders the list and the editor;
       they read `catalog.products()` / `catalog.is_uploading()` after every
       awaited operation.
*/
