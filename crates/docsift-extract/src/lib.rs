//! # Docsift Extract
//!
//! Storage-event driven text and metadata extraction.
//!
//! A storage notification names a newly written object. The
//! [`ExtractionHandler`] decodes its key, skips its own `.extract` output,
//! fetches the object, runs a [`ContentExtractor`] over the bytes and writes
//! a JSON extract next to the source as `<key>.extract`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use docsift_extract::{
//!     AutoDetectExtractor, ExtractionHandler, HandlerConfig, InvocationContext, MemoryStore,
//!     NotificationEvent,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(MemoryStore::new());
//!     store.insert("bucket", "notes/read me.txt", "hello").await;
//!
//!     let handler = ExtractionHandler::new(
//!         HandlerConfig::default(),
//!         store.clone(),
//!         Arc::new(AutoDetectExtractor::default()),
//!     );
//!     let event = NotificationEvent::single("bucket", "notes/read+me.txt");
//!     let status = handler.handle(&event, &InvocationContext::default()).await?;
//!     println!("{}", status);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌────────────┐   ┌─────────────┐   ┌──────────────┐
//! │ Notification │ ─►│ Key decode │ ─►│ ObjectStore │ ─►│  Extractor   │
//! │   (event)    │   │ + guard    │   │    get      │   │ (auto/pdf/..)│
//! └──────────────┘   └────────────┘   └─────────────┘   └──────────────┘
//!                                                              │
//!                                                              ▼
//!                    ┌─────────────┐   ┌────────────────────────────────┐
//!                    │ ObjectStore │ ◄─│ ExtractionResult → JSON        │
//!                    │ put .extract│   │ (success or failure envelope)  │
//!                    └─────────────┘   └────────────────────────────────┘
//! ```

pub mod auto;
pub mod config;
pub mod detect;
pub mod error;
pub mod event;
pub mod handler;
pub mod key;
pub mod metadata;
pub mod result;
pub mod store;
pub mod text;

#[cfg(feature = "pdf")]
pub mod pdf;

#[cfg(feature = "html")]
pub mod html;

#[cfg(feature = "s3")]
pub mod s3;

pub use auto::AutoDetectExtractor;
pub use config::{DestinationPolicy, ExtractorConfig, HandlerConfig};
pub use error::{ExtractError, HandlerError, Result, StoreError};
pub use event::{NotificationEvent, NotificationRecord};
pub use handler::{ExtractionHandler, HandleStatus, InvocationContext};
pub use metadata::Metadata;
pub use result::{ExtractEnvelope, Extraction, ExtractionResult};
pub use store::{MemoryStore, ObjectBody, ObjectStore};
pub use text::PlainTextExtractor;

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

#[cfg(feature = "html")]
pub use html::HtmlExtractor;

#[cfg(feature = "s3")]
pub use s3::S3Store;

/// Common trait for all extractors
#[async_trait::async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Extract text and metadata from the full source bytes
    async fn extract(&self, bytes: &[u8]) -> Result<Extraction>;

    /// Name recorded in logs
    fn name(&self) -> &'static str;
}
