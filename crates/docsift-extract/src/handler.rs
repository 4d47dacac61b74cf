//! Event-to-extract pipeline

use crate::{
    config::HandlerConfig,
    error::{ExtractError, HandlerError},
    event::{NotificationEvent, NotificationRecord},
    key::{decode_object_key, extract_key, has_suffix_ignore_case},
    result::{resource_uri, Extraction, ExtractionResult},
    store::ObjectStore,
    ContentExtractor,
};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};

/// Per-invocation context supplied by the host runtime
#[derive(Debug, Clone)]
pub struct InvocationContext {
    /// Request id attached to every log line of the invocation
    pub request_id: String,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new("local")
    }
}

/// Outcome reported to the host runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleStatus {
    /// The key was an extract object and was skipped
    Ignored,
    /// An extract object was written
    Success,
}

impl HandleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandleStatus::Ignored => "Ignored",
            HandleStatus::Success => "Success",
        }
    }
}

impl fmt::Display for HandleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns storage notifications into `.extract` objects.
///
/// Holds only immutable configuration and shared capabilities, so one
/// handler may serve any number of invocations.
pub struct ExtractionHandler {
    config: HandlerConfig,
    store: Arc<dyn ObjectStore>,
    extractor: Arc<dyn ContentExtractor>,
}

impl ExtractionHandler {
    pub fn new(
        config: HandlerConfig,
        store: Arc<dyn ObjectStore>,
        extractor: Arc<dyn ContentExtractor>,
    ) -> Self {
        Self {
            config,
            store,
            extractor,
        }
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Process the first record of `event`.
    ///
    /// Extraction failures are written as failure envelopes; fetch, store
    /// and serialization failures are returned as errors and nothing is
    /// written.
    pub async fn handle(
        &self,
        event: &NotificationEvent,
        ctx: &InvocationContext,
    ) -> Result<HandleStatus, HandlerError> {
        let span = info_span!("handle", request_id = %ctx.request_id);
        async {
            let result = self.process(event).await;
            if let Err(ref e) = result {
                error!(error = %e, "Exception");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn process(&self, event: &NotificationEvent) -> Result<HandleStatus, HandlerError> {
        info!(records = event.records.len(), "Received storage event");
        let record = select_record(event)?;

        let container = record.container_name();
        let key = decode_object_key(record.raw_key());

        // Our own output lands in a watched location; never re-extract it.
        if has_suffix_ignore_case(&key, &self.config.extract_suffix) {
            info!(key = %key, "Ignoring extract file");
            return Ok(HandleStatus::Ignored);
        }

        let bytes = self.fetch(container, &key).await?;
        let result = self.assemble(container, &key, &bytes).await;
        drop(bytes);

        self.save(container, &key, &result).await?;
        Ok(HandleStatus::Success)
    }

    async fn fetch(&self, container: &str, key: &str) -> Result<Vec<u8>, HandlerError> {
        let body = self.store.get(container, key).await?;
        body.into_bytes().await.map_err(HandlerError::Read)
    }

    async fn assemble(&self, container: &str, key: &str, bytes: &[u8]) -> ExtractionResult {
        let file_path = resource_uri(&self.config.uri_scheme, container, key);

        info!(extractor = self.extractor.name(), bytes = bytes.len(), "Extracting text");
        match self.extract(key, bytes).await {
            Ok(extraction) => {
                info!(text_chars = extraction.text.chars().count(), "Extraction succeeded");
                ExtractionResult::success(file_path, extraction)
            }
            Err(e) => {
                warn!(error = %e, "Extraction failed");
                ExtractionResult::failure(file_path, e.to_string())
            }
        }
    }

    async fn extract(&self, key: &str, bytes: &[u8]) -> Result<Extraction, ExtractError> {
        // Synthetic transactions exercise the failure envelope end to end.
        if has_suffix_ignore_case(key, &self.config.failure_sentinel) {
            return Err(ExtractError::Synthetic(self.config.failure_message.clone()));
        }
        self.extractor.extract(bytes).await
    }

    async fn save(
        &self,
        container: &str,
        key: &str,
        result: &ExtractionResult,
    ) -> Result<(), HandlerError> {
        let payload = result.to_json()?.into_bytes();
        let content_length = payload.len() as u64;

        let destination = self.config.destination.container_for(container);
        let extract_key = extract_key(key, &self.config.extract_suffix);

        info!(
            container = %destination,
            key = %extract_key,
            bytes = content_length,
            success = result.is_success(),
            "Saving extract"
        );
        self.store
            .put(&destination, &extract_key, payload, content_length)
            .await?;
        Ok(())
    }
}

/// First record of the event; extra records are reported, not processed
fn select_record(event: &NotificationEvent) -> Result<&NotificationRecord, HandlerError> {
    let (first, rest) = event
        .records
        .split_first()
        .ok_or(HandlerError::EmptyEvent)?;

    if !rest.is_empty() {
        let skipped: Vec<&str> = rest.iter().map(NotificationRecord::raw_key).collect();
        warn!(
            skipped = rest.len(),
            keys = ?skipped,
            "Notification carried more than one record; only the first is processed"
        );
    }
    Ok(first)
}
