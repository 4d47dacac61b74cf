//! Lambda entry point for S3 upload notifications
//!
//! Every `ObjectCreated` notification produces a sibling `<key>.extract`
//! JSON object holding the text and metadata of the upload. The function
//! returns `"Success"` or `"Ignored"`; storage failures fail the invocation
//! so the platform's retry policy applies.

use aws_config::BehaviorVersion;
use docsift_extract::{
    AutoDetectExtractor, ExtractionHandler, HandlerConfig, InvocationContext, NotificationEvent,
    S3Store,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tracing::info;

async fn function_handler(
    handler: &ExtractionHandler,
    event: LambdaEvent<NotificationEvent>,
) -> Result<String, Error> {
    let ctx = InvocationContext::new(event.context.request_id.clone());
    let status = handler.handle(&event.payload, &ctx).await?;
    Ok(status.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // CloudWatch stamps each line, so skip our own timestamps
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .without_time()
        .init();

    let shared_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = Arc::new(S3Store::new(aws_sdk_s3::Client::new(&shared_config)));

    let config = HandlerConfig::default();
    info!(destination = ?config.destination, "Starting extraction function");

    let handler = Arc::new(ExtractionHandler::new(
        config,
        store,
        Arc::new(AutoDetectExtractor::default()),
    ));

    run(service_fn(|event: LambdaEvent<NotificationEvent>| {
        let handler = handler.clone();
        async move { function_handler(&handler, event).await }
    }))
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_extract::MemoryStore;
    use lambda_runtime::Context;
    use tokio_test::assert_ok;

    fn handler_with(store: Arc<MemoryStore>) -> ExtractionHandler {
        ExtractionHandler::new(
            HandlerConfig::default(),
            store,
            Arc::new(AutoDetectExtractor::default()),
        )
    }

    fn lambda_event(json: serde_json::Value) -> LambdaEvent<NotificationEvent> {
        LambdaEvent::new(serde_json::from_value(json).unwrap(), Context::default())
    }

    #[tokio::test]
    async fn test_function_handler_success() {
        let store = Arc::new(MemoryStore::new());
        store.insert("uploads", "docs/read me.txt", "hello lambda").await;
        let handler = handler_with(store.clone());

        let event = lambda_event(serde_json::json!({
            "Records": [{
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": "uploads" },
                    "object": { "key": "docs/read+me.txt", "size": 12 }
                }
            }]
        }));

        let status = assert_ok!(function_handler(&handler, event).await);
        assert_eq!(status, "Success");
        assert!(store
            .object("extracts.uploads", "docs/read me.txt.extract")
            .await
            .is_some());
    }

    #[tokio::test]
    async fn test_function_handler_ignores_extracts() {
        let store = Arc::new(MemoryStore::new());
        let handler = handler_with(store.clone());

        let event = lambda_event(serde_json::json!({
            "Records": [{
                "s3": {
                    "bucket": { "name": "uploads" },
                    "object": { "key": "docs/read+me.txt.extract" }
                }
            }]
        }));

        assert_eq!(function_handler(&handler, event).await.unwrap(), "Ignored");
        assert_eq!(store.get_count(), 0);
    }

    #[tokio::test]
    async fn test_function_handler_reports_storage_failure() {
        let handler = handler_with(Arc::new(MemoryStore::new()));

        let event = lambda_event(serde_json::json!({
            "Records": [{
                "s3": {
                    "bucket": { "name": "uploads" },
                    "object": { "key": "missing.pdf" }
                }
            }]
        }));

        let err = function_handler(&handler, event).await.unwrap_err();
        assert!(err.to_string().contains("missing.pdf"));
    }
}
