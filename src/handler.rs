use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use lambda_runtime::tracing::{debug, info};
use lambda_runtime::{Context, Diagnostic, LambdaEvent};
use serde_json::Value;

use crate::models::{EntryPoint, NormalizeError};
use crate::normalizer::EventNormalizer;

/// Boxed future returned by [`service`] adapters.
pub type HandlerFuture<R> = Pin<Box<dyn Future<Output = Result<R, Diagnostic>> + Send>>;

/// Wraps a synchronous business function so it receives normalized parameters.
///
/// The wrapped function keeps the two-argument contract `(params, context)`;
/// the context is always `None` at this layer.
///
/// # Errors
///
/// The returned closure fails only when the normalizer runs with a strict
/// record policy and the event cannot be decoded.
#[must_use]
pub fn wrap<F, R>(
    normalizer: Arc<EventNormalizer>,
    entry: EntryPoint,
    handler: F,
) -> impl Fn(Value) -> Result<R, NormalizeError>
where
    F: Fn(Value, Option<Context>) -> R,
{
    move |event| {
        normalizer
            .normalize(entry, event)
            .map(|params| handler(params, None))
    }
}

/// Wraps an async business function into a closure usable with `service_fn`.
///
/// Strict-mode normalization failures become a `Diagnostic` whose
/// `error_type` names the failure, and the business function is not called.
#[must_use]
pub fn service<F, Fut, R>(
    normalizer: Arc<EventNormalizer>,
    entry: EntryPoint,
    handler: F,
) -> impl Fn(LambdaEvent<Value>) -> HandlerFuture<R> + Clone
where
    F: Fn(Value, Option<Context>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<R, Diagnostic>> + Send + 'static,
    R: 'static,
{
    move |event: LambdaEvent<Value>| -> HandlerFuture<R> {
        let normalizer = Arc::clone(&normalizer);
        let handler = handler.clone();
        Box::pin(async move {
            let (payload, context) = event.into_parts();
            debug!(request_id = %context.request_id, "Normalizing invocation");
            let params = normalizer.normalize(entry, payload)?;
            handler(params, None).await
        })
    }
}

/// Business function used by the deployed binary: logs the normalized
/// parameters and returns them as the invocation result.
/// Logs the full payload when `RUST_LOG=debug/trace`, only the key count otherwise.
///
/// # Errors
///
/// Never fails; the `Result` matches the handler contract.
#[allow(clippy::unused_async)]
pub async fn echo_handler(params: Value, _context: Option<Context>) -> Result<Value, Diagnostic> {
    let keys = params.as_object().map_or(0, serde_json::Map::len);
    info!(keys, "Received normalized parameters");
    debug!(?params, "Normalized parameters");
    Ok(params)
}
