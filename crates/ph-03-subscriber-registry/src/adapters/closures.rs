//! Closure-backed handlers and providers.
//!
//! ```rust,ignore
//! registry.register_event_handler(
//!     "invoice.*",
//!     handler_fn("send-receipt", |event| async move {
//!         mailer.send_receipt(event.id()).await.map_err(|e| e.to_string().into())
//!     }),
//! )?;
//! ```

use crate::ports::outbound::{EventHandler, MetadataProvider};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use shared_types::{Attributes, Event, HandlerError, MetadataContext, ProviderError};
use std::future::Future;
use std::sync::Arc;

/// Event handler wrapping an async closure that receives an owned `Event`.
pub struct FnEventHandler {
    name: String,
    func: Box<dyn Fn(Event) -> BoxFuture<'static, Result<(), HandlerError>> + Send + Sync>,
}

#[async_trait]
impl EventHandler for FnEventHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, event: &Event) -> Result<(), HandlerError> {
        (self.func)(event.clone()).await
    }
}

/// Builds a shared handler from an async closure.
pub fn handler_fn<F, Fut>(name: impl Into<String>, func: F) -> Arc<dyn EventHandler>
where
    F: Fn(Event) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HandlerError>> + Send + 'static,
{
    Arc::new(FnEventHandler {
        name: name.into(),
        func: Box::new(move |event| func(event).boxed()),
    })
}

/// Metadata provider wrapping a plain closure.
pub struct FnMetadataProvider<F> {
    name: String,
    func: F,
}

impl<F> MetadataProvider for FnMetadataProvider<F>
where
    F: Fn(&str, &MetadataContext) -> Result<Attributes, ProviderError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn contribute(
        &self,
        object_type: &str,
        context: &MetadataContext,
    ) -> Result<Attributes, ProviderError> {
        (self.func)(object_type, context)
    }
}

/// Builds a shared provider from a closure.
pub fn provider_fn<F>(name: impl Into<String>, func: F) -> Arc<dyn MetadataProvider>
where
    F: Fn(&str, &MetadataContext) -> Result<Attributes, ProviderError> + Send + Sync + 'static,
{
    Arc::new(FnMetadataProvider {
        name: name.into(),
        func,
    })
}
