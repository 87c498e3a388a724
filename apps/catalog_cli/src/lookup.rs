//! Detail lookups that miss the loaded rows run off the prompt loop.

use std::sync::Arc;

use client_core::CatalogSource;
use controller::lookup_detail;
use tokio::task::{AbortHandle, JoinSet};
use tracing::debug;

use crate::render::{render_detail, render_network_error};

/// Fetches `key` through the source's cache on a task in `lookups`, which
/// yields the rendered detail view or error line.
pub fn spawn_lookup<S>(lookups: &mut JoinSet<String>, source: Arc<S>, key: String) -> AbortHandle
where
    S: CatalogSource + ?Sized + 'static,
{
    lookups.spawn(async move {
        debug!(key = %key, "catalog: detail lookup started");
        match lookup_detail(source.as_ref(), &key).await {
            Ok(row) => render_detail(&row),
            Err(err) => render_network_error(&err),
        }
    })
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
