//! Two-phase catalog load: one index request, then sequential batches of
//! concurrent detail requests. Results are reported as [`LoadEvent`]s.

use std::sync::Arc;

use client_core::CatalogSource;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

use crate::{events::LoadEvent, LoaderSettings};

pub const CANCELLED_MESSAGE: &str = "load cancelled";

#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        let (_, signal) = cancellation();
        signal
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}

pub fn cancellation() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx: Arc::new(tx) }, CancelSignal { rx })
}

/// Rounded share of processed entries, capped at 100. An empty catalog counts as done.
pub fn progress_percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let rounded = (processed.min(total) * 100 + total / 2) / total;
    rounded.min(100) as u8
}

/// Drives one load session, handing every event to `emit` in order.
///
/// The cancellation signal is checked before the index request and between
/// batches; an in-flight batch is always allowed to finish.
pub async fn run_load<S, F>(
    source: &S,
    settings: &LoaderSettings,
    cancel: &CancelSignal,
    mut emit: F,
) where
    S: CatalogSource + ?Sized,
    F: FnMut(LoadEvent),
{
    if cancel.is_cancelled() {
        emit(LoadEvent::Cancelled);
        return;
    }

    let entries = match source.fetch_index(settings.catalog_size).await {
        Ok(entries) => entries,
        Err(err) => {
            error!(limit = settings.catalog_size, error = %err, "catalog: index load failed");
            emit(LoadEvent::failed(&err));
            return;
        }
    };

    let total = entries.len();
    let batch_size = settings.batch_size.max(1);
    info!(
        total,
        batches = total.div_ceil(batch_size),
        batch_size,
        "catalog: index loaded"
    );
    emit(LoadEvent::IndexLoaded {
        entries: entries.clone(),
    });

    let mut processed = 0;
    for (batch, chunk) in entries.chunks(batch_size).enumerate() {
        if cancel.is_cancelled() {
            warn!(batch, processed, total, "catalog: load cancelled between batches");
            emit(LoadEvent::Cancelled);
            return;
        }

        let records = match source.fetch_batch(chunk).await {
            Ok(records) => records,
            Err(err) => {
                error!(batch, error = %err, "catalog: batch orchestration failed; halting load");
                emit(LoadEvent::failed(&err));
                return;
            }
        };

        processed += chunk.len();
        let dropped = chunk.len().saturating_sub(records.len());
        debug!(
            batch,
            loaded = records.len(),
            dropped,
            progress = progress_percent(processed, total),
            "catalog: batch loaded"
        );
        emit(LoadEvent::BatchLoaded {
            batch,
            records,
            processed,
            total,
        });
    }

    info!(total, "catalog: load complete");
    emit(LoadEvent::Completed);
}

pub struct LoadTask {
    pub events: mpsc::UnboundedReceiver<LoadEvent>,
    pub cancel: CancelHandle,
    pub handle: JoinHandle<()>,
}

/// Runs [`run_load`] on the tokio runtime and streams its events.
pub fn spawn_load<S>(source: Arc<S>, settings: LoaderSettings) -> LoadTask
where
    S: CatalogSource + ?Sized + 'static,
{
    let (events_tx, events) = mpsc::unbounded_channel();
    let (cancel, signal) = cancellation();
    let handle = tokio::spawn(async move {
        run_load(source.as_ref(), &settings, &signal, move |event| {
            if events_tx.send(event).is_err() {
                debug!("catalog: load event receiver dropped");
            }
        })
        .await;
    });

    LoadTask {
        events,
        cancel,
        handle,
    }
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
