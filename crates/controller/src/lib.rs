//! Load orchestration and view state for the catalog: two-phase loading, load
//! events, user intents and the derived row projection.

use catalog_view::to_display_row;
use client_core::CatalogSource;
use shared::{domain::DisplayRow, error::NetworkError};

pub mod events;
pub mod loader;
pub mod reducer;
pub mod state;

pub use events::LoadEvent;
pub use loader::{cancellation, run_load, spawn_load, CancelHandle, CancelSignal, LoadTask};
pub use reducer::{Catalog, CatalogSnapshot};
pub use state::{LoadState, ViewState};

pub const DEFAULT_CATALOG_SIZE: usize = 151;
pub const DEFAULT_BATCH_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderSettings {
    pub catalog_size: usize,
    pub batch_size: usize,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            catalog_size: DEFAULT_CATALOG_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Single-record lookup for detail views, served from the source's cache when warm.
pub async fn lookup_detail<S>(source: &S, key: &str) -> Result<DisplayRow, NetworkError>
where
    S: CatalogSource + ?Sized,
{
    let record = source.fetch_detail(key).await?;
    Ok(to_display_row(&record))
}
