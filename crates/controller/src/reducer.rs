//! Single owner of load and view state. Every accepted mutation is followed by
//! an explicit recompute of the derived row projection.

use std::collections::BTreeSet;

use catalog_view::{
    filter_by_categories, filter_rows, paginate, sort_rows, to_display_row, total_pages,
};
use client_core::CatalogSource;
use shared::{
    domain::{DisplayRow, PageSize, Phase, SortDirection, SortKey, ViewMode},
    error::ErrorCode,
};
use tracing::{debug, warn};

use crate::{
    events::LoadEvent,
    loader::{progress_percent, run_load, CancelSignal, CANCELLED_MESSAGE},
    state::{LoadState, ViewState},
    LoaderSettings,
};

/// Read-only view handed to renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub rows: Vec<DisplayRow>,
    pub loading: bool,
    pub error: Option<String>,
    pub error_code: Option<ErrorCode>,
    pub progress_percent: u8,
    pub phase: Phase,
    pub search_term: String,
    pub selected_categories: BTreeSet<String>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub current_page: usize,
    pub page_size: usize,
    pub view_mode: ViewMode,
    pub total_pages: usize,
    pub total_items: usize,
}

#[derive(Debug, Default)]
pub struct Catalog {
    load: LoadState,
    view: ViewState,
    /// Filtered and sorted rows, before pagination.
    derived: Vec<DisplayRow>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: PageSize) -> Self {
        let mut catalog = Self::new();
        catalog.view.page_size = page_size;
        catalog
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    pub fn phase(&self) -> Phase {
        self.load.phase
    }

    /// Every row that passes the current search and category filters, sorted.
    pub fn filtered_rows(&self) -> &[DisplayRow] {
        &self.derived
    }

    pub fn page_rows(&self) -> &[DisplayRow] {
        paginate(&self.derived, self.view.current_page, self.view.page_size.get())
    }

    pub fn total_items(&self) -> usize {
        self.derived.len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.derived.len(), self.view.page_size.get())
    }

    /// Loaded row for `id`, regardless of the active filters.
    pub fn detail(&self, id: u32) -> Option<DisplayRow> {
        self.load
            .details
            .iter()
            .find(|record| record.id == id)
            .map(to_display_row)
    }

    /// Resolves a numeric id or an index name against the loaded rows.
    pub fn find_detail(&self, key: &str) -> Option<DisplayRow> {
        let id = key.parse::<u32>().ok().or_else(|| {
            self.load
                .index_entries
                .iter()
                .find(|entry| entry.name.eq_ignore_ascii_case(key))
                .and_then(|entry| entry.numeric_id())
        })?;
        self.detail(id)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            rows: self.page_rows().to_vec(),
            loading: !self.load.phase.is_terminal(),
            error: self.load.error_message.clone(),
            error_code: self.load.error_code,
            progress_percent: self.load.progress_percent,
            phase: self.load.phase,
            search_term: self.view.search_term.clone(),
            selected_categories: self.view.selected_categories.clone(),
            sort_key: self.view.sort_key,
            sort_direction: self.view.sort_direction,
            current_page: self.view.current_page,
            page_size: self.view.page_size.get(),
            view_mode: self.view.view_mode,
            total_pages: self.total_pages(),
            total_items: self.total_items(),
        }
    }

    /// `Idle -> LoadingIndex`. Returns false if a session already started.
    pub fn begin_load(&mut self) -> bool {
        if self.load.phase != Phase::Idle {
            warn!(phase = ?self.load.phase, "catalog: load already started");
            return false;
        }
        self.load.phase = Phase::LoadingIndex;
        self.load.error_message = None;
        self.load.error_code = None;
        true
    }

    /// Runs a whole load session inline, applying events as they arrive.
    pub async fn load<S>(&mut self, source: &S, settings: &LoaderSettings) -> Phase
    where
        S: CatalogSource + ?Sized,
    {
        if !self.begin_load() {
            return self.load.phase;
        }
        run_load(source, settings, &CancelSignal::never(), |event| {
            self.apply(event);
        })
        .await;
        self.load.phase
    }

    /// Applies one load event. Events that do not fit the current phase are
    /// ignored and reported as `false`.
    pub fn apply(&mut self, event: LoadEvent) -> bool {
        let name = event.name();
        let accepted = match (self.load.phase, event) {
            (Phase::LoadingIndex, LoadEvent::IndexLoaded { entries }) => {
                self.load.index_entries = entries;
                self.load.progress_percent = 0;
                self.load.phase = Phase::LoadingDetails;
                true
            }
            (
                Phase::LoadingDetails,
                LoadEvent::BatchLoaded {
                    records,
                    processed,
                    total,
                    ..
                },
            ) => {
                let room = self
                    .load
                    .index_entries
                    .len()
                    .saturating_sub(self.load.details.len());
                if records.len() > room {
                    warn!(
                        extra = records.len() - room,
                        "catalog: batch exceeds index size; truncating"
                    );
                }
                self.load.details.extend(records.into_iter().take(room));
                self.load.progress_percent = self
                    .load
                    .progress_percent
                    .max(progress_percent(processed, total));
                true
            }
            (Phase::LoadingDetails, LoadEvent::Completed) => {
                self.load.progress_percent = 100;
                self.load.phase = Phase::Ready;
                true
            }
            (Phase::LoadingIndex | Phase::LoadingDetails, LoadEvent::Failed { message, code }) => {
                self.fail(message, code);
                true
            }
            (Phase::LoadingIndex | Phase::LoadingDetails, LoadEvent::Cancelled) => {
                self.fail(CANCELLED_MESSAGE.to_string(), None);
                true
            }
            (phase, _) => {
                warn!(?phase, event = name, "catalog: ignoring load event");
                false
            }
        };

        if accepted {
            debug!(
                event = name,
                phase = ?self.load.phase,
                details = self.load.details.len(),
                progress = self.load.progress_percent,
                "catalog: load event applied"
            );
            self.recompute();
        }
        accepted
    }

    fn fail(&mut self, message: String, code: Option<ErrorCode>) {
        self.load.phase = Phase::Failed;
        self.load.error_message = Some(message);
        self.load.error_code = code;
    }

    pub fn search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if self.view.search_term == term {
            return false;
        }
        self.view.search_term = term;
        self.view.current_page = 0;
        self.recompute();
        true
    }

    pub fn set_categories(&mut self, categories: BTreeSet<String>) -> bool {
        if self.view.selected_categories == categories {
            return false;
        }
        self.view.selected_categories = categories;
        self.view.current_page = 0;
        self.recompute();
        true
    }

    pub fn toggle_category(&mut self, category: &str) -> bool {
        let mut categories = self.view.selected_categories.clone();
        if !categories.remove(category) {
            categories.insert(category.to_string());
        }
        self.set_categories(categories)
    }

    /// Same key flips direction; a new key sorts ascending.
    pub fn sort(&mut self, key: SortKey) -> bool {
        if self.view.sort_key == key {
            self.view.sort_direction = self.view.sort_direction.flipped();
        } else {
            self.view.sort_key = key;
            self.view.sort_direction = SortDirection::Ascending;
        }
        self.view.current_page = 0;
        self.recompute();
        true
    }

    /// Clamps to `[0, total_pages - 1]`, or 0 when nothing matches.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let last = self.total_pages().saturating_sub(1);
        let page = page.min(last);
        if self.view.current_page == page {
            return false;
        }
        self.view.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.view.current_page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> bool {
        self.go_to_page(self.view.current_page.saturating_sub(1))
    }

    pub fn set_page_size(&mut self, page_size: PageSize) -> bool {
        if self.view.page_size == page_size {
            return false;
        }
        self.view.page_size = page_size;
        self.view.current_page = 0;
        true
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) -> bool {
        if self.view.view_mode == view_mode {
            return false;
        }
        self.view.view_mode = view_mode;
        true
    }

    fn recompute(&mut self) {
        let rows = self.load.details.iter().map(to_display_row).collect();
        let rows = filter_rows(rows, &self.view.search_term);
        let rows = filter_by_categories(rows, &self.view.selected_categories);
        self.derived = sort_rows(rows, self.view.sort_key, self.view.sort_direction);

        let last = self.total_pages().saturating_sub(1);
        if self.view.current_page > last {
            self.view.current_page = last;
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
