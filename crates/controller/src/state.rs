use std::{collections::BTreeSet, sync::Arc};

use shared::{
    domain::{DetailRecord, IndexEntry, PageSize, Phase, SortDirection, SortKey, ViewMode},
    error::ErrorCode,
};

#[derive(Debug, Clone, Default)]
pub struct LoadState {
    pub index_entries: Vec<IndexEntry>,
    /// Accumulated in catalog order; never longer than `index_entries`.
    pub details: Vec<Arc<DetailRecord>>,
    /// Non-decreasing within a session.
    pub progress_percent: u8,
    pub phase: Phase,
    pub error_message: Option<String>,
    /// Classification of `error_message`; `None` for cancellation.
    pub error_code: Option<ErrorCode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub search_term: String,
    pub selected_categories: BTreeSet<String>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub current_page: usize,
    pub page_size: PageSize,
    pub view_mode: ViewMode,
}
