use std::sync::Arc;

use shared::{
    domain::{DetailRecord, IndexEntry},
    error::{ErrorCode, NetworkError},
};

/// Progress of a load session, applied in order by the state owner.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    IndexLoaded {
        entries: Vec<IndexEntry>,
    },
    BatchLoaded {
        batch: usize,
        records: Vec<Arc<DetailRecord>>,
        processed: usize,
        total: usize,
    },
    Completed,
    Failed {
        message: String,
        code: Option<ErrorCode>,
    },
    Cancelled,
}

impl LoadEvent {
    pub fn failed(err: &NetworkError) -> Self {
        LoadEvent::Failed {
            message: err.to_string(),
            code: Some(err.code()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LoadEvent::IndexLoaded { .. } => "index_loaded",
            LoadEvent::BatchLoaded { .. } => "batch_loaded",
            LoadEvent::Completed => "completed",
            LoadEvent::Failed { .. } => "failed",
            LoadEvent::Cancelled => "cancelled",
        }
    }
}
