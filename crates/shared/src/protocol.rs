use serde::{Deserialize, Serialize};

use crate::domain::IndexEntry;

/// Body of `GET {base}/{resource}?limit=N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexResponse {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<IndexEntry>,
}
