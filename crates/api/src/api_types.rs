use serde::Deserialize;

/// Paginated document list as produced by the backend's paginate plugin.
///
/// Only `docs` is relied upon; the counters are informational and may be
/// absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDocs<T> {
    #[serde(alias = "data", alias = "items")]
    pub docs: Vec<T>,
    #[serde(default)]
    pub total_docs: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub has_next_page: Option<bool>,
}
