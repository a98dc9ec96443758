use crate::error::Result;
use crate::types::{CatalogEntry, Channel, RankedHit};

/// Read-only view of a catalog backend.
///
/// `query_text` runs a token-based relevance query over one indexed field and
/// returns at most `limit` documents with the backend's score (higher is
/// better). Which documents make the cut follows score descending, then `id`
/// ascending, so equal scores at the limit keep the smallest ids.
/// `enumerate` yields every document for in-process scoring.
pub trait CatalogStore: Send + Sync {
    fn query_text(&self, field: &str, term: &str, limit: usize) -> anyhow::Result<Vec<(CatalogEntry, f32)>>;
    fn enumerate(&self) -> anyhow::Result<Vec<CatalogEntry>>;
}

/// A ranked retrieval channel. Implementations return hits already sorted by
/// [`RankedHit::rank_order`].
pub trait RankedRetriever: Send + Sync {
    fn channel(&self) -> Channel;
    fn retrieve(&self, formatted_query: &str) -> Result<Vec<RankedHit>>;
}
