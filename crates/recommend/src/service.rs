use crate::error::Result;
use crate::filter::is_degenerate;
use crate::format::Recommendation;
use advisor_catalog::Catalog;
use advisor_vector_index::TfidfIndex;

/// Raw candidates fetched per requested recommendation, so degenerate
/// entries can be filtered out without under-filling the final list.
pub const DEFAULT_OVER_FETCH: usize = 2;

/// Candidate pool handed to the text-generation service for re-ranking.
pub const RERANK_POOL: usize = 30;

/// Catalog and fitted index as one immutable unit, constructed once at
/// process start and passed by reference into the dialogue loop. Read-only
/// thereafter; concurrent searches need no synchronization.
pub struct RetrievalService {
    catalog: Catalog,
    index: TfidfIndex,
}

/// Final shortlist plus how many items were actually requested. Fewer
/// survivors than requested is not an error; the caller surfaces it as a
/// partial-results condition.
#[derive(Debug)]
pub struct RecommendationSet {
    pub items: Vec<Recommendation>,
    pub requested: usize,
}

impl RecommendationSet {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.items.len() < self.requested
    }
}

impl RetrievalService {
    #[must_use]
    pub fn new(catalog: Catalog, index: TfidfIndex) -> Self {
        Self { catalog, index }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Raw nearest neighbors as (combined text, distance) pairs, unfiltered.
    /// This is the feed for service-backed re-ranking.
    pub fn search_texts(&self, query: &str, k: usize) -> Result<Vec<(&str, f32)>> {
        let hits = self.index.search(query, k)?;
        Ok(hits
            .into_iter()
            .filter_map(|hit| {
                self.catalog
                    .get(hit.row)
                    .map(|item| (item.combined_text.as_str(), hit.distance))
            })
            .collect())
    }

    /// Retrieve, filter and format the final shortlist: over-fetch
    /// `top_n * over_fetch` candidates, drop degenerate entries, truncate to
    /// `top_n`, parse the survivors for display.
    pub fn recommend(
        &self,
        query: &str,
        top_n: usize,
        over_fetch: usize,
    ) -> Result<RecommendationSet> {
        let pool = top_n.saturating_mul(over_fetch.max(1)).max(top_n).max(1);
        let hits = self.index.search(query, pool)?;

        let items: Vec<Recommendation> = hits
            .into_iter()
            .filter_map(|hit| self.catalog.get(hit.row).map(|item| (item, hit.distance)))
            .filter(|(item, _)| !is_degenerate(&item.combined_text))
            .take(top_n)
            .map(|(item, distance)| Recommendation::from_stored(&item.combined_text, distance))
            .collect();

        if items.len() < top_n {
            log::info!(
                "Only {} of {top_n} requested recommendations survived filtering",
                items.len()
            );
        }
        Ok(RecommendationSet {
            items,
            requested: top_n,
        })
    }
}
