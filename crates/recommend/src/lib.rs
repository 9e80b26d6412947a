//! # Advisor Recommend
//!
//! Turns raw nearest-neighbor hits into a shortlist fit to show a user:
//! an immutable [`RetrievalService`] owning the catalog/index pair,
//! degenerate-hit filtering with over-fetch, stored-text parsing into
//! display-ready [`Recommendation`]s, and an optional service-backed
//! re-ranking pass that explains its picks.

mod error;
mod filter;
mod format;
mod rerank;
mod service;

pub use error::{RecommendError, Result};
pub use filter::is_degenerate;
pub use format::Recommendation;
pub use rerank::rerank_with_service;
pub use service::{RecommendationSet, RetrievalService, DEFAULT_OVER_FETCH, RERANK_POOL};
