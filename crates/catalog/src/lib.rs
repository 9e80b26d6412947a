//! # Advisor Catalog
//!
//! Static laptop catalog loaded from a `;`-delimited CSV export.
//!
//! Each row becomes one [`Item`] whose `title`, `description` and `features`
//! fields are combined into a single text blob used as the unit of retrieval.
//! Row order defines the identity space shared with the vector index: item
//! `i` in the catalog corresponds to vector row `i`, and the catalog is never
//! re-sorted after loading.

mod error;
mod item;
mod loader;

pub use error::{CatalogError, Result};
pub use item::{Item, MISSING_FIELD_TEXT};
pub use loader::Catalog;
