use advisor_catalog::Catalog;
use advisor_recommend::RetrievalService;
use advisor_vector_index::TfidfIndex;
use anyhow::{Context as AnyhowContext, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    Catalog::load(path).with_context(|| format!("Failed to load catalog from {}", path.display()))
}

pub fn build_index(catalog: &Catalog) -> Result<TfidfIndex> {
    let spinner = vectorize_spinner();
    let index = TfidfIndex::build(catalog).context("Failed to fit the vector index")?;
    spinner.finish_and_clear();
    Ok(index)
}

/// Construct the immutable retrieval service for this process: load the
/// catalog, then restore the index snapshot or fit a fresh one (persisted
/// for next time).
pub async fn open_retrieval(catalog_path: &Path, snapshot_path: &Path) -> Result<RetrievalService> {
    let catalog = load_catalog(catalog_path)?;

    let spinner = vectorize_spinner();
    let index = TfidfIndex::load_or_build(&catalog, snapshot_path)
        .await
        .context("Failed to prepare the vector index")?;
    spinner.finish_and_clear();

    Ok(RetrievalService::new(catalog, index))
}

fn vectorize_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Vectorizing catalog...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
