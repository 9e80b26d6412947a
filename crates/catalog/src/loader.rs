use crate::error::{CatalogError, Result};
use crate::item::Item;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 3] = ["title", "description", "features"];

/// Ordered, immutable collection of catalog items.
///
/// The row index is the stable identity shared with the vector index, so the
/// items are kept exactly in load order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Load a `;`-delimited CSV export. Columns are located by header name;
    /// rows where any of `title`, `description` or `features` is blank are
    /// dropped before indexing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let columns = REQUIRED_COLUMNS
            .into_iter()
            .map(|name| {
                headers
                    .iter()
                    .position(|h| h.trim().eq_ignore_ascii_case(name))
                    .ok_or(CatalogError::MissingColumn(name))
            })
            .collect::<Result<Vec<_>>>()?;
        let (title_col, description_col, features_col) = (columns[0], columns[1], columns[2]);

        let mut items = Vec::new();
        let mut dropped = 0usize;
        for record in reader.records() {
            let record = record?;
            let title = record.get(title_col).unwrap_or("").trim();
            let description = record.get(description_col).unwrap_or("").trim();
            let features = record.get(features_col).unwrap_or("").trim();
            if title.is_empty() || description.is_empty() || features.is_empty() {
                dropped += 1;
                continue;
            }
            items.push(Item::new(title, description, features));
        }

        if dropped > 0 {
            log::debug!("Dropped {dropped} catalog rows with blank required fields");
        }
        if items.is_empty() {
            return Err(CatalogError::Empty(path.display().to_string()));
        }
        log::info!("Loaded {} catalog items from {}", items.len(), path.display());

        Ok(Self { items })
    }

    /// Build a catalog from pre-constructed items, preserving their order.
    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn get(&self, row: usize) -> Option<&Item> {
        self.items.get(row)
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Combined texts in row order, the corpus the vector index is fitted over.
    pub fn combined_texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.combined_text.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_catalog(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("metadata.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_rows_and_drops_incomplete_ones() {
        let tmp = TempDir::new().unwrap();
        let path = write_catalog(
            &tmp,
            "title;description;features\n\
             Dell XPS 15;['Sleek ultrabook'];['16GB RAM']\n\
             Broken Laptop;;['8GB RAM']\n\
             Asus ROG;['Gaming rig'];['32GB RAM']\n",
        );

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().title, "Dell XPS 15");
        assert_eq!(catalog.get(1).unwrap().title, "Asus ROG");
        assert_eq!(
            catalog.get(0).unwrap().combined_text,
            "Dell XPS 15 ['Sleek ultrabook'] ['16GB RAM']"
        );
    }

    #[test]
    fn column_order_is_located_by_header_name() {
        let tmp = TempDir::new().unwrap();
        let path = write_catalog(
            &tmp,
            "features;title;description\n\
             ['16GB RAM'];Dell XPS 15;['Sleek ultrabook']\n",
        );

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.get(0).unwrap().title, "Dell XPS 15");
        assert_eq!(catalog.get(0).unwrap().features, "['16GB RAM']");
    }

    #[test]
    fn missing_column_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_catalog(&tmp, "title;description\nDell;['desc']\n");

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn("features")));
    }

    #[test]
    fn all_rows_dropped_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_catalog(&tmp, "title;description;features\n;;\n");

        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Empty(_)));
    }
}
