use serde::{Deserialize, Serialize};

/// Placeholder substituted for an empty field when building the combined
/// text, matching the cleaned catalog export which renders absent cells as
/// the literal string `nan`.
pub const MISSING_FIELD_TEXT: &str = "nan";

/// One catalog row. Identity is the row index in the [`Catalog`] it was
/// loaded into; the struct itself is immutable after construction.
///
/// [`Catalog`]: crate::Catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    pub description: String,
    pub features: String,
    /// Title, description and features joined by single spaces. This is the
    /// text the vector index is fitted over and searched against.
    pub combined_text: String,
}

impl Item {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        features: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let description = description.into();
        let features = features.into();
        let combined_text = combine(&title, &description, &features);
        Self {
            title,
            description,
            features,
            combined_text,
        }
    }
}

fn combine(title: &str, description: &str, features: &str) -> String {
    [title, description, features]
        .iter()
        .map(|field| {
            if field.trim().is_empty() {
                MISSING_FIELD_TEXT
            } else {
                *field
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
