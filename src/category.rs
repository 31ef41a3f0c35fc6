//! The configured set of purchase categories.
//!
//! Categories are plain labels chosen at start-up. Their order is the order
//! statistics are reported in.

use axum::{Json, extract::State};
use serde::Serialize;

/// The categories used when none are configured.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Alimentos",
    "Transporte",
    "Entretenimiento",
    "Salud",
    "Hogar",
    "Otros",
];

/// An ordered set of category labels.
///
/// Labels are trimmed, empty labels are dropped and duplicates keep their
/// first position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Categories(Vec<String>);

impl Categories {
    /// Create a category set from `labels`, preserving their order.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut categories: Vec<String> = Vec::new();

        for label in labels {
            let label = label.as_ref().trim();

            if !label.is_empty() && !categories.iter().any(|existing| existing == label) {
                categories.push(label.to_owned());
            }
        }

        Self(categories)
    }

    /// Whether `label` is one of the categories.
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|category| category == label)
    }

    /// Iterate over the category labels in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Whether there are no categories.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Categories {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES)
    }
}

/// List the configured categories in order.
pub async fn get_categories_endpoint(State(categories): State<Categories>) -> Json<Categories> {
    Json(categories)
}
