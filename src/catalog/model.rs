//! Deserializable representation of `catalog/article_topics.json`.
//!
//! The types mirror the catalog schema so the report and prompt builders can
//! work with typed topics instead of ad-hoc JSON. Use `TopicIndex` when the
//! catalog must be validated (slug uniqueness, schema conformance); use these
//! structs directly for fixtures and already-trusted data.

use crate::catalog::identity::{Category, Difficulty, TopicSlug};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Deserialize, Serialize)]
/// Topic catalog as stored on disk.
pub struct CatalogFile {
    pub schema_version: String,
    pub topics: Vec<Topic>,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
/// One article subject plus its SEO metadata.
///
/// Field order matches the on-disk layout and is preserved in reports.
pub struct Topic {
    pub slug: TopicSlug,
    pub title: String,
    pub keyword: String,
    pub search_volume: u64,
    pub difficulty: Difficulty,
    pub category: Category,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// Ordered, read-only set of topics.
///
/// Built once at startup and passed by reference to the report and prompt
/// builders. There are no mutation methods; order is insertion order.
pub struct TopicCatalog {
    topics: Vec<Topic>,
}

impl TopicCatalog {
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Topic> {
        self.topics.iter()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Linear lookup by slug; use `TopicIndex` for repeated lookups.
    pub fn get(&self, slug: &str) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.slug.as_str() == slug)
    }

    /// Sum of `search_volume` across every topic.
    ///
    /// Widened to `u128` so the exact sum of any set of `u64` volumes fits.
    pub fn total_search_volume(&self) -> u128 {
        self.topics
            .iter()
            .map(|topic| u128::from(topic.search_volume))
            .sum()
    }
}

impl<'a> IntoIterator for &'a TopicCatalog {
    type Item = &'a Topic;
    type IntoIter = std::slice::Iter<'a, Topic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<CatalogFile> for TopicCatalog {
    fn from(file: CatalogFile) -> Self {
        Self::new(file.topics)
    }
}

/// Read and parse a topic catalog from disk without additional validation.
pub fn load_catalog_from_path(path: &Path) -> Result<CatalogFile> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let catalog: CatalogFile =
        serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(catalog)
}

#[cfg(test)]
pub(crate) fn sample_topic(slug: &str, search_volume: u64) -> Topic {
    Topic {
        slug: TopicSlug(slug.to_string()),
        title: format!("Title for {slug}"),
        keyword: slug.replace('-', " "),
        search_volume,
        difficulty: Difficulty::Medium,
        category: Category("stock-lists".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn topic_fields_serialize_in_catalog_order() {
        let topic = sample_topic("dividend-kings-list-2026", 14800);
        let json = serde_json::to_string(&topic).unwrap();
        let positions: Vec<usize> = [
            "\"slug\"",
            "\"title\"",
            "\"keyword\"",
            "\"search_volume\"",
            "\"difficulty\"",
            "\"category\"",
        ]
        .iter()
        .map(|key| json.find(key).expect("field present"))
        .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn negative_search_volume_is_rejected() {
        let value = json!({
            "slug": "a",
            "title": "A",
            "keyword": "a",
            "search_volume": -1,
            "difficulty": "low",
            "category": "tax"
        });
        assert!(serde_json::from_value::<Topic>(value).is_err());
    }

    #[test]
    fn catalog_aggregates_and_lookup() {
        let catalog = TopicCatalog::new(vec![
            sample_topic("first", 10),
            sample_topic("second", 32),
        ]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.total_search_volume(), 42);
        assert_eq!(catalog.get("second").map(|t| t.search_volume), Some(32));
        assert!(catalog.get("third").is_none());
        let slugs: Vec<&str> = catalog.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs, ["first", "second"]);
    }

    #[test]
    fn total_search_volume_exceeding_u64_is_exact() {
        let catalog = TopicCatalog::new(vec![
            sample_topic("first", 10_000_000_000_000_000_000),
            sample_topic("second", 10_000_000_000_000_000_000),
        ]);
        assert_eq!(catalog.total_search_volume(), 20_000_000_000_000_000_000);

        let maxed = TopicCatalog::new(vec![
            sample_topic("a", u64::MAX),
            sample_topic("b", u64::MAX),
        ]);
        assert_eq!(maxed.total_search_volume(), 2 * u128::from(u64::MAX));
    }

    #[test]
    fn load_catalog_from_path_reports_parse_location() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"schema_version\": \"article_topics_v1\"").unwrap();
        let err = load_catalog_from_path(file.path()).unwrap_err();
        assert!(
            format!("{err:#}").contains(&file.path().display().to_string()),
            "error should mention the file: {err:#}"
        );
    }
}
