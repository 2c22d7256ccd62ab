//! Validated view of a topic catalog.
//!
//! Loading through the index checks the file against
//! `schema/topic_catalog.schema.json`, enforces the catalog schema version,
//! and rejects duplicate or malformed slugs. The original topic order is kept;
//! the slug map only stores positions into it.

use crate::catalog::identity::TopicSlug;
use crate::catalog::model::{CatalogFile, Topic, TopicCatalog};
use crate::schema_loader::{
    SchemaLoadResult, is_valid_version_token, load_bundled_schema, load_json_schema,
    validation_errors,
};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CATALOG_SCHEMA_VERSION: &str = "article_topics_v1";
pub const CATALOG_SCHEMA_RELATIVE_PATH: &str = "schema/topic_catalog.schema.json";

const BUNDLED_CATALOG_SCHEMA: &str = include_str!("../../schema/topic_catalog.schema.json");

#[derive(Debug)]
/// Topic catalog plus a slug index into it.
pub struct TopicIndex {
    schema_version: String,
    catalog: TopicCatalog,
    by_slug: BTreeMap<TopicSlug, usize>,
}

impl TopicIndex {
    /// Load and validate the catalog from disk.
    ///
    /// Schema validation runs on the raw JSON first so errors point at the
    /// offending field; semantic checks (slug uniqueness) follow on the typed
    /// catalog.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = read_raw_catalog(path)?;
        validate_against_schema(path, &raw)?;

        let file: CatalogFile = serde_json::from_value(raw)
            .with_context(|| format!("decoding catalog {}", path.display()))?;
        let index =
            Self::from_catalog_file(file).with_context(|| format!("validating {}", path.display()))?;
        debug!(
            path = %path.display(),
            topics = index.catalog.len(),
            "loaded topic catalog"
        );
        Ok(index)
    }

    /// Validate an already-parsed catalog without touching the JSON Schema.
    pub fn from_catalog_file(file: CatalogFile) -> Result<Self> {
        validate_schema_version(&file.schema_version)?;
        let by_slug = build_index(&file.topics)?;
        Ok(Self {
            schema_version: file.schema_version,
            catalog: TopicCatalog::new(file.topics),
            by_slug,
        })
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Resolve a topic by slug.
    pub fn topic(&self, slug: &str) -> Option<&Topic> {
        let position = self.by_slug.get(&TopicSlug(slug.to_string()))?;
        self.catalog.topics().get(*position)
    }

    /// Slugs in catalog order.
    pub fn slugs(&self) -> impl Iterator<Item = &TopicSlug> {
        self.catalog.iter().map(|topic| &topic.slug)
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    pub fn into_catalog(self) -> TopicCatalog {
        self.catalog
    }
}

fn read_raw_catalog(path: &Path) -> Result<Value> {
    let file = File::open(path).with_context(|| format!("opening catalog {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing catalog {}", path.display()))
}

fn validate_schema_version(schema_version: &str) -> Result<()> {
    if !is_valid_version_token(schema_version) {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got '{}'",
            schema_version
        );
    }
    let allowed = allowed_schema_versions();
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }
    Ok(())
}

fn allowed_schema_versions() -> BTreeSet<String> {
    BTreeSet::from_iter([CATALOG_SCHEMA_VERSION.to_string()])
}

fn build_index(topics: &[Topic]) -> Result<BTreeMap<TopicSlug, usize>> {
    let mut map = BTreeMap::new();
    for (position, topic) in topics.iter().enumerate() {
        if !topic.slug.is_url_safe() {
            bail!(
                "topic #{} has slug '{}' which is not lowercase-hyphenated",
                position + 1,
                topic.slug
            );
        }
        for (field, value) in [
            ("title", topic.title.as_str()),
            ("keyword", topic.keyword.as_str()),
            ("category", topic.category.as_str()),
        ] {
            if value.trim().is_empty() {
                bail!("topic {} has an empty {field}", topic.slug);
            }
        }
        if map.insert(topic.slug.clone(), position).is_some() {
            bail!("duplicate topic slug {}", topic.slug);
        }
    }
    Ok(map)
}

fn validate_against_schema(catalog_path: &Path, catalog_value: &Value) -> Result<()> {
    let schema = load_catalog_schema(catalog_path)?;

    if let Some(details) = validation_errors(&schema.compiled, catalog_value) {
        bail!(
            "topic catalog {} failed schema validation against {}:\n{}",
            catalog_path.display(),
            schema.schema_version,
            details
        );
    }
    Ok(())
}

fn load_catalog_schema(catalog_path: &Path) -> Result<SchemaLoadResult> {
    let allowed = allowed_schema_versions();
    match resolve_catalog_schema_path(catalog_path) {
        Some(schema_path) => load_json_schema(&schema_path, &allowed)
            .with_context(|| format!("loading catalog schema {}", schema_path.display())),
        None => {
            debug!(catalog = %catalog_path.display(), "using bundled catalog schema");
            load_bundled_schema(BUNDLED_CATALOG_SCHEMA, "<bundled>", &allowed)
        }
    }
}

/// Schema that sits beside the catalog's repository (`<repo>/catalog/x.json`
/// pairs with `<repo>/schema/...`). `None` means the bundled copy applies.
pub fn resolve_catalog_schema_path(catalog_path: &Path) -> Option<PathBuf> {
    let base = catalog_path.parent()?.parent()?;
    let candidate = base.join(CATALOG_SCHEMA_RELATIVE_PATH);
    candidate.is_file().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::sample_topic;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_catalog(dir: &TempDir, value: &Value) -> PathBuf {
        let path = dir.path().join("catalog").join("article_topics.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
        path
    }

    fn topic_json(slug: &str, difficulty: &str) -> Value {
        json!({
            "slug": slug,
            "title": "Dividend Kings",
            "keyword": "dividend kings",
            "search_volume": 14800,
            "difficulty": difficulty,
            "category": "stock-lists"
        })
    }

    #[test]
    fn shipped_catalog_loads_and_keeps_order() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("catalog/article_topics.json");
        let index = TopicIndex::load(&path).expect("shipped catalog is valid");
        assert_eq!(index.schema_version(), CATALOG_SCHEMA_VERSION);
        assert_eq!(index.catalog().len(), 50);
        assert_eq!(
            index.slugs().next().map(TopicSlug::as_str),
            Some("best-dividend-stocks-2026")
        );
        let kings = index.topic("dividend-kings-list-2026").expect("present");
        assert_eq!(kings.search_volume, 14800);
    }

    #[test]
    fn schema_rejects_unknown_difficulty() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(
            &dir,
            &json!({
                "schema_version": CATALOG_SCHEMA_VERSION,
                "topics": [topic_json("dividend-kings", "extreme")]
            }),
        );
        let err = TopicIndex::load(&path).unwrap_err();
        assert!(
            format!("{err:#}").contains("schema validation"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(
            &dir,
            &json!({
                "schema_version": CATALOG_SCHEMA_VERSION,
                "topics": [topic_json("dividend-kings", "low"), topic_json("dividend-kings", "high")]
            }),
        );
        let err = TopicIndex::load(&path).unwrap_err();
        assert!(
            format!("{err:#}").contains("duplicate topic slug dividend-kings"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let file = CatalogFile {
            schema_version: "article_topics_v0".to_string(),
            topics: vec![sample_topic("a", 1)],
        };
        let err = TopicIndex::from_catalog_file(file).unwrap_err();
        assert!(err.to_string().contains("article_topics_v0"));
    }

    #[test]
    fn blank_keyword_is_rejected_without_schema() {
        let mut topic = sample_topic("roth-ira", 1);
        topic.keyword = "  ".to_string();
        let file = CatalogFile {
            schema_version: CATALOG_SCHEMA_VERSION.to_string(),
            topics: vec![topic],
        };
        let err = TopicIndex::from_catalog_file(file).unwrap_err();
        assert_eq!(err.to_string(), "topic roth-ira has an empty keyword");
    }

    #[test]
    fn empty_catalog_is_accepted() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(
            &dir,
            &json!({"schema_version": CATALOG_SCHEMA_VERSION, "topics": []}),
        );
        let index = TopicIndex::load(&path).unwrap();
        assert!(index.catalog().is_empty());
    }

    #[test]
    fn schema_falls_back_to_bundled_copy() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_catalog_schema_path(&dir.path().join("catalog/topics.json")).is_none());

        let path = write_catalog(
            &dir,
            &json!({
                "schema_version": CATALOG_SCHEMA_VERSION,
                "topics": [topic_json("dividend-kings", "unknown")]
            }),
        );
        let err = TopicIndex::load(&path).unwrap_err();
        assert!(
            format!("{err:#}").contains("schema validation"),
            "bundled schema should still validate: {err:#}"
        );
    }

    #[test]
    fn schema_beside_catalog_repository_wins() {
        let dir = TempDir::new().unwrap();
        let path = write_catalog(
            &dir,
            &json!({
                "schema_version": CATALOG_SCHEMA_VERSION,
                "topics": [topic_json("dividend-kings", "low")]
            }),
        );
        let schema_path = dir.path().join(CATALOG_SCHEMA_RELATIVE_PATH);
        fs::create_dir_all(schema_path.parent().unwrap()).unwrap();
        fs::write(
            &schema_path,
            serde_json::to_vec(&json!({
                "properties": {
                    "schema_version": {"const": CATALOG_SCHEMA_VERSION},
                    "topics": {"maxItems": 0}
                }
            }))
            .unwrap(),
        )
        .unwrap();

        assert_eq!(resolve_catalog_schema_path(&path), Some(schema_path));
        let err = TopicIndex::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("schema validation"), "{err:#}");
    }
}
