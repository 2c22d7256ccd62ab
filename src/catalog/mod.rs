//! Topic catalog wiring.
//!
//! This module wraps the JSON catalog under `catalog/article_topics.json` so
//! the driver and prompt helpers can load a validated, ordered snapshot.
//! Types here mirror the schema fields; `TopicIndex` adds validation and slug
//! lookup on top of the plain `TopicCatalog`.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{Category, Difficulty, TopicSlug};
pub use index::{CATALOG_SCHEMA_VERSION, TopicIndex, resolve_catalog_schema_path};
pub use model::{CatalogFile, Topic, TopicCatalog};

pub use model::load_catalog_from_path;
