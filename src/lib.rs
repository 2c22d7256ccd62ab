//! Shared library for the SEO article swarm tooling.
//!
//! The crate exposes the topic catalog, the prompt renderer handed to external
//! generation agents, and the report/summary helpers used by the binaries.
//! Public functions here form the contract the binaries depend on:
//! repository discovery, catalog loading, prompt rendering, and report output.

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod config;
pub mod prompt;
pub mod report;
pub mod runtime;
pub mod summary;
mod schema_loader;

pub use catalog::{
    CATALOG_SCHEMA_VERSION, CatalogFile, Category, Difficulty, Topic, TopicCatalog, TopicIndex,
    TopicSlug, load_catalog_from_path,
};
pub use config::{ConfigOverrides, RunConfig, default_catalog_path, resolve_catalog_path};
pub use prompt::{
    PromptError, PromptSlots, PromptTemplate, build_article_prompt, format_thousands,
};
pub use report::{
    GenerationReport, ReportError, build_report, read_report, render_report, write_report,
};
pub use summary::{CatalogBreakdown, CatalogStats, print_summary, write_summary};

pub const ROOT_ENV: &str = "ARTICLE_SWARM_ROOT";
const ROOT_SENTINELS: &[&str] = &[
    config::DEFAULT_CATALOG_RELATIVE_PATH,
    catalog::index::CATALOG_SCHEMA_RELATIVE_PATH,
];

/// Returns true when `candidate` holds both the catalog and its schema.
fn is_repo_root(candidate: &Path) -> bool {
    ROOT_SENTINELS
        .iter()
        .all(|sentinel| candidate.join(sentinel).is_file())
}

fn repo_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_repo_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_repo_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the repository root.
///
/// Honors `ARTICLE_SWARM_ROOT` if it points at a real checkout, then climbs
/// up from the current executable, then uses the build-time hint.
pub fn find_repo_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(ROOT_ENV) {
        if let Some(root) = repo_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(root) = search_upwards(exe_dir) {
                return Ok(root);
            }
        }
    }

    if let Some(hint) = option_env!("ARTICLE_SWARM_ROOT_HINT") {
        if let Some(root) = repo_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the article-swarm repository root. Set {ROOT_ENV} to the directory holding {}.",
        config::DEFAULT_CATALOG_RELATIVE_PATH
    );
}

/// Load and validate the catalog at `path`, returning it in file order.
pub fn load_catalog(path: &Path) -> Result<TopicCatalog> {
    Ok(TopicIndex::load(path)?.into_catalog())
}
