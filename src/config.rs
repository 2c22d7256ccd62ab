//! Run configuration for the driver binaries.
//!
//! Each path resolves in the same order: explicit CLI flag, then environment
//! variable, then the repository default. The repository root is only looked
//! up when a default actually depends on it.

use crate::runtime::env_path;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const CATALOG_PATH_ENV: &str = "ARTICLE_CATALOG_PATH";
pub const REPORT_PATH_ENV: &str = "ARTICLE_REPORT_PATH";
pub const OUTPUT_DIR_ENV: &str = "ARTICLE_OUTPUT_DIR";

pub const DEFAULT_CATALOG_RELATIVE_PATH: &str = "catalog/article_topics.json";
pub const DEFAULT_REPORT_PATH: &str = "scripts/article-topics.json";
pub const DEFAULT_ARTICLES_DIR: &str = "app/blog";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunConfig {
    /// Topic catalog to load.
    pub catalog_path: PathBuf,
    /// Destination of the generation report, relative to the working
    /// directory unless absolute.
    pub report_path: PathBuf,
    /// Where generated articles belong. Reported only; never written here.
    pub articles_dir: PathBuf,
}

/// Flag values supplied on the command line, all optional.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub articles_dir: Option<PathBuf>,
}

impl RunConfig {
    /// `find_root` runs only when neither flag nor env names a catalog.
    pub fn resolve(
        overrides: ConfigOverrides,
        find_root: impl FnOnce() -> Result<PathBuf>,
    ) -> Result<Self> {
        Ok(Self {
            catalog_path: resolve_catalog_path(overrides.catalog_path.as_deref(), find_root)?,
            report_path: overrides
                .report_path
                .or_else(|| env_path(REPORT_PATH_ENV))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH)),
            articles_dir: overrides
                .articles_dir
                .or_else(|| env_path(OUTPUT_DIR_ENV))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARTICLES_DIR)),
        })
    }
}

/// Resolve the catalog path: flag, then `ARTICLE_CATALOG_PATH`, then the
/// shipped catalog under the root returned by `find_root`. Relative
/// overrides are kept as given.
pub fn resolve_catalog_path(
    cli_override: Option<&Path>,
    find_root: impl FnOnce() -> Result<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = cli_override {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env_path(CATALOG_PATH_ENV) {
        return Ok(path);
    }
    Ok(default_catalog_path(&find_root()?))
}

pub fn default_catalog_path(repo_root: &Path) -> PathBuf {
    repo_root.join(DEFAULT_CATALOG_RELATIVE_PATH)
}
