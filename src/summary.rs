//! Human-readable catalog statistics.
//!
//! Output is informational only; nothing downstream parses it.

use crate::catalog::{Category, Difficulty, TopicCatalog};
use crate::prompt::format_thousands;
use std::collections::BTreeMap;
use std::io::{self, Write};

pub const BANNER_WIDTH: usize = 60;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CatalogStats {
    pub total_topics: usize,
    pub total_search_volume: u128,
    /// Truncating mean; zero for an empty catalog.
    pub average_search_volume: u128,
}

impl CatalogStats {
    pub fn from_catalog(catalog: &TopicCatalog) -> Self {
        let total_topics = catalog.len();
        let total_search_volume = catalog.total_search_volume();
        let average_search_volume = match total_topics {
            0 => 0,
            count => total_search_volume / count as u128,
        };
        Self {
            total_topics,
            total_search_volume,
            average_search_volume,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// Topic count and search volume for one grouping value.
pub struct BreakdownEntry {
    pub topics: usize,
    pub search_volume: u128,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CatalogBreakdown {
    pub by_category: BTreeMap<Category, BreakdownEntry>,
    pub by_difficulty: BTreeMap<Difficulty, BreakdownEntry>,
}

impl CatalogBreakdown {
    pub fn from_catalog(catalog: &TopicCatalog) -> Self {
        let mut breakdown = Self::default();
        for topic in catalog {
            let category = breakdown
                .by_category
                .entry(topic.category.clone())
                .or_default();
            category.topics += 1;
            category.search_volume += u128::from(topic.search_volume);

            let difficulty = breakdown.by_difficulty.entry(topic.difficulty).or_default();
            difficulty.topics += 1;
            difficulty.search_volume += u128::from(topic.search_volume);
        }
        breakdown
    }
}

pub fn write_banner(out: &mut impl Write, title: &str) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")
}

/// Write topic count, total and average search volume.
pub fn write_summary(catalog: &TopicCatalog, out: &mut impl Write) -> io::Result<()> {
    let stats = CatalogStats::from_catalog(catalog);
    writeln!(out)?;
    writeln!(out, "Article Database Stats:")?;
    writeln!(out, "   Total Topics: {}", stats.total_topics)?;
    writeln!(
        out,
        "   Total Search Volume: {}/month",
        format_thousands(stats.total_search_volume)
    )?;
    writeln!(
        out,
        "   Avg Search Volume: {}/month",
        format_thousands(stats.average_search_volume)
    )
}

pub fn write_breakdown(catalog: &TopicCatalog, out: &mut impl Write) -> io::Result<()> {
    let breakdown = CatalogBreakdown::from_catalog(catalog);
    writeln!(out)?;
    writeln!(out, "By Category:")?;
    for (category, entry) in &breakdown.by_category {
        writeln!(
            out,
            "   {:<20} {:>3} topics  {:>9}/month",
            category.as_str(),
            entry.topics,
            format_thousands(entry.search_volume)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "By Difficulty:")?;
    for (difficulty, entry) in &breakdown.by_difficulty {
        writeln!(
            out,
            "   {:<20} {:>3} topics  {:>9}/month",
            difficulty.as_str(),
            entry.topics,
            format_thousands(entry.search_volume)
        )?;
    }
    Ok(())
}

/// `write_summary` to stdout.
pub fn print_summary(catalog: &TopicCatalog) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_summary(catalog, &mut lock)
}
