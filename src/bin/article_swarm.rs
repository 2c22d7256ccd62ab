//! Catalog driver for the SEO article swarm.
//!
//! Loads and validates the topic catalog, prints database statistics, writes
//! the generation report (`scripts/article-topics.json` by default), and
//! points at the article output directory. No generation agent is invoked;
//! `article-prompt` renders the per-topic instructions for that step.

use anyhow::{Context, Result, anyhow, bail};
use article_swarm::runtime::init_tracing;
use article_swarm::summary::{write_banner, write_breakdown, write_summary};
use article_swarm::{
    ConfigOverrides, RunConfig, build_report, find_repo_root, load_catalog, write_report,
};
use chrono::Utc;
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("article-swarm: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let config = RunConfig::resolve(cli.overrides, find_repo_root)?;
    debug!(?config, "resolved run configuration");

    let catalog = load_catalog(&config.catalog_path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_banner(&mut out, "SEO Article Swarm Generator")?;
    write_summary(&catalog, &mut out)?;
    if cli.breakdown {
        write_breakdown(&catalog, &mut out)?;
    }

    let report = build_report(&catalog, Utc::now());
    write_report(&report, &config.report_path)
        .with_context(|| format!("saving topics to {}", config.report_path.display()))?;
    writeln!(
        out,
        "Saved {} topics to {}",
        report.total_topics,
        config.report_path.display()
    )?;

    writeln!(out)?;
    writeln!(out, "Ready to generate {} articles", catalog.len())?;
    writeln!(out, "Output directory: {}", config.articles_dir.display())?;
    writeln!(out)?;
    writeln!(
        out,
        "Next: render prompts with `article-prompt --all` and hand them to the agent swarm"
    )?;
    out.flush()?;
    Ok(())
}

struct Cli {
    overrides: ConfigOverrides,
    breakdown: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();
        let mut overrides = ConfigOverrides::default();
        let mut breakdown = false;

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--catalog" => overrides.catalog_path = Some(next_path("--catalog", &mut args)?),
                "--output" => overrides.report_path = Some(next_path("--output", &mut args)?),
                "--articles-dir" => {
                    overrides.articles_dir = Some(next_path("--articles-dir", &mut args)?)
                }
                "--breakdown" => breakdown = true,
                "--help" | "-h" => usage(0),
                other => bail!("unknown argument: {other}"),
            }
        }

        Ok(Self {
            overrides,
            breakdown,
        })
    }
}

fn next_path(flag: &str, args: &mut env::ArgsOs) -> Result<PathBuf> {
    let value = args
        .next()
        .ok_or_else(|| anyhow!("{flag} requires a value"))?;
    let path = PathBuf::from(
        value
            .into_string()
            .map_err(|_| anyhow!("{flag} must be valid UTF-8"))?,
    );
    if path.as_os_str().is_empty() {
        bail!("{flag} must not be empty");
    }
    Ok(path)
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: article-swarm [--catalog PATH] [--output PATH] [--articles-dir PATH] [--breakdown]\n\nOptions:\n  --catalog PATH            Override topic catalog path (or set ARTICLE_CATALOG_PATH).\n  --output PATH             Report destination (or set ARTICLE_REPORT_PATH; default scripts/article-topics.json).\n  --articles-dir PATH       Article output directory to announce (or set ARTICLE_OUTPUT_DIR; default app/blog).\n  --breakdown               Also print per-category and per-difficulty totals.\n  --help                    Show this help text."
    );
    std::process::exit(code);
}
