//! Renders article-generation prompts for catalog topics.
//!
//! Prints one prompt per requested slug (or every topic with `--all`) to
//! stdout, separated by a marker line naming the slug, so an external agent
//! runner can split the stream.

use anyhow::{Result, anyhow, bail};
use article_swarm::runtime::init_tracing;
use article_swarm::{PromptTemplate, Topic, TopicIndex, find_repo_root, resolve_catalog_path};
use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

const SEPARATOR_PREFIX: &str = "----- prompt: ";

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("article-prompt: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse()?;
    let catalog_path = resolve_catalog_path(cli.catalog_path.as_deref(), find_repo_root)?;
    let index = TopicIndex::load(&catalog_path)?;
    let template = match &cli.template_path {
        Some(path) => PromptTemplate::from_path(path)?,
        None => PromptTemplate::default(),
    };

    let topics: Vec<&Topic> = if cli.all {
        index.catalog().iter().collect()
    } else {
        cli.slugs
            .iter()
            .map(|slug| {
                index
                    .topic(slug)
                    .ok_or_else(|| anyhow!("unknown topic slug: {slug}"))
            })
            .collect::<Result<_>>()?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for topic in topics {
        let prompt = template
            .render_topic(topic)
            .map_err(|err| anyhow!("rendering prompt for {}: {err}", topic.slug))?;
        writeln!(out, "{SEPARATOR_PREFIX}{} -----", topic.slug)?;
        out.write_all(prompt.as_bytes())?;
        if !prompt.ends_with('\n') {
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

struct Cli {
    catalog_path: Option<PathBuf>,
    template_path: Option<PathBuf>,
    all: bool,
    slugs: Vec<String>,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut args = env::args_os();
        let _program = args.next();
        let mut catalog_path = None;
        let mut template_path = None;
        let mut all = false;
        let mut slugs = Vec::new();

        while let Some(arg) = args.next() {
            let arg_str = arg
                .to_str()
                .ok_or_else(|| anyhow!("invalid UTF-8 in argument"))?;
            match arg_str {
                "--catalog" => catalog_path = Some(next_path("--catalog", &mut args)?),
                "--template" => template_path = Some(next_path("--template", &mut args)?),
                "--all" => all = true,
                "--help" | "-h" => usage(0),
                other if other.starts_with('-') => bail!("unknown argument: {other}"),
                slug => slugs.push(slug.to_string()),
            }
        }

        if all && !slugs.is_empty() {
            bail!("--all cannot be combined with explicit slugs");
        }
        if !all && slugs.is_empty() {
            usage(2);
        }

        Ok(Self {
            catalog_path,
            template_path,
            all,
            slugs,
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
        "Usage: article-prompt [--catalog PATH] [--template PATH] (--all | SLUG...)\n\nOptions:\n  --catalog PATH            Override topic catalog path (or set ARTICLE_CATALOG_PATH).\n  --template PATH           Render with a replacement prompt template.\n  --all                     Render a prompt for every topic in catalog order.\n  --help                    Show this help text."
    );
    std::process::exit(code);
}
