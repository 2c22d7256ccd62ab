use std::env;
use std::path::PathBuf;

// Files that mark a checkout as a usable repository root at runtime.
const ROOT_SENTINELS: &[&str] = &[
    "catalog/article_topics.json",
    "schema/topic_catalog.schema.json",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=ARTICLE_SWARM_ROOT_HINT");
    for sentinel in ROOT_SENTINELS {
        println!("cargo:rerun-if-changed={sentinel}");
    }

    let hint = env::var("ARTICLE_SWARM_ROOT_HINT")
        .ok()
        .or_else(|| env::var("CARGO_MANIFEST_DIR").ok());

    let Some(raw_hint) = hint else {
        return;
    };
    let candidate = PathBuf::from(raw_hint);
    let canonical = candidate.canonicalize().unwrap_or(candidate);

    // A hint without the catalog and schema would only fail later at runtime.
    if let Some(missing) = ROOT_SENTINELS
        .iter()
        .find(|sentinel| !canonical.join(sentinel).is_file())
    {
        println!(
            "cargo:warning=ARTICLE_SWARM_ROOT_HINT {} lacks {missing}; skipping root hint",
            canonical.display()
        );
        return;
    }

    println!(
        "cargo:rustc-env=ARTICLE_SWARM_ROOT_HINT={}",
        canonical.display()
    );
}
