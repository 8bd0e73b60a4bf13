//! froactful command-line generator.
//!
//! Fetches the reflection API dump and the Luau type corpus, resolves the
//! class hierarchy, and writes the generated froact component module to
//! standard output (diagnostics go to stderr, so the output can be piped
//! straight into a file).
//!
//! ```bash
//! froactful > froact.lua
//! froactful --template src/froact.lua --verbose > out.lua
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use froactful_codegen::Session;
use froactful_core::GenerateConfig;
use froactful_schema::{CorpusIndex, SchemaStore};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default source for the reflection API dump.
const API_DUMP_URL: &str =
    "https://raw.githubusercontent.com/CloneTrooper1019/Roblox-Client-Tracker/roblox/API-Dump.json";

/// Default source for the Luau type-declaration corpus.
const API_DEFINITIONS_URL: &str =
    "https://raw.githubusercontent.com/JohnnyMorganz/luau-lsp/main/scripts/globalTypes.d.lua";

/// Generates typed froact component wrappers from the platform reflection
/// schema.
#[derive(Parser, Debug)]
#[command(name = "froactful")]
#[command(version, about, long_about = None)]
struct Cli {
    /// URL of the reflection API dump document.
    #[arg(long, default_value = API_DUMP_URL)]
    dump_url: String,

    /// URL of the type-declaration corpus document.
    #[arg(long, default_value = API_DEFINITIONS_URL)]
    types_url: String,

    /// Path of the module template to splice into.
    #[arg(long, default_value = "froact.lua")]
    template: PathBuf,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Both fetches happen once at startup; a failure aborts the run with
    // no partial output.
    let dump_text = fetch(&cli.dump_url)
        .await
        .context("failed to fetch the API dump")?;
    info!(bytes = dump_text.len(), "fetched API dump");

    let corpus_text = fetch(&cli.types_url)
        .await
        .context("failed to fetch the type corpus")?;
    info!(bytes = corpus_text.len(), "fetched type corpus");

    let template = std::fs::read_to_string(&cli.template)
        .with_context(|| format!("failed to read template {}", cli.template.display()))?;

    let schema = SchemaStore::parse_json(&dump_text)?;
    let corpus = CorpusIndex::parse(&corpus_text);

    let mut session = Session::new(schema, corpus, GenerateConfig::default());
    let module = session.generate(&template)?;

    println!("{module}");
    Ok(())
}

async fn fetch(url: &str) -> Result<String> {
    let body = reqwest::get(url)
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["froactful"]);
        assert_eq!(cli.dump_url, API_DUMP_URL);
        assert_eq!(cli.types_url, API_DEFINITIONS_URL);
        assert_eq!(cli.template, PathBuf::from("froact.lua"));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "froactful",
            "--template",
            "custom.lua",
            "--verbose",
        ]);
        assert_eq!(cli.template, PathBuf::from("custom.lua"));
        assert!(cli.verbose);
    }
}
