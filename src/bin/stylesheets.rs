//! Command-line front end: compile a JSON style document to CSS.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use stylesheets::{OptionsUpdate, StyleDocument, StyleSheets};

#[derive(Debug, Parser)]
#[command(name = "stylesheets", version, about = "Compile JSON style documents to CSS")]
struct Args {
    /// Style document to compile; reads stdin when omitted.
    input: Option<PathBuf>,

    /// Write CSS here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the issued class and animation names as JSON.
    #[arg(long)]
    names: Option<PathBuf>,

    /// Strip generated whitespace.
    #[arg(long)]
    minify: bool,

    /// Seed for reproducible obfuscated names.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let document = StyleDocument::from_json(&text)?;

    let mut builder = StyleSheets::builder().in_memory();
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }
    let mut sheets = builder.build()?;

    let mut overrides = OptionsUpdate::new();
    if args.minify {
        overrides = overrides.minify(true);
    }
    let names = sheets.compile_document_with(document, overrides)?;
    let css = sheets.css().unwrap_or_default();

    match &args.output {
        Some(path) => std::fs::write(path, css)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", css),
    }

    if let Some(path) = &args.names {
        let json = serde_json::to_string_pretty(&names)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote names to {}", path.display());
    }

    Ok(())
}
