// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! tagtree-dump CLI
//!
//! Serialize the built-in sample records to tagged text.
//!
//! # Usage
//!
//! ```bash
//! # Person record to stdout
//! tagtree-dump --sample person
//!
//! # Every sample, CRLF line endings, into a file
//! tagtree-dump --sample all --crlf --output samples.txt
//!
//! # Settings from YAML, root tag overridden
//! tagtree-dump --config tagtree.yaml --sample point --root-tag Origin
//! ```

mod samples;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tagtree::{Describe, LineEnding, SerializerConfig, TextEscape, TreeSerializer};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "tagtree-dump")]
#[command(author = "naskel.com")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serialize built-in sample records to tagged text")]
#[command(long_about = None)]
struct Cli {
    /// Sample record to serialize
    #[arg(short, long, value_enum, default_value = "person")]
    sample: SampleArg,

    /// Root tag (defaults to the record's type name)
    #[arg(short, long)]
    root_tag: Option<String>,

    /// Serializer config file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use CRLF line endings
    #[arg(long)]
    crlf: bool,

    /// Escape &, < and > in text values
    #[arg(long)]
    escape: bool,

    /// Maximum nesting depth (0 = unlimited)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Verbose mode (show internal logs)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SampleArg {
    Point,
    Wrapper,
    Person,
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("tagtree_dump=debug,tagtree=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tagtree_dump=warn"))
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    if cli.sample == SampleArg::All && cli.root_tag.is_some() {
        bail!("--root-tag cannot be combined with --sample all");
    }

    let registry = samples::build_registry().context("Failed to register sample types")?;
    let serializer = TreeSerializer::with_config(&registry, config);
    tracing::info!(sample = ?cli.sample, config = ?serializer.config(), "Serializing");

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let root_tag = cli.root_tag.as_deref();
    match cli.sample {
        SampleArg::Point => dump(&serializer, &mut out, root_tag, &samples::point())?,
        SampleArg::Wrapper => dump(&serializer, &mut out, root_tag, &samples::wrapper())?,
        SampleArg::Person => dump(&serializer, &mut out, root_tag, &samples::person())?,
        SampleArg::All => {
            dump(&serializer, &mut out, None, &samples::point())?;
            dump(&serializer, &mut out, None, &samples::wrapper())?;
            dump(&serializer, &mut out, None, &samples::person())?;
        }
    }

    out.flush().context("Failed to flush output")?;
    Ok(())
}

/// Merge the config file (if any) with command-line overrides.
fn build_config(cli: &Cli) -> Result<SerializerConfig> {
    let mut config = match &cli.config {
        Some(path) => SerializerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SerializerConfig::default(),
    };

    if cli.crlf {
        config.line_ending = LineEnding::CrLf;
    }
    if cli.escape {
        config.text_escape = TextEscape::Markup;
    }
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    Ok(config)
}

fn dump<T: Describe>(
    serializer: &TreeSerializer<'_>,
    out: &mut dyn Write,
    root_tag: Option<&str>,
    value: &T,
) -> Result<()> {
    let key = T::KEY;
    let tag = root_tag.unwrap_or(key.as_str());
    serializer
        .serialize_io(out, tag, value)
        .with_context(|| format!("Failed to serialize {}", key))
}
