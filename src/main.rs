// sds-parser - parse one Safety Data Sheet into JSON
use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use sds_parser::{ParserConfig, SdsParser};

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract structured fields from an SDS PDF")]
#[command(group(ArgGroup::new("source").required(true).args(["path", "url"])))]
struct Args {
    /// Local PDF file
    #[arg(long)]
    path: Option<PathBuf>,

    /// Remote PDF to download
    #[arg(long)]
    url: Option<String>,

    /// Identifier carried through to the output record
    #[arg(long)]
    product_id: i64,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Verbose logging and the OCR fallback
    #[arg(long, env = "SDS_DEBUG")]
    debug: bool,

    /// TOML file overriding the default tuning values
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

// A TOML `debug = true` stays on without `--debug`.
fn load_config(args: &Args) -> Result<ParserConfig> {
    let config = match &args.config {
        Some(path) => ParserConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ParserConfig::default(),
    };
    let debug = config.debug || args.debug;
    Ok(config.with_debug(debug))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(config.debug);

    let parser = SdsParser::new(config);

    let doc = match (&args.path, &args.url) {
        (Some(path), _) => parser.parse_path(path, args.product_id)?,
        (None, Some(url)) => parser.parse_url(url, args.product_id)?,
        (None, None) => unreachable!("clap requires one of --path or --url"),
    };

    let json = doc.to_json()?;
    match &args.out {
        Some(out) => {
            fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
        }
        None => println!("{}", json),
    }

    Ok(())
}
