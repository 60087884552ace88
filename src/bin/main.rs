//! HAL Encoding CLI
//!
//! Command-line tool for building HAL documents from JSON payload files.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::Value;
use thiserror::Error;

use hal_document::{to_json_string, HalError, Resource};

#[derive(Parser)]
#[command(name = "hal-encode")]
#[command(about = "Build a HAL document from a JSON payload, links and embedded resources")]
#[command(version)]
struct Cli {
    /// Href of the resource's self link
    self_href: String,

    /// JSON file holding the payload object (default: empty payload)
    #[arg(short, long)]
    payload: Option<PathBuf>,

    /// Additional link: --link <REL>=<HREF>, repeat to add more
    #[arg(long = "link", value_name = "REL=HREF")]
    links: Vec<String>,

    /// Embedded resource: --embed <REL>=<PAYLOAD_FILE>@<SELF_HREF>, repeat to add more
    #[arg(long = "embed", value_name = "REL=FILE@HREF")]
    embeds: Vec<String>,

    /// Curie declaration: --curie <NAME>=<HREF_TEMPLATE>
    #[arg(long = "curie", value_name = "NAME=HREF")]
    curies: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Failed to read payload from {path}: {reason}")]
    Payload { path: String, reason: String },

    #[error("Invalid argument '{arg}': expected {expected}")]
    InvalidArgument { arg: String, expected: &'static str },

    #[error(transparent)]
    Hal(#[from] HalError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Split `<left>=<right>`
fn split_pair<'a>(arg: &'a str, expected: &'static str) -> Result<(&'a str, &'a str), CliError> {
    arg.split_once('=')
        .filter(|(left, _)| !left.is_empty())
        .ok_or_else(|| CliError::InvalidArgument {
            arg: arg.to_string(),
            expected,
        })
}

/// Parse `<rel>=<file>@<href>`; the href is taken after the last '@'
fn parse_embed(arg: &str) -> Result<(&str, &str, &str), CliError> {
    const EXPECTED: &str = "REL=FILE@HREF";
    let (relation, rest) = split_pair(arg, EXPECTED)?;
    let (file, href) = rest
        .rsplit_once('@')
        .filter(|(file, _)| !file.is_empty())
        .ok_or_else(|| CliError::InvalidArgument {
            arg: arg.to_string(),
            expected: EXPECTED,
        })?;
    Ok((relation, file, href))
}

/// Load a payload object from a JSON file
fn load_payload(path: &Path) -> Result<Value, CliError> {
    tracing::debug!(path = %path.display(), "loading payload");

    let content = fs::read_to_string(path).map_err(|e| CliError::Payload {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let payload: Value = serde_json::from_str(&content).map_err(|e| CliError::Payload {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    if !(payload.is_object() || payload.is_null()) {
        return Err(CliError::Payload {
            path: path.display().to_string(),
            reason: "payload must be a JSON object".to_string(),
        });
    }

    Ok(payload)
}

fn build_resource(cli: &Cli) -> Result<Resource, CliError> {
    let payload = match &cli.payload {
        Some(path) => load_payload(path)?,
        None => Value::Null,
    };
    let mut resource = Resource::new(payload, cli.self_href.clone());

    for curie in &cli.curies {
        let (name, href) = split_pair(curie, "NAME=HREF")?;
        resource.register_curie(name, href, true);
    }

    for link in &cli.links {
        let (relation, href) = split_pair(link, "REL=HREF")?;
        resource.add_new_link(relation, href);
    }

    for embed in &cli.embeds {
        let (relation, file, href) = parse_embed(embed)?;
        let payload = load_payload(Path::new(file))?;
        resource.embed(relation, Resource::new(payload, href));
    }

    Ok(resource)
}

/// Write output to file or stdout
fn write_output(content: &str, output: Option<&PathBuf>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            fs::write(path, content)?;
            tracing::info!(path = %path.display(), "wrote HAL document");
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let resource = build_resource(&cli)?;

    tracing::info!(
        links = resource.links().len(),
        embedded = resource.embedded().len(),
        "encoding {}",
        resource.self_href()
    );

    let output = to_json_string(&resource, cli.pretty)?;
    write_output(&output, cli.output.as_ref())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
