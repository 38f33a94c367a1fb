//! Command-line interface for vo-models

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use tracing::debug;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use vo_models::kind::{roundtrip, summarize, to_json};
#[cfg(feature = "cli")]
use vo_models::{DocumentKind, ReadOptions, UtcTimestamp, WriteOptions};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "vo-models")]
#[command(author, version, about = "Read, check and convert IVOA XML documents", long_about = None)]
struct Cli {
    /// Log binding details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Detect the document type and print a summary
    Inspect {
        /// Path to the XML document
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse a document into its model and print the re-rendered XML
    Roundtrip {
        /// Path to the XML document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Document type (job, jobs, availability, capabilities, table,
        /// tableset, resources, resource, capability, interface);
        /// detected from the root element when omitted
        #[arg(short, long)]
        kind: Option<String>,

        /// Drop empty elements from the output
        #[arg(long)]
        skip_empty: bool,

        /// Indent the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Parse a document into its model and print it as JSON
    #[command(name = "to-json")]
    ToJson {
        /// Path to the XML document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Document type; detected from the root element when omitted
        #[arg(short, long)]
        kind: Option<String>,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Normalize a timestamp to the VO form
    Timestamp {
        /// The timestamp to normalize
        #[arg(value_name = "VALUE")]
        value: String,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Inspect { file } => cmd_inspect(&file),
        Commands::Roundtrip {
            file,
            kind,
            skip_empty,
            pretty,
        } => cmd_roundtrip(&file, kind.as_deref(), skip_empty, pretty),
        Commands::ToJson { file, kind, pretty } => cmd_to_json(&file, kind.as_deref(), pretty),
        Commands::Timestamp { value } => cmd_timestamp(&value),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    let default = if verbose { "vo_models=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn read_document(file: &Path, kind: Option<&str>) -> Result<(String, DocumentKind), Box<dyn std::error::Error>> {
    let xml = fs::read_to_string(file)?;
    let kind = match kind {
        Some(kind) => kind.parse()?,
        None => DocumentKind::detect(&xml)?,
    };
    debug!(file = %file.display(), %kind, "read document");
    Ok((xml, kind))
}

#[cfg(feature = "cli")]
fn cmd_inspect(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let (xml, kind) = read_document(file, None)?;
    println!("kind: {}", kind);
    print!("{}", summarize(kind, &xml, &ReadOptions::default())?);
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_roundtrip(
    file: &Path,
    kind: Option<&str>,
    skip_empty: bool,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (xml, kind) = read_document(file, kind)?;
    let mut options = WriteOptions::new().with_skip_empty(skip_empty);
    if pretty {
        options = options.with_indent(2);
    }
    println!("{}", roundtrip(kind, &xml, &ReadOptions::default(), &options)?);
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_to_json(file: &Path, kind: Option<&str>, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (xml, kind) = read_document(file, kind)?;
    println!("{}", to_json(kind, &xml, &ReadOptions::default(), pretty)?);
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_timestamp(value: &str) -> Result<(), Box<dyn std::error::Error>> {
    let timestamp = UtcTimestamp::parse(value)?;
    println!("{}", timestamp);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
