/// Inlay command-line tool — manage the side-car image store of a text
/// vault: add images as deduplicated data-URI blobs, resolve markers,
/// and garbage-collect entries no document references any more.
///
/// # Command overview
///
/// ```text
/// inlay <COMMAND> [OPTIONS]
///
/// Commands:
///   add      Encode an image into the store and print its marker block
///   resolve  Print the payload stored under an identifier
///   list     List every identifier with its payload size
///   gc       Scan documents and collect unreferenced entries
///   help     Print help information
///
/// Global options:
///   --vault <DIR>       Vault root (default: current directory)
///   --store-dir <DIR>   Side-car directory name (default: .image-base64)
///   --store-file <FILE> Map file name (default: image-base64.json)
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                   |
/// |------|-------------------------------------------|
/// | 0    | Success                                   |
/// | 1    | Error (I/O failure, unknown id, etc.)     |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use inlay_store::{BlobStore, OsFs, StoreConfig};

mod cmd_add;
mod cmd_gc;
mod cmd_list;
mod cmd_resolve;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The inlay command-line tool.
///
/// Store, resolve, list, and garbage-collect inline-image blobs.
#[derive(Parser)]
#[command(name = "inlay", version, about = "Side-car image blob store CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    store: StoreOpts,
}

/// Options locating the vault and its side-car store, shared by every
/// sub-command.
#[derive(clap::Args)]
struct StoreOpts {
    /// Vault root directory.
    #[arg(long, global = true, default_value = ".")]
    vault: PathBuf,

    /// Side-car directory name inside the vault.
    #[arg(long, global = true)]
    store_dir: Option<String>,

    /// Map file name inside the side-car directory.
    #[arg(long, global = true)]
    store_file: Option<String>,
}

impl StoreOpts {
    /// Store configuration these options describe.
    fn config(&self) -> StoreConfig {
        let mut config = StoreConfig::default();
        if let Some(dir) = &self.store_dir {
            config.directory = dir.clone();
        }
        if let Some(file) = &self.store_file {
            config.filename = file.clone();
        }
        config
    }

    /// Open the blob store these options describe.
    fn open(&self) -> Result<BlobStore> {
        Ok(BlobStore::open(
            Arc::new(OsFs),
            self.vault.clone(),
            self.config(),
        )?)
    }
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Encode an image into the store and print its marker block.
    Add(AddArgs),
    /// Print the payload stored under an identifier.
    Resolve(ResolveArgs),
    /// List every identifier with its payload size.
    List,
    /// Scan documents and collect unreferenced entries.
    Gc(GcArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `inlay add`.
///
/// Reads the image file, encodes it as a data URI, inserts it into the
/// store (deduplicated by payload value), and prints the fenced marker
/// block to stdout — ready to paste into the destination document.
#[derive(clap::Args)]
pub struct AddArgs {
    /// Path to the image file to store.
    pub image: PathBuf,

    /// Document the marker is destined for (relative to the vault).
    #[arg(long)]
    pub doc: String,

    /// Display name for the marker. Defaults to the image file name.
    #[arg(long)]
    pub name: Option<String>,

    /// Override the MIME type guessed from the file extension.
    #[arg(long)]
    pub mime: Option<String>,
}

/// Arguments for `inlay resolve`.
///
/// Prints the raw data-URI payload for an identifier. A miss is
/// reported on stderr and exits with code 1 — a dangling marker, not a
/// crash.
#[derive(clap::Args)]
pub struct ResolveArgs {
    /// Identifier to look up.
    pub id: String,
}

/// Arguments for `inlay gc`.
///
/// Scans every `*.md` file under the vault for marker blocks, diffs the
/// referenced identifiers against the store, and disposes of the
/// orphans either interactively (one keep/delete prompt per entry;
/// every delete commits immediately, so quitting mid-review keeps the
/// decisions already made) or unconditionally with `--auto`.
#[derive(clap::Args)]
pub struct GcArgs {
    /// Delete every orphan without review.
    #[arg(long)]
    pub auto: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Add(args) => cmd_add::run(&cli.store, args),
        Commands::Resolve(args) => cmd_resolve::run(&cli.store, args),
        Commands::List => cmd_list::run(&cli.store),
        Commands::Gc(args) => cmd_gc::run(&cli.store, args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
