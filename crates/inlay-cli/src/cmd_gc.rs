/// Implementation of `inlay gc`.
///
/// Mark: walk every `*.md` file under the vault (the side-car store
/// directory itself is skipped) and collect the identifiers their
/// marker blocks reference. Sweep: diff against the store keys and
/// dispose of the orphans.
///
/// ```text
/// ┌─────────┬──────────────────────────────────────────────────────┐
/// │ Mode    │ Behavior                                             │
/// ├─────────┼──────────────────────────────────────────────────────┤
/// │ default │ Interactive review on stdin: d=delete, s=skip,       │
/// │         │ q=quit. Each delete commits immediately, so quitting │
/// │         │ keeps the decisions already made.                    │
/// │ --auto  │ Delete every orphan in one batch (single rewrite).   │
/// └─────────┴──────────────────────────────────────────────────────┘
/// ```
///
/// Scanning is best-effort: unreadable or non-UTF-8 files are skipped,
/// matching the scanner's tolerance of malformed marker blocks.
use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use inlay_gc::{Decision, GcMode, ReviewSession, collect_orphans, scan_documents, sweep};
use inlay_store::BlobStore;
use walkdir::WalkDir;

use crate::{GcArgs, StoreOpts};

/// Run the `inlay gc` command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened, loaded, or persisted.
/// Per-document read failures during the scan are skipped, not errors.
pub fn run(store_opts: &StoreOpts, args: &GcArgs) -> Result<()> {
    let store = store_opts.open()?;
    let live = scan_vault(store_opts)?;

    let mode = if args.auto {
        GcMode::Automatic
    } else {
        GcMode::Interactive
    };
    match mode {
        GcMode::Automatic => sweep_all(&store, &live),
        GcMode::Interactive => review_loop(&store, &live),
    }
}

/// Delete every orphan in one batch and report the tally.
fn sweep_all(store: &BlobStore, live: &BTreeSet<String>) -> Result<()> {
    let report = sweep(store, live)?;
    println!(
        "swept {} orphan(s), {} deleted",
        report.orphans.len(),
        report.deleted
    );
    Ok(())
}

/// Walk the orphans one at a time on stdin, committing each delete as
/// it is decided.
fn review_loop(store: &BlobStore, live: &BTreeSet<String>) -> Result<()> {
    let orphans = collect_orphans(&store.identifiers()?, live);
    let Some(mut session) = ReviewSession::begin(orphans) else {
        println!("no orphaned entries");
        return Ok(());
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut deleted = 0usize;
    let mut skipped = 0usize;

    while let Some(id) = session.current().map(str::to_owned) {
        let preview = payload_preview(store, &id)?;
        print!(
            "[{} left] {id}  {preview}\n  (d)elete / (s)kip / (q)uit? ",
            session.remaining()
        );
        std::io::stdout().flush().context("cannot flush stdout")?;

        let mut line = String::new();
        if input.read_line(&mut line).context("cannot read stdin")? == 0 {
            break; // EOF ends the review like a quit
        }
        match line.trim() {
            "d" | "delete" => {
                session.decide(Decision::Delete, store)?;
                deleted += 1;
            }
            "q" | "quit" => break,
            _ => {
                session.decide(Decision::Skip, store)?;
                skipped += 1;
            }
        }
    }

    println!("review ended: {deleted} deleted, {skipped} kept");
    Ok(())
}

/// Union the live identifiers referenced by every markdown document in
/// the vault.
fn scan_vault(store_opts: &StoreOpts) -> Result<BTreeSet<String>> {
    let store_dirname = store_opts.config().directory;
    let mut texts = Vec::new();
    for entry in WalkDir::new(&store_opts.vault)
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir() && e.file_name().to_string_lossy() == store_dirname)
        })
        .filter_map(std::result::Result::ok)
    {
        let path = entry.path();
        if entry.file_type().is_file()
            && path.extension().and_then(|e| e.to_str()) == Some("md")
        {
            // Best-effort: skip what cannot be read as text.
            if let Ok(text) = std::fs::read_to_string(path) {
                texts.push(text);
            }
        }
    }
    Ok(scan_documents(&texts))
}

/// First characters of the stored payload, for the review prompt.
fn payload_preview(store: &BlobStore, id: &str) -> Result<String> {
    let payload = store.resolve(id)?.unwrap_or_else(|| "<missing>".to_owned());
    let mut preview: String = payload.chars().take(48).collect();
    if payload.chars().count() > 48 {
        preview.push('…');
    }
    Ok(preview)
}
