/// Implementation of `inlay resolve`.
///
/// Looks the identifier up in the freshest store snapshot and prints
/// the data-URI payload on stdout. A miss is not a store failure — it
/// is reported as a plain error so the process exits 1, the same way a
/// renderer would fall back to a placeholder.
use anyhow::{Result, anyhow};

use crate::{ResolveArgs, StoreOpts};

/// Run the `inlay resolve` command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or if no entry exists
/// for the identifier.
pub fn run(store_opts: &StoreOpts, args: &ResolveArgs) -> Result<()> {
    let store = store_opts.open()?;
    match store.resolve(&args.id)? {
        Some(payload) => {
            println!("{payload}");
            Ok(())
        }
        None => Err(anyhow!("no entry for identifier {}", args.id)),
    }
}
