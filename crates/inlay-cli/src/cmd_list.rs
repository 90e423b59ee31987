/// Implementation of `inlay list`.
///
/// Prints one line per store entry: identifier, payload length in
/// bytes, and the data-URI MIME prefix. Sorted by identifier (the map
/// is a `BTreeMap`, so iteration order is already stable).
use anyhow::Result;

use crate::StoreOpts;

/// Run the `inlay list` command.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or loaded.
pub fn run(store_opts: &StoreOpts) -> Result<()> {
    let store = store_opts.open()?;
    let entries = store.entries()?;

    for (id, payload) in &entries {
        let mime = payload
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or("unknown");
        println!("{id}  {:>10} bytes  {mime}", payload.len());
    }
    println!("{} entries", entries.len());
    Ok(())
}
