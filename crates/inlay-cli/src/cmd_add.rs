/// Implementation of `inlay add`.
///
/// Pipeline: read image bytes → encode as data URI → insert into the
/// store (returns the existing identifier when the payload is already
/// stored) → print the marker block for the destination document.
///
/// ````text
/// $ inlay add shot.png --vault ~/notes --doc journal/today.md
/// ```image-base64
/// name: shot.png
/// id: 3b2a61d8-9c44-4c1e-b5d0-0f6a2ee41c7a
/// ```
/// ````
///
/// The marker goes to stdout so it can be piped straight into an editor
/// snippet; the dedup notice, when the payload was already present,
/// goes to stderr.
use anyhow::Result;
use inlay_gc::{Marker, render_marker};
use inlay_store::read_and_encode;

use crate::{AddArgs, StoreOpts};

/// Run the `inlay add` command.
///
/// # Errors
///
/// Returns an error if the image file cannot be read, the store cannot
/// be opened, or the insert fails (empty `--doc`, storage failure).
pub fn run(store_opts: &StoreOpts, args: &AddArgs) -> Result<()> {
    let payload = read_and_encode(&args.image, args.mime.as_deref())?;

    let store = store_opts.open()?;
    let before = store.len()?;
    let id = store.insert(&payload, &args.doc)?;
    if store.len()? == before {
        eprintln!("payload already stored, reusing {id}");
    }

    let name = args.name.clone().unwrap_or_else(|| {
        args.image
            .file_name()
            .map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned())
    });

    print!("{}", render_marker(&Marker::new(name, id)));
    Ok(())
}
