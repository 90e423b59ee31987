//! The fenced marker block that documents embed in place of an image.
//!
//! A marker is the only thing the document owns — the payload lives in
//! the side-car store, keyed by the marker's `id:` field:
//!
//! ````text
//! ```image-base64
//! name: screenshot-2024.png
//! id: 3b2a61d8-9c44-4c1e-b5d0-0f6a2ee41c7a
//! ```
//! ````
//!
//! The canonical writer always emits `name:` then `id:`; the parser in
//! [`scan`](crate::scan) locates fields by label, not position, so
//! hand-edited blocks with swapped lines still resolve.

/// Fence tag identifying an inlay marker block.
pub const MARKER_TAG: &str = "image-base64";

/// Opening fence line of a canonical marker.
pub const FENCE_OPEN: &str = "```image-base64";

/// Closing fence line of a marker.
pub const FENCE_CLOSE: &str = "```";

/// Label of the display-name field line.
pub const NAME_LABEL: &str = "name:";

/// Label of the identifier field line.
pub const ID_LABEL: &str = "id:";

/// A document reference: display name plus store identifier.
///
/// Many markers across many documents may carry the same identifier —
/// that sharing is exactly what the store's dedup produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    /// Display name shown by the renderer (usually the pasted file name).
    pub name: String,
    /// Identifier of the store entry holding the payload.
    pub id: String,
}

impl Marker {
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// Render a single marker in canonical form (no trailing blank line).
#[must_use]
pub fn render_marker(marker: &Marker) -> String {
    format!(
        "{FENCE_OPEN}\n{NAME_LABEL} {}\n{ID_LABEL} {}\n{FENCE_CLOSE}\n",
        marker.name, marker.id
    )
}

/// Render consecutive markers separated by a blank line.
///
/// The blank line is a formatting nicety for adjacent blocks, not
/// something the parser requires.
#[must_use]
pub fn render_markers(markers: &[Marker]) -> String {
    markers
        .iter()
        .map(render_marker)
        .collect::<Vec<_>>()
        .join("\n")
}
