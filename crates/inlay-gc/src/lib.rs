#![warn(clippy::pedantic)]

pub mod gc;
pub mod marker;
pub mod review;
pub mod scan;

pub use gc::{GcMode, SweepReport, collect_orphans, sweep};
pub use marker::{Marker, render_marker, render_markers};
pub use review::{Decision, ReviewSession, ReviewState};
pub use scan::{SENTINEL_ID, scan_document, scan_documents};
