//! Common types and data structures

use egui::TextureHandle;

/// Where the current directory listing stands. Failed is kept apart from
/// an empty Loaded listing so the UI can tell "load failed" from "nothing
/// found".
#[derive(Clone, PartialEq)]
pub enum ListingPhase {
    Loading,
    Loaded,
    Failed(String),
}

/// Per-entry image state. Transitions one way: pending entries become
/// Ready or Failed and stay there; scrolling away never unloads.
#[derive(Clone)]
pub enum EntryImage {
    Ready(TextureHandle),
    Failed,
}

/// Decoded pixels handed from a loader task back to the UI thread.
pub struct LoadResult {
    pub generation: u64,
    pub entry_index: usize,
    pub image: Option<egui::ColorImage>,
}

/// Outcome of a save-to-disk task, reported through the toast.
#[derive(Clone, PartialEq)]
pub enum SaveStatus {
    Saved(String),
    Failed(String),
}
