//! App module - contains the main application state and logic

mod context_menu;
mod filters;
mod gallery;
mod lightbox;
mod loader;
mod save;

pub(crate) use lightbox::Lightbox;

use crate::listing::{self, ImageEntry};
use crate::settings::Settings;
use crate::theme;
use crate::types::*;
use crate::ui::components::count_label;
use eframe::egui;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Result of a background listing fetch, tagged with the refresh generation
/// that started it so stale responses are dropped.
type ListingOutcome = (u64, Result<Vec<ImageEntry>, listing::ListingError>);

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Listing
    pub(crate) url_input: String,
    pub(crate) active_url: String,
    pub(crate) entries: Vec<ImageEntry>,
    pub(crate) phase: ListingPhase,
    pub(crate) listing_outcome: Arc<Mutex<Option<ListingOutcome>>>,
    pub(crate) generation: u64,
    pub(crate) refreshed_at: Option<chrono::DateTime<chrono::Local>>,
    // Filter
    pub(crate) search_query: String,
    pub(crate) filtered_indices: Vec<usize>,
    // Lazy loading
    pub(crate) requested: HashSet<usize>,
    pub(crate) images: HashMap<usize, EntryImage>,
    pub(crate) load_results: Arc<Mutex<Vec<LoadResult>>>,
    pub(crate) cancel_token: CancellationToken,
    // Lightbox
    pub(crate) lightbox: Lightbox,
    // Save-to-disk
    pub(crate) save_status: Arc<Mutex<Option<SaveStatus>>>,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    // View
    pub(crate) large_cards: bool,
    // Window geometry tracking
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    // Infrastructure
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) client: reqwest::Client,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, data_dir: PathBuf) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let index_url = settings.index_url_or_default();

        let mut app = Self {
            url_input: index_url.clone(),
            active_url: index_url,
            entries: Vec::new(),
            phase: ListingPhase::Loading,
            listing_outcome: Arc::new(Mutex::new(None)),
            generation: 0,
            refreshed_at: None,
            search_query: String::new(),
            filtered_indices: Vec::new(),
            requested: HashSet::new(),
            images: HashMap::new(),
            load_results: Arc::new(Mutex::new(Vec::new())),
            cancel_token: CancellationToken::new(),
            lightbox: Lightbox::default(),
            save_status: Arc::new(Mutex::new(None)),
            toast_message: None,
            toast_start: None,
            large_cards: settings.large_cards,
            window_pos: None,
            window_size: None,
            needs_center: false,
            runtime: tokio::runtime::Runtime::new().expect("failed to start tokio runtime"),
            client: reqwest::Client::new(),
            data_dir,
        };

        app.start_listing_fetch(&cc.egui_ctx);
        app
    }

    /// Kick off a background fetch of the index document for the URL in the
    /// input field. Cancels in-flight image loads from the previous listing.
    pub(crate) fn start_listing_fetch(&mut self, ctx: &egui::Context) {
        self.cancel_token.cancel();
        self.cancel_token = CancellationToken::new();
        self.generation += 1;

        self.active_url = self.url_input.trim().to_string();
        self.phase = ListingPhase::Loading;
        self.entries.clear();
        self.filtered_indices.clear();
        self.requested.clear();
        self.images.clear();
        self.lightbox.close();
        self.load_results.lock().unwrap().clear();

        let generation = self.generation;
        let url = self.active_url.clone();
        let client = self.client.clone();
        let outcome = self.listing_outcome.clone();
        let ctx = ctx.clone();

        info!(url = %url, "Fetching directory listing");

        self.runtime.spawn(async move {
            let result = listing::fetch_listing(&client, &url).await;
            *outcome.lock().unwrap() = Some((generation, result));
            ctx.request_repaint();
        });
    }

    /// Drain everything the background tasks produced since last frame.
    pub(crate) fn poll_background(&mut self, ctx: &egui::Context) {
        let listing_outcome = self.listing_outcome.lock().unwrap().take();
        if let Some((generation, result)) = listing_outcome {
            if generation == self.generation {
                match result {
                    Ok(entries) => {
                        info!(count = entries.len(), "Listing loaded");
                        self.entries = entries;
                        self.phase = ListingPhase::Loaded;
                        self.refreshed_at = Some(chrono::Local::now());
                        self.apply_filter();
                    }
                    Err(e) => {
                        warn!(url = %self.active_url, error = %e, "Listing fetch failed");
                        self.phase = ListingPhase::Failed(e.to_string());
                        self.refreshed_at = Some(chrono::Local::now());
                    }
                }
            }
        }

        self.drain_load_results(ctx);

        let save_status = self.save_status.lock().unwrap().take();
        if let Some(status) = save_status {
            match status {
                SaveStatus::Saved(msg) => self.show_toast(msg),
                SaveStatus::Failed(msg) => self.show_toast(format!("Save failed: {}", msg)),
            }
        }
    }

    pub(crate) fn show_toast(&mut self, message: String) {
        self.toast_message = Some(message);
        self.toast_start = Some(std::time::Instant::now());
    }

    /// Count readout for the top bar, following the filter state.
    pub(crate) fn visible_count_label(&self) -> String {
        count_label(self.filtered_indices.len())
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            index_url: Some(self.active_url.clone()),
            large_cards: self.large_cards,
        };
        settings.save(&self.data_dir);
    }
}
