//! Lazy image loading
//!
//! Each entry is fetched and decoded at most once, on the first frame its
//! card comes near the viewport. Decoded pixels travel back to the UI
//! thread through a shared queue; textures are uploaded during the frame.

use super::App;
use crate::types::{EntryImage, LoadResult};
use eframe::egui;
use tracing::{debug, warn};

impl App {
    /// Schedule a one-shot background load for an entry. Calling again for
    /// the same entry is a no-op; entries never reload or unload.
    pub(crate) fn request_image(&mut self, ctx: &egui::Context, entry_index: usize) {
        if !self.requested.insert(entry_index) {
            return;
        }
        let Some(entry) = self.entries.get(entry_index) else {
            return;
        };

        let generation = self.generation;
        let url = entry.url.clone();
        let name_lower = entry.name_lower.clone();
        let client = self.client.clone();
        let results = self.load_results.clone();
        let token = self.cancel_token.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let image = fetch_and_decode(&client, &url, &name_lower).await;
            if image.is_none() {
                warn!(url = %url, "Image load failed");
            }
            if token.is_cancelled() {
                return;
            }
            results.lock().unwrap().push(LoadResult {
                generation,
                entry_index,
                image,
            });
            ctx.request_repaint();
        });
    }

    /// Upload decoded results as textures. Runs on the UI thread each frame.
    pub(crate) fn drain_load_results(&mut self, ctx: &egui::Context) {
        let pending: Vec<LoadResult> = std::mem::take(&mut *self.load_results.lock().unwrap());

        for result in pending {
            if result.generation != self.generation {
                continue;
            }
            let state = match result.image {
                Some(color_image) => {
                    let name = self
                        .entries
                        .get(result.entry_index)
                        .map(|e| e.path.clone())
                        .unwrap_or_default();
                    EntryImage::Ready(ctx.load_texture(
                        name,
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ))
                }
                None => EntryImage::Failed,
            };
            self.images.insert(result.entry_index, state);
        }
    }
}

/// Fetch the entry's bytes and decode them into RGBA pixels. Any failure
/// (network, status, decode) collapses to None; the entry then shows its
/// fallback placeholder.
async fn fetch_and_decode(
    client: &reqwest::Client,
    url: &str,
    name_lower: &str,
) -> Option<egui::ColorImage> {
    let response = client.get(url).send().await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    let bytes = response.bytes().await.ok()?;
    debug!(url = %url, bytes = bytes.len(), "Image fetched");

    if name_lower.ends_with(".svg") {
        rasterize_svg(&bytes)
    } else {
        decode_raster(&bytes)
    }
}

fn decode_raster(bytes: &[u8]) -> Option<egui::ColorImage> {
    let decoded = image::load_from_memory(bytes).ok()?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    Some(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}

fn rasterize_svg(bytes: &[u8]) -> Option<egui::ColorImage> {
    let tree = resvg::usvg::Tree::from_data(bytes, &resvg::usvg::Options::default()).ok()?;
    let size = tree.size();
    let (w, h) = (size.width().ceil() as u32, size.height().ceil() as u32);
    if w == 0 || h == 0 {
        return None;
    }
    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    Some(egui::ColorImage::from_rgba_premultiplied(
        [w as usize, h as usize],
        pixmap.data(),
    ))
}
