//! Save-to-disk logic

use super::App;
use crate::types::SaveStatus;
use crate::utils::format_bytes;
use eframe::egui;
use futures::StreamExt;
use std::path::PathBuf;
use tracing::info;

/// Stream the image to the chosen path, returning the byte count written.
async fn download_to(
    client: &reqwest::Client,
    url: &str,
    dest: &PathBuf,
) -> Result<u64, String> {
    let response = client.get(url).send().await.map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }

    let mut bytes_vec = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let data = chunk.map_err(|e| e.to_string())?;
        bytes_vec.extend_from_slice(&data);
    }

    tokio::fs::write(dest, &bytes_vec)
        .await
        .map_err(|e| e.to_string())?;
    Ok(bytes_vec.len() as u64)
}

impl App {
    /// Ask for a destination, then download the original file in the
    /// background. The outcome lands in `save_status` and becomes a toast.
    pub(crate) fn save_entry(&mut self, ctx: &egui::Context, entry_index: usize) {
        let Some(entry) = self.entries.get(entry_index) else {
            return;
        };

        let Some(dest) = rfd::FileDialog::new()
            .set_file_name(&entry.name)
            .save_file()
        else {
            return;
        };

        info!(url = %entry.url, dest = %dest.display(), "Saving image");

        let url = entry.url.clone();
        let client = self.client.clone();
        let status = self.save_status.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let outcome = match download_to(&client, &url, &dest).await {
                Ok(bytes) => SaveStatus::Saved(format!(
                    "Saved {} to {}",
                    format_bytes(bytes),
                    dest.display()
                )),
                Err(e) => SaveStatus::Failed(e),
            };
            *status.lock().unwrap() = Some(outcome);
            ctx.request_repaint();
        });
    }
}
