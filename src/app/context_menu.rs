//! Shared context menu for gallery entries (used by the grid and the lightbox)

use super::App;
use crate::theme;
use eframe::egui;

pub(crate) struct EntryAction {
    pub view: bool,
    pub save: bool,
}

impl App {
    pub(crate) fn entry_context_menu(
        &mut self,
        ui: &mut egui::Ui,
        entry_index: usize,
        include_view: bool,
    ) -> EntryAction {
        let mut action = EntryAction { view: false, save: false };
        let Some(entry) = self.entries.get(entry_index) else {
            return action;
        };
        let url = entry.url.clone();

        ui.spacing_mut().item_spacing.y = 2.0;

        let mut labels = vec![
            format!("{}  Open in Browser", egui_phosphor::regular::GLOBE),
            format!("{}  Copy Image URL", egui_phosphor::regular::COPY),
            format!("{}  Save Image…", egui_phosphor::regular::DOWNLOAD_SIMPLE),
        ];
        if include_view {
            labels.insert(0, format!("{}  View", egui_phosphor::regular::EYE));
        }
        let label_refs: Vec<&str> = labels.iter().map(|s| s.as_str()).collect();
        theme::set_menu_width(ui, &label_refs);

        if include_view {
            if theme::menu_item(ui, egui_phosphor::regular::EYE, "View") {
                action.view = true;
                ui.close_menu();
            }
            ui.separator();
        }
        if theme::menu_item(ui, egui_phosphor::regular::GLOBE, "Open in Browser") {
            if let Err(e) = open::that(&url) {
                tracing::warn!(url = %url, error = %e, "Failed to open browser");
            }
            ui.close_menu();
        }
        if theme::menu_item(ui, egui_phosphor::regular::COPY, "Copy Image URL") {
            ui.ctx().copy_text(url);
            ui.close_menu();
        }
        if theme::menu_item(ui, egui_phosphor::regular::DOWNLOAD_SIMPLE, "Save Image…") {
            action.save = true;
            ui.close_menu();
        }

        action
    }
}
