//! Gallery grid rendering
//!
//! One card per visible entry, laid out in a wrapped grid. Card geometry
//! reserves the fixed placeholder ratio before an image arrives; a card
//! whose rect comes within the lazy-load margin of the viewport schedules
//! its one-shot image load.

use super::App;
use crate::constants::{LAZY_LOAD_MARGIN, PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};
use crate::theme;
use crate::types::EntryImage;
use crate::ui::components::truncate_filename;
use eframe::egui;

impl App {
    pub(crate) fn render_gallery(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.filtered_indices.is_empty() {
            self.render_filter_empty_state(ui);
            return;
        }

        let spacing = theme::SPACING_MD;
        let base_w = if self.large_cards {
            theme::CARD_WIDTH_LARGE
        } else {
            theme::CARD_WIDTH_SMALL
        };
        let available = ui.available_width();
        let num_cols = ((available + spacing) / (base_w + spacing)).floor().max(1.0);
        let card_w = ((available - spacing * (num_cols - 1.0)) / num_cols).floor();
        let image_h = (card_w * (PLACEHOLDER_HEIGHT / PLACEHOLDER_WIDTH)).floor();
        let card_h = image_h + theme::CARD_LABEL_HEIGHT;
        let label_chars = (card_w / 7.0) as usize;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);
                    let indices = self.filtered_indices.clone();

                    for &entry_index in &indices {
                        // Clone entry data to avoid borrow issues with the painter calls
                        let entry = self.entries[entry_index].clone();

                        let (rect, response) = ui
                            .allocate_exact_size(egui::vec2(card_w, card_h), egui::Sense::click());

                        // Near-viewport test: the one-shot load fires as soon
                        // as the card is within the margin, not only when it
                        // is fully on screen.
                        if ui.is_rect_visible(rect.expand(LAZY_LOAD_MARGIN)) {
                            self.request_image(ctx, entry_index);
                        }

                        if ui.is_rect_visible(rect) {
                            self.paint_card(ui, &response, rect, entry_index, &entry.name, label_chars);
                        }

                        let response = response.on_hover_text(&entry.path);

                        if response.clicked() {
                            self.lightbox.open(entry_index);
                            self.request_image(ctx, entry_index);
                        }

                        response.context_menu(|ui| {
                            let action = self.entry_context_menu(ui, entry_index, true);
                            if action.view {
                                self.lightbox.open(entry_index);
                                self.request_image(ctx, entry_index);
                            }
                            if action.save {
                                self.save_entry(ctx, entry_index);
                            }
                        });
                    }
                });
            });
    }

    fn paint_card(
        &self,
        ui: &egui::Ui,
        response: &egui::Response,
        rect: egui::Rect,
        entry_index: usize,
        name: &str,
        label_chars: usize,
    ) {
        let painter = ui.painter();
        let image_rect = egui::Rect::from_min_max(
            rect.min,
            egui::pos2(rect.max.x, rect.max.y - theme::CARD_LABEL_HEIGHT),
        );

        let card_bg = if response.hovered() {
            theme::BG_HOVER
        } else {
            theme::BG_ELEVATED
        };
        painter.rect_filled(rect, theme::RADIUS_DEFAULT, card_bg);

        match self.images.get(&entry_index) {
            Some(EntryImage::Ready(tex)) => {
                // Center-crop the texture to the card's aspect via the uv rect,
                // clipped to rounded top corners with a textured RectShape.
                let tex_size = tex.size_vec2();
                let tex_aspect = tex_size.x / tex_size.y.max(1.0);
                let area_aspect = image_rect.width() / image_rect.height().max(1.0);
                let uv = if tex_aspect > area_aspect {
                    let frac = area_aspect / tex_aspect;
                    egui::Rect::from_min_max(
                        egui::pos2(0.5 - frac / 2.0, 0.0),
                        egui::pos2(0.5 + frac / 2.0, 1.0),
                    )
                } else {
                    let frac = tex_aspect / area_aspect;
                    egui::Rect::from_min_max(
                        egui::pos2(0.0, 0.5 - frac / 2.0),
                        egui::pos2(1.0, 0.5 + frac / 2.0),
                    )
                };
                let brush = egui::epaint::Brush {
                    fill_texture_id: tex.id(),
                    uv,
                };
                let radius = theme::RADIUS_DEFAULT as u8;
                let mut shape = egui::epaint::RectShape::filled(
                    image_rect,
                    egui::CornerRadius {
                        nw: radius,
                        ne: radius,
                        sw: 0,
                        se: 0,
                    },
                    egui::Color32::WHITE,
                );
                shape.brush = Some(std::sync::Arc::new(brush));
                painter.add(shape);
            }
            Some(EntryImage::Failed) => {
                painter.text(
                    image_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::IMAGE_BROKEN,
                    egui::FontId::proportional(28.0),
                    theme::TEXT_DIM,
                );
            }
            None => {
                painter.text(
                    image_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::IMAGE,
                    egui::FontId::proportional(28.0),
                    theme::BG_SURFACE,
                );
            }
        }

        // Filename strip
        painter.text(
            egui::pos2(rect.left() + 8.0, rect.max.y - theme::CARD_LABEL_HEIGHT / 2.0),
            egui::Align2::LEFT_CENTER,
            truncate_filename(name, label_chars),
            egui::FontId::proportional(12.0),
            theme::TEXT_SECONDARY,
        );

        let (stroke_width, border) = if response.hovered() {
            (theme::STROKE_MEDIUM, theme::ACCENT)
        } else {
            (theme::STROKE_DEFAULT, theme::BORDER_SUBTLE)
        };
        painter.rect_stroke(
            rect,
            theme::RADIUS_DEFAULT,
            egui::Stroke::new(stroke_width, border),
            egui::StrokeKind::Outside,
        );

        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
    }

    fn render_filter_empty_state(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.label(
                egui::RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS)
                    .size(48.0)
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("No images match your search")
                    .size(16.0)
                    .color(theme::TEXT_MUTED),
            );
            ui.add_space(16.0);
            if ui
                .add(theme::button(format!(
                    "{}  Clear Search",
                    egui_phosphor::regular::X
                )))
                .clicked()
            {
                self.search_query.clear();
                self.apply_filter();
            }
        });
    }
}
