//! Full-screen image overlay
//!
//! The overlay owns its state: a visible flag and the current index into
//! the entry sequence. Everything else reaches it through the navigation
//! operations, and the keyboard handling below only exists while the
//! overlay is visible.

use super::App;
use crate::theme;
use crate::types::EntryImage;
use eframe::egui;

/// Overlay state machine: {Hidden, Visible} plus the current index.
/// Closing hides the overlay without touching the index; navigation wraps
/// circularly instead of clamping at the ends.
#[derive(Default)]
pub struct Lightbox {
    visible: bool,
    current: usize,
}

impl Lightbox {
    pub fn open(&mut self, index: usize) {
        self.current = index;
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn next(&mut self, len: usize) {
        if self.visible && len > 0 {
            self.current = (self.current + 1) % len;
        }
    }

    pub fn prev(&mut self, len: usize) {
        if self.visible && len > 0 {
            self.current = (self.current + len - 1) % len;
        }
    }
}

// ============================================================================
// OVERLAY RENDERING
// ============================================================================

impl App {
    pub(crate) fn render_lightbox(&mut self, ctx: &egui::Context) {
        if !self.lightbox.is_visible() {
            return;
        }
        let len = self.entries.len();
        if len == 0 || self.lightbox.current() >= len {
            self.lightbox.close();
            return;
        }

        let mut close = false;
        let mut go_prev = false;
        let mut go_next = false;
        let mut save_requested = false;

        // Keyboard surface, subscribed only while the overlay is visible.
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Escape) {
                close = true;
            }
            if i.key_pressed(egui::Key::ArrowLeft) {
                go_prev = true;
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                go_next = true;
            }
        });

        let current = self.lightbox.current();
        let entry = self.entries[current].clone();
        self.request_image(ctx, current);

        // Dim backdrop - blocks interaction with the gallery behind
        let screen = ctx.screen_rect();
        egui::Area::new(egui::Id::new("lightbox_dim"))
            .fixed_pos(screen.min)
            .order(egui::Order::Middle)
            .interactable(true)
            .show(ctx, |ui| {
                ui.allocate_response(screen.size(), egui::Sense::click());
                ui.painter()
                    .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(160));
            });

        let window_frame = egui::Frame::new()
            .fill(theme::BG_ELEVATED)
            .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_DEFAULT))
            .corner_radius(6.0)
            .inner_margin(egui::Margin {
                left: 2,
                right: 2,
                top: 0,
                bottom: 2,
            });

        let default_w = (screen.width() * 0.82).max(480.0);
        let default_h = (screen.height() * 0.86).max(360.0);

        let win_resp = egui::Window::new("lightbox_window")
            .title_bar(false)
            .collapsible(false)
            .resizable(true)
            .frame(window_frame)
            .default_size([default_w, default_h])
            .default_pos([
                (screen.width() - default_w) / 2.0,
                (screen.height() - default_h) / 2.0,
            ])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                // Header bar: icon, filename, position, save and close controls
                let header_height = 36.0;
                let (header_rect, _) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), header_height),
                    egui::Sense::hover(),
                );
                ui.painter().rect_filled(header_rect, 0.0, theme::BG_ELEVATED);

                let icon_x = header_rect.left() + 12.0;
                let center_y = header_rect.center().y;
                ui.painter().text(
                    egui::pos2(icon_x, center_y),
                    egui::Align2::LEFT_CENTER,
                    egui_phosphor::regular::IMAGE,
                    egui::FontId::proportional(16.0),
                    theme::ACCENT,
                );
                ui.painter().text(
                    egui::pos2(icon_x + 24.0, center_y),
                    egui::Align2::LEFT_CENTER,
                    &entry.name,
                    egui::FontId::proportional(14.0),
                    theme::TEXT_PRIMARY,
                );
                ui.painter().text(
                    egui::pos2(header_rect.right() - 84.0, center_y),
                    egui::Align2::RIGHT_CENTER,
                    format!("{} / {}", current + 1, len),
                    egui::FontId::proportional(12.0),
                    theme::TEXT_DIM,
                );

                // Save button
                let save_rect = egui::Rect::from_center_size(
                    egui::pos2(header_rect.right() - 52.0, center_y),
                    egui::vec2(24.0, 24.0),
                );
                let save_resp =
                    ui.interact(save_rect, ui.id().with("header_save"), egui::Sense::click());
                if save_resp.hovered() {
                    ui.painter()
                        .rect_filled(save_rect, 4.0, theme::BG_SURFACE);
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                ui.painter().text(
                    save_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::DOWNLOAD_SIMPLE,
                    egui::FontId::proportional(15.0),
                    if save_resp.hovered() {
                        theme::TEXT_PRIMARY
                    } else {
                        theme::TEXT_DIM
                    },
                );
                if save_resp.clicked() {
                    save_requested = true;
                }
                save_resp.on_hover_text("Save image to disk");

                // Close button
                let close_rect = egui::Rect::from_center_size(
                    egui::pos2(header_rect.right() - 20.0, center_y),
                    egui::vec2(24.0, 24.0),
                );
                let close_resp =
                    ui.interact(close_rect, ui.id().with("header_close"), egui::Sense::click());
                if close_resp.hovered() {
                    ui.painter()
                        .rect_filled(close_rect, 4.0, theme::BG_SURFACE);
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                ui.painter().text(
                    close_rect.center(),
                    egui::Align2::CENTER_CENTER,
                    egui_phosphor::regular::X,
                    egui::FontId::proportional(16.0),
                    if close_resp.hovered() {
                        theme::STATUS_ERROR
                    } else {
                        theme::TEXT_DIM
                    },
                );
                if close_resp.clicked() {
                    close = true;
                }

                // Image area
                let available = ui.available_size();
                let (rect, response) = ui.allocate_exact_size(available, egui::Sense::click());
                ui.painter().rect_filled(rect, 0.0, theme::BG_BASE);

                match self.images.get(&current) {
                    Some(EntryImage::Ready(tex)) => {
                        let tex_size = tex.size_vec2();
                        let scale = (rect.width() / tex_size.x)
                            .min(rect.height() / tex_size.y)
                            .min(1.0);
                        let img_rect =
                            egui::Rect::from_center_size(rect.center(), tex_size * scale);
                        ui.painter().image(
                            tex.id(),
                            img_rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    }
                    Some(EntryImage::Failed) => {
                        ui.painter().text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            format!("{}  Image unavailable", egui_phosphor::regular::IMAGE_BROKEN),
                            egui::FontId::proportional(14.0),
                            theme::TEXT_DIM,
                        );
                    }
                    None => {
                        ui.painter().text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            "Loading image…",
                            egui::FontId::proportional(14.0),
                            theme::TEXT_DIM,
                        );
                    }
                }

                // Prev / next arrows over the image edges
                for (offset, icon, is_prev) in [
                    (28.0, egui_phosphor::regular::CARET_LEFT, true),
                    (rect.width() - 28.0, egui_phosphor::regular::CARET_RIGHT, false),
                ] {
                    let arrow_rect = egui::Rect::from_center_size(
                        egui::pos2(rect.left() + offset, rect.center().y),
                        egui::vec2(36.0, 36.0),
                    );
                    let id = ui.id().with(if is_prev { "nav_prev" } else { "nav_next" });
                    let arrow_resp = ui.interact(arrow_rect, id, egui::Sense::click());
                    let bg = if arrow_resp.hovered() {
                        theme::BG_SURFACE
                    } else {
                        egui::Color32::from_black_alpha(120)
                    };
                    ui.painter().circle_filled(arrow_rect.center(), 18.0, bg);
                    ui.painter().text(
                        arrow_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        icon,
                        egui::FontId::proportional(18.0),
                        theme::TEXT_PRIMARY,
                    );
                    if arrow_resp.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                    if arrow_resp.clicked() {
                        if is_prev {
                            go_prev = true;
                        } else {
                            go_next = true;
                        }
                    }
                }

                response.context_menu(|ui| {
                    let action = self.entry_context_menu(ui, current, false);
                    if action.save {
                        save_requested = true;
                    }
                });
            });

        // Press outside the window closes the overlay
        if let Some(inner) = &win_resp {
            if ctx.input(|i| i.pointer.any_pressed()) {
                if let Some(pos) = ctx.input(|i| i.pointer.interact_pos()) {
                    if !inner.response.rect.contains(pos) {
                        close = true;
                    }
                }
            }
        }

        if save_requested {
            self.save_entry(ctx, current);
        }
        if go_prev {
            self.lightbox.prev(len);
        }
        if go_next {
            self.lightbox.next(len);
        }
        if close {
            self.lightbox.close();
        }
        if go_prev || go_next {
            let landed = self.lightbox.current();
            self.request_image(ctx, landed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Lightbox;

    #[test]
    fn opening_sets_index_and_visibility() {
        let mut lb = Lightbox::default();
        assert!(!lb.is_visible());
        lb.open(3);
        assert!(lb.is_visible());
        assert_eq!(lb.current(), 3);
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut lb = Lightbox::default();
        lb.open(4);
        lb.next(5);
        assert_eq!(lb.current(), 0);
        assert!(lb.is_visible());
    }

    #[test]
    fn prev_wraps_from_first_to_last() {
        let mut lb = Lightbox::default();
        lb.open(0);
        lb.prev(5);
        assert_eq!(lb.current(), 4);
        assert!(lb.is_visible());
    }

    #[test]
    fn navigation_steps_by_one_inside_the_range() {
        let mut lb = Lightbox::default();
        lb.open(2);
        lb.next(5);
        assert_eq!(lb.current(), 3);
        lb.prev(5);
        assert_eq!(lb.current(), 2);
    }

    #[test]
    fn close_keeps_the_current_index() {
        let mut lb = Lightbox::default();
        lb.open(2);
        lb.close();
        assert!(!lb.is_visible());
        assert_eq!(lb.current(), 2);
    }

    #[test]
    fn navigation_is_inert_while_hidden() {
        let mut lb = Lightbox::default();
        lb.open(2);
        lb.close();
        lb.next(5);
        lb.prev(5);
        assert_eq!(lb.current(), 2);
    }

    #[test]
    fn single_entry_navigation_stays_put() {
        let mut lb = Lightbox::default();
        lb.open(0);
        lb.next(1);
        lb.prev(1);
        assert_eq!(lb.current(), 0);
    }
}
