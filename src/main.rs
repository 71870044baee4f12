#![windows_subsystem = "windows"]
//! Index Gallery - Main entry point

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

mod app;
mod constants;
mod listing;
mod settings;
mod theme;
mod types;
mod ui;
mod utils;

use app::App;
use constants::*;
use eframe::egui;
use tracing::info;
use types::ListingPhase;
use utils::get_data_dir;

/// Initialize file logging. Returns a guard that must be held for the app lifetime.
fn init_logging(data_dir: &std::path::Path) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let logs_dir = data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&logs_dir, "index-gallery.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,index_gallery=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    guard
}

fn main() -> eframe::Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = init_logging(&data_dir);

    info!(version = APP_VERSION, "Index Gallery starting");

    let settings = settings::Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1200.0, 800.0)))
        .with_min_inner_size([720.0, 480.0])
        .with_title(APP_NAME);

    // Window/taskbar icon rasterized from the inline SVG
    {
        let (rgba, width, height) = utils::rasterize_icon(64);
        let icon = egui::IconData { rgba, width, height };
        viewport = viewport.with_icon(std::sync::Arc::new(icon));
    }

    let needs_center = win_pos.is_none();

    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, settings, data_dir);
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}

// ============================================================================
// MAIN UPDATE LOOP & UI RENDERING
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        // Apply results from background tasks
        self.poll_background(ctx);

        self.render_top_bar(ctx);
        self.render_status_bar(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(theme::SPACING_LG as i8)),
            )
            .show(ctx, |ui| match self.phase.clone() {
                ListingPhase::Loading => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(ui.available_height() / 3.0);
                        ui.add(egui::Spinner::new().size(32.0));
                        ui.add_space(8.0);
                        ui.label(
                            egui::RichText::new("Loading directory listing…")
                                .size(14.0)
                                .color(theme::TEXT_MUTED),
                        );
                    });
                }
                ListingPhase::Failed(message) => {
                    self.render_listing_error(ui, ctx, &message);
                }
                ListingPhase::Loaded => {
                    if self.entries.is_empty() {
                        self.render_empty_listing(ui);
                    } else {
                        self.render_gallery(ui, ctx);
                    }
                }
            });

        self.render_lightbox(ctx);
        self.render_toast(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_settings();
    }
}

impl App {
    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .exact_height(theme::TOP_BAR_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(egui_phosphor::regular::IMAGES)
                            .size(20.0)
                            .color(theme::ACCENT),
                    );
                    ui.label(
                        egui::RichText::new(APP_NAME)
                            .size(15.0)
                            .color(theme::TEXT_PRIMARY),
                    );
                    ui.add_space(theme::SPACING_LG);

                    // Directory index URL
                    let url_response = ui.add(
                        egui::TextEdit::singleline(&mut self.url_input)
                            .desired_width(320.0)
                            .hint_text("http://host/path/"),
                    );
                    let url_submitted = url_response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    let refresh_clicked = ui
                        .add(theme::button(format!(
                            "{}  Refresh",
                            egui_phosphor::regular::ARROW_CLOCKWISE
                        )))
                        .on_hover_text("Reload the directory listing")
                        .clicked();

                    if url_submitted || refresh_clicked {
                        self.start_listing_fetch(ctx);
                    }

                    ui.add_space(theme::SPACING_XL);

                    // Filename filter
                    let search_response = ui.add(
                        egui::TextEdit::singleline(&mut self.search_query)
                            .desired_width(200.0)
                            .hint_text(format!(
                                "{}  Filter by filename",
                                egui_phosphor::regular::MAGNIFYING_GLASS
                            )),
                    );
                    if search_response.changed() {
                        self.apply_filter();
                    }

                    ui.label(
                        egui::RichText::new(self.visible_count_label())
                            .size(13.0)
                            .color(theme::TEXT_MUTED),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let icon = if self.large_cards {
                            egui_phosphor::regular::SQUARES_FOUR
                        } else {
                            egui_phosphor::regular::GRID_NINE
                        };
                        if ui
                            .add(egui::Button::new(icon).frame(false))
                            .on_hover_text("Toggle card size")
                            .clicked()
                        {
                            self.large_cards = !self.large_cards;
                            self.save_settings();
                        }
                    });
                });
            });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_ELEVATED)
                    .inner_margin(egui::Margin::symmetric(12, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.active_url)
                            .size(11.0)
                            .color(theme::TEXT_DIM),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(at) = self.refreshed_at {
                            ui.label(
                                egui::RichText::new(format!(
                                    "Refreshed {}",
                                    at.format("%H:%M:%S")
                                ))
                                .size(11.0)
                                .color(theme::TEXT_DIM),
                            );
                        }
                    });
                });
            });
    }

    fn render_listing_error(&mut self, ui: &mut egui::Ui, ctx: &egui::Context, message: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.label(
                egui::RichText::new(egui_phosphor::regular::WIFI_SLASH)
                    .size(48.0)
                    .color(theme::STATUS_ERROR),
            );
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("Could not load the directory listing")
                    .size(16.0)
                    .color(theme::TEXT_MUTED),
            );
            ui.label(
                egui::RichText::new(message)
                    .size(12.0)
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(16.0);
            if ui
                .add(theme::button_accent(format!(
                    "{}  Retry",
                    egui_phosphor::regular::ARROW_CLOCKWISE
                )))
                .clicked()
            {
                self.start_listing_fetch(ctx);
            }
        });
    }

    fn render_empty_listing(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.label(
                egui::RichText::new(egui_phosphor::regular::IMAGES)
                    .size(48.0)
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("No images found in this directory")
                    .size(16.0)
                    .color(theme::TEXT_MUTED),
            );
        });
    }

    fn render_toast(&mut self, ctx: &egui::Context) {
        let Some(message) = self.toast_message.clone() else {
            return;
        };
        let elapsed = self
            .toast_start
            .map(|t| t.elapsed())
            .unwrap_or_default();
        if elapsed > std::time::Duration::from_secs(4) {
            self.toast_message = None;
            self.toast_start = None;
            return;
        }

        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -40.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::BG_SURFACE)
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_DEFAULT))
                    .corner_radius(theme::RADIUS_LARGE)
                    .inner_margin(egui::Margin::symmetric(14, 8))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(message)
                                .size(13.0)
                                .color(theme::TEXT_PRIMARY),
                        );
                    });
            });

        // Keep repainting so the toast dismisses itself
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
