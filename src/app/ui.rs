use super::charts;
use super::{ResultLinks, ReviewDashboard, View, APP_TITLE};
use crate::utils::file_size::format_size;
use eframe::egui::{self, Color32, RichText};

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 50, 50);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(21, 128, 61);
const ACCENT_COLOR: Color32 = Color32::from_rgb(37, 99, 235);

#[derive(Default)]
struct Actions {
    pick_file: bool,
    analyze: bool,
    open_report: Option<String>,
}

impl ReviewDashboard {
    pub fn render(&mut self, ctx: &egui::Context) {
        let mut actions = Actions::default();
        let view = self.controller.view();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading(APP_TITLE);
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new(
                                "Upload a review CSV to generate a competitiveness report with charts",
                            )
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    self.render_controls(ui, &mut actions);
                    ui.add_space(20.0);

                    egui::Frame::none()
                        .fill(ui.visuals().extreme_bg_color)
                        .inner_margin(16.0)
                        .rounding(6.0)
                        .show(ui, |ui| {
                            ui.set_min_height(300.0);
                            render_view(ui, &view, &mut actions);
                        });

                    ui.add_space(20.0);
                });
        });

        if actions.pick_file {
            self.pick_file();
        }
        if actions.analyze {
            self.controller.analyze();
        }
        if let Some(url) = actions.open_report {
            self.open_report(&url);
        }
    }

    fn render_controls(&self, ui: &mut egui::Ui, actions: &mut Actions) {
        let loading = self.controller.is_loading();

        ui.group(|ui| {
            ui.label(RichText::new("Step 1: upload review data").strong());
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("📁 Choose file...").clicked() {
                    actions.pick_file = true;
                }
                if let Some(file) = self.controller.selected_file() {
                    let label = match file.size {
                        Some(size) => format!("{} ({})", file.name, format_size(size)),
                        None => file.name.clone(),
                    };
                    ui.label(label).on_hover_text(file.path.display().to_string());
                }
            });
            ui.add_space(4.0);
            ui.label(
                RichText::new("The CSV needs a `review_text` and a `rating` column.")
                    .small()
                    .color(ui.visuals().weak_text_color()),
            );
        });

        ui.add_space(10.0);

        ui.group(|ui| {
            ui.label(RichText::new("Step 2: run the analysis").strong());
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                // Disabled while a request is in flight; the only guard
                // against overlapping analyze calls from the UI.
                ui.add_enabled_ui(!loading, |ui| {
                    let label = if loading {
                        "⏳ Analyzing..."
                    } else {
                        "📊 Generate report"
                    };
                    let button = egui::Button::new(label).min_size(egui::vec2(200.0, 40.0));

                    if ui.add(button).clicked() {
                        actions.analyze = true;
                    }
                });
                ui.label(
                    RichText::new(self.controller.state().status_text())
                        .small()
                        .color(ui.visuals().weak_text_color()),
                );
            });
        });
    }
}

fn render_view(ui: &mut egui::Ui, view: &View, actions: &mut Actions) {
    match view {
        View::Error(message) => {
            ui.vertical_centered(|ui| {
                ui.colored_label(ERROR_COLOR, RichText::new(format!("⚠ Error: {}", message)).strong());
            });
        }
        View::Idle => {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Choose a CSV file and click \"Generate report\" to see results.")
                        .color(ui.visuals().weak_text_color()),
                );
                ui.add_space(10.0);
                ui.heading("Example dashboard");
            });
            ui.add_space(10.0);
            charts::show_example_panel(ui);
        }
        View::Loading => {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.add(egui::Spinner::new().size(48.0));
                ui.add_space(10.0);
                ui.label("Analyzing, please wait...");
                ui.label(
                    RichText::new("This can take 10-30 seconds")
                        .small()
                        .color(ui.visuals().weak_text_color()),
                );
            });
        }
        View::Success(links) => render_result(ui, links, actions),
    }
}

fn render_result(ui: &mut egui::Ui, links: &ResultLinks, actions: &mut Actions) {
    egui::Frame::none()
        .fill(SUCCESS_COLOR.gamma_multiply(0.15))
        .inner_margin(12.0)
        .rounding(4.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(SUCCESS_COLOR, RichText::new("✅ Analysis complete!").strong());
            ui.label(
                links
                    .message
                    .as_deref()
                    .unwrap_or("Your report and charts are ready."),
            );
        });

    ui.add_space(12.0);

    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Analysis report").heading());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let button = egui::Button::new(RichText::new("⬇ Download report").color(Color32::WHITE))
                    .fill(ACCENT_COLOR);
                if ui.add(button).on_hover_text(links.report_url.as_str()).clicked() {
                    actions.open_report = Some(links.report_url.clone());
                }
            });
        });
        ui.label("Download the full .docx competitiveness report with charts.");
    });

    ui.add_space(12.0);

    ui.columns(2, |columns| {
        result_image(&mut columns[0], "Result - six-dimension radar", &links.radar_chart_url);
        result_image(&mut columns[1], "Result - sentiment distribution", &links.sentiment_pie_url);
    });
}

fn result_image(ui: &mut egui::Ui, title: &str, url: &str) {
    ui.group(|ui| {
        ui.label(RichText::new(title).strong());
        ui.add_space(8.0);
        ui.add(
            egui::Image::from_uri(url.to_string())
                .max_width(ui.available_width())
                .maintain_aspect_ratio(true),
        )
        .on_hover_text(url);
    });
}
