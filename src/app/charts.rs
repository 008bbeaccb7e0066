//! Example charts shown before any analysis has run.
//!
//! The data is fixed sample output; it only shows the user what a finished
//! analysis looks like.

use crate::utils::color::HexColor;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke};
use std::f32::consts::{FRAC_PI_2, TAU};

pub const SCORE_MAX: f32 = 10.0;

#[derive(Debug, Clone, Copy)]
pub struct DimensionScore {
    pub dimension: &'static str,
    pub score: f32,
    pub benchmark: f32,
}

pub const DIMENSION_SCORES: [DimensionScore; 6] = [
    DimensionScore { dimension: "Core gameplay", score: 9.2, benchmark: 7.5 },
    DimensionScore { dimension: "Narrative", score: 8.8, benchmark: 7.0 },
    DimensionScore { dimension: "Art style", score: 9.5, benchmark: 7.8 },
    DimensionScore { dimension: "Audio", score: 9.0, benchmark: 7.2 },
    DimensionScore { dimension: "User experience", score: 8.5, benchmark: 7.5 },
    DimensionScore { dimension: "Innovation", score: 8.7, benchmark: 6.8 },
];

#[derive(Debug, Clone, Copy)]
pub struct SentimentShare {
    pub label: &'static str,
    pub value: f32,
    pub color: &'static str,
}

pub const SENTIMENT_SHARES: [SentimentShare; 5] = [
    SentimentShare { label: "Very positive", value: 45.0, color: "#10b981" },
    SentimentShare { label: "Positive", value: 35.0, color: "#6ee7b7" },
    SentimentShare { label: "Neutral", value: 12.0, color: "#fbbf24" },
    SentimentShare { label: "Negative", value: 5.0, color: "#f87171" },
    SentimentShare { label: "Very negative", value: 3.0, color: "#dc2626" },
];

const SCORE_COLOR: &str = "#3b82f6";
const BENCHMARK_COLOR: &str = "#94a3b8";

/// Angle of radar axis `index` out of `count`; axis 0 points straight up and
/// the rest follow clockwise.
fn axis_angle(index: usize, count: usize) -> f32 {
    -FRAC_PI_2 + index as f32 * TAU / count as f32
}

/// Polygon vertices for one radar series. Values are clamped to `0..=max`.
pub fn radar_vertices(center: Pos2, radius: f32, values: &[f32], max: f32) -> Vec<Pos2> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
            let angle = axis_angle(i, values.len());
            center + egui::vec2(angle.cos(), angle.sin()) * radius * ratio
        })
        .collect()
}

/// Start and end angle of each pie slice, starting at 12 o'clock.
///
/// Negative values count as zero; an all-zero input has no slices.
pub fn pie_slices(values: &[f32]) -> Vec<(f32, f32)> {
    let total: f32 = values.iter().map(|v| v.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = -FRAC_PI_2;
    values
        .iter()
        .map(|value| {
            let end = start + value.max(0.0) / total * TAU;
            let slice = (start, end);
            start = end;
            slice
        })
        .collect()
}

pub fn percent_label(value: f32, total: f32) -> String {
    if total <= 0.0 {
        return "0%".to_string();
    }
    format!("{:.0}%", value / total * 100.0)
}

pub fn show_example_panel(ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.label(egui::RichText::new("Example - six-dimension radar").strong());
        ui.add_space(8.0);
        paint_radar(ui, 300.0);
        ui.horizontal(|ui| {
            legend_entry(ui, Color32::from_hex_or(SCORE_COLOR, Color32::LIGHT_BLUE), "Game score");
            legend_entry(ui, Color32::from_hex_or(BENCHMARK_COLOR, Color32::GRAY), "Market benchmark");
        });
    });

    ui.add_space(12.0);

    ui.group(|ui| {
        ui.label(egui::RichText::new("Example - sentiment distribution").strong());
        ui.add_space(8.0);
        paint_pie(ui, 250.0);
        let total: f32 = SENTIMENT_SHARES.iter().map(|s| s.value).sum();
        ui.horizontal_wrapped(|ui| {
            for share in SENTIMENT_SHARES {
                let label = format!("{} {}", share.label, percent_label(share.value, total));
                legend_entry(ui, Color32::from_hex_or(share.color, Color32::GRAY), &label);
            }
        });
    });
}

fn legend_entry(ui: &mut egui::Ui, color: Color32, label: &str) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
    ui.label(label);
    ui.add_space(8.0);
}

fn paint_radar(ui: &mut egui::Ui, height: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = rect.height().min(rect.width()) * 0.5 - 40.0;
    let grid = Stroke::new(1.0, ui.visuals().weak_text_color());
    let count = DIMENSION_SCORES.len();

    for ring in 1..=5 {
        let level = SCORE_MAX * ring as f32 / 5.0;
        let ring_points = radar_vertices(center, radius, &vec![level; count], SCORE_MAX);
        painter.add(Shape::closed_line(ring_points, grid));
    }

    for (i, dimension) in DIMENSION_SCORES.iter().enumerate() {
        let angle = axis_angle(i, count);
        let direction = egui::vec2(angle.cos(), angle.sin());
        painter.line_segment([center, center + direction * radius], grid);
        painter.text(
            center + direction * (radius + 18.0),
            Align2::CENTER_CENTER,
            dimension.dimension,
            FontId::proportional(12.0),
            ui.visuals().text_color(),
        );
    }

    let series = [
        (DIMENSION_SCORES.map(|d| d.benchmark), BENCHMARK_COLOR, 0.3),
        (DIMENSION_SCORES.map(|d| d.score), SCORE_COLOR, 0.6),
    ];
    for (values, hex, opacity) in series {
        let color = Color32::from_hex_or(hex, Color32::GRAY);
        let points = radar_vertices(center, radius, &values, SCORE_MAX);
        // Fill as a fan; the radar polygon is not guaranteed convex.
        for i in 0..points.len() {
            let next = points[(i + 1) % points.len()];
            painter.add(Shape::convex_polygon(
                vec![center, points[i], next],
                color.gamma_multiply(opacity),
                Stroke::NONE,
            ));
        }
        painter.add(Shape::closed_line(points, Stroke::new(2.0, color)));
    }
}

fn paint_pie(ui: &mut egui::Ui, height: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::hover());
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = 80.0_f32.min(rect.height() * 0.5 - 4.0);
    let values = SENTIMENT_SHARES.map(|s| s.value);

    for ((start, end), share) in pie_slices(&values).into_iter().zip(SENTIMENT_SHARES) {
        let color = Color32::from_hex_or(share.color, Color32::GRAY);
        let steps = (((end - start) / 0.05).ceil() as usize).max(1);
        let step = (end - start) / steps as f32;
        for s in 0..steps {
            let a0 = start + s as f32 * step;
            let a1 = a0 + step;
            painter.add(Shape::convex_polygon(
                vec![
                    center,
                    center + egui::vec2(a0.cos(), a0.sin()) * radius,
                    center + egui::vec2(a1.cos(), a1.sin()) * radius,
                ],
                color,
                Stroke::NONE,
            ));
        }
    }
}
