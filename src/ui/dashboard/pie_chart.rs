use std::f64::consts::{FRAC_PI_2, TAU};

use egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::filter::OutcomeSummary;
use crate::ui::category_color;

const PIE_HEIGHT: f32 = 320.;
const PIE_RADIUS: f64 = 1.;
const LABEL_RADIUS: f64 = 0.65;
// egui fills polygons as convex shapes, so wedges are drawn in pieces no wider than this
const MAX_SEGMENT_ANGLE: f64 = FRAC_PI_2;
const ARC_POINTS_PER_RADIAN: f64 = 24.;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Wedge {
    pub(crate) label: String,
    pub(crate) value: f64,
    pub(crate) fraction: f64,
    /// Index of the slice in the summary, used to pick a stable color.
    pub(crate) color_idx: usize,
    pub(crate) start_angle: f64,
    pub(crate) end_angle: f64,
    pub(crate) segments: Vec<Vec<[f64; 2]>>,
}

impl Wedge {
    pub(crate) fn label_position(&self) -> [f64; 2] {
        let mid = (self.start_angle + self.end_angle) / 2.;
        [LABEL_RADIUS * mid.cos(), LABEL_RADIUS * mid.sin()]
    }
}

/// Lays the slices out clockwise starting at twelve o'clock. Slices with no value get no
/// wedge, and a summary with a zero total gets none at all.
pub(crate) fn pie_wedges(summary: &OutcomeSummary) -> Vec<Wedge> {
    let total = summary.total();
    if total <= 0. {
        return Vec::new();
    }

    let mut angle = FRAC_PI_2;
    let mut wedges = Vec::new();
    for (idx, slice) in summary.slices.iter().enumerate() {
        if slice.value <= 0. {
            continue;
        }
        let fraction = slice.value / total;
        let start_angle = angle;
        let end_angle = angle - fraction * TAU;
        angle = end_angle;
        wedges.push(Wedge {
            label: slice.label.clone(),
            value: slice.value,
            fraction,
            color_idx: idx,
            start_angle,
            end_angle,
            segments: wedge_segments(start_angle, end_angle),
        });
    }
    wedges
}

fn wedge_segments(start_angle: f64, end_angle: f64) -> Vec<Vec<[f64; 2]>> {
    let sweep = start_angle - end_angle;
    let segment_count = (sweep / MAX_SEGMENT_ANGLE).ceil().max(1.) as usize;
    let segment_sweep = sweep / segment_count as f64;

    (0..segment_count)
        .map(|segment| {
            let from = start_angle - segment as f64 * segment_sweep;
            let arc_points = ((segment_sweep * ARC_POINTS_PER_RADIAN).ceil() as usize).max(2);
            let mut points = Vec::with_capacity(arc_points + 2);
            points.push([0., 0.]);
            for step in 0..=arc_points {
                let a = from - segment_sweep * step as f64 / arc_points as f64;
                points.push([PIE_RADIUS * a.cos(), PIE_RADIUS * a.sin()]);
            }
            points
        })
        .collect()
}

pub(crate) fn show_pie_chart(ui: &mut Ui, summary: &OutcomeSummary) {
    ui.label(RichText::new(&summary.title).strong().size(18.));
    let wedges = pie_wedges(summary);
    if wedges.is_empty() {
        ui.label(RichText::new("No data for this selection").italics());
    }

    Plot::new("success_pie_chart")
        .height(PIE_HEIGHT)
        .data_aspect(1.)
        .show_background(false)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for wedge in &wedges {
                let color = category_color(wedge.color_idx);
                for segment in &wedge.segments {
                    plot_ui.polygon(
                        Polygon::new(wedge.label.clone(), PlotPoints::new(segment.clone()))
                            .fill_color(color)
                            .stroke(Stroke::new(1., color)),
                    );
                }
                let [x, y] = wedge.label_position();
                let percentage = RichText::new(format!(
                    "{} ({:.1}%)",
                    wedge.value,
                    wedge.fraction * 100.
                ))
                    .color(Color32::WHITE)
                    .strong();
                plot_ui.text(Text::new("", PlotPoint::new(x, y), percentage));
            }
        });
}
