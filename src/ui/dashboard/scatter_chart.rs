use egui::{Align, Layout, Pos2, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points};

use crate::filter::{PayloadRange, PayloadScatter};
use crate::launches::LaunchRecord;
use crate::ui::category_color;

const SCATTER_HEIGHT: f32 = 360.;
const POINT_RADIUS: f32 = 5.;
const HOVER_RADIUS_PX: f32 = 8.;
const TABLE_ROW_HEIGHT: f32 = 18.;
const TABLE_MAX_HEIGHT: f32 = 240.;

/// Index of the screen position closest to `pointer`, if any lies within `radius`.
pub(crate) fn nearest_within(
    pointer: Pos2,
    positions: impl IntoIterator<Item = Pos2>,
    radius: f32,
) -> Option<usize> {
    positions
        .into_iter()
        .enumerate()
        .map(|(idx, pos)| (idx, pos.distance(pointer)))
        .filter(|(_, distance)| *distance <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(idx, _)| idx)
}

pub(crate) fn hover_text(record: &LaunchRecord) -> String {
    let mut text = format!(
        "Launch Site: {}\nPayload Mass (kg): {}\nclass: {}\nBooster Version Category: {}",
        record.launch_site, record.payload_mass_kg, record.class, record.booster_version_category
    );
    if let Some(flight_number) = record.flight_number {
        text.push_str(&format!("\nFlight Number: {}", flight_number));
    }
    if let Some(booster_version) = &record.booster_version {
        text.push_str(&format!("\nBooster Version: {}", booster_version));
    }
    text
}

/// Draws the payload/outcome scatter. Clicking a point stores it in `pinned`.
pub(crate) fn show_scatter_chart(
    ui: &mut Ui,
    scatter: &PayloadScatter,
    range: PayloadRange,
    pinned: &mut Option<LaunchRecord>,
) {
    ui.label(RichText::new(&scatter.title).strong().size(18.));
    if scatter.point_count() == 0 {
        ui.label(RichText::new("No launches in this payload range").italics());
    }

    let mut plot = Plot::new("success_payload_scatter_chart")
        .height(SCATTER_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_y(-0.25)
        .include_y(1.25)
        .allow_scroll(false);
    if !range.is_empty() {
        plot = plot.include_x(range.low).include_x(range.high);
    }

    let plot_response = plot.show(ui, |plot_ui| {
        for (idx, series) in scatter.series.iter().enumerate() {
            let points = series
                .points
                .iter()
                .map(|r| [r.payload_mass_kg, r.class as f64])
                .collect::<Vec<_>>();
            plot_ui.points(
                Points::new(series.category.clone(), PlotPoints::new(points))
                    .color(category_color(idx))
                    .radius(POINT_RADIUS)
                    .filled(true),
            );
        }
    });

    let records = scatter.points().collect::<Vec<_>>();
    let transform = plot_response.transform;
    let response = plot_response.response;
    let target = response
        .hover_pos()
        .or_else(|| response.interact_pointer_pos());
    let hovered = target.and_then(|pointer| {
        nearest_within(
            pointer,
            records.iter().map(|r| {
                transform.position_from_point(&PlotPoint::new(r.payload_mass_kg, r.class as f64))
            }),
            HOVER_RADIUS_PX,
        )
    });

    if let Some(idx) = hovered {
        if response.clicked() {
            *pinned = Some(records[idx].clone());
        }
        let _ = response.on_hover_text(hover_text(records[idx]));
    }
}

pub(crate) fn show_launch_table(ui: &mut Ui, scatter: &PayloadScatter) {
    let records = scatter.points().collect::<Vec<_>>();
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto())
        .column(Column::auto().at_least(110.))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto().at_least(120.))
        .column(Column::remainder())
        .min_scrolled_height(0.)
        .max_scroll_height(TABLE_MAX_HEIGHT)
        .header(20., |mut header| {
            for title in [
                "Flight",
                "Launch Site",
                "Payload Mass (kg)",
                "class",
                "Booster Version",
                "Category",
            ] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(TABLE_ROW_HEIGHT, records.len(), |mut row| {
                let record = records[row.index()];
                row.col(|ui| {
                    ui.label(
                        record
                            .flight_number
                            .map(|n| n.to_string())
                            .unwrap_or_default(),
                    );
                });
                row.col(|ui| {
                    ui.label(record.launch_site.as_str());
                });
                row.col(|ui| {
                    ui.label(record.payload_mass_kg.to_string());
                });
                row.col(|ui| {
                    ui.label(record.class.to_string());
                });
                row.col(|ui| {
                    ui.label(record.booster_version.as_deref().unwrap_or(""));
                });
                row.col(|ui| {
                    ui.label(record.booster_version_category.as_str());
                });
            });
        });
}
