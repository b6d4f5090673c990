pub mod config;
mod payload_slider;
mod pie_chart;
mod scatter_chart;

use std::path::{Path, PathBuf};

use egui::{Color32, Frame, Margin, RichText, Ui};
use egui_dropdown::DropDownBox;
use log::{error, info};

use config::AppConfig;
use payload_slider::PayloadSlider;

use crate::LaunchDashError;
use crate::filter::{PayloadRange, Selection, SiteSelection};
use crate::launches::{LaunchRecord, LaunchTable, load_launch_csv};
use crate::report::DashboardReport;
use crate::ui::{PALETTE_TITLE, dashboard_visuals};

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";
const SITE_PLACEHOLDER: &str = "Select a Launch Site here";

/// Resolves the dropdown text to a site selection. Text that is not exactly one of the
/// options (for example a partially typed filter) does not select anything.
pub(crate) fn resolve_site(options: &[String], input: &str) -> Option<SiteSelection> {
    options
        .iter()
        .find(|option| option.as_str() == input)
        .map(|option| SiteSelection::from(option.as_str()))
}

/// Selection a freshly loaded table starts from: every site and the table's full payload
/// range, or the slider bounds when the table is empty.
pub(crate) fn default_selection(table: &LaunchTable, config: &AppConfig) -> Selection {
    Selection {
        site: SiteSelection::All,
        payload: table
            .payload_bounds()
            .unwrap_or(PayloadRange::new(config.slider_min, config.slider_max)),
    }
}

/// `LaunchDashboardApp` shows the launch records of one CSV file: a site dropdown and a
/// payload slider drive an outcome pie chart and a payload/outcome scatter chart.
///
/// The charts are cached in a [`DashboardReport`] that is refreshed whenever the
/// selection differs from the one it was computed for.
pub struct LaunchDashboardApp {
    source_file: PathBuf,
    table: LaunchTable,
    site_options: Vec<String>,
    site_input: String,
    selection: Selection,
    report: DashboardReport,
    slider: PayloadSlider,
    app_config: AppConfig,
    pinned_launch: Option<LaunchRecord>,
    status_message: Option<String>,
}

impl LaunchDashboardApp {
    pub fn new(
        source_file: PathBuf,
        table: LaunchTable,
        app_config: AppConfig,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        cc.egui_ctx
            .set_visuals(dashboard_visuals(app_config.dark_mode));
        Self::from_table(source_file, table, app_config)
    }

    pub fn from_table(source_file: PathBuf, table: LaunchTable, app_config: AppConfig) -> Self {
        let selection = default_selection(&table, &app_config);
        let report = DashboardReport::build(&table, &selection);
        Self {
            source_file,
            site_options: table.site_options(),
            site_input: selection.site.label().to_string(),
            slider: PayloadSlider::from_config(&app_config),
            table,
            selection,
            report,
            app_config,
            pinned_launch: None,
            status_message: None,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn report(&self) -> &DashboardReport {
        &self.report
    }

    pub fn table(&self) -> &LaunchTable {
        &self.table
    }

    pub fn source_file(&self) -> &Path {
        &self.source_file
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Applies typed or picked dropdown text. Returns `true` if the site changed.
    pub fn set_site_input(&mut self, input: &str) -> bool {
        self.site_input = input.to_string();
        self.sync_site_selection()
    }

    pub fn set_payload_range(&mut self, range: PayloadRange) {
        self.selection.payload = range;
    }

    fn sync_site_selection(&mut self) -> bool {
        match resolve_site(&self.site_options, &self.site_input) {
            Some(site) if site != self.selection.site => {
                self.selection.site = site;
                self.pinned_launch = None;
                true
            }
            _ => false,
        }
    }

    /// Brings the charts up to date with the selection.
    pub fn refresh(&mut self) -> bool {
        self.report.refresh(&self.table, &self.selection)
    }

    /// Replaces the table with the records of another CSV file. On failure the current
    /// table stays active and the error is kept for display.
    pub fn load_table(&mut self, source_file: PathBuf) -> Result<(), LaunchDashError> {
        match load_launch_csv(&source_file) {
            Ok(table) => {
                info!("Switching dashboard to {:?}", source_file);
                self.replace_table(source_file, table);
                Ok(())
            }
            Err(e) => {
                error!("Could not load {:?}: {}", source_file, e);
                self.status_message = Some(format!("⚠ Could not load {:?}: {}", source_file, e));
                Err(e)
            }
        }
    }

    fn replace_table(&mut self, source_file: PathBuf, table: LaunchTable) {
        self.selection = default_selection(&table, &self.app_config);
        self.report = DashboardReport::build(&table, &self.selection);
        self.site_options = table.site_options();
        self.site_input = self.selection.site.label().to_string();
        self.source_file = source_file;
        self.table = table;
        self.pinned_launch = None;
        self.status_message = None;
    }

    fn show_toolbar(&mut self, ui: &mut Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.visuals_mut().button_frame = false;
            if ui.button("📂 Open CSV…").clicked()
                && let Some(path) = rfd::FileDialog::new()
                    .add_filter("CSV", &["csv"])
                    .pick_file()
            {
                let _ = self.load_table(path);
            }
            ui.separator();
            ui.label(format!(
                "{} · {} launches · {} sites",
                self.source_file.display(),
                self.table.len(),
                self.site_options.len() - 1
            ));
            if let Some(message) = &self.status_message {
                ui.separator();
                ui.label(RichText::new(message).color(Color32::RED));
            }
        });
    }

    fn show_site_selector(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Launch Site: ");
            ui.add(
                DropDownBox::from_iter(
                    &self.site_options,
                    "site_dropdown",
                    &mut self.site_input,
                    |ui, text| ui.selectable_label(false, text),
                )
                .filter_by_input(true),
            );
            if self.site_input.is_empty() {
                ui.label(RichText::new(SITE_PLACEHOLDER).weak().italics());
            }
        });
        self.sync_site_selection();
    }

    fn show_launch_detail(&self, ui: &mut Ui) {
        ui.label(RichText::new("Launch details").strong());
        ui.separator();
        match &self.pinned_launch {
            Some(launch) => {
                ui.label(scatter_chart::hover_text(launch));
            }
            None => {
                ui.label(RichText::new("Click a point in the scatter chart").weak());
            }
        }
    }
}

impl eframe::App for LaunchDashboardApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("dashboard_toolbar")
            .frame(Frame::new().inner_margin(4))
            .show(ctx, |ui| self.show_toolbar(ui));

        egui::SidePanel::right("launch_detail")
            .frame(Frame::default().inner_margin(Margin::same(8)))
            .resizable(true)
            .default_width(220.)
            .show(ctx, |ui| self.show_launch_detail(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let title_color = if self.app_config.dark_mode {
                    Color32::WHITE
                } else {
                    PALETTE_TITLE
                };
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new(DASHBOARD_TITLE).color(title_color).size(32.));
                });
                ui.add_space(8.);

                self.show_site_selector(ui);
                self.refresh();
                ui.add_space(8.);
                pie_chart::show_pie_chart(ui, &self.report.pie);

                ui.add_space(8.);
                ui.label("Payload range (Kg):");
                let mut payload = self.selection.payload;
                if self.slider.show(ui, &mut payload) {
                    self.set_payload_range(payload);
                }
                self.refresh();

                ui.add_space(8.);
                scatter_chart::show_scatter_chart(
                    ui,
                    &self.report.scatter,
                    self.report.payload,
                    &mut self.pinned_launch,
                );
                egui::CollapsingHeader::new(format!(
                    "Launch records ({})",
                    self.report.scatter.point_count()
                ))
                .default_open(false)
                .show(ui, |ui| scatter_chart::show_launch_table(ui, &self.report.scatter));
            });
        });

        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.app_config.window_width = rect.width();
            self.app_config.window_height = rect.height();
        }
    }
}
