use std::io::Write;

use log::debug;
use serde::Serialize;

use crate::filter::{
    OutcomeSummary, PayloadRange, PayloadScatter, Selection, SiteSelection, outcome_summary,
    payload_scatter,
};
use crate::launches::LaunchTable;
use crate::LaunchDashError;

/// Both chart outputs of the dashboard for one selection.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardReport {
    pub site: SiteSelection,
    pub payload: PayloadRange,
    pub pie: OutcomeSummary,
    pub scatter: PayloadScatter,
}

impl DashboardReport {
    pub fn build(table: &LaunchTable, selection: &Selection) -> Self {
        Self {
            site: selection.site.clone(),
            payload: selection.payload,
            pie: outcome_summary(table, &selection.site),
            scatter: payload_scatter(table, &selection.site, selection.payload),
        }
    }

    /// Recomputes the outputs bound to whichever inputs changed. Returns `true` if
    /// anything was recomputed.
    pub fn refresh(&mut self, table: &LaunchTable, selection: &Selection) -> bool {
        let site_changed = self.site != selection.site;
        let payload_changed = self.payload != selection.payload;
        if site_changed {
            debug!("Site selection changed to {}", selection.site);
            self.pie = outcome_summary(table, &selection.site);
        }
        if site_changed || payload_changed {
            debug!(
                "Recomputing payload scatter for {} in [{}, {}]",
                selection.site, selection.payload.low, selection.payload.high
            );
            self.scatter = payload_scatter(table, &selection.site, selection.payload);
        }
        self.site = selection.site.clone();
        self.payload = selection.payload;
        site_changed || payload_changed
    }

    pub fn selection(&self) -> Selection {
        Selection {
            site: self.site.clone(),
            payload: self.payload,
        }
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), LaunchDashError> {
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| LaunchDashError::ReportWriteError { source: e })
    }
}
