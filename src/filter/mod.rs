//! Filter engine: turns the launch table and the current selection into the data behind
//! the outcome pie chart and the payload scatter chart.
//!
//! Every function here is a pure function of its arguments, so the dashboard can call
//! them again on every selection change.

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::launches::{LaunchRecord, LaunchTable, Outcome};

/// Sentinel dropdown value meaning "no site filter".
pub const ALL_SITES: &str = "ALL";

pub const ALL_SITES_PIE_TITLE: &str = "Total Successful Launches for All Sites";
pub const SCATTER_TITLE: &str = "Payload vs. Launch Outcome";

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn matches(&self, launch_site: &str) -> bool {
        match self {
            Self::All => true,
            Self::Site(site) => site == launch_site,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_SITES,
            Self::Site(site) => site,
        }
    }
}

impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        if value == ALL_SITES {
            Self::All
        } else {
            Self::Site(value.to_string())
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Inclusive payload mass range in kilograms.
///
/// A range with `low > high` is accepted and simply contains nothing. Bounds are not
/// clamped; keeping them inside the slider limits is the slider's job.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }

    pub fn is_empty(&self) -> bool {
        self.low > self.high
    }
}

/// Everything the dashboard controls decide.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub site: SiteSelection,
    pub payload: PayloadRange,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

/// Pie chart input: one labelled value per category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl OutcomeSummary {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.slices.iter().find(|s| s.label == label).map(|s| s.value)
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Scatter points of one booster version category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoosterSeries {
    pub category: String,
    pub points: Vec<LaunchRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayloadScatter {
    pub title: String,
    pub series: Vec<BoosterSeries>,
}

impl PayloadScatter {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = &LaunchRecord> {
        self.series.iter().flat_map(|s| s.points.iter())
    }
}

/// Pie chart data for a site selection.
///
/// For `ALL` the `class` column is summed per launch site, which yields the number of
/// successful launches of every site (including sites with none). For a single site
/// its launches are counted by outcome. An unknown site yields no slices.
pub fn outcome_summary(table: &LaunchTable, site: &SiteSelection) -> OutcomeSummary {
    match site {
        SiteSelection::All => {
            let successes_by_site = table
                .iter()
                .map(|r| (r.launch_site.as_str(), r.class as f64))
                .into_grouping_map()
                .sum();
            let slices = table
                .sites()
                .into_iter()
                .map(|site| Slice {
                    value: successes_by_site.get(site.as_str()).copied().unwrap_or(0.),
                    label: site,
                })
                .collect();
            OutcomeSummary {
                title: ALL_SITES_PIE_TITLE.to_string(),
                slices,
            }
        }
        SiteSelection::Site(name) => {
            let counts = table
                .iter()
                .filter(|r| site.matches(&r.launch_site))
                .filter_map(|r| r.outcome())
                .counts();
            let slices = [Outcome::Success, Outcome::Failure]
                .into_iter()
                .filter_map(|outcome| {
                    counts.get(&outcome).map(|count| Slice {
                        label: outcome.to_string(),
                        value: *count as f64,
                    })
                })
                .collect();
            OutcomeSummary {
                title: format!("Success vs Failure for Site: {}", name),
                slices,
            }
        }
    }
}

/// Launches whose payload mass falls inside `range` (inclusive) and whose site matches
/// the selection, in table order.
pub fn payload_points<'t>(
    table: &'t LaunchTable,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<&'t LaunchRecord> {
    table
        .iter()
        .filter(|r| range.contains(r.payload_mass_kg))
        .filter(|r| site.matches(&r.launch_site))
        .collect()
}

/// Scatter chart data: the payload points grouped into one series per booster
/// version category, categories in first-appearance order.
pub fn payload_scatter(
    table: &LaunchTable,
    site: &SiteSelection,
    range: PayloadRange,
) -> PayloadScatter {
    let points = payload_points(table, site, range);
    let categories = points
        .iter()
        .map(|r| r.booster_version_category.as_str())
        .unique()
        .collect_vec();
    let series = categories
        .into_iter()
        .map(|category| BoosterSeries {
            category: category.to_string(),
            points: points
                .iter()
                .filter(|r| r.booster_version_category == category)
                .map(|r| (*r).clone())
                .collect(),
        })
        .collect();
    PayloadScatter {
        title: SCATTER_TITLE.to_string(),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn two_site_table() -> LaunchTable {
        let mut records = Vec::new();
        for class in [1, 1, 1, 0, 0] {
            records.push(LaunchRecord::new("A", 1000., class, "FT"));
        }
        for class in [1, 0, 0, 0, 0] {
            records.push(LaunchRecord::new("B", 4000., class, "B4"));
        }
        LaunchTable::new(records).unwrap()
    }

    #[test]
    fn test_all_sites_sums_successes_per_site() {
        let summary = outcome_summary(&two_site_table(), &SiteSelection::All);
        assert_eq!(summary.title, ALL_SITES_PIE_TITLE);
        assert_eq!(summary.slices.len(), 2);
        assert_eq!(summary.get("A"), Some(3.));
        assert_eq!(summary.get("B"), Some(1.));
    }

    #[test]
    fn test_single_site_counts_outcomes() {
        let summary = outcome_summary(&two_site_table(), &SiteSelection::from("A"));
        assert_eq!(summary.title, "Success vs Failure for Site: A");
        assert_eq!(summary.get("Success"), Some(3.));
        assert_eq!(summary.get("Failure"), Some(2.));
    }

    #[test]
    fn test_site_without_failures_has_single_slice() {
        let table = LaunchTable::new(vec![
            LaunchRecord::new("A", 1000., 1, "FT"),
            LaunchRecord::new("A", 2000., 1, "FT"),
        ])
        .unwrap();
        let summary = outcome_summary(&table, &SiteSelection::from("A"));
        assert_eq!(summary.slices.len(), 1);
        assert_eq!(summary.get("Success"), Some(2.));
        assert_eq!(summary.get("Failure"), None);
    }

    #[test]
    fn test_site_without_successes_still_listed_for_all() {
        let table = LaunchTable::new(vec![
            LaunchRecord::new("A", 1000., 0, "FT"),
            LaunchRecord::new("B", 2000., 1, "FT"),
        ])
        .unwrap();
        let summary = outcome_summary(&table, &SiteSelection::All);
        assert_eq!(summary.get("A"), Some(0.));
        assert_eq!(summary.slices[0].label, "A");
    }

    #[test]
    fn test_unknown_site_yields_empty_summary() {
        let summary = outcome_summary(&two_site_table(), &SiteSelection::from("Kwajalein"));
        assert!(summary.is_empty());
        assert_eq!(summary.total(), 0.);
    }

    #[test]
    fn test_payload_range_filter() {
        let table = LaunchTable::new(vec![
            LaunchRecord::new("A", 1000., 1, "FT"),
            LaunchRecord::new("A", 4000., 0, "FT"),
            LaunchRecord::new("A", 6000., 1, "FT"),
        ])
        .unwrap();
        let masses = payload_points(&table, &SiteSelection::All, PayloadRange::new(0., 5000.))
            .iter()
            .map(|r| r.payload_mass_kg)
            .collect_vec();
        assert_eq!(masses, vec![1000., 4000.]);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let table = LaunchTable::new(vec![
            LaunchRecord::new("A", 1000., 1, "FT"),
            LaunchRecord::new("A", 2000., 1, "FT"),
            LaunchRecord::new("A", 3000., 1, "FT"),
        ])
        .unwrap();
        let points = payload_points(&table, &SiteSelection::All, PayloadRange::new(1000., 3000.));
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = PayloadRange::new(5000., 1000.);
        assert!(range.is_empty());
        assert!(payload_points(&two_site_table(), &SiteSelection::All, range).is_empty());
    }

    #[test]
    fn test_out_of_slider_bounds_range_is_not_clamped() {
        let table = LaunchTable::new(vec![LaunchRecord::new("A", 15600., 1, "FT")]).unwrap();
        let points = payload_points(&table, &SiteSelection::All, PayloadRange::new(0., 20000.));
        assert_eq!(points.len(), 1);
        let points = payload_points(&table, &SiteSelection::All, PayloadRange::new(0., 10000.));
        assert!(points.is_empty());
    }

    #[test]
    fn test_site_filter_applies_to_points() {
        let table = two_site_table();
        let points = payload_points(
            &table,
            &SiteSelection::from("B"),
            PayloadRange::new(0., 10000.),
        );
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|r| r.launch_site == "B"));
    }

    #[test]
    fn test_scatter_groups_by_booster_category() {
        let table = LaunchTable::new(vec![
            LaunchRecord::new("A", 500., 0, "v1.0"),
            LaunchRecord::new("A", 2500., 1, "FT"),
            LaunchRecord::new("B", 3500., 1, "v1.0"),
            LaunchRecord::new("B", 9000., 1, "B5"),
        ])
        .unwrap();
        let scatter = payload_scatter(&table, &SiteSelection::All, PayloadRange::new(0., 5000.));
        assert_eq!(scatter.title, SCATTER_TITLE);
        let categories = scatter.series.iter().map(|s| s.category.as_str()).collect_vec();
        assert_eq!(categories, vec!["v1.0", "FT"]);
        assert_eq!(scatter.series[0].points.len(), 2);
        assert_eq!(scatter.point_count(), 3);
    }

    #[test]
    fn test_empty_scatter() {
        let scatter = payload_scatter(
            &two_site_table(),
            &SiteSelection::All,
            PayloadRange::new(7000., 8000.),
        );
        assert!(scatter.series.is_empty());
        assert_eq!(scatter.point_count(), 0);
    }

    #[test]
    fn test_site_selection_from_label() {
        assert_eq!(SiteSelection::from("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from("KSC LC-39A"),
            SiteSelection::Site("KSC LC-39A".to_string())
        );
        assert_eq!(SiteSelection::All.to_string(), "ALL");
    }

    fn arb_table() -> impl Strategy<Value = LaunchTable> {
        prop::collection::vec(
            (
                prop::sample::select(vec!["A", "B", "C"]),
                0u32..10_000u32,
                0u8..=1u8,
                prop::sample::select(vec!["v1.0", "v1.1", "FT", "B4", "B5"]),
            ),
            0..60,
        )
        .prop_map(|rows| {
            LaunchTable::new(
                rows.into_iter()
                    .map(|(site, mass, class, booster)| {
                        LaunchRecord::new(site, mass as f64, class, booster)
                    })
                    .collect(),
            )
            .unwrap()
        })
    }

    fn arb_site() -> impl Strategy<Value = SiteSelection> {
        prop::sample::select(vec!["ALL", "A", "B", "C", "D"]).prop_map(SiteSelection::from)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_all_sites_total_is_class_sum(table in arb_table()) {
            let summary = outcome_summary(&table, &SiteSelection::All);
            let class_sum: f64 = table.iter().map(|r| r.class as f64).sum();

            // Property: summing class per site preserves the overall class sum
            prop_assert_eq!(summary.total(), class_sum);
            prop_assert_eq!(summary.slices.len(), table.sites().len());
        }

        #[test]
        fn prop_site_successes_match_class_sum(table in arb_table(), site in arb_site()) {
            prop_assume!(site != SiteSelection::All);
            let summary = outcome_summary(&table, &site);
            let rows = table.iter().filter(|r| site.matches(&r.launch_site)).collect_vec();
            let class_sum: f64 = rows.iter().map(|r| r.class as f64).sum();

            // Property: the success slice is the class sum, the whole pie is the row count
            prop_assert_eq!(summary.get("Success").unwrap_or(0.), class_sum);
            prop_assert_eq!(summary.total(), rows.len() as f64);
        }

        #[test]
        fn prop_points_inside_range_and_site(
            table in arb_table(),
            site in arb_site(),
            low in 0f64..10_000f64,
            high in 0f64..10_000f64,
        ) {
            let range = PayloadRange::new(low, high);
            let points = payload_points(&table, &site, range);
            for point in &points {
                prop_assert!(low <= point.payload_mass_kg && point.payload_mass_kg <= high);
                prop_assert!(site.matches(&point.launch_site));
            }
            let expected = table
                .iter()
                .filter(|r| range.contains(r.payload_mass_kg) && site.matches(&r.launch_site))
                .count();
            prop_assert_eq!(points.len(), expected);
            if low > high {
                prop_assert!(points.is_empty());
            }
        }

        #[test]
        fn prop_operations_are_idempotent(
            table in arb_table(),
            site in arb_site(),
            low in 0f64..10_000f64,
            high in 0f64..10_000f64,
        ) {
            let range = PayloadRange::new(low, high);
            prop_assert_eq!(outcome_summary(&table, &site), outcome_summary(&table, &site));
            prop_assert_eq!(
                payload_scatter(&table, &site, range),
                payload_scatter(&table, &site, range)
            );
        }
    }
}
