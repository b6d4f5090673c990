pub mod loader;

use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::filter::{ALL_SITES, PayloadRange};
use crate::LaunchDashError;

pub use loader::{DEFAULT_INPUT_FILE, REQUIRED_COLUMNS, load_launch_csv};

/// Mission outcome encoded in the `class` column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(Self::Failure),
            1 => Some(Self::Success),
            _ => None,
        }
    }

    pub fn class(&self) -> u8 {
        match self {
            Self::Failure => 0,
            Self::Success => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failure => write!(f, "Failure"),
            Self::Success => write!(f, "Success"),
        }
    }
}

/// One launch attempt, as read from a row of the launch records CSV.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    /// Absent when the column is missing or holds something other than an integer.
    #[serde(
        rename = "Flight Number",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub flight_number: Option<u32>,
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    /// 1 = successful landing/mission, 0 = failure
    pub class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "Booster Version", default)]
    pub booster_version: Option<String>,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
}

impl LaunchRecord {
    pub fn new(
        launch_site: &str,
        payload_mass_kg: f64,
        class: u8,
        booster_version_category: &str,
    ) -> Self {
        Self {
            flight_number: None,
            launch_site: launch_site.to_string(),
            class,
            payload_mass_kg,
            booster_version: None,
            booster_version_category: booster_version_category.to_string(),
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        Outcome::from_class(self.class)
    }

    /// Checks the per-record invariant of the launch table.
    pub fn validate(&self) -> Result<(), String> {
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0. {
            return Err(format!(
                "payload mass must be a non-negative number, got {}",
                self.payload_mass_kg
            ));
        }
        if self.outcome().is_none() {
            return Err(format!("class must be 0 or 1, got {}", self.class));
        }
        Ok(())
    }
}

/// Immutable, ordered collection of launch records.
///
/// The table is validated once on construction and never mutated afterwards; loading a
/// different file produces a new table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
}

impl LaunchTable {
    /// Builds a table from records laid out one per line below a header line.
    pub fn new(records: Vec<LaunchRecord>) -> Result<Self, LaunchDashError> {
        Self::from_lines(
            records
                .into_iter()
                .enumerate()
                .map(|(idx, record)| (idx as u64 + 2, record)),
        )
    }

    /// Builds a table from records paired with the line each one starts on.
    pub(crate) fn from_lines(
        rows: impl IntoIterator<Item = (u64, LaunchRecord)>,
    ) -> Result<Self, LaunchDashError> {
        let mut records = Vec::new();
        for (line, record) in rows {
            record
                .validate()
                .map_err(|reason| LaunchDashError::InvalidRecord { line, reason })?;
            records.push(record);
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &LaunchRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct launch sites in the order they first appear.
    pub fn sites(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.launch_site.clone())
            .unique()
            .collect()
    }

    /// Dropdown options: the "ALL" sentinel followed by every distinct site.
    pub fn site_options(&self) -> Vec<String> {
        std::iter::once(ALL_SITES.to_string())
            .chain(self.sites())
            .collect()
    }

    /// Smallest and largest payload mass in the table.
    pub fn payload_bounds(&self) -> Option<PayloadRange> {
        self.records
            .iter()
            .map(|r| r.payload_mass_kg)
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()
            .map(|(low, high)| PayloadRange::new(low, high))
    }
}
