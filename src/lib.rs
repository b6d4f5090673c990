// Library interface for launchdash
// This allows integration tests and benchmarks to access internal modules

pub mod errors;
pub mod filter;
pub mod launches;
pub mod report;
pub mod ui;

// Re-export commonly used types
pub use errors::LaunchDashError;
pub use filter::{
    ALL_SITES, OutcomeSummary, PayloadRange, PayloadScatter, Selection, SiteSelection,
    outcome_summary, payload_points, payload_scatter,
};
pub use launches::{LaunchRecord, LaunchTable, Outcome, load_launch_csv};
pub use report::DashboardReport;
