use std::{
    io,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use egui::Vec2;
use log::{error, warn};

use launchdash::{
    DashboardReport, LaunchDashError, PayloadRange, Selection, SiteSelection,
    launches::{DEFAULT_INPUT_FILE, load_launch_csv},
    ui::dashboard::{LaunchDashboardApp, config::AppConfig},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the dashboard window
    Show {
        #[arg(short, long, default_value = DEFAULT_INPUT_FILE)]
        input: PathBuf,
    },
    /// Print the chart data for one selection as JSON
    Report {
        #[arg(short, long, default_value = DEFAULT_INPUT_FILE)]
        input: PathBuf,

        #[arg(short, long, default_value = launchdash::ALL_SITES)]
        site: String,

        #[arg(long)]
        low: Option<f64>,

        #[arg(long)]
        high: Option<f64>,
    },
}

fn show(input: PathBuf) -> Result<(), LaunchDashError> {
    let table = load_launch_csv(&input)?;
    let app_config = AppConfig::from_local_file();

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = native_options
        .viewport
        .with_title("Launchdash")
        .with_inner_size(Vec2::new(
            app_config.window_width,
            app_config.window_height,
        ));

    eframe::run_native(
        "Launchdash",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(LaunchDashboardApp::new(
                input, table, app_config, cc,
            )))
        }),
    )
    .map_err(|e| LaunchDashError::GuiError {
        description: e.to_string(),
    })
}

fn report(
    input: &Path,
    site: &str,
    low: Option<f64>,
    high: Option<f64>,
) -> Result<(), LaunchDashError> {
    let table = load_launch_csv(input)?;
    let bounds = table.payload_bounds().unwrap_or(PayloadRange::new(0., 0.));
    let selection = Selection {
        site: SiteSelection::from(site),
        payload: PayloadRange::new(low.unwrap_or(bounds.low), high.unwrap_or(bounds.high)),
    };
    DashboardReport::build(&table, &selection).write_json(io::stdout().lock())?;
    println!();
    Ok(())
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    if let Err(e) = ctrlc::set_handler(move || {
        println!("Exiting...");
        std::process::exit(0);
    }) {
        warn!("Could not set Ctrl-C handler: {}", e);
    }

    let result = match cli.command {
        Commands::Show { input } => show(input),
        Commands::Report {
            input,
            site,
            low,
            high,
        } => report(&input, &site, low, high),
    };
    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", snafu::Report::from_error(e));
        std::process::exit(1);
    }
}
