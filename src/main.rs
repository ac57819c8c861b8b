//! US Population Dashboard
//!
//! Shows US state population by year as two bar charts (egui_plot and
//! plotters) with a CSV download of the selected year.

mod charts;
mod dashboard;
mod data;
mod gui;
mod logging;
mod selection;

use anyhow::Context;
use clap::Parser;
use dashboard::{render, SourceTable, DEFAULT_DATA_FILE};
use data::CsvExporter;
use eframe::egui;
use gui::DashboardApp;
use selection::{ColorTheme, Selection};
use std::path::{Path, PathBuf};

/// Size of the chart image written by `--export-dir`.
const EXPORT_IMAGE_SIZE: (u32, u32) = (1000, 800);

#[derive(Parser, Debug)]
#[command(name = "us-population-dashboard")]
#[command(about = "US population by state, 2010-2019", long_about = None)]
#[command(version)]
struct Args {
    /// Population CSV to load
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Year selected at startup (defaults to the earliest year in the data)
    #[arg(long)]
    year: Option<i64>,

    /// Color theme selected at startup
    #[arg(long, value_enum, default_value_t = ColorTheme::default())]
    theme: ColorTheme,

    /// Write the CSV, chart image and chart spec for the selection to this
    /// directory instead of opening the window
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.log_file.as_deref()).context("Failed to initialize logging")?;

    match &args.export_dir {
        Some(dir) => run_headless(&args, dir),
        None => run_window(&args),
    }
}

/// Run one render pass and write its artifacts.
fn run_headless(args: &Args, dir: &Path) -> anyhow::Result<()> {
    let source = SourceTable::load(&args.data)?;
    let year = source.years().resolve(args.year)?;
    let selection = Selection {
        year,
        theme: args.theme,
    };
    let output = render(&source, &selection)?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let csv_path = CsvExporter::write_to(&output.export, dir)?;

    let stem = format!("us_population_{}", year);
    let png_path = dir.join(format!("{}.png", stem));
    let (width, height) = EXPORT_IMAGE_SIZE;
    output
        .static_chart
        .save_png(&png_path, width, height)
        .with_context(|| format!("Failed to render {}", png_path.display()))?;

    let json_path = dir.join(format!("{}.json", stem));
    let spec = output.interactive.spec().to_json()?;
    std::fs::write(&json_path, spec)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;

    for path in [&csv_path, &png_path, &json_path] {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_window(args: &Args) -> anyhow::Result<()> {
    let app = match SourceTable::load(&args.data) {
        Ok(source) => {
            let selection = Selection {
                year: source.years().resolve(args.year)?,
                theme: args.theme,
            };
            DashboardApp::ready(source, selection)
        }
        Err(e) => {
            if e.is_data_not_found() {
                tracing::error!(path = %args.data.display(), "Population data file not found");
            } else {
                tracing::error!(error = %e, "Failed to load population data");
            }
            DashboardApp::failed(&e)
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("US Population Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "US Population Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard window failed: {}", e))
}
