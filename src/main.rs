use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use eframe::egui;
use tracing::error;

use moodstone::app::MoodStoneApp;
use moodstone::{init_tracing, Config};

#[derive(Parser)]
#[command(about = "Stress self-assessment rendered as an animated mood stone")]
struct Args {
    /// TOML file overriding window, animation and snapshot settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start with sample answers already submitted
    #[arg(long)]
    demo: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "could not load config");
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };
    let title = config.window.title.clone();
    let demo = args.demo;
    let result = eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(MoodStoneApp::new(cc, config, demo)))),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "could not open window");
            eprintln!("Mood Stone could not open a window: {}", e);
            ExitCode::FAILURE
        }
    }
}
