use clap::Parser;
use eframe::egui;

mod controller;
mod ui;

use crate::ui::{BlankScene, ScreenApp};

const APP_TITLE: &str = "Anchor Layout Demo";

#[derive(Parser, Debug)]
#[command(about = "Single-screen constraint-layout demo")]
struct Args {
    /// Show the extended layout: titled container row plus orientation
    /// response.
    #[arg(long)]
    extended: bool,
    /// Tracing filter, e.g. "info" or "demo_gui=debug".
    #[arg(long, default_value = "info")]
    log_filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootInstall {
    Screen,
    Blank,
}

/// The typed-capability check for scene connection: without a window handle
/// there is nothing to bind the screen to, and the bootstrap degrades to an
/// empty scene without surfacing an error.
fn decide_root(has_window_handle: bool) -> RootInstall {
    if has_window_handle {
        RootInstall::Screen
    } else {
        RootInstall::Blank
    }
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(args.log_filter.clone())
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1024.0, 768.0])
            .with_maximized(true),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            use raw_window_handle::HasWindowHandle as _;

            let app: Box<dyn eframe::App> = match decide_root(cc.window_handle().is_ok()) {
                RootInstall::Screen => Box::new(ScreenApp::with_variant(args.extended)),
                RootInstall::Blank => {
                    tracing::warn!("scene context exposes no window handle; leaving scene empty");
                    Box::new(BlankScene)
                }
            };
            Ok(app)
        }),
    )
}
