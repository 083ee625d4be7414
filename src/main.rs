use clap::Parser;
use eframe::egui;

use pixedit::app::PixEditApp;
use pixedit::config::APP_TITLE;
use pixedit::{cli, logger};

fn main() -> Result<(), eframe::Error> {
    // -- CLI / headless mode ---------------------------------------------
    if cli::is_cli_mode() {
        let args = cli::CliArgs::parse();
        let ok = cli::run(args);
        std::process::exit(if ok { 0 } else { 1 });
    }

    // -- GUI mode --------------------------------------------------------

    // Session log (overwrites the previous session's log)
    logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 560.0])
            .with_resizable(false)
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(|cc| Box::new(PixEditApp::new(cc))),
    )
}
