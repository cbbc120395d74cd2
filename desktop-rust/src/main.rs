mod app;
mod io;
mod model;
mod worker;

use app::DesktopApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "sar-detect Viewer",
        options,
        Box::new(|_cc| Box::new(DesktopApp::default())),
    )
}
