mod app;
mod canvas;
mod ocr_flow;

use eframe::egui;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{e}");
    }
}

fn run() -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("OCR Scanner")
            .with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "OCR Scanner",
        options,
        Box::new(|cc| Ok(Box::new(app::ScanlensApp::new(cc)))),
    )
}
