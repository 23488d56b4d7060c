#![windows_subsystem = "windows"]

mod app;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([600.0, 900.0])
        .with_min_inner_size([480.0, 640.0])
        .with_title("Country Explorer with Flags");

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Country Explorer with Flags",
        options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc)))),
    )
}
