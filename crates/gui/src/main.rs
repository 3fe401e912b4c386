//! PlaceMap Desktop GUI
//!
//! Map viewer that searches for local places and pins them on an
//! OpenStreetMap basemap.

mod app;
mod dock;
mod panels;
mod render;
mod state;

use app::PlaceMapApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PlaceMap")
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 520.0]),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "PlaceMap",
        native_options,
        Box::new(|cc| Ok(Box::new(PlaceMapApp::new(cc)))),
    )
}
