use anyhow::Context;
use eframe::egui;
use scribble_notes::app::NotesApp;
use scribble_notes::{Config, FileStore, logging};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log_filter);

    let storage = FileStore::open(config.data_dir.clone())
        .with_context(|| format!("cannot open data directory {}", config.data_dir.display()))?;
    info!(data_dir = %storage.dir().display(), "starting");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Scribble Notes",
        options,
        Box::new(move |cc| Ok(Box::new(NotesApp::new(cc, &config, storage)))),
    )
    .map_err(|err| anyhow::anyhow!("window error: {err}"))
}
