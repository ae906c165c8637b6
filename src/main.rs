// Post editor with publish-date control
// Main entry point

use std::path::PathBuf;

use publish_date::models::post::Post;
use publish_date::services::settings::SettingsService;
use publish_date::ui_egui::PostEditorApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting post editor");

    let settings_service = SettingsService::from_default_location();
    let settings = settings_service.load_or_default();
    log::info!("Loaded settings from {}", settings_service.path().display());

    let post = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Post::load(&path).unwrap_or_else(|err| {
            log::error!("Failed to load post: {err:?}");
            Post::new("Untitled")
        }),
        None => Post::new("Untitled"),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 560.0])
            .with_min_inner_size([320.0, 220.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Post Editor",
        options,
        Box::new(move |_cc| Ok(Box::new(PostEditorApp::new(post, settings)))),
    )
}
