mod app;
pub mod click_surface;
pub mod date_picker;
pub mod publish_date;

pub use app::PostEditorApp;
