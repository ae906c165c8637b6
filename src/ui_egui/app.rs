use crate::models::post::{Post, PostStatus};
use crate::models::settings::DisplaySettings;
use crate::ui_egui::click_surface::ClickSurface;
use crate::ui_egui::publish_date::{PublishDateControl, PublishDateProps};
use crate::utils::date::{format_post_date, Clock, SystemClock};

const MIN_ROOT_WIDTH: f32 = 320.0;
const MIN_ROOT_HEIGHT: f32 = 220.0;

/// Minimal post editor hosting the publish-date control
pub struct PostEditorApp {
    post: Post,
    surface: ClickSurface,
    publish_date: PublishDateControl,
}

impl eframe::App for PostEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Feed this frame's clicks to open panels before anything renders
        self.surface.pump(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.set_min_size(egui::vec2(MIN_ROOT_WIDTH, MIN_ROOT_HEIGHT));
            self.render_editor(ui);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.publish_date.teardown();
        log::info!("Post editor closed");
    }
}

impl PostEditorApp {
    pub fn new(post: Post, settings: DisplaySettings) -> Self {
        let surface = ClickSurface::new();
        let publish_date = PublishDateControl::new("publish_date", surface.clone(), settings);
        Self {
            post,
            surface,
            publish_date,
        }
    }

    pub fn post(&self) -> &Post {
        &self.post
    }

    pub fn surface(&self) -> &ClickSurface {
        &self.surface
    }

    /// Date-change callback target: store the new date and mark the post edited
    pub fn set_post_date(&mut self, date: Option<String>) {
        log::info!(
            "Post date set to {}",
            date.as_deref().unwrap_or("immediately")
        );
        self.post.date = date;
        self.post.modified = Some(format_post_date(SystemClock.now()));
    }

    fn render_editor(&mut self, ui: &mut egui::Ui) {
        ui.heading("Edit Post");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Title:");
            ui.text_edit_singleline(&mut self.post.title);
        });

        ui.horizontal(|ui| {
            ui.label("Status:");
            egui::ComboBox::from_id_source("post_status")
                .selected_text(self.post.status.as_str())
                .show_ui(ui, |ui| {
                    for status in PostStatus::ALL {
                        ui.selectable_value(&mut self.post.status, status, status.as_str());
                    }
                });
        });

        ui.add_space(12.0);

        let mut changed: Option<Option<String>> = None;
        let props = PublishDateProps {
            post: Some(&self.post),
            post_date: self.post.date.as_deref(),
        };
        self.publish_date
            .show(ui, props, |date| changed = Some(date));

        if let Some(date) = changed {
            self.set_post_date(date);
        }
    }
}
