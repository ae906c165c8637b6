//! Publish-date control for the post editor.
//!
//! Collapsed, the control is a header describing when the post will go
//! out. Clicking the header expands an inline calendar; a click anywhere
//! else in the window, or choosing "Publish Immediately", collapses it.
//! Date changes are reported to the owning form through a callback.

mod state;

pub use state::{should_dismiss, PanelState};

use chrono::{DateTime, Local};
use egui::{Color32, Rect, RichText};

use crate::models::post::Post;
use crate::models::settings::DisplaySettings;
use crate::services::i18n::{Catalog, Translate};
use crate::services::post_status::{DateClassifier, PostClassifier, PublishStatus};
use crate::ui_egui::click_surface::ClickSurface;
use crate::ui_egui::date_picker::DatePicker;
use crate::utils::date::{calendar_format, format_post_date, parse_post_date, Clock, SystemClock};

const SCHEDULED_ACCENT: Color32 = Color32::from_rgb(70, 130, 200);
const BACK_DATED_ACCENT: Color32 = Color32::from_rgb(210, 140, 40);

/// Inputs supplied by the editor form on every frame
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishDateProps<'a> {
    pub post: Option<&'a Post>,
    /// Date currently selected in the form
    pub post_date: Option<&'a str>,
}

impl<'a> PublishDateProps<'a> {
    /// The day the picker highlights: the post's own date, else the form's
    pub fn selected_day(&self) -> Option<DateTime<Local>> {
        self.post
            .and_then(Post::publish_date)
            .or_else(|| self.post_date.and_then(|raw| parse_post_date(raw).ok()))
    }
}

/// What sits above the calendar in the expanded panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarHeader {
    /// Nothing scheduled yet
    Prompt(String),
    /// A date is set; offer to clear it
    ClearButton(String),
}

pub struct PublishDateControl {
    surface: ClickSurface,
    state: PanelState,
    picker: DatePicker,
    /// Outer rect of the control as of the last frame
    wrapper_rect: Option<Rect>,
    /// Frame number of the last `show`
    last_shown_frame: Option<u64>,
    settings: DisplaySettings,
    classifier: Box<dyn PostClassifier>,
    clock: Box<dyn Clock>,
    translator: Box<dyn Translate>,
}

impl PublishDateControl {
    pub fn new(
        id_source: impl std::hash::Hash,
        surface: ClickSurface,
        settings: DisplaySettings,
    ) -> Self {
        let translator = Catalog::new(settings.translations.clone());
        Self {
            surface,
            state: PanelState::Closed,
            picker: DatePicker::new(id_source, SystemClock.now()),
            wrapper_rect: None,
            last_shown_frame: None,
            settings,
            classifier: Box::new(DateClassifier::new(SystemClock)),
            clock: Box::new(SystemClock),
            translator: Box::new(translator),
        }
    }

    /// Use `clock` for the date predicates, relative formatting and the
    /// picker's initial month and time of day
    pub fn with_clock<C: Clock + Clone + 'static>(mut self, clock: C) -> Self {
        self.picker.reseed(clock.now());
        self.classifier = Box::new(DateClassifier::new(clock.clone()));
        self.clock = Box::new(clock);
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn PostClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_translator(mut self, translator: Box<dyn Translate>) -> Self {
        self.translator = translator;
        self
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn toggle(&mut self) {
        self.state.toggle(&self.surface);
        log::debug!(
            "Publish date panel {}",
            if self.is_open() { "opened" } else { "closed" }
        );
    }

    pub fn close(&mut self) {
        if self.is_open() {
            log::debug!("Publish date panel closed");
        }
        self.state.close();
    }

    /// Clear any explicit date and collapse the panel
    pub fn publish_immediately(&mut self, on_date_change: &mut dyn FnMut(Option<String>)) {
        log::info!("Publish date cleared; post will publish immediately");
        on_date_change(None);
        self.close();
    }

    /// Close the panel if any click since the last frame landed outside it
    pub fn handle_outside_clicks(&mut self) {
        let clicks = self.state.take_clicks();
        let Some(wrapper) = self.wrapper_rect else {
            return;
        };

        if clicks
            .iter()
            .any(|click| should_dismiss(click, wrapper, &self.picker))
        {
            log::debug!("Click outside publish date control");
            self.close();
        }
    }

    /// Release the click subscription; the control can be shown again later
    pub fn teardown(&mut self) {
        self.state.close();
        self.wrapper_rect = None;
        self.last_shown_frame = None;
    }

    pub fn status(&self, post: Option<&Post>) -> PublishStatus {
        PublishStatus::classify(self.classifier.as_ref(), post)
    }

    pub fn header_description(&self, post: Option<&Post>) -> String {
        self.translator.translate(self.status(post).label())
    }

    pub fn calendar_header(&self, post: Option<&Post>) -> CalendarHeader {
        let is_scheduled = self.classifier.is_future_dated(post);
        let is_back_dated = self.classifier.is_back_dated(post);

        if !is_scheduled && !is_back_dated {
            CalendarHeader::Prompt(self.translator.translate("Choose a date to schedule"))
        } else {
            CalendarHeader::ClearButton(self.translator.translate("Publish Immediately"))
        }
    }

    /// Relative timestamp shown next to the status for dated posts
    pub fn summary_timestamp(&self, props: &PublishDateProps<'_>) -> Option<String> {
        let dated = self.classifier.is_future_dated(props.post)
            || self.classifier.is_back_dated(props.post);
        if !dated {
            return None;
        }
        props
            .selected_day()
            .map(|date| calendar_format(date, self.clock.now(), &self.settings))
    }

    /// Render the control. Returns the response covering the whole control.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        props: PublishDateProps<'_>,
        mut on_date_change: impl FnMut(Option<String>),
    ) -> egui::Response {
        let frame_nr = ui.ctx().frame_nr();
        let shown_last_frame = self
            .last_shown_frame
            .is_some_and(|last| last + 1 == frame_nr);
        if shown_last_frame {
            self.handle_outside_clicks();
        } else {
            // The wrapper rect predates the frames the control sat out
            let stale = self.state.take_clicks();
            if !stale.is_empty() {
                log::debug!("Discarded {} clicks queued while hidden", stale.len());
            }
        }
        self.last_shown_frame = Some(frame_nr);

        let frame = if self.is_open() {
            egui::Frame::group(ui.style())
                .fill(ui.visuals().faint_bg_color)
                .stroke(ui.visuals().widgets.active.bg_stroke)
        } else {
            egui::Frame::group(ui.style())
        };

        let inner = frame.show(ui, |ui| {
            ui.vertical(|ui| {
                if self.render_header(ui, &props).clicked() {
                    self.toggle();
                }
                if self.is_open() {
                    ui.add_space(6.0);
                    self.render_schedule(ui, &props, &mut on_date_change);
                }
            });
        });

        self.wrapper_rect = Some(inner.response.rect);
        inner.response
    }

    fn render_header(&self, ui: &mut egui::Ui, props: &PublishDateProps<'_>) -> egui::Response {
        let accent = if self.classifier.is_future_dated(props.post) {
            Some(SCHEDULED_ACCENT)
        } else if self.classifier.is_back_dated(props.post) {
            Some(BACK_DATED_ACCENT)
        } else {
            None
        };

        let mut description = RichText::new(self.header_description(props.post)).strong();
        if let Some(color) = accent {
            description = description.color(color);
        }

        let inner = ui.horizontal(|ui| {
            ui.add(egui::Label::new(RichText::new("📅").size(18.0)).selectable(false));
            ui.vertical(|ui| {
                ui.add(egui::Label::new(description).selectable(false));
                if let Some(timestamp) = self.summary_timestamp(props) {
                    ui.add(egui::Label::new(RichText::new(timestamp).small()).selectable(false));
                }
            });
        });

        inner
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
    }

    fn render_schedule(
        &mut self,
        ui: &mut egui::Ui,
        props: &PublishDateProps<'_>,
        on_date_change: &mut dyn FnMut(Option<String>),
    ) {
        match self.calendar_header(props.post) {
            CalendarHeader::Prompt(text) => {
                ui.label(RichText::new(text).weak());
            }
            CalendarHeader::ClearButton(text) => {
                if ui.add(egui::Button::new(text).frame(false)).clicked() {
                    self.publish_immediately(on_date_change);
                    return;
                }
            }
        }

        let now = self.clock.now();
        if let Some(date) = self.picker.show(ui, props.selected_day(), now, false) {
            on_date_change(Some(format_post_date(date)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::post::PostStatus;
    use crate::services::post_status::MockPostClassifier;
    use crate::ui_egui::click_surface::ClickEvent;
    use crate::utils::date::FixedClock;
    use egui::Pos2;
    use std::cell::RefCell;

    fn fixed_now() -> DateTime<Local> {
        parse_post_date("2024-12-04 12:00").unwrap()
    }

    fn control(surface: &ClickSurface) -> PublishDateControl {
        PublishDateControl::new("publish_date", surface.clone(), DisplaySettings::default())
            .with_clock(FixedClock(fixed_now()))
    }

    fn classifier(future: bool, back: bool, published: bool) -> Box<dyn PostClassifier> {
        let mut mock = MockPostClassifier::new();
        mock.expect_is_future_dated().return_const(future);
        mock.expect_is_back_dated().return_const(back);
        mock.expect_is_published().return_const(published);
        Box::new(mock)
    }

    fn render(
        ctx: &egui::Context,
        control: &mut PublishDateControl,
        post: &Post,
        changes: &RefCell<Vec<Option<String>>>,
    ) {
        render_events(ctx, control, post, changes, Vec::new());
    }

    /// Run one host frame: pump clicks, then show the control
    fn render_events(
        ctx: &egui::Context,
        control: &mut PublishDateControl,
        post: &Post,
        changes: &RefCell<Vec<Option<String>>>,
        events: Vec<egui::Event>,
    ) {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            control.surface.pump(ctx);
            egui::CentralPanel::default().show(ctx, |ui| {
                let props = PublishDateProps {
                    post: Some(post),
                    post_date: post.date.as_deref(),
                };
                control.show(ui, props, |date| changes.borrow_mut().push(date));
            });
        });
    }

    #[test]
    fn test_header_click_toggles_listener() {
        let surface = ClickSurface::new();
        let mut control = control(&surface);
        assert!(!control.is_open());
        assert_eq!(surface.listener_count(), 0);

        control.toggle();
        assert!(control.is_open());
        assert_eq!(surface.listener_count(), 1);

        control.toggle();
        assert!(!control.is_open());
        assert_eq!(surface.listener_count(), 0);
    }

    #[test]
    fn test_publish_immediately_from_any_state() {
        let surface = ClickSurface::new();
        let mut control = control(&surface);

        for start_open in [true, false] {
            if start_open {
                control.toggle();
            }
            let mut reported = Vec::new();
            control.publish_immediately(&mut |date| reported.push(date));
            assert_eq!(reported, vec![None]);
            assert!(!control.is_open());
            assert_eq!(surface.listener_count(), 0);
        }
    }

    #[test]
    fn test_teardown_and_drop_release_listener() {
        let surface = ClickSurface::new();
        let mut control = control(&surface);
        control.toggle();
        control.teardown();
        assert_eq!(surface.listener_count(), 0);

        control.toggle();
        assert_eq!(surface.listener_count(), 1);
        drop(control);
        assert_eq!(surface.listener_count(), 0);
    }

    #[test]
    fn test_header_description_follows_classifier() {
        let surface = ClickSurface::new();
        let cases = [
            ((true, false, true), "Scheduled"),
            ((true, false, false), "Schedule"),
            ((false, true, true), "Published"),
            ((false, true, false), "Backdate"),
            ((false, false, true), "Publish Immediately"),
        ];
        for ((future, back, published), expected) in cases {
            let control = control(&surface).with_classifier(classifier(future, back, published));
            assert_eq!(control.header_description(None), expected);
        }
    }

    #[test]
    fn test_header_description_is_translated() {
        let surface = ClickSurface::new();
        let mut settings = DisplaySettings::default();
        settings
            .translations
            .insert("Publish Immediately".to_string(), "Publier immédiatement".to_string());
        let control = PublishDateControl::new("publish_date", surface, settings);
        assert_eq!(control.header_description(None), "Publier immédiatement");
    }

    #[test]
    fn test_custom_translator() {
        struct Shout;
        impl Translate for Shout {
            fn translate(&self, text: &str) -> String {
                text.to_uppercase()
            }
        }

        let surface = ClickSurface::new();
        let control = control(&surface)
            .with_classifier(classifier(false, true, false))
            .with_translator(Box::new(Shout));
        assert_eq!(control.header_description(None), "BACKDATE");
    }

    #[test]
    fn test_calendar_header() {
        let surface = ClickSurface::new();
        let undated = control(&surface).with_classifier(classifier(false, false, false));
        assert_eq!(
            undated.calendar_header(None),
            CalendarHeader::Prompt("Choose a date to schedule".to_string())
        );

        let dated = control(&surface).with_classifier(classifier(false, true, false));
        assert_eq!(
            dated.calendar_header(None),
            CalendarHeader::ClearButton("Publish Immediately".to_string())
        );
    }

    #[test]
    fn test_summary_timestamp_for_scheduled_post() {
        let surface = ClickSurface::new();
        let control = control(&surface);
        let post = Post::new("Tomorrow")
            .with_status(PostStatus::Draft)
            .with_date("2024-12-05 10:00");
        let props = PublishDateProps {
            post: Some(&post),
            post_date: None,
        };
        assert_eq!(control.status(Some(&post)), PublishStatus::Schedule);
        assert_eq!(
            control.summary_timestamp(&props).as_deref(),
            Some("Tomorrow at 10:00 AM")
        );
    }

    #[test]
    fn test_summary_timestamp_absent_for_undated_post() {
        let surface = ClickSurface::new();
        let control = control(&surface);
        let post = Post::new("Draft");
        let props = PublishDateProps {
            post: Some(&post),
            post_date: None,
        };
        assert_eq!(control.summary_timestamp(&props), None);
    }

    #[test]
    fn test_selected_day_falls_back_to_form_date() {
        let post = Post::new("Draft");
        let props = PublishDateProps {
            post: Some(&post),
            post_date: Some("2025-01-02 09:00"),
        };
        assert_eq!(props.selected_day(), Some(parse_post_date("2025-01-02 09:00").unwrap()));
        assert_eq!(PublishDateProps::default().selected_day(), None);
    }

    #[test]
    fn test_outside_click_closes_open_panel() {
        let ctx = egui::Context::default();
        let surface = ClickSurface::new();
        let mut control = control(&surface);
        let post = Post::new("Later").with_date("2024-12-20 10:00");
        let changes = RefCell::new(Vec::new());

        control.toggle();
        render(&ctx, &mut control, &post, &changes);
        let wrapper = control.wrapper_rect.unwrap();

        // Inside the control: stays open
        surface.publish(ClickEvent {
            pos: wrapper.center(),
        });
        control.handle_outside_clicks();
        assert!(control.is_open());

        // Far outside: closes and drops the listener
        surface.publish(ClickEvent {
            pos: wrapper.right_bottom() + egui::vec2(50.0, 50.0),
        });
        control.handle_outside_clicks();
        assert!(!control.is_open());
        assert_eq!(surface.listener_count(), 0);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_click_on_day_cell_keeps_panel_open() {
        let ctx = egui::Context::default();
        let surface = ClickSurface::new();
        let mut control = control(&surface);
        let post = Post::new("Later").with_date("2024-12-20 10:00");
        let changes = RefCell::new(Vec::new());

        control.toggle();
        render(&ctx, &mut control, &post, &changes);
        let cell = control.picker.day_cells()[3];

        // Pretend the day grid re-laid itself out beyond the wrapper
        control.wrapper_rect = Some(Rect::from_min_size(
            Pos2::new(-500.0, -500.0),
            egui::vec2(1.0, 1.0),
        ));
        surface.publish(ClickEvent { pos: cell.center() });
        control.handle_outside_clicks();
        assert!(control.is_open());
    }

    fn press(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_with_clock_seeds_picker() {
        let surface = ClickSurface::new();
        let control = control(&surface);
        assert_eq!(control.picker.viewing_month(), fixed_now().date_naive());
        assert_eq!(control.picker.time_of_day(), fixed_now().time());
    }

    #[test]
    fn test_drag_ending_outside_keeps_panel_open() {
        let ctx = egui::Context::default();
        let surface = ClickSurface::new();
        let mut control = control(&surface);
        let post = Post::new("Later").with_date("2024-12-20 10:00");
        let changes = RefCell::new(Vec::new());

        control.toggle();
        render(&ctx, &mut control, &post, &changes);
        let outside = control.wrapper_rect.unwrap().right_bottom() + egui::vec2(50.0, 50.0);
        let far = outside + egui::vec2(200.0, 0.0);

        render_events(
            &ctx,
            &mut control,
            &post,
            &changes,
            vec![egui::Event::PointerMoved(outside), press(outside, true)],
        );
        render_events(&ctx, &mut control, &post, &changes, vec![egui::Event::PointerMoved(far)]);
        render_events(&ctx, &mut control, &post, &changes, vec![press(far, false)]);
        assert!(control.is_open());

        // A plain click in the same spot still dismisses
        render_events(
            &ctx,
            &mut control,
            &post,
            &changes,
            vec![
                egui::Event::PointerMoved(far),
                press(far, true),
                press(far, false),
            ],
        );
        assert!(!control.is_open());
    }

    #[test]
    fn test_clicks_queued_while_hidden_are_discarded() {
        let ctx = egui::Context::default();
        let surface = ClickSurface::new();
        let mut control = control(&surface);
        let post = Post::new("Later").with_date("2024-12-20 10:00");
        let changes = RefCell::new(Vec::new());

        control.toggle();
        render(&ctx, &mut control, &post, &changes);
        let outside = control.wrapper_rect.unwrap().right_bottom() + egui::vec2(50.0, 50.0);

        // The host skips the control for a few frames while clicks arrive
        for _ in 0..3 {
            let _ = ctx.run(egui::RawInput::default(), |_| {});
            surface.publish(ClickEvent { pos: outside });
        }
        render(&ctx, &mut control, &post, &changes);
        assert!(control.is_open());
        assert!(control.state.take_clicks().is_empty());

        surface.publish(ClickEvent { pos: outside });
        render(&ctx, &mut control, &post, &changes);
        assert!(!control.is_open());
    }

    #[test]
    fn test_render_closed_registers_nothing() {
        let ctx = egui::Context::default();
        let surface = ClickSurface::new();
        let mut control = control(&surface);
        let post = Post::new("Draft");
        let changes = RefCell::new(Vec::new());

        render(&ctx, &mut control, &post, &changes);
        assert!(!control.is_open());
        assert!(control.wrapper_rect.is_some());
        assert_eq!(surface.listener_count(), 0);
    }
}
