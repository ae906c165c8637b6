//! Inline calendar picker used by the publish-date control.
//!
//! Renders month navigation, a day grid and a time-of-day editor, with an
//! optional free-text date input. The picker remembers where its day cells
//! were drawn so containers can ask whether a click landed on one.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, Timelike};
use egui::{Color32, Pos2, Rect, RichText};

use crate::utils::date::{local_from_naive, parse_post_date, shift_month};

const GRID_DAYS: usize = 6 * 7;

/// Lets a container ask whether a point belongs to a sub-widget's
/// interactive surface, even after the sub-widget re-laid itself out.
pub trait PickerHitTest {
    fn owns_point(&self, pos: Pos2) -> bool;
}

pub struct DatePicker {
    id_source: egui::Id,
    /// Month being displayed
    viewing: NaiveDate,
    /// Time of day applied to picked days
    time: NaiveTime,
    /// Day cell rectangles from the most recent frame
    day_cells: Vec<Rect>,
    chrono_input: String,
    chrono_error: bool,
    /// Selection the view was last synced to
    synced_with: Option<DateTime<Local>>,
}

impl DatePicker {
    pub fn new(id_source: impl std::hash::Hash, now: DateTime<Local>) -> Self {
        Self {
            id_source: egui::Id::new(id_source),
            viewing: now.date_naive(),
            time: truncate_to_minute(now.time()),
            day_cells: Vec::new(),
            chrono_input: String::new(),
            chrono_error: false,
            synced_with: None,
        }
    }

    pub fn viewing_month(&self) -> NaiveDate {
        self.viewing
    }

    pub fn time_of_day(&self) -> NaiveTime {
        self.time
    }

    /// Point the view at `now`, unless a selection already drives it
    pub fn reseed(&mut self, now: DateTime<Local>) {
        if self.synced_with.is_none() {
            self.viewing = now.date_naive();
            self.time = truncate_to_minute(now.time());
        }
    }

    /// Day cell rectangles laid out in the most recent frame
    pub fn day_cells(&self) -> &[Rect] {
        &self.day_cells
    }

    /// Follow an externally changed selection
    fn sync(&mut self, selected: Option<DateTime<Local>>) {
        if self.synced_with == selected {
            return;
        }
        if let Some(date) = selected {
            self.viewing = date.date_naive();
            self.time = truncate_to_minute(date.time());
            self.chrono_input = date.format("%Y-%m-%d %H:%M").to_string();
        }
        self.chrono_error = false;
        self.synced_with = selected;
    }

    /// Combine a picked day with the current time of day
    pub fn compose(&self, day: NaiveDate) -> Option<DateTime<Local>> {
        let composed = local_from_naive(day.and_time(self.time));
        if composed.is_none() {
            log::warn!("{} {} does not exist in the local time zone", day, self.time);
        }
        composed
    }

    /// Render the picker. Returns the newly chosen instant, if any.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        selected: Option<DateTime<Local>>,
        now: DateTime<Local>,
        show_input_chrono: bool,
    ) -> Option<DateTime<Local>> {
        self.sync(selected);
        self.day_cells.clear();

        let today = now.date_naive();
        let selected_day = selected.map(|date| date.date_naive());
        let mut picked: Option<DateTime<Local>> = None;

        ui.vertical(|ui| {
            ui.set_max_width(220.0);

            if show_input_chrono {
                if let Some(date) = self.render_chrono_input(ui) {
                    picked = Some(date);
                }
                ui.add_space(4.0);
            }

            self.render_month_header(ui, today);
            ui.separator();

            if let Some(day) = self.render_day_grid(ui, selected_day, today) {
                picked = self.compose(day).or(picked);
            }

            ui.separator();

            if self.render_time_editor(ui) {
                if let Some(day) = selected_day {
                    picked = self.compose(day).or(picked);
                }
            }
        });

        if let Some(date) = picked {
            log::debug!("Date picker selected {}", date);
            self.synced_with = Some(date);
        }
        picked
    }

    fn render_month_header(&mut self, ui: &mut egui::Ui, today: NaiveDate) {
        ui.horizontal(|ui| {
            if ui.small_button("◀◀").on_hover_text("Previous year").clicked() {
                self.viewing = shift_month(self.viewing, -12);
            }
            if ui.small_button("◀").on_hover_text("Previous month").clicked() {
                self.viewing = shift_month(self.viewing, -1);
            }

            let header = self.viewing.format("%b %Y").to_string();
            ui.add_space(4.0);
            if ui
                .selectable_label(false, &header)
                .on_hover_text("Go to today")
                .clicked()
            {
                self.viewing = today;
            }
            ui.add_space(4.0);

            if ui.small_button("▶").on_hover_text("Next month").clicked() {
                self.viewing = shift_month(self.viewing, 1);
            }
            if ui.small_button("▶▶").on_hover_text("Next year").clicked() {
                self.viewing = shift_month(self.viewing, 12);
            }
        });
    }

    fn render_day_grid(
        &mut self,
        ui: &mut egui::Ui,
        selected_day: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        let mut clicked_day = None;
        let day_names = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

        egui::Grid::new(self.id_source.with("day_grid"))
            .num_columns(7)
            .spacing([2.0, 2.0])
            .min_col_width(22.0)
            .show(ui, |ui| {
                for name in &day_names {
                    ui.label(RichText::new(*name).small().strong());
                }
                ui.end_row();

                for current in month_grid(self.viewing) {
                    let is_current_month = current.month() == self.viewing.month();
                    let day_str = current.day().to_string();

                    let text = if current == today {
                        RichText::new(&day_str)
                            .strong()
                            .color(Color32::from_rgb(50, 150, 50))
                    } else if !is_current_month {
                        RichText::new(&day_str).weak()
                    } else {
                        RichText::new(&day_str)
                    };

                    let response = ui.selectable_label(selected_day == Some(current), text);
                    self.day_cells.push(response.rect);
                    if response.clicked() {
                        clicked_day = Some(current);
                    }

                    if current.weekday() == chrono::Weekday::Sat {
                        ui.end_row();
                    }
                }
            });

        clicked_day
    }

    /// Returns true when the time of day changed
    fn render_time_editor(&mut self, ui: &mut egui::Ui) -> bool {
        let mut hour = self.time.hour();
        let mut minute = self.time.minute();

        ui.horizontal(|ui| {
            ui.label("Time:");
            ui.add(
                egui::DragValue::new(&mut hour)
                    .range(0..=23)
                    .custom_formatter(|n, _| format!("{:02}", n as u32)),
            );
            ui.label(":");
            ui.add(
                egui::DragValue::new(&mut minute)
                    .range(0..=59)
                    .custom_formatter(|n, _| format!("{:02}", n as u32)),
            );
        });

        match NaiveTime::from_hms_opt(hour, minute, 0) {
            Some(new_time) if new_time != self.time => {
                self.time = new_time;
                true
            }
            _ => false,
        }
    }

    fn render_chrono_input(&mut self, ui: &mut egui::Ui) -> Option<DateTime<Local>> {
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.chrono_input)
                .hint_text("YYYY-MM-DD HH:MM")
                .desired_width(200.0),
        );

        let mut parsed = None;
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            match parse_post_date(&self.chrono_input) {
                Ok(date) => {
                    self.chrono_error = false;
                    self.viewing = date.date_naive();
                    self.time = truncate_to_minute(date.time());
                    parsed = Some(date);
                }
                Err(err) => {
                    log::debug!("Rejected typed date: {}", err);
                    self.chrono_error = true;
                }
            }
        }

        if self.chrono_error {
            ui.label(
                RichText::new("Unrecognized date")
                    .color(Color32::from_rgb(200, 80, 80))
                    .small(),
            );
        }
        parsed
    }
}

impl PickerHitTest for DatePicker {
    fn owns_point(&self, pos: Pos2) -> bool {
        self.day_cells.iter().any(|cell| cell.contains(pos))
    }
}

/// Days shown for a month: six full weeks starting on the Sunday on or
/// before the 1st, so the grid keeps the same size from month to month.
pub fn month_grid(viewing: NaiveDate) -> Vec<NaiveDate> {
    let first_of_month = viewing.with_day(1).unwrap_or(viewing);
    let lead = first_of_month.weekday().num_days_from_sunday() as i64;
    let grid_start = first_of_month - chrono::Duration::days(lead);

    grid_start.iter_days().take(GRID_DAYS).collect()
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
