use egui::Rect;

use crate::ui_egui::click_surface::{ClickEvent, ClickSubscription, ClickSurface};
use crate::ui_egui::date_picker::PickerHitTest;

/// Whether the schedule panel is expanded. Only the open state holds a
/// click subscription, so leaving it (or dropping the state) releases it.
#[derive(Debug, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open { subscription: ClickSubscription },
}

impl PanelState {
    pub fn is_open(&self) -> bool {
        matches!(self, PanelState::Open { .. })
    }

    pub fn open(&mut self, surface: &ClickSurface) {
        if !self.is_open() {
            *self = PanelState::Open {
                subscription: surface.subscribe(),
            };
        }
    }

    pub fn close(&mut self) {
        *self = PanelState::Closed;
    }

    pub fn toggle(&mut self, surface: &ClickSurface) {
        if self.is_open() {
            self.close();
        } else {
            self.open(surface);
        }
    }

    /// Clicks seen since the last call; always empty while closed
    pub fn take_clicks(&self) -> Vec<ClickEvent> {
        match self {
            PanelState::Open { subscription } => subscription.drain(),
            PanelState::Closed => Vec::new(),
        }
    }
}

/// A click dismisses the panel unless it landed inside the control or on
/// one of the picker's day cells.
pub fn should_dismiss(click: &ClickEvent, wrapper: Rect, picker: &dyn PickerHitTest) -> bool {
    !wrapper.contains(click.pos) && !picker.owns_point(click.pos)
}
