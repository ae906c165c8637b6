//! App-wide click stream.
//!
//! The host pumps every primary-button click into the surface once per
//! frame. Widgets that care about clicks landing anywhere in the window
//! hold a [`ClickSubscription`]; clicks queue in its inbox until drained,
//! and dropping the subscription unregisters it.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};

use egui::Pos2;

/// Clicks an unattended inbox keeps before dropping the oldest
pub const MAX_PENDING_CLICKS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    pub pos: Pos2,
}

#[derive(Default)]
struct SurfaceInner {
    next_id: u64,
    listeners: BTreeMap<u64, VecDeque<ClickEvent>>,
}

/// Shared handle to the click stream; clones point at the same surface
#[derive(Clone, Default)]
pub struct ClickSurface {
    inner: Rc<RefCell<SurfaceInner>>,
}

impl ClickSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every click published from now on
    pub fn subscribe(&self) -> ClickSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, VecDeque::new());
        log::trace!("Click listener {} registered", id);

        ClickSubscription {
            id,
            surface: Rc::downgrade(&self.inner),
        }
    }

    pub fn publish(&self, event: ClickEvent) {
        for inbox in self.inner.borrow_mut().listeners.values_mut() {
            if inbox.len() >= MAX_PENDING_CLICKS {
                inbox.pop_front();
            }
            inbox.push_back(event);
        }
    }

    /// Publish the primary-button clicks of the current frame. Releases
    /// that end a drag or a long press are not clicks and are skipped.
    pub fn pump(&self, ctx: &egui::Context) {
        let releases: Vec<Pos2> = ctx.input(|input| {
            if !input.pointer.could_any_button_be_click() {
                return Vec::new();
            }
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::PointerButton {
                        pos,
                        button: egui::PointerButton::Primary,
                        pressed: false,
                        ..
                    } => Some(*pos),
                    _ => None,
                })
                .collect()
        });

        for pos in releases {
            self.publish(ClickEvent { pos });
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl fmt::Debug for ClickSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickSurface")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Live registration on a [`ClickSurface`]; unregisters on drop
pub struct ClickSubscription {
    id: u64,
    surface: Weak<RefCell<SurfaceInner>>,
}

impl ClickSubscription {
    /// Take every click queued since the last drain
    pub fn drain(&self) -> Vec<ClickEvent> {
        let Some(surface) = self.surface.upgrade() else {
            return Vec::new();
        };
        let mut inner = surface.borrow_mut();
        let clicks = match inner.listeners.get_mut(&self.id) {
            Some(inbox) => inbox.drain(..).collect(),
            None => Vec::new(),
        };
        clicks
    }
}

impl Drop for ClickSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.surface.upgrade() {
            inner.borrow_mut().listeners.remove(&self.id);
            log::trace!("Click listener {} released", self.id);
        }
    }
}

impl fmt::Debug for ClickSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickSubscription")
            .field("id", &self.id)
            .finish()
    }
}
